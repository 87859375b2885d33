use anyhow::{Context, Result};
use clap::Parser;
use optimizer_config::{ConfigLoader, OptimizerConfig};
use optimizer_service::{
	api::{self, AppState},
	cli::{Args, Command},
};
use std::path::Path;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
	let args = Args::parse();

	match args.command.clone().unwrap_or(Command::Start) {
		Command::Start => start_service(&args).await,
		Command::Validate => validate_config(&args),
		Command::GenerateConfig { output } => generate_config(&args, &output),
	}
}

async fn start_service(args: &Args) -> Result<()> {
	let config = load_config(args)?;
	let level = args
		.log_level
		.clone()
		.unwrap_or_else(|| config.logging.level.clone());
	setup_tracing(&level, config.logging.json)?;

	info!("Starting load optimizer service");
	info!("HTTP address: {}", config.server.bind_address());
	info!(
		"Result cache: capacity {}, TTL {}s",
		config.cache.capacity, config.cache.ttl_secs
	);

	let state = AppState::from_config(&config);
	let purge = state.engine.spawn_purge_task(config.cache.ttl());

	let served = api::start_http_server(&config.server, state, setup_shutdown_signal()).await;
	purge.abort();
	served.context("HTTP server failed")?;

	info!("Load optimizer service stopped");
	Ok(())
}

fn validate_config(args: &Args) -> Result<()> {
	setup_tracing(args.log_level.as_deref().unwrap_or("info"), false)?;

	let config = load_config(args)?;

	info!("Configuration is valid");
	info!("HTTP address: {}", config.server.bind_address());
	info!("Request timeout: {}s", config.server.request_timeout_secs);
	info!("Max body size: {} bytes", config.server.max_body_bytes);
	info!(
		"Result cache: capacity {}, TTL {}s",
		config.cache.capacity, config.cache.ttl_secs
	);

	Ok(())
}

fn generate_config(args: &Args, output: &Path) -> Result<()> {
	setup_tracing(args.log_level.as_deref().unwrap_or("info"), false)?;

	let rendered = ConfigLoader::to_toml(&OptimizerConfig::default())?;
	std::fs::write(output, rendered)
		.with_context(|| format!("Failed to write config file: {:?}", output))?;

	info!("Wrote default configuration to {:?}", output);
	Ok(())
}

fn load_config(args: &Args) -> Result<OptimizerConfig> {
	let config = match &args.config {
		Some(path) => ConfigLoader::from_env_and_file(Some(path.as_path())),
		None => optimizer_config::load_config(),
	};
	config.context("Failed to load configuration")
}

fn setup_tracing(log_level: &str, json: bool) -> Result<()> {
	let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

	let registry = tracing_subscriber::registry().with(env_filter);
	let installed = if json {
		registry
			.with(tracing_subscriber::fmt::layer().json())
			.try_init()
	} else {
		registry.with(tracing_subscriber::fmt::layer()).try_init()
	};
	installed.context("Failed to initialize tracing")
}

async fn setup_shutdown_signal() {
	let ctrl_c = async {
		signal::ctrl_c()
			.await
			.expect("failed to install Ctrl+C handler");
	};

	#[cfg(unix)]
	let terminate = async {
		signal::unix::signal(signal::unix::SignalKind::terminate())
			.expect("failed to install signal handler")
			.recv()
			.await;
	};

	#[cfg(not(unix))]
	let terminate = std::future::pending::<()>();

	tokio::select! {
		_ = ctrl_c => {},
		_ = terminate => {},
	}

	info!("Shutdown signal received, draining connections");
}
