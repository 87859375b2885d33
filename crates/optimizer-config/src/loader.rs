//! Configuration loading from files and environment.

use crate::types::*;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, info};

/// Prefix shared by every environment override.
pub const ENV_PREFIX: &str = "OPTIMIZER_";

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
	/// Load configuration from file
	pub fn from_file<P: AsRef<Path>>(path: P) -> Result<OptimizerConfig> {
		let path = path.as_ref();
		info!("Loading configuration from {:?}", path);

		let contents = std::fs::read_to_string(path)
			.with_context(|| format!("Failed to read config file: {:?}", path))?;

		let config = match path.extension().and_then(|s| s.to_str()) {
			Some("toml") => Self::from_toml(&contents)?,
			Some("json") => Self::from_json(&contents)?,
			Some("yaml") | Some("yml") => Self::from_yaml(&contents)?,
			_ => anyhow::bail!("Unsupported config format: {:?}", path),
		};

		Self::validate_config(&config)?;
		Ok(config)
	}

	/// Load from TOML string
	pub fn from_toml(contents: &str) -> Result<OptimizerConfig> {
		toml::from_str(contents).map_err(|e| anyhow::anyhow!("Failed to parse TOML: {}", e))
	}

	/// Load from JSON string
	pub fn from_json(contents: &str) -> Result<OptimizerConfig> {
		serde_json::from_str(contents).context("Failed to parse JSON")
	}

	/// Load from YAML string
	pub fn from_yaml(contents: &str) -> Result<OptimizerConfig> {
		serde_yaml::from_str(contents).context("Failed to parse YAML")
	}

	/// Render a configuration as TOML
	pub fn to_toml(config: &OptimizerConfig) -> Result<String> {
		toml::to_string_pretty(config).context("Failed to render TOML")
	}

	/// Load from environment variables with optional file override
	pub fn from_env_and_file(file_path: Option<&Path>) -> Result<OptimizerConfig> {
		let mut config = if let Some(path) = file_path {
			Self::from_file(path)?
		} else {
			OptimizerConfig::default()
		};

		Self::apply_overrides(&mut config, |name| std::env::var(name).ok())?;

		Self::validate_config(&config)?;
		Ok(config)
	}

	/// Apply overrides looked up by variable name.
	///
	/// `lookup` receives full names such as `OPTIMIZER_PORT`.
	pub fn apply_overrides<F>(config: &mut OptimizerConfig, lookup: F) -> Result<()>
	where
		F: Fn(&str) -> Option<String>,
	{
		let var = |suffix: &str| {
			let name = format!("{}{}", ENV_PREFIX, suffix);
			lookup(&name).map(|value| (name, value))
		};

		if let Some((name, host)) = var("HOST") {
			debug!("Overriding host from {}", name);
			config.server.host = host;
		}

		if let Some((name, port)) = var("PORT") {
			debug!("Overriding port from {}", name);
			config.server.port = port
				.parse()
				.with_context(|| format!("Invalid {}: {}", name, port))?;
		}

		if let Some((name, capacity)) = var("CACHE_CAPACITY") {
			debug!("Overriding cache capacity from {}", name);
			config.cache.capacity = capacity
				.parse()
				.with_context(|| format!("Invalid {}: {}", name, capacity))?;
		}

		if let Some((name, ttl)) = var("CACHE_TTL_SECS") {
			debug!("Overriding cache TTL from {}", name);
			config.cache.ttl_secs = ttl
				.parse()
				.with_context(|| format!("Invalid {}: {}", name, ttl))?;
		}

		if let Some((name, level)) = var("LOG_LEVEL") {
			debug!("Overriding log level from {}", name);
			config.logging.level = level;
		}

		Ok(())
	}

	/// Validate configuration
	pub fn validate_config(config: &OptimizerConfig) -> Result<()> {
		if config.server.host.is_empty() {
			anyhow::bail!("server.host must not be empty");
		}

		if config.server.port == 0 {
			anyhow::bail!("server.port must be non-zero");
		}

		if config.server.request_timeout_secs == 0 {
			anyhow::bail!("server.request_timeout_secs must be positive");
		}

		if config.server.max_body_bytes == 0 {
			anyhow::bail!("server.max_body_bytes must be positive");
		}

		if config.cache.ttl_secs == 0 {
			anyhow::bail!("cache.ttl_secs must be positive");
		}

		Ok(())
	}
}

/// Load configuration from standard locations
pub fn load_config() -> Result<OptimizerConfig> {
	// Check for config file in order:
	// 1. Environment variable CONFIG_FILE
	// 2. ./config.toml
	// 3. ./config/optimizer.toml
	// 4. Default config with env overrides

	if let Ok(path) = std::env::var("CONFIG_FILE") {
		return ConfigLoader::from_env_and_file(Some(Path::new(&path)));
	}

	let paths = ["./config.toml", "./config/optimizer.toml"];

	for path in &paths {
		if Path::new(path).exists() {
			return ConfigLoader::from_env_and_file(Some(Path::new(path)));
		}
	}

	ConfigLoader::from_env_and_file(None)
}
