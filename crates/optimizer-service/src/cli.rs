//! Command-line interface definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "load-optimizer")]
#[command(about = "Truck load optimization service", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
	/// Path to configuration file
	#[arg(short, long, env = "CONFIG_FILE")]
	pub config: Option<PathBuf>,

	/// Log level override (trace, debug, info, warn, error)
	#[arg(short, long)]
	pub log_level: Option<String>,

	/// Subcommand to execute, `start` when omitted
	#[command(subcommand)]
	pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
	/// Start the HTTP service
	Start,

	/// Validate configuration file
	#[command(about = "Load and validate the configuration, then exit")]
	Validate,

	/// Generate example configuration
	#[command(about = "Write the default configuration as TOML")]
	GenerateConfig {
		/// Output file path
		#[arg(short, long, default_value = "config.toml")]
		output: PathBuf,
	},
}
