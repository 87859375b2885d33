//! Configuration types for the optimizer service.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Complete service configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct OptimizerConfig {
	/// HTTP server settings
	pub server: ServerConfig,
	/// Result cache settings
	pub cache: CacheConfig,
	/// Log output settings
	pub logging: LoggingConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
	/// Interface to bind
	pub host: String,
	/// Port to listen on
	pub port: u16,
	/// Upper bound on handling one request, in seconds
	pub request_timeout_secs: u64,
	/// Largest accepted request body, in bytes
	pub max_body_bytes: usize,
}

impl Default for ServerConfig {
	fn default() -> Self {
		Self {
			host: "0.0.0.0".to_string(),
			port: 8080,
			request_timeout_secs: 5,
			max_body_bytes: 1 << 20,
		}
	}
}

impl ServerConfig {
	pub fn bind_address(&self) -> String {
		format!("{}:{}", self.host, self.port)
	}

	pub fn request_timeout(&self) -> Duration {
		Duration::from_secs(self.request_timeout_secs)
	}
}

/// Result cache settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
	/// Maximum number of cached responses; 0 disables caching
	pub capacity: usize,
	/// Lifetime of a cached response, in seconds
	pub ttl_secs: u64,
}

impl Default for CacheConfig {
	fn default() -> Self {
		Self {
			capacity: 1000,
			ttl_secs: 300,
		}
	}
}

impl CacheConfig {
	pub fn ttl(&self) -> Duration {
		Duration::from_secs(self.ttl_secs)
	}
}

/// Log output settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
	/// Default filter directive when `RUST_LOG` is unset
	pub level: String,
	/// Emit JSON lines instead of human-readable output
	pub json: bool,
}

impl Default for LoggingConfig {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
			json: false,
		}
	}
}
