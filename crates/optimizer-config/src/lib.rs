//! Configuration for the load optimizer service.
//!
//! Configuration is read from a TOML, JSON or YAML file, then overridden
//! from `OPTIMIZER_*` environment variables. Every field has a default,
//! so an empty file yields a working service.

pub mod loader;
pub mod types;

pub use loader::{load_config, ConfigLoader};
pub use types::*;
