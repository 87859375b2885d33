//! Error types for the optimizer engine.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
	/// The blocking solver task panicked or was cancelled.
	#[error("Solver worker failed: {0}")]
	Worker(String),
}
