//! Storage module for the load optimizer.
//!
//! This module provides the content-addressed result cache used to skip
//! recomputation for repeated identical requests. Values are addressed by
//! a digest of the full request, and stored with an absolute expiration.
//! The cache lives in process memory only.

use serde::Serialize;
use sha3::{Digest, Sha3_256};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod memory;
}

pub use implementations::memory::MemoryCache;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
	/// Error that occurs while encoding a value for digesting.
	#[error("Serialization error: {0}")]
	Serialization(String),
}

/// Content digest used as a cache key.
///
/// Holds the lowercase hex SHA3-256 of the value's JSON encoding. Two
/// values with equal fields in equal order produce the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(String);

impl CacheKey {
	/// Computes the digest of a serializable value.
	pub fn digest<T: Serialize>(value: &T) -> Result<Self, StorageError> {
		let bytes =
			serde_json::to_vec(value).map_err(|e| StorageError::Serialization(e.to_string()))?;
		Ok(Self(hex::encode(Sha3_256::digest(&bytes))))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for CacheKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// Trait defining the interface for result caches.
///
/// Implementations must be safe to share across request handlers. A
/// `get` never returns an entry whose expiration has passed.
pub trait CacheInterface<V>: Send + Sync {
	/// Retrieves the value stored under `key` if it has not expired.
	fn get(&self, key: &CacheKey) -> Option<Arc<V>>;

	/// Stores `value` under `key`, expiring `ttl` from now.
	fn put(&self, key: CacheKey, value: Arc<V>, ttl: Duration);

	/// Drops every expired entry, returning how many were removed.
	fn purge_expired(&self) -> usize;

	/// Number of stored entries, expired ones included.
	fn len(&self) -> usize;

	fn is_empty(&self) -> bool {
		self.len() == 0
	}
}
