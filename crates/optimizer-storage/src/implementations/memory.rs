//! In-memory result cache.
//!
//! Entries live in a `HashMap` guarded by a `RwLock`, next to a queue of
//! keys in first-insertion order. When the cache is full and a new key
//! arrives, the oldest inserted key is evicted. Reads do not refresh an
//! entry's position, so this is FIFO eviction and not LRU.

use crate::{CacheInterface, CacheKey};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};
use tracing::debug;

/// A stored value and the instant it stops being served.
#[derive(Debug)]
struct CacheEntry<V> {
	value: Arc<V>,
	expires_at: Instant,
}

#[derive(Debug)]
struct CacheState<V> {
	entries: HashMap<CacheKey, CacheEntry<V>>,
	/// Keys in first-insertion order; always the same set as `entries`.
	order: VecDeque<CacheKey>,
}

/// Fixed-capacity, TTL-expiring cache with FIFO eviction.
#[derive(Debug)]
pub struct MemoryCache<V> {
	state: RwLock<CacheState<V>>,
	capacity: usize,
}

impl<V> MemoryCache<V> {
	/// Creates a cache holding at most `capacity` entries.
	///
	/// A capacity of zero stores nothing.
	pub fn new(capacity: usize) -> Self {
		Self {
			state: RwLock::new(CacheState {
				entries: HashMap::with_capacity(capacity),
				order: VecDeque::with_capacity(capacity),
			}),
			capacity,
		}
	}

	/// Looks up `key` as of `now`.
	pub fn get_at(&self, key: &CacheKey, now: Instant) -> Option<Arc<V>> {
		let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
		let entry = state.entries.get(key)?;
		if now >= entry.expires_at {
			return None;
		}
		Some(Arc::clone(&entry.value))
	}

	/// Stores `value` under `key` with expiration `now + ttl`.
	///
	/// Overwriting an existing key keeps its place in the eviction queue.
	pub fn put_at(&self, key: CacheKey, value: Arc<V>, ttl: Duration, now: Instant) {
		if self.capacity == 0 {
			return;
		}

		let expires_at = now.checked_add(ttl).unwrap_or(now);
		let entry = CacheEntry { value, expires_at };

		let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
		if let Some(existing) = state.entries.get_mut(&key) {
			*existing = entry;
			return;
		}

		if state.entries.len() >= self.capacity {
			if let Some(oldest) = state.order.pop_front() {
				debug!(key = %oldest, "Evicting oldest cache entry");
				state.entries.remove(&oldest);
			}
		}

		state.order.push_back(key.clone());
		state.entries.insert(key, entry);
	}

	/// Drops every entry expired as of `now`, returning how many were removed.
	pub fn purge_expired_at(&self, now: Instant) -> usize {
		let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
		let before = state.entries.len();

		state.entries.retain(|_, entry| now < entry.expires_at);
		let CacheState { entries, order } = &mut *state;
		order.retain(|key| entries.contains_key(key));

		before - state.entries.len()
	}
}

impl<V: Send + Sync> CacheInterface<V> for MemoryCache<V> {
	fn get(&self, key: &CacheKey) -> Option<Arc<V>> {
		self.get_at(key, Instant::now())
	}

	fn put(&self, key: CacheKey, value: Arc<V>, ttl: Duration) {
		self.put_at(key, value, ttl, Instant::now());
	}

	fn purge_expired(&self) -> usize {
		self.purge_expired_at(Instant::now())
	}

	fn len(&self) -> usize {
		self.state
			.read()
			.unwrap_or_else(PoisonError::into_inner)
			.entries
			.len()
	}
}
