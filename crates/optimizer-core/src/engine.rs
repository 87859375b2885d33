//! Cache-then-compute-then-store orchestration.
//!
//! The engine owns no solver state. Each miss builds a fresh subset table
//! on a blocking worker, and the cache lock is only held for the probe and
//! for the store, never across the solve. Two identical requests racing
//! may both solve; they produce the same response and the cache keeps one.

use crate::error::EngineError;
use crate::solve;
use optimizer_storage::{CacheInterface, CacheKey};
use optimizer_types::{OptimizeRequest, OptimizeResponse};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, instrument, warn};

/// Shortest accepted period for the purge task.
const MIN_PURGE_INTERVAL: Duration = Duration::from_millis(1);

/// Whether a response came from the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
	Hit,
	Miss,
}

impl CacheStatus {
	pub fn as_str(&self) -> &'static str {
		match self {
			CacheStatus::Hit => "HIT",
			CacheStatus::Miss => "MISS",
		}
	}
}

impl fmt::Display for CacheStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Outcome of one optimization call.
#[derive(Debug, Clone)]
pub struct Optimized {
	pub response: Arc<OptimizeResponse>,
	pub cache: CacheStatus,
}

/// Shared result cache type used by the engine.
pub type ResponseCache = Arc<dyn CacheInterface<OptimizeResponse>>;

/// Serves optimization requests through a shared result cache.
pub struct OptimizerEngine {
	cache: ResponseCache,
	ttl: Duration,
}

impl OptimizerEngine {
	pub fn new(cache: ResponseCache, ttl: Duration) -> Self {
		Self { cache, ttl }
	}

	/// Number of entries currently held by the cache.
	pub fn cached_entries(&self) -> usize {
		self.cache.len()
	}

	/// Spawns a task that drops expired cache entries every `every`.
	///
	/// The task runs until its handle is aborted.
	pub fn spawn_purge_task(self: &Arc<Self>, every: Duration) -> JoinHandle<()> {
		let engine = Arc::clone(self);
		tokio::spawn(async move {
			let mut ticker = tokio::time::interval(every.max(MIN_PURGE_INTERVAL));
			ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
			loop {
				ticker.tick().await;
				let purged = engine.cache.purge_expired();
				if purged > 0 {
					debug!(purged, "Purged expired cache entries");
				}
			}
		})
	}

	/// Optimizes a validated request, consulting the cache first.
	///
	/// If the request cannot be digested the cache is bypassed and the
	/// request is solved directly.
	#[instrument(skip_all, fields(truck_id = %request.truck.id, orders = request.orders.len()))]
	pub async fn optimize(&self, request: OptimizeRequest) -> Result<Optimized, EngineError> {
		let key = match CacheKey::digest(&request) {
			Ok(key) => Some(key),
			Err(e) => {
				warn!("Skipping cache, request digest failed: {}", e);
				None
			}
		};

		if let Some(response) = key.as_ref().and_then(|key| self.cache.get(key)) {
			debug!("Cache hit");
			return Ok(Optimized {
				response,
				cache: CacheStatus::Hit,
			});
		}

		let response = tokio::task::spawn_blocking(move || solve(&request))
			.await
			.map_err(|e| EngineError::Worker(e.to_string()))?;
		let response = Arc::new(response);

		if let Some(key) = key {
			self.cache.put(key, Arc::clone(&response), self.ttl);
		}

		Ok(Optimized {
			response,
			cache: CacheStatus::Miss,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use optimizer_storage::MemoryCache;
	use optimizer_types::{Order, Truck};

	fn request(truck_id: &str, payouts: &[i64]) -> OptimizeRequest {
		OptimizeRequest {
			truck: Truck {
				id: truck_id.to_string(),
				max_weight_lbs: 1_000,
				max_volume_cuft: 1_000,
			},
			orders: payouts
				.iter()
				.enumerate()
				.map(|(i, &payout)| Order {
					id: format!("ord-{}", i),
					payout_cents: payout,
					weight_lbs: 100,
					volume_cuft: 100,
					origin: "Los Angeles".to_string(),
					destination: "Dallas".to_string(),
					pickup_date: "2025-12-05".to_string(),
					delivery_date: "2025-12-09".to_string(),
					is_hazmat: false,
				})
				.collect(),
		}
	}

	fn engine(capacity: usize) -> OptimizerEngine {
		let cache = MemoryCache::<OptimizeResponse>::new(capacity);
		OptimizerEngine::new(Arc::new(cache), Duration::from_secs(300))
	}

	#[tokio::test]
	async fn test_miss_then_hit() {
		let engine = engine(10);

		let first = engine.optimize(request("t1", &[100, 200])).await.unwrap();
		assert_eq!(first.cache, CacheStatus::Miss);
		assert_eq!(first.response.total_payout_cents, 300);

		let second = engine.optimize(request("t1", &[100, 200])).await.unwrap();
		assert_eq!(second.cache, CacheStatus::Hit);
		assert_eq!(second.response, first.response);
		assert_eq!(engine.cached_entries(), 1);
	}

	#[tokio::test]
	async fn test_order_sequence_changes_key() {
		let engine = engine(10);

		engine.optimize(request("t1", &[100, 200])).await.unwrap();
		let swapped = engine.optimize(request("t1", &[200, 100])).await.unwrap();

		assert_eq!(swapped.cache, CacheStatus::Miss);
		assert_eq!(engine.cached_entries(), 2);
	}

	#[tokio::test]
	async fn test_disabled_cache_always_misses() {
		let engine = engine(0);

		engine.optimize(request("t1", &[100])).await.unwrap();
		let again = engine.optimize(request("t1", &[100])).await.unwrap();

		assert_eq!(again.cache, CacheStatus::Miss);
	}

	#[tokio::test]
	async fn test_expired_entry_is_recomputed() {
		let cache = MemoryCache::<OptimizeResponse>::new(10);
		let engine = OptimizerEngine::new(Arc::new(cache), Duration::from_millis(10));

		engine.optimize(request("t1", &[100])).await.unwrap();
		tokio::time::sleep(Duration::from_millis(30)).await;
		let again = engine.optimize(request("t1", &[100])).await.unwrap();

		assert_eq!(again.cache, CacheStatus::Miss);
	}

	#[tokio::test]
	async fn test_concurrent_identical_requests() {
		let engine = Arc::new(engine(10));
		let tasks: Vec<_> = (0..4)
			.map(|_| {
				let engine = Arc::clone(&engine);
				tokio::spawn(async move { engine.optimize(request("t1", &[5, 7, 9])).await })
			})
			.collect();

		for task in tasks {
			let optimized = task.await.unwrap().unwrap();
			assert_eq!(optimized.response.total_payout_cents, 21);
		}
		assert_eq!(engine.cached_entries(), 1);
	}

	#[tokio::test]
	async fn test_purge_task_drops_expired_entries() {
		let cache = MemoryCache::<OptimizeResponse>::new(10);
		let engine = Arc::new(OptimizerEngine::new(
			Arc::new(cache),
			Duration::from_millis(10),
		));

		engine.optimize(request("t1", &[100])).await.unwrap();
		engine.optimize(request("t2", &[200])).await.unwrap();
		assert_eq!(engine.cached_entries(), 2);

		let purge = engine.spawn_purge_task(Duration::from_millis(10));
		tokio::time::sleep(Duration::from_millis(100)).await;
		purge.abort();

		assert_eq!(engine.cached_entries(), 0);
	}

	#[test]
	fn test_cache_status_labels() {
		assert_eq!(CacheStatus::Hit.to_string(), "HIT");
		assert_eq!(CacheStatus::Miss.as_str(), "MISS");
	}
}
