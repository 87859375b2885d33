//! Exact single-truck load optimization.
//!
//! Given a truck and up to [`MAX_ORDERS`](optimizer_types::MAX_ORDERS)
//! candidate orders, the solver picks the subset with the highest total
//! payout that fits both capacities, does not mix hazmat with non-hazmat
//! freight, and shares a single origin and destination.
//!
//! # Components
//!
//! - `table`: per-subset totals and validity, plus the best-mask scan
//! - `compat`: hazmat and route compatibility of a subset
//! - `response`: conversion of the winning subset into the API response
//! - `engine`: request handling through the shared result cache

pub mod compat;
pub mod engine;
pub mod error;
pub mod response;
pub mod table;

pub use engine::{CacheStatus, Optimized, OptimizerEngine, ResponseCache};
pub use error::EngineError;
pub use table::{Mask, SubsetTable};

use optimizer_types::{OptimizeRequest, OptimizeResponse};
use tracing::debug;

/// Solves a validated request.
///
/// Never fails: no orders, or no feasible combination, yields an empty
/// selection with zero totals.
pub fn solve(request: &OptimizeRequest) -> OptimizeResponse {
	let table = SubsetTable::build(&request.truck, &request.orders);
	let best = table.best_mask();

	debug!(
		orders = table.order_count(),
		subsets = table.len(),
		best_mask = best,
		payout = table.payout(best),
		"Solved load"
	);

	response::build_response(&request.truck, &request.orders, &table, best)
}
