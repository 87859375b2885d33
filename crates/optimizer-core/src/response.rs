//! Conversion of the winning subset into an API response.

use crate::table::{Mask, SubsetTable};
use optimizer_types::{OptimizeResponse, Order, Truck};

/// Builds the response for `mask`.
///
/// Order ids are listed in request order. An empty mask gives an empty
/// selection with zero totals.
pub fn build_response(
	truck: &Truck,
	orders: &[Order],
	table: &SubsetTable,
	mask: Mask,
) -> OptimizeResponse {
	let selected_order_ids = table
		.members(mask)
		.map(|i| orders[i].id.clone())
		.collect();

	let total_weight_lbs = table.weight(mask);
	let total_volume_cuft = table.volume(mask);

	OptimizeResponse {
		truck_id: truck.id.clone(),
		selected_order_ids,
		total_payout_cents: table.payout(mask),
		total_weight_lbs,
		total_volume_cuft,
		utilization_weight_percent: utilization_percent(total_weight_lbs, truck.max_weight_lbs),
		utilization_volume_percent: utilization_percent(total_volume_cuft, truck.max_volume_cuft),
	}
}

/// `total / capacity * 100`, rounded half up to two decimals.
///
/// Rounding happens on an integer count of basis points, so values such
/// as 12.345 round to 12.35 regardless of float representation. Returns
/// 0.0 for a non-positive capacity.
pub fn utilization_percent(total: i64, capacity: i64) -> f64 {
	if capacity <= 0 || total <= 0 {
		return 0.0;
	}

	let total = i128::from(total);
	let capacity = i128::from(capacity);
	let basis_points = (2 * total * 10_000 + capacity) / (2 * capacity);

	basis_points as f64 / 100.0
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_utilization_rounding() {
		assert_eq!(utilization_percent(30_000, 44_000), 68.18);
		assert_eq!(utilization_percent(2_100, 3_000), 70.0);
		assert_eq!(utilization_percent(44_000, 44_000), 100.0);
		assert_eq!(utilization_percent(1, 3), 33.33);
		assert_eq!(utilization_percent(2, 3), 66.67);
	}

	#[test]
	fn test_utilization_half_up() {
		// 1 / 20000 is exactly half a basis point.
		assert_eq!(utilization_percent(1, 20_000), 0.01);
		// 12345 / 100000 is 12.345 percent.
		assert_eq!(utilization_percent(12_345, 100_000), 12.35);
		assert_eq!(utilization_percent(1, 40_000), 0.0);
	}

	#[test]
	fn test_utilization_degenerate_inputs() {
		assert_eq!(utilization_percent(0, 100), 0.0);
		assert_eq!(utilization_percent(50, 0), 0.0);
		assert_eq!(utilization_percent(i64::MAX, i64::MAX), 100.0);
	}

	#[test]
	fn test_empty_mask_response() {
		let truck = Truck {
			id: "truck-1".to_string(),
			max_weight_lbs: 100,
			max_volume_cuft: 100,
		};
		let table = SubsetTable::build(&truck, &[]);
		let response = build_response(&truck, &[], &table, 0);

		assert_eq!(response, OptimizeResponse::empty("truck-1"));
	}
}
