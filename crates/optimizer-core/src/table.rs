//! Dense per-subset totals over a bitmask enumeration.
//!
//! Every subset of the order list is a mask in `0..2^n`, bit `i` standing
//! for order `i`. The table keeps four parallel arrays indexed by mask.
//! Each mask is filled from the mask with its lowest set bit cleared,
//! which is numerically smaller and therefore already computed.

use crate::compat::is_compatible;
use optimizer_types::{Order, Truck, MAX_ORDERS};

/// A subset of orders, one bit per order index.
pub type Mask = usize;

/// Aggregate weight, volume, payout and validity for every subset.
#[derive(Debug, Clone)]
pub struct SubsetTable {
	order_count: usize,
	weight: Vec<i64>,
	volume: Vec<i64>,
	payout: Vec<i64>,
	valid: Vec<bool>,
}

impl SubsetTable {
	/// Computes the table for `orders` loaded onto `truck`.
	///
	/// A subset over either capacity is marked invalid without running the
	/// compatibility scan. `orders` must hold at most [`MAX_ORDERS`] entries.
	pub fn build(truck: &Truck, orders: &[Order]) -> Self {
		let order_count = orders.len();
		debug_assert!(order_count <= MAX_ORDERS);

		let size: usize = 1 << order_count;
		let mut weight = vec![0i64; size];
		let mut volume = vec![0i64; size];
		let mut payout = vec![0i64; size];
		let mut valid = vec![false; size];
		valid[0] = true;

		for mask in 1..size {
			let lowest = mask & mask.wrapping_neg();
			let index = lowest.trailing_zeros() as usize;
			let rest = mask ^ lowest;
			let order = &orders[index];

			weight[mask] = weight[rest].saturating_add(order.weight_lbs);
			volume[mask] = volume[rest].saturating_add(order.volume_cuft);
			payout[mask] = payout[rest].saturating_add(order.payout_cents);

			if weight[mask] > truck.max_weight_lbs || volume[mask] > truck.max_volume_cuft {
				continue;
			}

			valid[mask] = is_compatible(mask, orders);
		}

		Self {
			order_count,
			weight,
			volume,
			payout,
			valid,
		}
	}

	pub fn order_count(&self) -> usize {
		self.order_count
	}

	/// Number of subsets, `2^n`.
	pub fn len(&self) -> usize {
		self.valid.len()
	}

	pub fn is_empty(&self) -> bool {
		self.valid.is_empty()
	}

	pub fn weight(&self, mask: Mask) -> i64 {
		self.weight[mask]
	}

	pub fn volume(&self, mask: Mask) -> i64 {
		self.volume[mask]
	}

	pub fn payout(&self, mask: Mask) -> i64 {
		self.payout[mask]
	}

	pub fn is_valid(&self, mask: Mask) -> bool {
		self.valid[mask]
	}

	/// Returns the valid mask with the greatest payout.
	///
	/// Masks are scanned in ascending order and only a strictly greater
	/// payout replaces the current best, so among equal payouts the
	/// smallest mask wins. Returns 0 when no non-empty subset beats the
	/// empty load.
	pub fn best_mask(&self) -> Mask {
		let mut best = 0;
		let mut best_payout = self.payout[0];

		for mask in 1..self.len() {
			if self.valid[mask] && self.payout[mask] > best_payout {
				best = mask;
				best_payout = self.payout[mask];
			}
		}

		best
	}

	/// Iterates the order indices set in `mask`, ascending.
	pub fn members(&self, mask: Mask) -> impl Iterator<Item = usize> {
		(0..self.order_count).filter(move |&i| mask & (1 << i) != 0)
	}
}
