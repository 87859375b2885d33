//! API types for the load optimizer HTTP API.
//!
//! This module defines the request and response types for the optimize
//! endpoint. Money is carried as integer cents, weights in pounds and
//! volumes in cubic feet; none of them is ever a float on the way in.
//!
//! Absent request fields deserialize to their zero value and are reported
//! by validation.

use serde::{Deserialize, Serialize};

/// Maximum number of orders accepted in one request.
///
/// Subsets are enumerated as bitmasks over the order list, so the solver
/// visits `2^MAX_ORDERS` subsets in the worst case.
pub const MAX_ORDERS: usize = 22;

/// The truck being loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Truck {
	/// Opaque truck identifier
	pub id: String,
	/// Weight capacity in pounds
	pub max_weight_lbs: i64,
	/// Volume capacity in cubic feet
	pub max_volume_cuft: i64,
}

/// A shipment order that may be placed on the truck.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Order {
	/// Opaque order identifier, unique within a request
	pub id: String,
	/// Payout in cents
	pub payout_cents: i64,
	/// Weight in pounds
	pub weight_lbs: i64,
	/// Volume in cubic feet
	pub volume_cuft: i64,
	pub origin: String,
	pub destination: String,
	/// Pickup date as `YYYY-MM-DD`
	pub pickup_date: String,
	/// Delivery date as `YYYY-MM-DD`
	pub delivery_date: String,
	pub is_hazmat: bool,
}

/// Request body of `POST /api/v1/load-optimizer/optimize`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptimizeRequest {
	pub truck: Truck,
	/// Candidate orders, indexed by position
	pub orders: Vec<Order>,
}

/// The best load found for a truck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizeResponse {
	pub truck_id: String,
	/// Selected order ids in request order
	pub selected_order_ids: Vec<String>,
	pub total_payout_cents: i64,
	pub total_weight_lbs: i64,
	pub total_volume_cuft: i64,
	/// Weight utilization, rounded half up to two decimals
	pub utilization_weight_percent: f64,
	/// Volume utilization, rounded half up to two decimals
	pub utilization_volume_percent: f64,
}

impl OptimizeResponse {
	/// An empty load for the given truck.
	pub fn empty(truck_id: impl Into<String>) -> Self {
		Self {
			truck_id: truck_id.into(),
			selected_order_ids: Vec::new(),
			total_payout_cents: 0,
			total_weight_lbs: 0,
			total_volume_cuft: 0,
			utilization_weight_percent: 0.0,
			utilization_volume_percent: 0.0,
		}
	}
}

/// API error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
	/// Error type/code
	pub error: String,
	/// Human-readable description
	pub message: String,
}

impl ErrorResponse {
	/// Builds an error whose code and message are the same text.
	pub fn new(message: impl Into<String>) -> Self {
		let message = message.into();
		Self {
			error: message.clone(),
			message,
		}
	}
}
