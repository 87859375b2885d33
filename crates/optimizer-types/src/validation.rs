//! Request validation for the optimize endpoint.
//!
//! The solver assumes every request it sees has passed these checks, so
//! anything it cannot handle must be rejected here and reported to the
//! client as a bad request.

use crate::api::{OptimizeRequest, Order, MAX_ORDERS};
use chrono::NaiveDate;
use thiserror::Error;

/// Date format accepted for pickup and delivery dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Errors that can occur during request validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
	/// A required string field is empty or absent.
	#[error("{0} is required")]
	MissingField(String),
	/// A truck capacity is zero or negative.
	#[error("{0} must be positive")]
	NotPositive(String),
	/// An order quantity is negative.
	#[error("{0} must be non-negative")]
	Negative(String),
	/// More orders than the solver enumerates.
	#[error("too many orders (max {max})")]
	TooManyOrders { max: usize },
	/// A date is not in `YYYY-MM-DD` form.
	#[error("{field} has invalid format (expected YYYY-MM-DD): {value}")]
	InvalidDate { field: String, value: String },
	/// Pickup happens after delivery.
	#[error("orders[{index}].pickup_date must be on or before delivery_date")]
	PickupAfterDelivery { index: usize },
}

impl OptimizeRequest {
	/// Validates the request, returning the first problem found.
	pub fn validate(&self) -> Result<(), ValidationError> {
		if self.truck.id.is_empty() {
			return Err(ValidationError::MissingField("truck.id".to_string()));
		}
		if self.truck.max_weight_lbs <= 0 {
			return Err(ValidationError::NotPositive(
				"truck.max_weight_lbs".to_string(),
			));
		}
		if self.truck.max_volume_cuft <= 0 {
			return Err(ValidationError::NotPositive(
				"truck.max_volume_cuft".to_string(),
			));
		}
		if self.orders.len() > MAX_ORDERS {
			return Err(ValidationError::TooManyOrders { max: MAX_ORDERS });
		}

		for (index, order) in self.orders.iter().enumerate() {
			validate_order(index, order)?;
		}

		Ok(())
	}
}

fn validate_order(index: usize, order: &Order) -> Result<(), ValidationError> {
	let field = |name: &str| format!("orders[{}].{}", index, name);

	if order.id.is_empty() {
		return Err(ValidationError::MissingField(field("id")));
	}
	if order.payout_cents < 0 {
		return Err(ValidationError::Negative(field("payout_cents")));
	}
	if order.weight_lbs < 0 {
		return Err(ValidationError::Negative(field("weight_lbs")));
	}
	if order.volume_cuft < 0 {
		return Err(ValidationError::Negative(field("volume_cuft")));
	}
	if order.origin.is_empty() {
		return Err(ValidationError::MissingField(field("origin")));
	}
	if order.destination.is_empty() {
		return Err(ValidationError::MissingField(field("destination")));
	}
	if order.pickup_date.is_empty() {
		return Err(ValidationError::MissingField(field("pickup_date")));
	}
	if order.delivery_date.is_empty() {
		return Err(ValidationError::MissingField(field("delivery_date")));
	}

	let pickup = parse_date(field("pickup_date"), &order.pickup_date)?;
	let delivery = parse_date(field("delivery_date"), &order.delivery_date)?;
	if pickup > delivery {
		return Err(ValidationError::PickupAfterDelivery { index });
	}

	Ok(())
}

/// Parses a zero-padded `YYYY-MM-DD` date.
///
/// chrono accepts unpadded fields, a sign and leading whitespace, so the
/// parsed date must format back to exactly `value`.
fn parse_date(field: String, value: &str) -> Result<NaiveDate, ValidationError> {
	match NaiveDate::parse_from_str(value, DATE_FORMAT) {
		Ok(date) if date.format(DATE_FORMAT).to_string() == value => Ok(date),
		_ => Err(ValidationError::InvalidDate {
			field,
			value: value.to_string(),
		}),
	}
}
