//! Shared data model for the load optimizer.
//!
//! The request and response shapes of the optimization API live here,
//! together with the field-level validation that every request passes
//! before it reaches the solver.

pub mod api;
pub mod validation;

pub use api::*;
pub use validation::*;
