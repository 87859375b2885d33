//! Service wiring for the load optimizer.
//!
//! This crate provides the HTTP API and the command-line interface, and
//! hosts the `load-optimizer` binary.
//!
//! # Components
//!
//! - `api`: optimize and health endpoints
//! - `cli`: command-line arguments and subcommands

pub mod api;
pub mod cli;
