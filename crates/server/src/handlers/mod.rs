//! # API Route Handlers
//!
//! The Axum route handlers for `roster-server`, split by concern and
//! re-exported so the router can reach them under a single `handlers::` path.

pub mod general;
pub mod students;

pub use general::*;
pub use students::*;
