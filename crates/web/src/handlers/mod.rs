//! HTTP request handlers.
//!
//! - [`health`] - Health, liveness and readiness probes
//! - [`fallback`] - JSON 404 for unmatched routes

pub mod fallback;
pub mod health;

pub use fallback::not_found_handler;
pub use health::{health_handler, liveness_handler, readiness_handler};
