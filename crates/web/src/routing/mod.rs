//! Route configuration.
//!
//! Maps HTTP paths to handlers.

pub mod app_routes;

pub use app_routes::create_routes;
