//! HTTP middleware.
//!
//! - [`cors`] - CORS layer built from configuration
//! - [`request_id`] - `x-request-id` generation and propagation

pub mod cors;
pub mod request_id;

pub use cors::build_cors_layer;
pub use request_id::{REQUEST_ID_HEADER, UuidRequestId, request_id_layers};
