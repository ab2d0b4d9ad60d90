//! Application route table.

use axum::{Router, routing::get};

use crate::handlers;
use crate::state::AppState;

/// Creates all application routes.
///
/// # Routes
///
/// - `GET /health` - Health check
/// - `GET /_liveness` - Liveness probe
/// - `GET /_readiness` - Readiness probe
///
/// Any other path falls through to a JSON 404.
pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/_liveness", get(handlers::liveness_handler))
        .route("/_readiness", get(handlers::readiness_handler))
        .fallback(handlers::not_found_handler)
        .with_state(state)
}
