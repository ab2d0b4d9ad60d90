//! Health check endpoint handlers.
//!
//! Provides health, liveness and readiness probes for monitoring and load
//! balancers.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Handler for the health check endpoint.
///
/// # HTTP Request
///
/// `GET [base]/health`
///
/// # Response
///
/// - `200 OK` with the application name, version, testing flag and uptime
pub async fn health_handler(State(state): State<AppState>) -> Response {
    debug!("Processing health check request");

    let config = state.config();
    let health_response = serde_json::json!({
        "status": "healthy",
        "name": config.name,
        "version": env!("CARGO_PKG_VERSION"),
        "testing": config.testing,
        "uptime_seconds": state.uptime().as_secs(),
        "timestamp": chrono::Utc::now().to_rfc3339()
    });

    (StatusCode::OK, Json(health_response)).into_response()
}

/// Handler for the liveness probe.
///
/// # HTTP Request
///
/// `GET [base]/_liveness`
pub async fn liveness_handler() -> impl IntoResponse {
    StatusCode::OK
}

/// Handler for the readiness probe.
///
/// # HTTP Request
///
/// `GET [base]/_readiness`
///
/// # Response
///
/// - `200 OK` - Configuration is valid
/// - `503 Service Unavailable` - Configuration failed validation
///
/// Routers built by [`App::router`](crate::App::router) validate first, so
/// only routers assembled directly with
/// [`create_routes`](crate::routing::create_routes) can answer 503 here.
pub async fn readiness_handler(State(state): State<AppState>) -> AppResult<Response> {
    debug!("Processing readiness check request");

    if let Err(errors) = state.config().validate() {
        warn!(errors = ?errors, "Readiness check failed");
        return Err(AppError::ServiceUnavailable {
            message: errors.join("; "),
        });
    }

    let response = serde_json::json!({
        "status": "ready",
        "checks": {
            "config": "ok"
        }
    });

    Ok((StatusCode::OK, Json(response)).into_response())
}
