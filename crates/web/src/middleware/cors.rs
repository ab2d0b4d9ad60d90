//! CORS layer construction.

use axum::http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};

use crate::config::AppConfig;

/// Builds the CORS layer based on configuration.
///
/// `*` allows any origin; otherwise the comma-separated origins that parse
/// as header values are allowed and the rest are dropped.
pub fn build_cors_layer(config: &AppConfig) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if config.cors_origins.trim() == "*" {
        cors.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter_map(|s| s.parse().ok())
            .collect();
        cors.allow_origin(origins)
    }
}
