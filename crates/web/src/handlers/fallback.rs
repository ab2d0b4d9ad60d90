//! Fallback handler for unmatched routes.

use axum::http::Uri;
use tracing::debug;

use crate::error::AppError;

/// Answers every request no route matched with a JSON 404.
pub async fn not_found_handler(uri: Uri) -> AppError {
    debug!(path = %uri.path(), "No route matched");
    AppError::NotFound {
        path: uri.path().to_string(),
    }
}
