//! Error types for the web application.
//!
//! [`ConfigError`] covers problems with the configuration surface and
//! [`AppError`] covers everything a request or the application factory can
//! fail with. `AppError` renders itself as a JSON body:
//!
//! ```json
//! { "error": "not-found", "status": 404, "message": "No route for /missing" }
//! ```
//!
//! | Variant | HTTP Status | Code |
//! |---------|-------------|------|
//! | NotFound | 404 | not-found |
//! | BadRequest | 400 | invalid |
//! | ServiceUnavailable | 503 | unavailable |
//! | Config | 500 | configuration |
//! | Internal | 500 | exception |

use std::fmt;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Errors raised by the configuration surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The key does not name a configuration setting.
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// The value could not be parsed for the given key.
    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        /// The key being set.
        key: String,
        /// The rejected value.
        value: String,
        /// Why parsing failed.
        reason: String,
    },

    /// The configuration failed validation.
    #[error("Invalid configuration: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

/// The primary error type for application operations.
#[derive(Debug)]
pub enum AppError {
    /// No route matched (HTTP 404).
    NotFound {
        /// The requested path.
        path: String,
    },

    /// Malformed request (HTTP 400).
    BadRequest {
        /// Error message.
        message: String,
    },

    /// The application is not ready to serve (HTTP 503).
    ServiceUnavailable {
        /// Error message.
        message: String,
    },

    /// Configuration problem (HTTP 500).
    Config(ConfigError),

    /// Internal error (HTTP 500).
    Internal {
        /// Error message.
        message: String,
    },
}

/// Result type alias for application operations.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Config(_) | AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the stable error code placed in the response body.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound { .. } => "not-found",
            AppError::BadRequest { .. } => "invalid",
            AppError::ServiceUnavailable { .. } => "unavailable",
            AppError::Config(_) => "configuration",
            AppError::Internal { .. } => "exception",
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound { path } => write!(f, "No route for {}", path),
            AppError::BadRequest { message } => write!(f, "Bad request: {}", message),
            AppError::ServiceUnavailable { message } => {
                write!(f, "Service unavailable: {}", message)
            }
            AppError::Config(err) => write!(f, "{}", err),
            AppError::Internal { message } => write!(f, "Internal error: {}", message),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::Config(err)
    }
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    status: u16,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.code(),
            status: status.as_u16(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let err = AppError::NotFound {
            path: "/x".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.code(), "not-found");

        let err = AppError::ServiceUnavailable {
            message: "warming up".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_config_error_conversion() {
        let err: AppError = ConfigError::UnknownKey("FOO".to_string()).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Unknown configuration key: FOO");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_invalid_joins_messages() {
        let err = ConfigError::Invalid(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(err.to_string(), "Invalid configuration: a; b");
    }

    #[test]
    fn test_into_response_status() {
        let response = AppError::BadRequest {
            message: "nope".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
