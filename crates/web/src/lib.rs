//! # beacon-web - Application factory and in-process test client
//!
//! This crate builds the Beacon web application. An application is created by
//! a factory, configured through a mutable configuration surface, and either
//! served over TCP (see the `beacon-server` crate) or exercised in process
//! through a [`TestClient`] that never binds a socket.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use beacon_web::create_app;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut app = create_app();
//!     app.config_mut().update([("TESTING", "true")])?;
//!
//!     let client = app.test_client()?;
//!     let response = client.get("/health").await?;
//!     assert!(response.is_success());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## API Endpoints
//!
//! | Endpoint | HTTP Method | Description |
//! |----------|-------------|-------------|
//! | `/health` | GET | Health report (name, version, testing flag, uptime) |
//! | `/_liveness` | GET | Liveness probe |
//! | `/_readiness` | GET | Readiness probe, 503 on invalid configuration |
//!
//! Every other path returns a JSON 404 body; see [`error`].
//!
//! ## Configuration
//!
//! See [`config`] for the `APP_*` environment variables and the string keys
//! accepted by [`AppConfig::update`].
//!
//! ## Architecture
//!
//! - [`app`] - Application factory
//! - [`config`] - Application configuration
//! - [`error`] - Error types and JSON error bodies
//! - [`state`] - State shared with handlers
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - CORS and request id layers
//! - [`routing`] - Route configuration
//! - [`testing`] - In-process test client

// Enforce documentation
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod app;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routing;
pub mod state;
pub mod testing;

// Re-export commonly used types
pub use app::{App, apply_middleware, create_app, create_app_with_config};
pub use config::AppConfig;
pub use error::{AppError, AppResult, ConfigError};
pub use state::AppState;
pub use testing::{TestClient, TestResponse};

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("beacon_web={},tower_http=debug", level)))
}

/// Initializes the tracing subscriber for logging.
///
/// This should be called once at application startup; `RUST_LOG` takes
/// precedence over `level`.
///
/// # Arguments
///
/// * `level` - The log level (error, warn, info, debug, trace)
pub fn init_logging(level: &str) {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(env_filter(level))
        .init();
}

/// Like [`init_logging`], but leaves an already installed subscriber alone.
///
/// Returns `true` if this call installed the subscriber.
pub fn try_init_logging(level: &str) -> bool {
    tracing_subscriber::registry()
        .with(fmt::layer().with_test_writer())
        .with(env_filter(level))
        .try_init()
        .is_ok()
}
