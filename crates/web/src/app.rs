//! Application factory.
//!
//! [`create_app`] returns an [`App`] holding a mutable configuration. The
//! router is only assembled when it is asked for, so the configuration can be
//! adjusted between construction and use:
//!
//! ```rust
//! use beacon_web::create_app;
//!
//! let mut app = create_app();
//! app.config_mut().update([("TESTING", "true")]).unwrap();
//! let client = app.test_client().unwrap();
//! assert!(client.config().is_testing());
//! ```

use std::time::Duration;

use axum::{Router, extract::DefaultBodyLimit, http::StatusCode};
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::error::{AppResult, ConfigError};
use crate::middleware::{build_cors_layer, request_id_layers};
use crate::routing;
use crate::state::AppState;
use crate::testing::TestClient;

/// A configured application instance.
#[derive(Debug, Clone, Default)]
pub struct App {
    config: AppConfig,
}

/// Creates an application with the default configuration.
///
/// The environment is not consulted; use [`AppConfig::from_env`] with
/// [`create_app_with_config`] for that.
pub fn create_app() -> App {
    create_app_with_config(AppConfig::default())
}

/// Creates an application with a custom configuration.
pub fn create_app_with_config(config: AppConfig) -> App {
    App { config }
}

impl App {
    /// Returns the configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Returns the configuration for modification.
    pub fn config_mut(&mut self) -> &mut AppConfig {
        &mut self.config
    }

    /// Builds the Axum router with the full middleware stack.
    ///
    /// Fails with [`ConfigError::Invalid`] when the configuration does not
    /// validate.
    pub fn router(&self) -> AppResult<Router> {
        self.config.validate().map_err(ConfigError::Invalid)?;

        let config = &self.config;
        info!(
            name = %config.name,
            testing = config.testing,
            "Creating application router"
        );

        let state = AppState::new(config.clone());
        Ok(apply_middleware(routing::create_routes(state), config))
    }

    /// Derives a client that dispatches requests to this application in
    /// process.
    ///
    /// The client captures the configuration as it is now; later changes
    /// through [`App::config_mut`] do not reach it.
    pub fn test_client(&self) -> AppResult<TestClient> {
        if !self.config.testing {
            warn!("Creating a test client while testing mode is disabled");
        }
        let router = self.router()?;
        Ok(TestClient::new(router, self.config.clone()))
    }
}

/// Wraps a router in the middleware stack described by `config`.
///
/// The stack is, from the outside in: request tracing, the request timeout
/// (answered with 408), CORS, request ids, and the body size limit. The limit
/// is enforced by body-reading extractors such as `String`, `Bytes` or `Json`;
/// routes that never read a body are unaffected by it.
///
/// The configuration is not validated here; [`App::router`] does that.
pub fn apply_middleware(router: Router, config: &AppConfig) -> Router {
    let router = router.layer(DefaultBodyLimit::max(config.max_body_size));

    let router = if config.enable_request_id {
        router.layer(request_id_layers())
    } else {
        router
    };

    let router = if config.enable_cors {
        router.layer(build_cors_layer(config))
    } else {
        router
    };

    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout),
        ));

    router.layer(service_builder)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use axum::routing::{get, post};

    #[test]
    fn test_create_app_uses_defaults() {
        let app = create_app();
        assert_eq!(app.config(), &AppConfig::default());
    }

    #[test]
    fn test_config_mut_persists() {
        let mut app = create_app();
        app.config_mut().set_testing(true);
        assert!(app.config().is_testing());
    }

    #[test]
    fn test_router_rejects_invalid_config() {
        let app = create_app_with_config(AppConfig {
            request_timeout: 0,
            ..AppConfig::default()
        });
        let err = app.router().unwrap_err();
        assert!(matches!(err, AppError::Config(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_test_client_without_testing_mode() {
        let app = create_app();
        assert!(app.test_client().is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_handler_times_out_with_408() {
        let config = AppConfig {
            request_timeout: 1,
            ..AppConfig::for_testing()
        };
        let slow = Router::new().route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(30)).await;
                "done"
            }),
        );
        let client = TestClient::new(apply_middleware(slow, &config), config);

        let response = client.get("/slow").await.unwrap();
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    }

    #[tokio::test]
    async fn test_body_limit_rejects_oversized_body() {
        let config = AppConfig {
            max_body_size: 16,
            ..AppConfig::for_testing()
        };
        let echo = Router::new().route("/echo", post(|body: String| async move { body }));
        let client = TestClient::new(apply_middleware(echo, &config), config);

        let response = client.post_json("/echo", &"short").await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = client.post_json("/echo", &"x".repeat(64)).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
