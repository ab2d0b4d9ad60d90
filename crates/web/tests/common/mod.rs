//! Common test utilities.
//!
//! Fixtures mirror the usual factory flow: build an app, switch on testing
//! mode, derive a client from it.

#![allow(dead_code)]

use axum_test::TestServer;
use beacon_web::{App, AppConfig, TestClient, create_app, create_app_with_config};

/// Creates an application in testing mode.
pub fn app() -> App {
    beacon_web::try_init_logging("debug");

    let mut app = create_app();
    app.config_mut()
        .update([("TESTING", "true")])
        .expect("Failed to enable testing mode");
    app
}

/// Derives a test client for the app.
pub fn client(app: &App) -> TestClient {
    app.test_client().expect("Failed to create test client")
}

/// Creates an axum-test server around the app's router.
pub fn server(config: AppConfig) -> TestServer {
    let app = create_app_with_config(config);
    let router = app.router().expect("Failed to build router");
    TestServer::new(router).expect("Failed to create test server")
}
