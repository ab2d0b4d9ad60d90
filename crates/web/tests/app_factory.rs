//! Application factory and test client tests.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use beacon_web::routing::create_routes;
use beacon_web::{
    AppConfig, AppError, AppState, ConfigError, TestClient, create_app, create_app_with_config,
};
use serde_json::{Value, json};

use common::{app, client};

#[test]
fn test_config() {
    let app = app();
    let client = app.test_client().expect("Failed to create test client");
    assert!(client.config().is_testing());
}

#[tokio::test]
async fn test_client_answers_health() {
    let app = app();
    let client = client(&app);

    let response = client.get("/health").await.unwrap();
    assert!(response.is_success());

    let body: Value = response.json().unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["testing"], true);
    assert_eq!(body["name"], "beacon");
}

#[tokio::test]
async fn test_client_holds_config_snapshot() {
    let mut app = app();
    let client = client(&app);

    app.config_mut().set_testing(false);
    app.config_mut().name = "renamed".to_string();

    assert!(client.config().is_testing());
    let body: Value = client.get("/health").await.unwrap().json().unwrap();
    assert_eq!(body["name"], "beacon");
    assert_eq!(body["testing"], true);
}

#[test]
fn test_client_creation_fails_on_invalid_config() {
    let app = create_app_with_config(AppConfig {
        log_level: "chatty".to_string(),
        ..AppConfig::for_testing()
    });

    match app.test_client() {
        Err(AppError::Config(ConfigError::Invalid(errors))) => {
            assert!(errors.iter().any(|e| e.contains("chatty")));
        }
        other => panic!("expected invalid config error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_port_zero_needs_testing_mode() {
    let mut app = create_app();
    app.config_mut().update([("PORT", "0")]).unwrap();
    assert!(app.test_client().is_err());

    app.config_mut().update([("TESTING", "1")]).unwrap();
    assert!(app.test_client().is_ok());
}

#[tokio::test]
async fn test_unknown_path_returns_json_404() {
    let app = app();
    let client = client(&app);

    let response = client.get("/missing").await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: Value = response.json().unwrap();
    assert_eq!(
        body,
        json!({
            "error": "not-found",
            "status": 404,
            "message": "No route for /missing"
        })
    );
}

#[tokio::test]
async fn test_post_and_delete_on_probe_are_rejected() {
    let app = app();
    let client = client(&app);

    let response = client.post_json("/health", &json!({})).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

    let response = client.delete("/_liveness").await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_raw_request() {
    let app = app();
    let client = client(&app);

    let request = Request::builder()
        .method(Method::GET)
        .uri("/_liveness")
        .body(Body::empty())
        .unwrap();
    let response = client.request(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.bytes().is_empty());
}

#[tokio::test]
async fn test_client_is_shareable_across_tasks() {
    let app = app();
    let client = client(&app);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let client = client.clone();
            tokio::spawn(async move { client.get("/_readiness").await.unwrap().status() })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap(), StatusCode::OK);
    }
}

#[tokio::test]
async fn test_request_id_only_when_enabled() {
    let mut app = app();
    app.config_mut()
        .update([("ENABLE_REQUEST_ID", "false")])
        .unwrap();
    let response = client(&app).get("/health").await.unwrap();
    assert!(response.header("x-request-id").is_none());

    app.config_mut().update([("ENABLE_REQUEST_ID", "true")]).unwrap();
    let response = client(&app).get("/health").await.unwrap();
    let id = response.header("x-request-id").expect("request id header");
    assert_eq!(id.len(), 36);
}

#[tokio::test]
async fn test_readiness_reports_invalid_config() {
    let config = AppConfig {
        request_timeout: 0,
        ..AppConfig::for_testing()
    };
    let router = create_routes(AppState::new(config.clone()));
    let client = TestClient::new(router, config);

    let response = client.get("/_readiness").await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body: Value = response.json().unwrap();
    assert_eq!(
        body,
        json!({
            "error": "unavailable",
            "status": 503,
            "message": "Service unavailable: Request timeout cannot be 0"
        })
    );
}
