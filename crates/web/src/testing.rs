//! In-process test client.
//!
//! [`TestClient`] sends requests straight into the application router with
//! `tower::ServiceExt::oneshot`; no socket is bound. Obtain one from
//! [`App::test_client`](crate::App::test_client).

use axum::{
    Router,
    body::{Body, Bytes},
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde::{Serialize, de::DeserializeOwned};
use tower::ServiceExt;
use tracing::debug;

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};

/// Client that simulates requests against an application.
#[derive(Debug, Clone)]
pub struct TestClient {
    router: Router,
    config: AppConfig,
}

impl TestClient {
    /// Wraps a built router together with the configuration it came from.
    pub fn new(router: Router, config: AppConfig) -> Self {
        Self { router, config }
    }

    /// Returns the configuration the application was built with.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Dispatches a request and collects the full response.
    pub async fn request(&self, request: Request<Body>) -> AppResult<TestResponse> {
        debug!(method = %request.method(), uri = %request.uri(), "Dispatching test request");

        let response = match self.router.clone().oneshot(request).await {
            Ok(response) => response,
            Err(infallible) => match infallible {},
        };

        let (parts, body) = response.into_parts();
        let body = body
            .collect()
            .await
            .map_err(|e| AppError::Internal {
                message: format!("Failed to read response body: {}", e),
            })?
            .to_bytes();

        Ok(TestResponse {
            status: parts.status,
            headers: parts.headers,
            body,
        })
    }

    /// Sends a `GET` request.
    pub async fn get(&self, path: &str) -> AppResult<TestResponse> {
        self.request(build_request(Method::GET, path, Body::empty(), None)?)
            .await
    }

    /// Sends a `DELETE` request.
    pub async fn delete(&self, path: &str) -> AppResult<TestResponse> {
        self.request(build_request(Method::DELETE, path, Body::empty(), None)?)
            .await
    }

    /// Sends a `POST` request with a JSON body.
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> AppResult<TestResponse> {
        let bytes = serde_json::to_vec(body).map_err(|e| AppError::BadRequest {
            message: format!("Failed to serialize request body: {}", e),
        })?;
        let request = build_request(
            Method::POST,
            path,
            Body::from(bytes),
            Some("application/json"),
        )?;
        self.request(request).await
    }
}

fn build_request(
    method: Method,
    path: &str,
    body: Body,
    content_type: Option<&str>,
) -> AppResult<Request<Body>> {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(content_type) = content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }
    builder.body(body).map_err(|e| AppError::BadRequest {
        message: format!("Invalid request for {}: {}", path, e),
    })
}

/// A fully collected response.
#[derive(Debug, Clone)]
pub struct TestResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl TestResponse {
    /// Returns the status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns whether the status is 2xx.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Returns the response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns a header value if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns the raw body.
    pub fn bytes(&self) -> &Bytes {
        &self.body
    }

    /// Returns the body as text, replacing invalid UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Deserializes the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> AppResult<T> {
        serde_json::from_slice(&self.body).map_err(|e| AppError::BadRequest {
            message: format!("Response body is not valid JSON: {}", e),
        })
    }
}
