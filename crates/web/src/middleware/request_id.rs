//! Request ID generation.
//!
//! Every request without an `x-request-id` header gets a fresh UUID v4; the
//! id is copied onto the response so clients can correlate logs.

use axum::http::{HeaderValue, Request};
use tower::ServiceBuilder;
use tower::layer::util::{Identity, Stack};
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use uuid::Uuid;

/// Name of the request id header.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Generates UUID v4 request ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Layer stack that sets and then propagates `x-request-id`.
pub type RequestIdLayers =
    Stack<PropagateRequestIdLayer, Stack<SetRequestIdLayer<UuidRequestId>, Identity>>;

/// Builds the request id layers.
pub fn request_id_layers() -> ServiceBuilder<RequestIdLayers> {
    ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
        .layer(PropagateRequestIdLayer::x_request_id())
}
