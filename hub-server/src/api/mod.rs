//! API module
//!
//! # Structure
//!
//! - [`health`] - liveness probe
//! - [`orders`] - order lifecycle endpoints
//! - [`hub`] - role-scoped listings for the dashboard
//! - [`audit_log`] - audit trail reads
//! - [`actor`] - acting-party extractor shared by the handlers

pub mod actor;
pub mod audit_log;
pub mod health;
pub mod hub;
pub mod orders;

use axum::Router;
use axum::http::{HeaderName, HeaderValue, Request};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};

/// Request ID generator: one uuid v4 per request
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(orders::router())
        .merge(hub::router())
        .merge(audit_log::router())
}

/// Build the full application: routes plus middleware, bound to state
pub fn build_app(state: ServerState) -> Router {
    build_router()
        // CORS - the dashboards call from other origins
        .layer(CorsLayer::permissive())
        // Compression - gzip responses
        .layer(CompressionLayer::new())
        // Trace - request spans at INFO level
        .layer(TraceLayer::new_for_http())
        // Request ID - generate, then propagate to the response
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static("x-request-id"),
            XRequestId,
        ))
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            "x-request-id",
        )))
        .with_state(state)
}
