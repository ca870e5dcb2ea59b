//! Health check route

use axum::{Json, Router, routing::get};
use serde::Serialize;

use shared::util::now_millis;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/health", get(health))
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
    timestamp: i64,
}

/// GET /api/health - liveness probe, no auth
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "hub-server",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: now_millis(),
    })
}
