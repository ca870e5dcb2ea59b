//! Audit API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::audit::AuditEvent;
use crate::core::ServerState;
use crate::utils::AppResult;

const DEFAULT_LIMIT: i64 = 50;

#[derive(Debug, Deserialize)]
pub struct AuditQuery {
    /// Restrict to events on one target, usually an order id.
    pub target: Option<String>,
    pub limit: Option<i64>,
}

/// GET /api/audit - recent audit events, newest first
pub async fn list_recent(
    State(state): State<ServerState>,
    Query(query): Query<AuditQuery>,
) -> AppResult<Json<Vec<AuditEvent>>> {
    let events = state
        .audit_service
        .recent(query.target.as_deref(), query.limit.unwrap_or(DEFAULT_LIMIT))
        .await?;
    Ok(Json(events))
}
