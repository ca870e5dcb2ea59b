//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::json;

use shared::models::{OrderActionRequest, OrderArchiveRequest, OrderCreate, OrderView};

use crate::api::actor::CurrentActor;
use crate::audit::AuditAction;
use crate::audit_log;
use crate::core::ServerState;
use crate::orders::projector::Viewer;
use crate::orders::service;
use crate::utils::AppResult;

const RESOURCE: &str = "order";

/// POST /api/orders - create a product or service order
pub async fn create(
    State(state): State<ServerState>,
    actor: CurrentActor,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<OrderView>> {
    let view = service::create_order(&state.pool, actor.role, &actor.code, &payload).await?;

    audit_log!(
        state.audit_service,
        AuditAction::OrderCreated,
        RESOURCE, &view.order_id,
        actor = actor,
        details = json!({
            "kind": view.order_kind,
            "status": view.status,
            "title": view.title,
            "destination": view.destination,
        })
    );

    Ok(Json(view))
}

/// GET /api/orders/:order_id - full projection of one order
///
/// Viewer-specific fields (`viewer_status`, `available_actions`) are filled
/// only when the actor headers are present.
pub async fn get_by_id(
    State(state): State<ServerState>,
    actor: Option<CurrentActor>,
    Path(order_id): Path<String>,
) -> AppResult<Json<OrderView>> {
    let viewer = actor.map(|a| Viewer {
        role: a.role,
        code: a.code,
    });
    let view = service::order_by_id(&state.pool, viewer.as_ref(), &order_id).await?;
    Ok(Json(view))
}

/// POST /api/orders/:order_id/actions - apply a lifecycle action
pub async fn apply_action(
    State(state): State<ServerState>,
    actor: CurrentActor,
    Path(order_id): Path<String>,
    Json(payload): Json<OrderActionRequest>,
) -> AppResult<Json<OrderView>> {
    let view =
        service::apply_order_action(&state.pool, actor.role, &actor.code, &order_id, &payload)
            .await?;

    audit_log!(
        state.audit_service,
        AuditAction::for_order_action(payload.action),
        RESOURCE, &view.order_id,
        actor = actor,
        details = json!({
            "action": payload.action,
            "status": view.status,
            "transformedCode": view.transformed_code,
        })
    );

    Ok(Json(view))
}

/// POST /api/orders/:order_id/archive - hide an order from listings
pub async fn archive(
    State(state): State<ServerState>,
    actor: CurrentActor,
    Path(order_id): Path<String>,
    payload: Option<Json<OrderArchiveRequest>>,
) -> AppResult<Json<OrderView>> {
    let reason = payload.and_then(|Json(body)| body.reason);
    let view = service::archive_order(
        &state.pool,
        actor.role,
        &actor.code,
        &order_id,
        reason.as_deref(),
    )
    .await?;

    audit_log!(
        state.audit_service,
        AuditAction::OrderArchived,
        RESOURCE, &view.order_id,
        actor = actor,
        description = reason.as_deref(),
        details = json!({ "archivedAt": view.archived_at })
    );

    Ok(Json(view))
}

/// POST /api/orders/:order_id/restore - bring an archived order back
pub async fn restore(
    State(state): State<ServerState>,
    actor: CurrentActor,
    Path(order_id): Path<String>,
) -> AppResult<Json<OrderView>> {
    let view = service::restore_order(&state.pool, actor.role, &actor.code, &order_id).await?;

    audit_log!(
        state.audit_service,
        AuditAction::OrderRestored,
        RESOURCE, &view.order_id,
        actor = actor,
        details = json!({ "status": view.status })
    );

    Ok(Json(view))
}
