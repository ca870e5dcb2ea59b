//! Hub API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use shared::models::{HubOrdersPayload, OrderKind, OrderStatus};

use crate::api::actor::CurrentActor;
use crate::core::ServerState;
use crate::orders::{identity, service};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct HubOrdersQuery {
    /// Canonical status token, e.g. `pending_warehouse`.
    pub status: Option<String>,
    /// `product` or `service`.
    pub kind: Option<String>,
}

/// GET /api/hub/orders/:code - every order a party can see, grouped by kind
///
/// The path names the organization whose book is read; `x-actor-role` names
/// the role it is read as. Filters are strict: an unknown token is a 400,
/// not an empty listing.
pub async fn orders_for_party(
    State(state): State<ServerState>,
    actor: CurrentActor,
    Path(code): Path<String>,
    Query(query): Query<HubOrdersQuery>,
) -> AppResult<Json<HubOrdersPayload>> {
    let code = identity::normalize_code(&code)
        .ok_or_else(|| AppError::invalid("Party code is required"))?;

    let status = match query.status.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(
            raw.parse::<OrderStatus>()
                .map_err(|_| AppError::invalid(format!("Unknown status filter '{raw}'")))?,
        ),
    };
    let kind = match query.kind.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => Some(
            raw.parse::<OrderKind>()
                .map_err(|_| AppError::invalid(format!("Unknown kind filter '{raw}'")))?,
        ),
    };

    let payload = service::orders_for_role(&state.pool, actor.role, &code, status, kind).await?;
    Ok(Json(payload))
}
