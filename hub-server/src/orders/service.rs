//! Order service facade
//!
//! The only entry point the API layer calls. Adds creation eligibility on
//! top of the store and shapes the role-scoped listing into the grouped
//! payload the hub endpoint returns.

use shared::models::{
    HubOrdersPayload, OrderActionRequest, OrderCreate, OrderKind, OrderStatus, OrderView, Role,
};
use sqlx::SqlitePool;

use crate::utils::{AppError, AppResult};

use super::projector::Viewer;
use super::{policy, store};

/// Create an order on behalf of an actor.
pub async fn create_order(
    pool: &SqlitePool,
    actor_role: Role,
    actor_code: &str,
    payload: &OrderCreate,
) -> AppResult<OrderView> {
    if !policy::can_create(actor_role, payload.order_kind) {
        return Err(AppError::forbidden(format!(
            "Role '{}' cannot create {} orders",
            actor_role.as_str(),
            payload.order_kind.as_str()
        )));
    }
    store::create_order(pool, actor_role, actor_code, payload).await
}

/// Apply a lifecycle action on behalf of an actor.
pub async fn apply_order_action(
    pool: &SqlitePool,
    actor_role: Role,
    actor_code: &str,
    order_id: &str,
    request: &OrderActionRequest,
) -> AppResult<OrderView> {
    store::apply_action(pool, actor_role, actor_code, order_id, request).await
}

/// Project one order, with viewer-specific fields when a viewer is known.
pub async fn order_by_id(
    pool: &SqlitePool,
    viewer: Option<&Viewer>,
    order_id: &str,
) -> AppResult<OrderView> {
    store::get_order(pool, order_id, viewer).await
}

/// Role-scoped listing, grouped by kind for the hub dashboard.
pub async fn orders_for_role(
    pool: &SqlitePool,
    role: Role,
    code: &str,
    status: Option<OrderStatus>,
    kind: Option<OrderKind>,
) -> AppResult<HubOrdersPayload> {
    let orders = store::list_for_party(pool, role, code, status, kind).await?;

    let mut service_orders = Vec::new();
    let mut product_orders = Vec::new();
    for view in &orders {
        match view.order_kind {
            OrderKind::Service => service_orders.push(view.clone()),
            OrderKind::Product => product_orders.push(view.clone()),
        }
    }

    Ok(HubOrdersPayload {
        service_orders,
        product_orders,
        orders,
    })
}

/// Archive an order out of every listing.
pub async fn archive_order(
    pool: &SqlitePool,
    actor_role: Role,
    actor_code: &str,
    order_id: &str,
    reason: Option<&str>,
) -> AppResult<OrderView> {
    store::archive_order(pool, actor_role, actor_code, order_id, reason).await
}

/// Restore a previously archived order.
pub async fn restore_order(
    pool: &SqlitePool,
    actor_role: Role,
    actor_code: &str,
    order_id: &str,
) -> AppResult<OrderView> {
    store::restore_order(pool, actor_role, actor_code, order_id).await
}
