//! Order row persistence
//!
//! Row-level reads and writes only. Status interpretation, policy and
//! projection live in `crate::orders`; multi-statement workflows pass an
//! open transaction into the write functions here.

use super::{RepoError, RepoResult};
use shared::models::{Order, OrderItem, OrderKind, Role};
use sqlx::types::Json;
use sqlx::{SqliteConnection, SqlitePool};

const COLUMNS: &str = "order_id, order_kind, title, status, next_actor_role, next_actor_code, \
     creator_code, creator_role, client_code, site_code, contractor_code, coordinator_code, \
     crew_code, depot_code, destination_code, destination_role, requested_date, expected_date, \
     service_start_date, delivery_date, total_amount, currency, transformed_code, \
     rejection_reason, notes, metadata, archived_at, archived_by, archive_reason, \
     deletion_scheduled, restored_at, restored_by, created_at, updated_at";

/// Line item enriched from the catalog, ready to persist.
#[derive(Debug, Clone)]
pub struct OrderItemDraft {
    pub catalog_code: String,
    pub name: String,
    pub item_kind: String,
    pub description: Option<String>,
    pub quantity: f64,
    pub unit: Option<String>,
    pub unit_price: Option<f64>,
    pub currency: Option<String>,
    pub total_price: Option<f64>,
}

/// Column updates applied by a lifecycle action.
///
/// `notes`, `delivery_date` and `transformed_code` coalesce with the stored
/// value so an action that does not touch them leaves them alone.
#[derive(Debug)]
pub struct OrderUpdate<'a> {
    pub status: &'a str,
    pub next_actor_role: Option<&'a str>,
    pub next_actor_code: Option<&'a str>,
    pub rejection_reason: Option<&'a str>,
    pub notes: Option<&'a str>,
    pub delivery_date: Option<i64>,
    pub transformed_code: Option<&'a str>,
    pub metadata: &'a serde_json::Value,
    pub updated_at: i64,
}

/// Insert a freshly created order row
pub async fn insert(conn: &mut SqliteConnection, order: &Order) -> RepoResult<()> {
    sqlx::query(
        r#"
        INSERT INTO orders
            (order_id, order_kind, title, status, next_actor_role, next_actor_code,
             creator_code, creator_role, client_code, site_code, contractor_code,
             coordinator_code, crew_code, depot_code, destination_code, destination_role,
             requested_date, expected_date, service_start_date, delivery_date,
             total_amount, currency, transformed_code, rejection_reason, notes, metadata,
             created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16,
                ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24, ?25, ?26, ?27, ?28)
        "#,
    )
    .bind(&order.order_id)
    .bind(&order.order_kind)
    .bind(&order.title)
    .bind(&order.status)
    .bind(&order.next_actor_role)
    .bind(&order.next_actor_code)
    .bind(&order.creator_code)
    .bind(&order.creator_role)
    .bind(&order.client_code)
    .bind(&order.site_code)
    .bind(&order.contractor_code)
    .bind(&order.coordinator_code)
    .bind(&order.crew_code)
    .bind(&order.depot_code)
    .bind(&order.destination_code)
    .bind(&order.destination_role)
    .bind(order.requested_date)
    .bind(order.expected_date)
    .bind(order.service_start_date)
    .bind(order.delivery_date)
    .bind(order.total_amount)
    .bind(&order.currency)
    .bind(&order.transformed_code)
    .bind(&order.rejection_reason)
    .bind(&order.notes)
    .bind(Json(&order.metadata))
    .bind(order.created_at)
    .bind(order.updated_at)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// Insert one line item
pub async fn insert_item(
    conn: &mut SqliteConnection,
    order_id: &str,
    line_number: i64,
    item: &OrderItemDraft,
) -> RepoResult<()> {
    sqlx::query(
        r#"
        INSERT INTO order_items
            (order_id, line_number, catalog_code, name, item_kind, description,
             quantity, unit, unit_price, currency, total_price)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
        "#,
    )
    .bind(order_id)
    .bind(line_number)
    .bind(&item.catalog_code)
    .bind(&item.name)
    .bind(&item.item_kind)
    .bind(&item.description)
    .bind(item.quantity)
    .bind(&item.unit)
    .bind(item.unit_price)
    .bind(&item.currency)
    .bind(item.total_price)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// Fetch an order row by id, archived or not
pub async fn fetch_by_id(pool: &SqlitePool, order_id: &str) -> RepoResult<Option<Order>> {
    let order =
        sqlx::query_as::<_, Order>(&format!("SELECT {COLUMNS} FROM orders WHERE order_id = ?1"))
            .bind(order_id)
            .fetch_optional(pool)
            .await?;

    Ok(order)
}

/// Line items for an order, in line order
pub async fn fetch_items(pool: &SqlitePool, order_id: &str) -> RepoResult<Vec<OrderItem>> {
    let items = sqlx::query_as::<_, OrderItem>(
        "SELECT id, order_id, line_number, catalog_code, name, item_kind, description, \
         quantity, unit, unit_price, currency, total_price \
         FROM order_items WHERE order_id = ?1 ORDER BY line_number ASC",
    )
    .bind(order_id)
    .fetch_all(pool)
    .await?;

    Ok(items)
}

fn role_column(role: Role) -> &'static str {
    match role {
        Role::Coordinator => "coordinator_code",
        Role::Contractor => "contractor_code",
        Role::Client => "client_code",
        Role::Site => "site_code",
        Role::FieldCrew => "crew_code",
        Role::Depot => "depot_code",
    }
}

/// Non-archived orders visible to a party: rows it created, rows carrying
/// its code in the role's org column, and rows shipping to it.
///
/// Newest first; SQLite sorts NULL `requested_date` last under DESC.
pub async fn list_for_party(
    pool: &SqlitePool,
    role: Role,
    code: &str,
    kind: Option<OrderKind>,
) -> RepoResult<Vec<Order>> {
    let column = role_column(role);
    let mut sql = format!(
        "SELECT {COLUMNS} FROM orders \
         WHERE (creator_code = ?1 OR {column} = ?1 OR destination_code = ?1) \
         AND archived_at IS NULL"
    );
    if kind.is_some() {
        sql.push_str(" AND order_kind = ?2");
    }
    sql.push_str(" ORDER BY requested_date DESC, created_at DESC, order_id DESC");

    let mut query = sqlx::query_as::<_, Order>(&sql).bind(code);
    if let Some(kind) = kind {
        query = query.bind(kind.as_str());
    }

    let orders = query.fetch_all(pool).await?;
    Ok(orders)
}

/// Apply a lifecycle action's column changes
pub async fn update_after_action(
    conn: &mut SqliteConnection,
    order_id: &str,
    update: &OrderUpdate<'_>,
) -> RepoResult<()> {
    let result = sqlx::query(
        r#"
        UPDATE orders SET
            status = ?2,
            next_actor_role = ?3,
            next_actor_code = ?4,
            rejection_reason = ?5,
            notes = COALESCE(?6, notes),
            delivery_date = COALESCE(?7, delivery_date),
            transformed_code = COALESCE(?8, transformed_code),
            metadata = ?9,
            updated_at = ?10
        WHERE order_id = ?1
        "#,
    )
    .bind(order_id)
    .bind(update.status)
    .bind(update.next_actor_role)
    .bind(update.next_actor_code)
    .bind(update.rejection_reason)
    .bind(update.notes)
    .bind(update.delivery_date)
    .bind(update.transformed_code)
    .bind(Json(update.metadata))
    .bind(update.updated_at)
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Order {order_id} not found")));
    }
    Ok(())
}

/// Soft-archive an order. The predicate skips rows that are already
/// archived, so a second archive reports not-found.
pub async fn archive(
    pool: &SqlitePool,
    order_id: &str,
    archived_by: &str,
    reason: Option<&str>,
    now: i64,
    deletion_scheduled: i64,
) -> RepoResult<()> {
    let result = sqlx::query(
        r#"
        UPDATE orders SET
            archived_at = ?2,
            archived_by = ?3,
            archive_reason = ?4,
            deletion_scheduled = ?5,
            updated_at = ?2
        WHERE order_id = ?1 AND archived_at IS NULL
        "#,
    )
    .bind(order_id)
    .bind(now)
    .bind(archived_by)
    .bind(reason)
    .bind(deletion_scheduled)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!(
            "Order {order_id} not found or already archived"
        )));
    }
    Ok(())
}

/// Bring an archived order back, clearing the archive columns
pub async fn restore(
    pool: &SqlitePool,
    order_id: &str,
    restored_by: &str,
    now: i64,
) -> RepoResult<()> {
    let result = sqlx::query(
        r#"
        UPDATE orders SET
            archived_at = NULL,
            archived_by = NULL,
            archive_reason = NULL,
            deletion_scheduled = NULL,
            restored_at = ?2,
            restored_by = ?3,
            updated_at = ?2
        WHERE order_id = ?1 AND archived_at IS NOT NULL
        "#,
    )
    .bind(order_id)
    .bind(now)
    .bind(restored_by)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!(
            "Order {order_id} not found or not archived"
        )));
    }
    Ok(())
}
