//! Service record persistence
//!
//! One record per transformed service order. The UNIQUE constraint on
//! `order_id` plus `DO NOTHING` makes the terminal accept idempotent: a
//! replayed accept sees the existing record instead of minting a second code.

use super::RepoResult;
use shared::models::ServiceRecord;
use sqlx::{SqliteConnection, SqlitePool};

/// Insert a service record unless the order already has one.
///
/// Returns `true` when a new row was written.
pub async fn insert_if_absent(
    conn: &mut SqliteConnection,
    record: &ServiceRecord,
) -> RepoResult<bool> {
    let result = sqlx::query(
        r#"
        INSERT INTO service_records
            (service_code, order_id, site_code, catalog_code, name, status, created_at, created_by)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
        ON CONFLICT(order_id) DO NOTHING
        "#,
    )
    .bind(&record.service_code)
    .bind(&record.order_id)
    .bind(&record.site_code)
    .bind(&record.catalog_code)
    .bind(&record.name)
    .bind(&record.status)
    .bind(record.created_at)
    .bind(&record.created_by)
    .execute(&mut *conn)
    .await?;

    Ok(result.rows_affected() == 1)
}

/// Find the service record spawned by an order, if any
pub async fn find_by_order(pool: &SqlitePool, order_id: &str) -> RepoResult<Option<ServiceRecord>> {
    let record = sqlx::query_as::<_, ServiceRecord>(
        "SELECT service_code, order_id, site_code, catalog_code, name, status, created_at, created_by \
         FROM service_records WHERE order_id = ?1",
    )
    .bind(order_id)
    .fetch_optional(pool)
    .await?;

    Ok(record)
}

/// Same lookup against an open transaction
pub async fn find_by_order_tx(
    conn: &mut SqliteConnection,
    order_id: &str,
) -> RepoResult<Option<ServiceRecord>> {
    let record = sqlx::query_as::<_, ServiceRecord>(
        "SELECT service_code, order_id, site_code, catalog_code, name, status, created_at, created_by \
         FROM service_records WHERE order_id = ?1",
    )
    .bind(order_id)
    .fetch_optional(&mut *conn)
    .await?;

    Ok(record)
}
