//! Monotonic sequence allocation for order and service codes
//!
//! Counters are advanced with a single atomic upsert so concurrent
//! allocations never hand out the same number, even across processes.

use super::RepoResult;
use sqlx::SqliteExecutor;

/// Allocate the next sequence number for a creator/kind pair
pub async fn next_order_seq(
    exec: impl SqliteExecutor<'_>,
    creator_code: &str,
    order_kind: &str,
) -> RepoResult<i64> {
    let seq: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO order_sequences (creator_code, order_kind, next_seq)
        VALUES (?1, ?2, 1)
        ON CONFLICT(creator_code, order_kind)
        DO UPDATE SET next_seq = next_seq + 1
        RETURNING next_seq
        "#,
    )
    .bind(creator_code)
    .bind(order_kind)
    .fetch_one(exec)
    .await?;

    Ok(seq)
}

/// Allocate the next service sequence number for a site
pub async fn next_service_seq(exec: impl SqliteExecutor<'_>, site_code: &str) -> RepoResult<i64> {
    let seq: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO service_sequences (site_code, next_seq)
        VALUES (?1, 1)
        ON CONFLICT(site_code)
        DO UPDATE SET next_seq = next_seq + 1
        RETURNING next_seq
        "#,
    )
    .bind(site_code)
    .fetch_one(exec)
    .await?;

    Ok(seq)
}
