//! Order participant attachments

use super::RepoResult;
use shared::models::OrderParticipant;
use sqlx::{SqliteExecutor, SqlitePool};

/// Attach a party to an order, or refresh its participation type.
///
/// The conflict guard keeps a creator row from ever being downgraded to
/// actor or watcher by a later attach of the same party.
pub async fn upsert(
    exec: impl SqliteExecutor<'_>,
    order_id: &str,
    participant_code: &str,
    participant_role: &str,
    participation_type: &str,
    now: i64,
) -> RepoResult<()> {
    sqlx::query(
        r#"
        INSERT INTO order_participants
            (order_id, participant_code, participant_role, participation_type, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5)
        ON CONFLICT(order_id, participant_code, participant_role)
        DO UPDATE SET participation_type = excluded.participation_type
        WHERE order_participants.participation_type != 'creator'
        "#,
    )
    .bind(order_id)
    .bind(participant_code)
    .bind(participant_role)
    .bind(participation_type)
    .bind(now)
    .execute(exec)
    .await?;

    Ok(())
}

/// All participants attached to an order
pub async fn find_by_order(pool: &SqlitePool, order_id: &str) -> RepoResult<Vec<OrderParticipant>> {
    let rows = sqlx::query_as::<_, OrderParticipant>(
        "SELECT id, order_id, participant_code, participant_role, participation_type, created_at \
         FROM order_participants WHERE order_id = ?1 ORDER BY id ASC",
    )
    .bind(order_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        sqlx::query(
            "CREATE TABLE order_participants (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                order_id TEXT NOT NULL,
                participant_code TEXT NOT NULL,
                participant_role TEXT NOT NULL,
                participation_type TEXT NOT NULL,
                created_at INTEGER NOT NULL,
                UNIQUE (order_id, participant_code, participant_role)
            )",
        )
        .execute(&pool)
        .await
        .unwrap();

        pool
    }

    #[tokio::test]
    async fn test_upsert_never_downgrades_creator() {
        let pool = test_pool().await;

        upsert(&pool, "CEN-01-SO-001", "CEN-01", "site", "creator", 1000).await.unwrap();
        // Re-attaching the creator as a watcher must not stick
        upsert(&pool, "CEN-01-SO-001", "CEN-01", "site", "watcher", 2000).await.unwrap();

        let rows = find_by_order(&pool, "CEN-01-SO-001").await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].participation_type, "creator");
    }

    #[tokio::test]
    async fn test_upsert_refreshes_non_creator_type() {
        let pool = test_pool().await;

        upsert(&pool, "CEN-01-SO-001", "BLD-07", "contractor", "watcher", 1000).await.unwrap();
        upsert(&pool, "CEN-01-SO-001", "BLD-07", "contractor", "actor", 2000).await.unwrap();

        let rows = find_by_order(&pool, "CEN-01-SO-001").await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].participation_type, "actor");
    }

    #[tokio::test]
    async fn test_same_code_different_role_is_distinct() {
        let pool = test_pool().await;

        upsert(&pool, "CEN-01-SO-001", "ACME", "contractor", "actor", 1000).await.unwrap();
        upsert(&pool, "CEN-01-SO-001", "ACME", "client", "watcher", 1000).await.unwrap();

        let rows = find_by_order(&pool, "CEN-01-SO-001").await.unwrap();
        assert_eq!(rows.len(), 2);
    }
}
