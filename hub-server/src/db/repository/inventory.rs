//! Depot inventory adjustments
//!
//! Delivery decrements stock inside the same transaction that flips the
//! order status, so a failed update rolls the whole action back.

use super::RepoResult;
use shared::models::InventoryLevel;
use sqlx::{SqliteExecutor, SqlitePool};

/// Apply a delivered quantity against a depot's stock level.
///
/// On-hand is decremented exactly (and may go negative when the depot was
/// never stocked); reserved is released but floored at zero.
pub async fn apply_delivery(
    exec: impl SqliteExecutor<'_>,
    depot_code: &str,
    catalog_code: &str,
    quantity: f64,
) -> RepoResult<()> {
    sqlx::query(
        r#"
        INSERT INTO inventory_levels (depot_code, catalog_code, quantity_on_hand, quantity_reserved)
        VALUES (?1, ?2, -?3, 0)
        ON CONFLICT(depot_code, catalog_code) DO UPDATE SET
            quantity_on_hand = quantity_on_hand - ?3,
            quantity_reserved = MAX(0, quantity_reserved - ?3)
        "#,
    )
    .bind(depot_code)
    .bind(catalog_code)
    .bind(quantity)
    .execute(exec)
    .await?;

    Ok(())
}

/// Current stock level for a depot/item pair
pub async fn find_level(
    pool: &SqlitePool,
    depot_code: &str,
    catalog_code: &str,
) -> RepoResult<Option<InventoryLevel>> {
    let level = sqlx::query_as::<_, InventoryLevel>(
        "SELECT depot_code, catalog_code, quantity_on_hand, quantity_reserved \
         FROM inventory_levels WHERE depot_code = ?1 AND catalog_code = ?2",
    )
    .bind(depot_code)
    .bind(catalog_code)
    .fetch_optional(pool)
    .await?;

    Ok(level)
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
            "CREATE TABLE inventory_levels (
                depot_code TEXT NOT NULL,
                catalog_code TEXT NOT NULL,
                quantity_on_hand REAL NOT NULL DEFAULT 0,
                quantity_reserved REAL NOT NULL DEFAULT 0,
                PRIMARY KEY (depot_code, catalog_code)
            )",
        )
        .execute(&pool)
        .await
        .unwrap();

        sqlx::query(
            "INSERT INTO inventory_levels VALUES ('DEP-01', 'PRD-100', 100.0, 3.0)",
        )
        .execute(&pool)
        .await
        .unwrap();

        pool
    }

    #[tokio::test]
    async fn test_delivery_decrements_and_floors_reserved() {
        let pool = test_pool().await;

        apply_delivery(&pool, "DEP-01", "PRD-100", 5.0).await.unwrap();

        let level = find_level(&pool, "DEP-01", "PRD-100").await.unwrap().unwrap();
        assert_eq!(level.quantity_on_hand, 95.0);
        // 3 - 5 floors at 0 rather than going negative
        assert_eq!(level.quantity_reserved, 0.0);
    }

    #[tokio::test]
    async fn test_delivery_for_unstocked_item_creates_row() {
        let pool = test_pool().await;

        apply_delivery(&pool, "DEP-01", "PRD-200", 2.0).await.unwrap();

        let level = find_level(&pool, "DEP-01", "PRD-200").await.unwrap().unwrap();
        assert_eq!(level.quantity_on_hand, -2.0);
        assert_eq!(level.quantity_reserved, 0.0);
    }
}
