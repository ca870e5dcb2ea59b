//! Catalog item queries

use super::RepoResult;
use shared::models::CatalogItem;
use sqlx::SqlitePool;

const COLUMNS: &str = "code, name, item_kind, description, unit, unit_price, currency, \
                       managed_by, is_active, metadata";

/// Find a catalog item by its code
pub async fn find_by_code(pool: &SqlitePool, code: &str) -> RepoResult<Option<CatalogItem>> {
    let item = sqlx::query_as::<_, CatalogItem>(&format!(
        "SELECT {COLUMNS} FROM catalog_items WHERE code = ?1"
    ))
    .bind(code)
    .fetch_optional(pool)
    .await?;

    Ok(item)
}
