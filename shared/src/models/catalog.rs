//! Catalog Model

use serde::{Deserialize, Serialize};

/// Purchasable catalog entry (row in `catalog_items`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CatalogItem {
    pub code: String,
    pub name: String,
    /// `product` or `service`.
    pub item_kind: String,
    pub description: Option<String>,
    pub unit: Option<String>,
    pub unit_price: Option<f64>,
    pub currency: Option<String>,
    /// Services only: `coordinator` or `depot`, the terminal fulfiller.
    pub managed_by: Option<String>,
    pub is_active: bool,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub metadata: serde_json::Value,
}
