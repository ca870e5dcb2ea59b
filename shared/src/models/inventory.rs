//! Inventory Model

use serde::{Deserialize, Serialize};

/// Stock level of one catalog item at one depot
/// (row in `inventory_levels`, PK `(depot_code, catalog_code)`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct InventoryLevel {
    pub depot_code: String,
    pub catalog_code: String,
    pub quantity_on_hand: f64,
    pub quantity_reserved: f64,
}
