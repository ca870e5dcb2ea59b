//! Service Record Model

use serde::{Deserialize, Serialize};

/// Scheduled service spawned from a fully approved service order
/// (row in `service_records`; at most one per order).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ServiceRecord {
    /// `<SITE>-SRV-NNN`, allocated from the per-site sequence.
    pub service_code: String,
    pub order_id: String,
    pub site_code: String,
    /// Catalog code of the first service line.
    pub catalog_code: Option<String>,
    pub name: String,
    pub status: String,
    pub created_at: i64,
    pub created_by: String,
}
