//! Directory Models
//!
//! One row type per organizational table. The FK columns mirror the
//! hierarchy the order store walks when backfilling org codes:
//! crew → site → client → contractor → coordinator, depot → operator.

use serde::{Deserialize, Serialize};

use super::role::Role;

/// Coordinator organization (row in `coordinators`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Coordinator {
    pub code: String,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// Contractor organization (row in `contractors`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Contractor {
    pub code: String,
    pub name: String,
    pub coordinator_code: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// Client organization (row in `clients`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Client {
    pub code: String,
    pub name: String,
    pub contractor_code: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// Site (row in `sites`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Site {
    pub code: String,
    pub name: String,
    pub client_code: Option<String>,
    pub contractor_code: Option<String>,
    pub coordinator_code: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// Field crew (row in `crews`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Crew {
    pub code: String,
    pub name: String,
    pub site_code: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// Depot (row in `depots`). Depots whose normalized code ends in `-TEST`
/// form the test pool; the rest are production.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Depot {
    pub code: String,
    pub name: String,
    /// Coordinator operating this depot; preferred during auto-selection.
    pub operator_code: Option<String>,
    pub is_active: bool,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// Contact snapshot taken at order creation and frozen into the
/// `contacts` metadata facet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactCard {
    pub code: String,
    pub role: Role,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}
