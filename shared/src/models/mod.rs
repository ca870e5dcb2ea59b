//! Data models
//!
//! Shared between hub-server and frontend (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are TEXT codes except audit rows (`i64` SQLite INTEGER PRIMARY KEY).

pub mod catalog;
pub mod directory;
pub mod inventory;
pub mod order;
pub mod role;
pub mod service;

// Re-exports
pub use catalog::*;
pub use directory::*;
pub use inventory::*;
pub use order::*;
pub use role::*;
pub use service::*;
