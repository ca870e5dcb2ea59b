//! Shared types for the marketplace hub
//!
//! Row structs, enums and request/response payloads used across crates.
//! Database derives (`sqlx::FromRow`) are gated behind the `db` feature so
//! consumers can depend on the models without pulling in sqlx.

pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
