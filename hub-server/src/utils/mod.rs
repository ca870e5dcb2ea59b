//! Utility module - shared helpers and types
//!
//! # Contents
//!
//! - [`AppError`] - application error type with HTTP mapping
//! - [`AppResponse`] - error envelope returned to clients
//! - logging setup

pub mod error;
pub mod logger;
pub mod result;

// Re-export common types for handlers
pub use error::{AppError, AppResponse};
pub use result::AppResult;
