//! Repository layer
//!
//! Module-level query functions over the shared connection pool. Each
//! submodule covers one table family; multi-statement workflows that need
//! a transaction live in `crate::orders::store` and call the single-statement
//! functions here with the open transaction as executor.

pub mod catalog;
pub mod directory;
pub mod inventory;
pub mod orders;
pub mod participants;
pub mod sequences;
pub mod services;

use thiserror::Error;

/// Repository error type
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Duplicate entry: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => RepoError::NotFound("row not found".to_string()),
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepoError::Duplicate(db.message().to_string())
            }
            _ => RepoError::Database(err.to_string()),
        }
    }
}

/// Repository result type
pub type RepoResult<T> = Result<T, RepoError>;
