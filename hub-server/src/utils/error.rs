//! Unified error handling
//!
//! Application error enum and the response envelope:
//! - [`AppError`] - application errors
//! - [`AppResponse`] - API error envelope
//!
//! # Error code scheme
//!
//! | Code | Category | HTTP |
//! |------|----------|------|
//! | E0002 | Validation failed | 400 |
//! | E0003 | Resource not found | 404 |
//! | E0004 | Consistency conflict | 409 |
//! | E0006 | Invalid request | 400 |
//! | E2001 | Action not permitted | 403 |
//! | E9001 | Internal error | 500 |
//! | E9002 | Database error | 500 |
//!
//! Handlers return plain JSON bodies on success; only failures go through
//! the envelope.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use crate::db::repository::RepoError;

/// API error envelope
///
/// ```json
/// {
///   "code": "E0003",
///   "message": "Resource not found: order X"
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct AppResponse<T> {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
}

/// Application error enum
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== Business errors (4xx) ==========
    #[error("Resource not found: {0}")]
    /// Missing resource (404)
    NotFound(String),

    #[error("Conflict: {0}")]
    /// Consistency conflict, e.g. no depot available (409)
    Conflict(String),

    #[error("Validation failed: {0}")]
    /// Bad payload content (400)
    Validation(String),

    #[error("Permission denied: {0}")]
    /// Policy denial, carries the policy's reason verbatim (403)
    Forbidden(String),

    #[error("Invalid request: {0}")]
    /// Malformed request, e.g. unparseable identity headers (400)
    Invalid(String),

    // ========== System errors (5xx) ==========
    #[error("Database error: {0}")]
    /// Database failure (500), detail logged but not exposed
    Database(String),

    #[error("Internal server error: {0}")]
    /// Everything else (500), detail logged but not exposed
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "E0003", msg.as_str()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "E0004", msg.as_str()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "E0002", msg.as_str()),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, "E2001", msg.as_str()),
            AppError::Invalid(msg) => (StatusCode::BAD_REQUEST, "E0006", msg.as_str()),

            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, "E9002", "Database error")
            }

            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "E9001",
                    "Internal server error",
                )
            }
        };

        let body = Json(AppResponse::<()> {
            code: code.to_string(),
            message: message.to_string(),
            data: None,
            trace_id: None,
        });

        (status, body).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Conflict(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::from(RepoError::from(e))
    }
}

// ========== Helper Constructors ==========

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
