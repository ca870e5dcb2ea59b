//! Audit Module
//!
//! Durable trail of lifecycle events, written after the triggering
//! transaction commits.

pub mod service;
pub mod types;

pub use service::AuditService;
pub use types::{AuditAction, AuditEvent};
