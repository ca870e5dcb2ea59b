//! Server state
//!
//! Shared state handed to every handler: configuration, the SQLite pool
//! and the audit service.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::audit::AuditService;
use crate::core::config::Config;
use crate::db::DbService;
use crate::utils::AppError;

/// Shared server state
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub pool: SqlitePool,
    pub audit_service: Arc<AuditService>,
}

impl ServerState {
    /// Prepare the work directory, open the database and build services
    pub async fn initialize(config: Config) -> Result<Self, AppError> {
        config
            .ensure_work_dirs()
            .map_err(|e| AppError::internal(format!("Failed to prepare work dir: {e}")))?;

        let db = DbService::new(&config.database_path()).await?;
        let audit_service = Arc::new(AuditService::new(db.pool.clone()));

        Ok(Self {
            config,
            pool: db.pool,
            audit_service,
        })
    }
}
