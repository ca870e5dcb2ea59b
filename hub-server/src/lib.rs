//! Marketplace Hub Server - order lifecycle backend
//!
//! # Module structure
//!
//! ```text
//! hub-server/src/
//! ├── core/     # Configuration, shared state, server bootstrap
//! ├── api/      # HTTP routes and handlers
//! ├── orders/   # Lifecycle engine: policy, approval chain, projection
//! ├── audit/    # Audit trail service
//! ├── db/       # SQLite pool and repositories
//! └── utils/    # Errors, logging
//! ```

pub mod api;
pub mod audit;
pub mod core;
pub mod db;
pub mod orders;
pub mod utils;

// Re-export common types
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResponse, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Audit logging macro - records one event through the audit service.
///
/// Expands to [`audit::AuditService::log`] with the actor's code and role
/// filled in, so handlers stay one-expression short:
///
/// ```ignore
/// audit_log!(
///     state.audit_service,
///     AuditAction::OrderCreated,
///     "order", &id,
///     actor = actor,
///     details = json!({ "status": view.status })
/// );
/// ```
#[macro_export]
macro_rules! audit_log {
    ($svc:expr, $action:expr, $kind:expr, $id:expr, actor = $actor:expr, details = $details:expr) => {
        $svc.log(
            $action,
            $kind,
            $id,
            Some($actor.code.as_str()),
            Some($actor.role),
            None,
            $details,
        )
        .await
    };
    ($svc:expr, $action:expr, $kind:expr, $id:expr, actor = $actor:expr, description = $desc:expr, details = $details:expr) => {
        $svc.log(
            $action,
            $kind,
            $id,
            Some($actor.code.as_str()),
            Some($actor.role),
            $desc,
            $details,
        )
        .await
    };
}

/// Process-level setup: .env file, then logging.
///
/// Call once, before anything logs.
pub fn setup_environment() {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), None, log_dir.as_deref());
}

pub fn print_banner() {
    println!(
        r#"
    __  __      __
   / / / /_  __/ /_
  / /_/ / / / / __ \
 / __  / /_/ / /_/ /
/_/ /_/\__,_/_.___/
   _____
  / ___/___  ______   _____  _____
  \__ \/ _ \/ ___/ | / / _ \/ ___/
 ___/ /  __/ /   | |/ /  __/ /
/____/\___/_/    |___/\___/_/
    "#
    );
}
