//! Audit service
//!
//! Records lifecycle events after their transaction commits. Recording is
//! fire-and-forget: a failed insert is logged and swallowed so the audit
//! trail can never fail the request that produced it.

use shared::models::Role;
use shared::util::now_millis;
use sqlx::SqlitePool;
use tracing::error;

use crate::db::repository::RepoResult;

use super::types::{AuditAction, AuditEvent};

const MAX_QUERY_LIMIT: i64 = 200;

/// Audit service over the shared pool
#[derive(Debug, Clone)]
pub struct AuditService {
    pool: SqlitePool,
}

impl AuditService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Record one event. Never fails the caller.
    #[allow(clippy::too_many_arguments)]
    pub async fn log(
        &self,
        action: AuditAction,
        target_kind: &str,
        target_id: &str,
        actor_code: Option<&str>,
        actor_role: Option<Role>,
        description: Option<&str>,
        details: serde_json::Value,
    ) {
        let result = sqlx::query(
            r#"
            INSERT INTO audit_events
                (action, actor_code, actor_role, target_id, target_kind, description,
                 metadata, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(action.as_str())
        .bind(actor_code)
        .bind(actor_role.map(|r| r.as_str()))
        .bind(target_id)
        .bind(target_kind)
        .bind(description)
        .bind(details.to_string())
        .bind(now_millis())
        .execute(&self.pool)
        .await;

        if let Err(e) = result {
            error!(target: "audit", error = %e, action = action.as_str(), target_id, "Failed to record audit event");
        }
    }

    /// Recent events, newest first, optionally scoped to one target.
    pub async fn recent(&self, target: Option<&str>, limit: i64) -> RepoResult<Vec<AuditEvent>> {
        let limit = limit.clamp(1, MAX_QUERY_LIMIT);
        let events = match target {
            Some(target) => {
                sqlx::query_as::<_, AuditEvent>(
                    "SELECT id, action, actor_code, actor_role, target_id, target_kind, \
                     description, metadata, created_at \
                     FROM audit_events WHERE target_id = ?1 \
                     ORDER BY created_at DESC, id DESC LIMIT ?2",
                )
                .bind(target)
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, AuditEvent>(
                    "SELECT id, action, actor_code, actor_role, target_id, target_kind, \
                     description, metadata, created_at \
                     FROM audit_events \
                     ORDER BY created_at DESC, id DESC LIMIT ?1",
                )
                .bind(limit)
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        sqlx::query(
            "CREATE TABLE audit_events (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                action TEXT NOT NULL,
                actor_code TEXT,
                actor_role TEXT,
                target_id TEXT NOT NULL,
                target_kind TEXT NOT NULL,
                description TEXT,
                metadata TEXT NOT NULL DEFAULT '{}',
                created_at INTEGER NOT NULL
            )",
        )
        .execute(&pool)
        .await
        .unwrap();

        pool
    }

    #[tokio::test]
    async fn test_log_and_read_back() {
        let service = AuditService::new(test_pool().await);

        service
            .log(
                AuditAction::OrderCreated,
                "order",
                "CEN-01-PO-001",
                Some("CEN-01"),
                Some(Role::Site),
                None,
                json!({"kind": "product"}),
            )
            .await;
        service
            .log(
                AuditAction::OrderAccepted,
                "order",
                "CEN-01-PO-001",
                Some("DEP-01"),
                Some(Role::Depot),
                None,
                json!({}),
            )
            .await;

        let events = service.recent(Some("CEN-01-PO-001"), 10).await.unwrap();
        assert_eq!(events.len(), 2);
        // Newest first
        assert_eq!(events[0].action, "order_accepted");
        assert_eq!(events[1].action, "order_created");
        assert_eq!(events[1].actor_role.as_deref(), Some("site"));
        assert_eq!(events[1].metadata["kind"], "product");
    }

    #[tokio::test]
    async fn test_target_filter_scopes_results() {
        let service = AuditService::new(test_pool().await);

        service
            .log(AuditAction::OrderCreated, "order", "A-PO-001", None, None, None, json!({}))
            .await;
        service
            .log(AuditAction::OrderCreated, "order", "B-PO-001", None, None, None, json!({}))
            .await;

        let scoped = service.recent(Some("A-PO-001"), 10).await.unwrap();
        assert_eq!(scoped.len(), 1);

        let all = service.recent(None, 10).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_log_failure_is_swallowed() {
        // No audit_events table at all
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let service = AuditService::new(pool);

        // Must not panic or error out
        service
            .log(AuditAction::OrderCreated, "order", "X", None, None, None, json!({}))
            .await;
    }
}
