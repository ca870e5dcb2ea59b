//! Audit types

use std::fmt;

use serde::{Deserialize, Serialize};
use shared::models::OrderAction;

/// Audit action kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    OrderCreated,
    OrderAccepted,
    DeliveryStarted,
    OrderDelivered,
    OrderCompleted,
    OrderCancelled,
    OrderRejected,
    OrderArchived,
    OrderRestored,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::OrderCreated => "order_created",
            AuditAction::OrderAccepted => "order_accepted",
            AuditAction::DeliveryStarted => "delivery_started",
            AuditAction::OrderDelivered => "order_delivered",
            AuditAction::OrderCompleted => "order_completed",
            AuditAction::OrderCancelled => "order_cancelled",
            AuditAction::OrderRejected => "order_rejected",
            AuditAction::OrderArchived => "order_archived",
            AuditAction::OrderRestored => "order_restored",
        }
    }

    /// Event recorded for a lifecycle action once it commits.
    ///
    /// `create-service` completes the order, hence `order_completed`;
    /// intermediate and terminal accepts both record `order_accepted`.
    pub fn for_order_action(action: OrderAction) -> AuditAction {
        match action {
            OrderAction::Accept => AuditAction::OrderAccepted,
            OrderAction::StartDelivery => AuditAction::DeliveryStarted,
            OrderAction::Deliver => AuditAction::OrderDelivered,
            OrderAction::CreateService => AuditAction::OrderCompleted,
            OrderAction::Cancel => AuditAction::OrderCancelled,
            OrderAction::Reject => AuditAction::OrderRejected,
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Audit event (row in `audit_events`)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AuditEvent {
    pub id: i64,
    pub action: String,
    pub actor_code: Option<String>,
    pub actor_role: Option<String>,
    pub target_id: String,
    pub target_kind: String,
    pub description: Option<String>,
    #[sqlx(json)]
    pub metadata: serde_json::Value,
    pub created_at: i64,
}
