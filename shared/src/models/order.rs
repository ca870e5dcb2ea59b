//! Order Model
//!
//! Rows, request payloads and projected views for the order lifecycle.
//! Status and role columns stay `String` on row structs: the database still
//! holds legacy tokens (`pending`, `in-progress`, `approved`,
//! `service-created`) which are normalized at read time, so decoding must
//! never fail on them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::role::{ParticipationType, Role};

/// Kind of purchasable work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderKind {
    Product,
    Service,
}

impl OrderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderKind::Product => "product",
            OrderKind::Service => "service",
        }
    }

    /// Middle segment of generated order IDs (`ACME-PO-001` / `ACME-SO-001`).
    pub fn id_infix(&self) -> &'static str {
        match self {
            OrderKind::Product => "PO",
            OrderKind::Service => "SO",
        }
    }
}

impl FromStr for OrderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "product" => Ok(OrderKind::Product),
            "service" => Ok(OrderKind::Service),
            other => Err(format!("unknown order kind '{other}'")),
        }
    }
}

impl fmt::Display for OrderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical order status.
///
/// The token names describe who the order is waiting on in the legacy
/// vocabulary (`customer` = client, `manager` = coordinator, `warehouse` =
/// depot) and are kept stable on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    // Product track
    PendingWarehouse,
    AwaitingDelivery,
    Delivered,
    // Service approval chain
    PendingCustomer,
    PendingContractor,
    PendingManager,
    ManagerAccepted,
    WarehouseAccepted,
    ServiceCreated,
    // Either track
    Rejected,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::PendingWarehouse => "pending_warehouse",
            OrderStatus::AwaitingDelivery => "awaiting_delivery",
            OrderStatus::Delivered => "delivered",
            OrderStatus::PendingCustomer => "pending_customer",
            OrderStatus::PendingContractor => "pending_contractor",
            OrderStatus::PendingManager => "pending_manager",
            OrderStatus::ManagerAccepted => "manager_accepted",
            OrderStatus::WarehouseAccepted => "warehouse_accepted",
            OrderStatus::ServiceCreated => "service_created",
            OrderStatus::Rejected => "rejected",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Terminal statuses admit no further actions.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderStatus::Delivered
                | OrderStatus::ServiceCreated
                | OrderStatus::Rejected
                | OrderStatus::Cancelled
        )
    }

    /// A `pending_*` stage: some party has an accept/reject in front of them.
    pub fn is_pending_stage(&self) -> bool {
        matches!(
            self,
            OrderStatus::PendingWarehouse
                | OrderStatus::PendingCustomer
                | OrderStatus::PendingContractor
                | OrderStatus::PendingManager
        )
    }

    /// Terminal-approver acknowledgement, one `create-service` away from done.
    pub fn is_accepted_stage(&self) -> bool {
        matches!(
            self,
            OrderStatus::ManagerAccepted | OrderStatus::WarehouseAccepted
        )
    }

    /// Human label. Successful terminals collapse to "Completed"; everything
    /// else is the title-cased token.
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Delivered | OrderStatus::ServiceCreated => "Completed",
            OrderStatus::PendingWarehouse => "Pending Warehouse",
            OrderStatus::AwaitingDelivery => "Awaiting Delivery",
            OrderStatus::PendingCustomer => "Pending Customer",
            OrderStatus::PendingContractor => "Pending Contractor",
            OrderStatus::PendingManager => "Pending Manager",
            OrderStatus::ManagerAccepted => "Manager Accepted",
            OrderStatus::WarehouseAccepted => "Warehouse Accepted",
            OrderStatus::Rejected => "Rejected",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    /// Badge color bucket used by every frontend.
    pub fn color(&self) -> &'static str {
        match self {
            OrderStatus::Delivered | OrderStatus::ServiceCreated => "green",
            OrderStatus::Rejected => "red",
            OrderStatus::Cancelled => "gray",
            s if s.is_pending_stage() => "yellow",
            _ => "blue",
        }
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending_warehouse" => Ok(OrderStatus::PendingWarehouse),
            "awaiting_delivery" => Ok(OrderStatus::AwaitingDelivery),
            "delivered" => Ok(OrderStatus::Delivered),
            "pending_customer" => Ok(OrderStatus::PendingCustomer),
            "pending_contractor" => Ok(OrderStatus::PendingContractor),
            "pending_manager" => Ok(OrderStatus::PendingManager),
            "manager_accepted" => Ok(OrderStatus::ManagerAccepted),
            "warehouse_accepted" => Ok(OrderStatus::WarehouseAccepted),
            "service_created" => Ok(OrderStatus::ServiceCreated),
            "rejected" => Ok(OrderStatus::Rejected),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(format!("unknown order status '{other}'")),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Action a party can apply to an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderAction {
    Accept,
    Reject,
    StartDelivery,
    Deliver,
    CreateService,
    Cancel,
}

impl OrderAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderAction::Accept => "accept",
            OrderAction::Reject => "reject",
            OrderAction::StartDelivery => "start-delivery",
            OrderAction::Deliver => "deliver",
            OrderAction::CreateService => "create-service",
            OrderAction::Cancel => "cancel",
        }
    }
}

impl FromStr for OrderAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "accept" => Ok(OrderAction::Accept),
            "reject" => Ok(OrderAction::Reject),
            "start-delivery" => Ok(OrderAction::StartDelivery),
            "deliver" => Ok(OrderAction::Deliver),
            "create-service" => Ok(OrderAction::CreateService),
            "cancel" => Ok(OrderAction::Cancel),
            other => Err(format!("unknown order action '{other}'")),
        }
    }
}

impl fmt::Display for OrderAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of an order as one particular viewer experiences it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewerStatus {
    /// The viewer is the party the order is waiting on.
    Pending,
    /// Someone else holds the ball.
    InProgress,
    Completed,
    Rejected,
    Cancelled,
    Archived,
}

impl ViewerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewerStatus::Pending => "pending",
            ViewerStatus::InProgress => "in-progress",
            ViewerStatus::Completed => "completed",
            ViewerStatus::Rejected => "rejected",
            ViewerStatus::Cancelled => "cancelled",
            ViewerStatus::Archived => "archived",
        }
    }
}

impl fmt::Display for ViewerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-row state in the approval stage breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StageStatus {
    /// Creator stage: the order exists.
    Requested,
    /// This party already accepted.
    Accepted,
    /// The order is waiting on this party right now.
    Pending,
    /// This party's turn has not come yet.
    Waiting,
    Delivered,
    ServiceCreated,
    Rejected,
    Cancelled,
}

/// Order entity (row in `orders`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub order_id: String,
    pub order_kind: String,
    pub title: String,
    /// Raw stored token; may be a legacy value on old rows.
    pub status: String,
    pub next_actor_role: Option<String>,
    pub next_actor_code: Option<String>,
    pub creator_code: String,
    pub creator_role: String,
    pub client_code: Option<String>,
    pub site_code: Option<String>,
    pub contractor_code: Option<String>,
    pub coordinator_code: Option<String>,
    pub crew_code: Option<String>,
    pub depot_code: Option<String>,
    pub destination_code: Option<String>,
    pub destination_role: Option<String>,
    /// Millisecond timestamps.
    pub requested_date: Option<i64>,
    pub expected_date: Option<i64>,
    pub service_start_date: Option<i64>,
    pub delivery_date: Option<i64>,
    /// NULL unless every line carries a price.
    pub total_amount: Option<f64>,
    pub currency: Option<String>,
    /// Code of the service record this order turned into.
    pub transformed_code: Option<String>,
    pub rejection_reason: Option<String>,
    pub notes: Option<String>,
    /// JSON facet bag (approvals, cancellation, rejection, contacts, delivery).
    #[cfg_attr(feature = "db", sqlx(json))]
    pub metadata: serde_json::Value,
    pub archived_at: Option<i64>,
    pub archived_by: Option<String>,
    pub archive_reason: Option<String>,
    pub deletion_scheduled: Option<i64>,
    pub restored_at: Option<i64>,
    pub restored_by: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Order {
    /// Backfilled org column for a role, when the order carries one.
    pub fn org_code(&self, role: Role) -> Option<&str> {
        let code = match role {
            Role::Client => &self.client_code,
            Role::Site => &self.site_code,
            Role::Contractor => &self.contractor_code,
            Role::Coordinator => &self.coordinator_code,
            Role::FieldCrew => &self.crew_code,
            Role::Depot => &self.depot_code,
        };
        code.as_deref()
    }
}

/// Order line item (row in `order_items`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub id: i64,
    pub order_id: String,
    pub line_number: i64,
    pub catalog_code: String,
    pub name: String,
    pub item_kind: String,
    pub description: Option<String>,
    pub quantity: f64,
    pub unit: Option<String>,
    pub unit_price: Option<f64>,
    pub currency: Option<String>,
    pub total_price: Option<f64>,
}

/// Order participant (row in `order_participants`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderParticipant {
    pub id: i64,
    pub order_id: String,
    pub participant_code: String,
    pub participant_role: String,
    pub participation_type: String,
    pub created_at: i64,
}

/// Explicit destination on a create payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDestination {
    pub code: String,
    pub role: Role,
}

/// One requested line on a create payload. Name, pricing and kind come from
/// the live catalog, never from the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemCreate {
    pub catalog_code: String,
    pub quantity: f64,
}

/// Create order payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub order_kind: OrderKind,
    pub title: Option<String>,
    pub items: Vec<OrderItemCreate>,
    pub destination: Option<OrderDestination>,
    /// RFC 3339 or `YYYY-MM-DD`.
    pub expected_date: Option<String>,
    pub service_start_date: Option<String>,
    pub notes: Option<String>,
    pub currency: Option<String>,
    /// Extra participants to attach, role -> code.
    pub participants: Option<std::collections::BTreeMap<Role, String>>,
    /// Free-form keys merged into the metadata bag, preserved across updates.
    pub metadata: Option<serde_json::Value>,
}

/// Apply-action payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderActionRequest {
    pub action: OrderAction,
    /// Required for `reject`; optional context for `cancel`.
    pub reason: Option<String>,
    pub notes: Option<String>,
    /// RFC 3339 or `YYYY-MM-DD`; `deliver` without it stamps the current time.
    pub delivery_date: Option<String>,
    pub metadata: Option<serde_json::Value>,
}

/// Archive payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderArchiveRequest {
    pub reason: Option<String>,
}

/// One row of the approval stage breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalStage {
    pub role: Role,
    /// Concrete party when known (creator, assigned depot).
    pub code: Option<String>,
    pub status: StageStatus,
}

/// Participant as exposed on the projected order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantView {
    pub code: String,
    pub role: Role,
    pub participation_type: ParticipationType,
}

/// Line item as exposed on the projected order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemView {
    pub line_number: i64,
    pub catalog_code: String,
    pub name: String,
    pub item_kind: String,
    pub description: Option<String>,
    pub quantity: f64,
    pub unit: Option<String>,
    pub unit_price: Option<f64>,
    pub total_price: Option<f64>,
    pub currency: Option<String>,
}

/// Fully projected order: row fields normalized into enums plus everything
/// the viewer needs to render it (label, color, viewer status, stages,
/// available actions).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderView {
    pub order_id: String,
    pub order_kind: OrderKind,
    pub title: String,
    pub status: OrderStatus,
    pub status_label: String,
    pub status_color: String,
    /// Present when the read carried a viewer context.
    pub viewer_status: Option<ViewerStatus>,
    pub requested_by: String,
    pub requester_role: Role,
    /// Destination code, falling back to the site when none was stored.
    pub destination: Option<String>,
    pub destination_role: Option<Role>,
    pub next_actor_role: Option<Role>,
    pub next_actor_code: Option<String>,
    pub requested_date: Option<i64>,
    pub expected_date: Option<i64>,
    pub service_start_date: Option<i64>,
    pub delivery_date: Option<i64>,
    pub items: Vec<OrderItemView>,
    pub participants: Vec<ParticipantView>,
    pub approval_stages: Vec<ApprovalStage>,
    pub available_actions: Vec<OrderAction>,
    pub total_amount: Option<f64>,
    pub currency: Option<String>,
    pub transformed_code: Option<String>,
    pub rejection_reason: Option<String>,
    pub notes: Option<String>,
    pub metadata: serde_json::Value,
    pub client_code: Option<String>,
    pub site_code: Option<String>,
    pub contractor_code: Option<String>,
    pub coordinator_code: Option<String>,
    pub crew_code: Option<String>,
    pub depot_code: Option<String>,
    pub archived_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Role-scoped listing grouped by kind. Key names are part of the public
/// contract, hence the camelCase rename.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HubOrdersPayload {
    pub service_orders: Vec<OrderView>,
    pub product_orders: Vec<OrderView>,
    pub orders: Vec<OrderView>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_tokens_round_trip() {
        let all = [
            OrderStatus::PendingWarehouse,
            OrderStatus::AwaitingDelivery,
            OrderStatus::Delivered,
            OrderStatus::PendingCustomer,
            OrderStatus::PendingContractor,
            OrderStatus::PendingManager,
            OrderStatus::ManagerAccepted,
            OrderStatus::WarehouseAccepted,
            OrderStatus::ServiceCreated,
            OrderStatus::Rejected,
            OrderStatus::Cancelled,
        ];
        for status in all {
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
    }

    #[test]
    fn terminal_set_is_exactly_four() {
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::ServiceCreated.is_terminal());
        assert!(OrderStatus::Rejected.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(!OrderStatus::ManagerAccepted.is_terminal());
        assert!(!OrderStatus::AwaitingDelivery.is_terminal());
        assert!(!OrderStatus::PendingWarehouse.is_terminal());
    }

    #[test]
    fn labels_collapse_successful_terminals() {
        assert_eq!(OrderStatus::Delivered.label(), "Completed");
        assert_eq!(OrderStatus::ServiceCreated.label(), "Completed");
        assert_eq!(OrderStatus::PendingWarehouse.label(), "Pending Warehouse");
        assert_eq!(OrderStatus::ManagerAccepted.label(), "Manager Accepted");
    }

    #[test]
    fn colors_bucket_by_stage() {
        assert_eq!(OrderStatus::Delivered.color(), "green");
        assert_eq!(OrderStatus::Rejected.color(), "red");
        assert_eq!(OrderStatus::Cancelled.color(), "gray");
        assert_eq!(OrderStatus::PendingManager.color(), "yellow");
        assert_eq!(OrderStatus::AwaitingDelivery.color(), "blue");
        assert_eq!(OrderStatus::WarehouseAccepted.color(), "blue");
    }

    #[test]
    fn action_tokens_are_kebab() {
        assert_eq!(OrderAction::StartDelivery.as_str(), "start-delivery");
        assert_eq!(OrderAction::CreateService.as_str(), "create-service");
        assert_eq!(
            "create-service".parse::<OrderAction>().unwrap(),
            OrderAction::CreateService
        );
        let json = serde_json::to_string(&OrderAction::StartDelivery).unwrap();
        assert_eq!(json, "\"start-delivery\"");
    }

    #[test]
    fn hub_payload_keys_are_camel_case() {
        let payload = HubOrdersPayload {
            service_orders: vec![],
            product_orders: vec![],
            orders: vec![],
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("serviceOrders").is_some());
        assert!(json.get("productOrders").is_some());
        assert!(json.get("orders").is_some());
    }
}
