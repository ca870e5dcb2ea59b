//! Viewer projection
//!
//! Turns a stored order row into the shape a caller renders: normalized
//! enums, presentation label and color, the per-viewer status, the approval
//! stage breakdown, and the actions the viewer could take right now.
//!
//! Everything here is pure; the store gathers rows and the resolved
//! fulfiller, then hands them over.

use shared::models::{
    ApprovalStage, FinalActor, Order, OrderItem, OrderItemView, OrderKind, OrderParticipant,
    OrderStatus, OrderView, ParticipantView, Role, StageStatus, ViewerStatus,
};

use super::{chain, identity, metadata, policy};

/// The party a read is performed for.
#[derive(Debug, Clone)]
pub struct Viewer {
    pub role: Role,
    pub code: String,
}

/// Project an order row for an optional viewer.
pub fn project(
    order: &Order,
    items: &[OrderItem],
    participants: &[OrderParticipant],
    fulfiller: FinalActor,
    viewer: Option<&Viewer>,
) -> OrderView {
    let kind = identity::normalize_kind(&order.order_kind);
    let status = identity::normalize_status(&order.status);
    let creator_role = identity::normalize_role(&order.creator_role).unwrap_or(Role::Site);
    let approvals = metadata::approvals(&order.metadata);

    let viewer_status =
        viewer.map(|v| viewer_status(order, kind, status, creator_role, fulfiller, &approvals, v));

    let available_actions = match viewer {
        Some(v) if order.archived_at.is_none() => {
            let ctx = policy::ActionContext {
                kind,
                status,
                actor_role: v.role,
                creator_role,
                fulfiller,
                is_creator: order.creator_code == v.code,
                is_participant: participants
                    .iter()
                    .any(|p| p.participant_code == v.code && parses_to(&p.participant_role, v.role)),
            };
            policy::available_actions(&ctx)
        }
        _ => Vec::new(),
    };

    let (destination, destination_role) = match &order.destination_code {
        Some(code) => (
            Some(code.clone()),
            order
                .destination_role
                .as_deref()
                .and_then(identity::normalize_role),
        ),
        None => (
            order.site_code.clone(),
            order.site_code.as_ref().map(|_| Role::Site),
        ),
    };

    OrderView {
        order_id: order.order_id.clone(),
        order_kind: kind,
        title: order.title.clone(),
        status,
        status_label: status.label().to_string(),
        status_color: status.color().to_string(),
        viewer_status,
        requested_by: order.creator_code.clone(),
        requester_role: creator_role,
        destination,
        destination_role,
        next_actor_role: order
            .next_actor_role
            .as_deref()
            .and_then(identity::normalize_role),
        next_actor_code: order.next_actor_code.clone(),
        requested_date: order.requested_date,
        expected_date: order.expected_date,
        service_start_date: order.service_start_date,
        delivery_date: order.delivery_date,
        items: items.iter().map(item_view).collect(),
        participants: participants.iter().filter_map(participant_view).collect(),
        approval_stages: approval_stages(order, kind, status, creator_role, fulfiller, &approvals),
        available_actions,
        total_amount: order.total_amount,
        currency: order.currency.clone(),
        transformed_code: order.transformed_code.clone(),
        rejection_reason: order.rejection_reason.clone(),
        notes: order.notes.clone(),
        metadata: order.metadata.clone(),
        client_code: order.client_code.clone(),
        site_code: order.site_code.clone(),
        contractor_code: order.contractor_code.clone(),
        coordinator_code: order.coordinator_code.clone(),
        crew_code: order.crew_code.clone(),
        depot_code: order.depot_code.clone(),
        archived_at: order.archived_at,
        created_at: order.created_at,
        updated_at: order.updated_at,
    }
}

fn parses_to(raw: &str, role: Role) -> bool {
    identity::normalize_role(raw) == Some(role)
}

/// The status one particular viewer experiences.
///
/// Rules apply in order: archive overlay, terminal map, warehouse queue,
/// approval chain position, then the stored next-actor fallback for
/// anything legacy rows left ambiguous.
fn viewer_status(
    order: &Order,
    kind: OrderKind,
    status: OrderStatus,
    creator_role: Role,
    fulfiller: FinalActor,
    approvals: &[String],
    viewer: &Viewer,
) -> ViewerStatus {
    if order.archived_at.is_some() {
        return ViewerStatus::Archived;
    }

    match status {
        OrderStatus::Delivered | OrderStatus::ServiceCreated => return ViewerStatus::Completed,
        OrderStatus::Rejected => return ViewerStatus::Rejected,
        OrderStatus::Cancelled => return ViewerStatus::Cancelled,
        _ => {}
    }

    if kind == OrderKind::Product && status == OrderStatus::PendingWarehouse {
        return if viewer.role == Role::Depot {
            ViewerStatus::Pending
        } else {
            ViewerStatus::InProgress
        };
    }

    if kind == OrderKind::Service && (status.is_pending_stage() || status.is_accepted_stage()) {
        let chain = chain::approval_chain(creator_role, fulfiller);
        // The recorded approvals, not the stored status, say whose turn it is
        if let Some(expected) = chain.get(approvals.len()) {
            return if viewer.role == *expected {
                ViewerStatus::Pending
            } else {
                ViewerStatus::InProgress
            };
        }
        if status.is_accepted_stage() {
            return if viewer.role == fulfiller.as_role() {
                ViewerStatus::Pending
            } else {
                ViewerStatus::InProgress
            };
        }
    }

    let status_is_pending = status.is_pending_stage() || status == OrderStatus::AwaitingDelivery;
    let needs_to_act = order
        .next_actor_role
        .as_deref()
        .and_then(identity::normalize_role)
        == Some(viewer.role)
        && order
            .next_actor_code
            .as_ref()
            .is_none_or(|code| *code == viewer.code);

    if status_is_pending && needs_to_act {
        ViewerStatus::Pending
    } else {
        ViewerStatus::InProgress
    }
}

fn org_code_for(order: &Order, role: Role) -> Option<String> {
    match role {
        Role::Client => order.client_code.clone(),
        Role::Site => order.site_code.clone(),
        Role::Contractor => order.contractor_code.clone(),
        Role::Coordinator => order.coordinator_code.clone(),
        Role::FieldCrew => order.crew_code.clone(),
        Role::Depot => order.depot_code.clone(),
    }
}

/// Stage breakdown: the creator row plus one row per approver. Product
/// orders show the requestor and the depot; service orders walk the chain.
fn approval_stages(
    order: &Order,
    kind: OrderKind,
    status: OrderStatus,
    creator_role: Role,
    fulfiller: FinalActor,
    approvals: &[String],
) -> Vec<ApprovalStage> {
    let mut stages = vec![ApprovalStage {
        role: creator_role,
        code: Some(order.creator_code.clone()),
        status: StageStatus::Requested,
    }];

    if kind == OrderKind::Product {
        let depot_status = match status {
            OrderStatus::PendingWarehouse => StageStatus::Pending,
            OrderStatus::AwaitingDelivery => StageStatus::Accepted,
            OrderStatus::Delivered => StageStatus::Delivered,
            OrderStatus::Rejected => StageStatus::Rejected,
            OrderStatus::Cancelled => StageStatus::Cancelled,
            _ => StageStatus::Waiting,
        };
        stages.push(ApprovalStage {
            role: Role::Depot,
            code: order.depot_code.clone(),
            status: depot_status,
        });
        return stages;
    }

    let chain = chain::approval_chain(creator_role, fulfiller);
    let count = approvals.len();
    for (index, role) in chain.iter().enumerate() {
        let row_status = match status {
            OrderStatus::Rejected if index == count => StageStatus::Rejected,
            OrderStatus::Cancelled if index == count => StageStatus::Cancelled,
            OrderStatus::ServiceCreated => {
                if index + 1 == chain.len() {
                    StageStatus::ServiceCreated
                } else {
                    StageStatus::Accepted
                }
            }
            _ if index < count => StageStatus::Accepted,
            _ if index == count && status.is_pending_stage() => StageStatus::Pending,
            _ => StageStatus::Waiting,
        };
        stages.push(ApprovalStage {
            role: *role,
            code: org_code_for(order, *role),
            status: row_status,
        });
    }

    stages
}

fn item_view(item: &OrderItem) -> OrderItemView {
    OrderItemView {
        line_number: item.line_number,
        catalog_code: item.catalog_code.clone(),
        name: item.name.clone(),
        item_kind: item.item_kind.clone(),
        description: item.description.clone(),
        quantity: item.quantity,
        unit: item.unit.clone(),
        unit_price: item.unit_price,
        total_price: item.total_price,
        currency: item.currency.clone(),
    }
}

fn participant_view(participant: &OrderParticipant) -> Option<ParticipantView> {
    Some(ParticipantView {
        code: participant.participant_code.clone(),
        role: identity::normalize_role(&participant.participant_role)?,
        participation_type: participant.participation_type.parse().ok()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shared::models::OrderAction;

    fn base_order(kind: &str, status: &str) -> Order {
        Order {
            order_id: "CEN-01-SO-001".to_string(),
            order_kind: kind.to_string(),
            title: "Test Order".to_string(),
            status: status.to_string(),
            next_actor_role: None,
            next_actor_code: None,
            creator_code: "CEN-01".to_string(),
            creator_role: "site".to_string(),
            client_code: Some("ACME".to_string()),
            site_code: Some("CEN-01".to_string()),
            contractor_code: Some("BLD-07".to_string()),
            coordinator_code: Some("COORD-01".to_string()),
            crew_code: None,
            depot_code: None,
            destination_code: None,
            destination_role: None,
            requested_date: Some(1000),
            expected_date: None,
            service_start_date: None,
            delivery_date: None,
            total_amount: None,
            currency: None,
            transformed_code: None,
            rejection_reason: None,
            notes: None,
            metadata: json!({}),
            archived_at: None,
            archived_by: None,
            archive_reason: None,
            deletion_scheduled: None,
            restored_at: None,
            restored_by: None,
            created_at: 1000,
            updated_at: 1000,
        }
    }

    fn viewer(role: Role, code: &str) -> Viewer {
        Viewer {
            role,
            code: code.to_string(),
        }
    }

    #[test]
    fn warehouse_queue_is_pending_for_depots_only() {
        let mut order = base_order("product", "pending_warehouse");
        order.order_id = "CEN-01-PO-001".to_string();
        order.depot_code = Some("DEP-01".to_string());

        let for_depot = project(&order, &[], &[], FinalActor::Depot, Some(&viewer(Role::Depot, "DEP-02")));
        assert_eq!(for_depot.viewer_status, Some(ViewerStatus::Pending));

        let for_site = project(&order, &[], &[], FinalActor::Depot, Some(&viewer(Role::Site, "CEN-01")));
        assert_eq!(for_site.viewer_status, Some(ViewerStatus::InProgress));
    }

    #[test]
    fn awaiting_delivery_pends_for_the_assigned_depot() {
        let mut order = base_order("product", "awaiting_delivery");
        order.depot_code = Some("DEP-01".to_string());
        order.next_actor_role = Some("depot".to_string());
        order.next_actor_code = Some("DEP-01".to_string());

        let assigned = project(&order, &[], &[], FinalActor::Depot, Some(&viewer(Role::Depot, "DEP-01")));
        assert_eq!(assigned.viewer_status, Some(ViewerStatus::Pending));

        let other = project(&order, &[], &[], FinalActor::Depot, Some(&viewer(Role::Depot, "DEP-99")));
        assert_eq!(other.viewer_status, Some(ViewerStatus::InProgress));
    }

    #[test]
    fn chain_position_decides_service_pending() {
        let mut order = base_order("service", "pending_contractor");
        order.metadata = json!({"approvals": ["customer"]});

        let fulfiller = FinalActor::Coordinator;
        let contractor =
            project(&order, &[], &[], fulfiller, Some(&viewer(Role::Contractor, "BLD-07")));
        assert_eq!(contractor.viewer_status, Some(ViewerStatus::Pending));

        let client = project(&order, &[], &[], fulfiller, Some(&viewer(Role::Client, "ACME")));
        assert_eq!(client.viewer_status, Some(ViewerStatus::InProgress));

        let coordinator =
            project(&order, &[], &[], fulfiller, Some(&viewer(Role::Coordinator, "COORD-01")));
        assert_eq!(coordinator.viewer_status, Some(ViewerStatus::InProgress));
    }

    #[test]
    fn consumed_chain_pends_for_the_fulfiller() {
        let mut order = base_order("service", "manager_accepted");
        order.metadata = json!({"approvals": ["customer", "contractor", "manager"]});

        let coordinator = project(
            &order,
            &[],
            &[],
            FinalActor::Coordinator,
            Some(&viewer(Role::Coordinator, "COORD-01")),
        );
        assert_eq!(coordinator.viewer_status, Some(ViewerStatus::Pending));

        let client = project(&order, &[], &[], FinalActor::Coordinator, Some(&viewer(Role::Client, "ACME")));
        assert_eq!(client.viewer_status, Some(ViewerStatus::InProgress));
    }

    #[test]
    fn archive_overlays_everything() {
        let mut order = base_order("service", "service_created");
        order.archived_at = Some(5000);

        let view = project(&order, &[], &[], FinalActor::Coordinator, Some(&viewer(Role::Site, "CEN-01")));
        assert_eq!(view.viewer_status, Some(ViewerStatus::Archived));
        assert!(view.available_actions.is_empty());
    }

    #[test]
    fn terminal_map_wins_over_next_actor() {
        let mut order = base_order("service", "service_created");
        order.next_actor_role = Some("coordinator".to_string());

        let view = project(
            &order,
            &[],
            &[],
            FinalActor::Coordinator,
            Some(&viewer(Role::Coordinator, "COORD-01")),
        );
        assert_eq!(view.viewer_status, Some(ViewerStatus::Completed));
    }

    #[test]
    fn service_stages_walk_the_chain() {
        let mut order = base_order("service", "pending_contractor");
        order.metadata = json!({"approvals": ["customer"]});

        let view = project(&order, &[], &[], FinalActor::Coordinator, None);
        let rows: Vec<(Role, StageStatus)> = view
            .approval_stages
            .iter()
            .map(|s| (s.role, s.status))
            .collect();

        assert_eq!(
            rows,
            vec![
                (Role::Site, StageStatus::Requested),
                (Role::Client, StageStatus::Accepted),
                (Role::Contractor, StageStatus::Pending),
                (Role::Coordinator, StageStatus::Waiting),
            ]
        );
        // Stage codes come from the backfilled org columns
        assert_eq!(view.approval_stages[1].code.as_deref(), Some("ACME"));
        assert_eq!(view.approval_stages[3].code.as_deref(), Some("COORD-01"));
    }

    #[test]
    fn rejection_marks_the_stage_that_refused() {
        let mut order = base_order("service", "rejected");
        order.metadata = json!({"approvals": ["customer"]});

        let view = project(&order, &[], &[], FinalActor::Coordinator, None);
        assert_eq!(view.approval_stages[2].role, Role::Contractor);
        assert_eq!(view.approval_stages[2].status, StageStatus::Rejected);
        assert_eq!(view.approval_stages[3].status, StageStatus::Waiting);
    }

    #[test]
    fn product_stages_are_requestor_plus_depot() {
        let mut order = base_order("product", "awaiting_delivery");
        order.order_id = "CEN-01-PO-002".to_string();
        order.depot_code = Some("DEP-01".to_string());

        let view = project(&order, &[], &[], FinalActor::Depot, None);
        assert_eq!(view.approval_stages.len(), 2);
        assert_eq!(view.approval_stages[1].role, Role::Depot);
        assert_eq!(view.approval_stages[1].code.as_deref(), Some("DEP-01"));
        assert_eq!(view.approval_stages[1].status, StageStatus::Accepted);
    }

    #[test]
    fn available_actions_reflect_the_policy() {
        let mut order = base_order("product", "pending_warehouse");
        order.depot_code = Some("DEP-01".to_string());

        let view = project(&order, &[], &[], FinalActor::Depot, Some(&viewer(Role::Depot, "DEP-01")));
        assert_eq!(
            view.available_actions,
            vec![OrderAction::Accept, OrderAction::Reject]
        );

        let site_view = project(&order, &[], &[], FinalActor::Depot, Some(&viewer(Role::Site, "CEN-01")));
        assert!(site_view.available_actions.is_empty());
    }

    #[test]
    fn destination_falls_back_to_the_site() {
        let order = base_order("service", "pending_customer");
        let view = project(&order, &[], &[], FinalActor::Coordinator, None);
        assert_eq!(view.destination.as_deref(), Some("CEN-01"));
        assert_eq!(view.destination_role, Some(Role::Site));
    }

    #[test]
    fn legacy_status_projects_from_chain_position() {
        // Old rows stored 'approved' where the chain now says pending_contractor
        let mut order = base_order("service", "approved");
        order.metadata = json!({"approvals": ["customer"]});

        let view = project(
            &order,
            &[],
            &[],
            FinalActor::Coordinator,
            Some(&viewer(Role::Contractor, "BLD-07")),
        );
        assert_eq!(view.status, OrderStatus::PendingContractor);
        assert_eq!(view.viewer_status, Some(ViewerStatus::Pending));
    }
}
