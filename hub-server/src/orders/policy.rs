//! Action policy
//!
//! Two decision tables gate every lifecycle action. The first says which
//! actions a role can take at a status; the second says who may cancel at
//! each stage. Anything not listed is denied — the tables fail closed, so
//! a new status or role starts with no rights until added here.

use shared::models::{FinalActor, OrderAction, OrderKind, OrderStatus, Role};

use super::chain;

/// Everything the policy needs to know about one actor/order pairing.
#[derive(Debug, Clone, Copy)]
pub struct ActionContext {
    pub kind: OrderKind,
    pub status: OrderStatus,
    pub actor_role: Role,
    pub creator_role: Role,
    pub fulfiller: FinalActor,
    /// The actor created this order.
    pub is_creator: bool,
    /// The actor is attached to the order under this role.
    pub is_participant: bool,
}

/// Who may create which kind of order. Product orders are open to all six
/// roles; field crews request service work through their site instead of
/// creating it themselves.
pub fn can_create(role: Role, kind: OrderKind) -> bool {
    match kind {
        OrderKind::Product => true,
        OrderKind::Service => role != Role::FieldCrew,
    }
}

/// Role/status grid of non-cancel actions.
fn table_actions(kind: OrderKind, status: OrderStatus, role: Role) -> &'static [OrderAction] {
    use OrderAction::*;
    use OrderStatus::*;

    if status.is_terminal() {
        return &[];
    }

    match (role, kind) {
        (Role::Depot, OrderKind::Product) => match status {
            PendingWarehouse => &[Accept, Reject],
            AwaitingDelivery => &[StartDelivery, Deliver],
            _ => &[],
        },
        (Role::Depot, OrderKind::Service) => match status {
            PendingWarehouse => &[Accept, Reject],
            WarehouseAccepted => &[CreateService],
            _ => &[],
        },
        (Role::Coordinator, OrderKind::Service) => match status {
            PendingManager => &[Accept, Reject],
            ManagerAccepted => &[CreateService],
            _ => &[],
        },
        (Role::Contractor, OrderKind::Service) => match status {
            PendingContractor => &[Accept, Reject],
            _ => &[],
        },
        (Role::Client, OrderKind::Service) => match status {
            PendingCustomer => &[Accept, Reject],
            _ => &[],
        },
        _ => &[],
    }
}

/// Stage-dependent cancellation rights.
fn cancel_allowed(ctx: &ActionContext) -> bool {
    use OrderStatus::*;

    match (ctx.kind, ctx.status) {
        (OrderKind::Product, PendingWarehouse) => ctx.is_creator,
        (OrderKind::Product, AwaitingDelivery) => {
            ctx.actor_role == Role::Depot && ctx.is_participant
        }
        (OrderKind::Service, PendingCustomer) => {
            ctx.is_creator
                || (ctx.is_participant && matches!(ctx.actor_role, Role::Site | Role::Client))
        }
        (OrderKind::Service, PendingContractor) => {
            ctx.actor_role == Role::Client && ctx.is_participant
        }
        (OrderKind::Service, PendingManager) | (OrderKind::Service, PendingWarehouse) => {
            ctx.actor_role == Role::Contractor && ctx.is_participant
        }
        (OrderKind::Service, ManagerAccepted) => {
            ctx.actor_role == Role::Coordinator && ctx.is_participant
        }
        (OrderKind::Service, WarehouseAccepted) => {
            ctx.actor_role == Role::Depot && ctx.is_participant
        }
        _ => false,
    }
}

/// All actions this actor may take on the order right now.
pub fn available_actions(ctx: &ActionContext) -> Vec<OrderAction> {
    let mut actions: Vec<OrderAction> =
        table_actions(ctx.kind, ctx.status, ctx.actor_role).to_vec();
    if cancel_allowed(ctx) {
        actions.push(OrderAction::Cancel);
    }
    actions
}

/// Check that the actor may take the action. The denial reason is surfaced
/// verbatim to the caller.
pub fn authorize(ctx: &ActionContext, action: OrderAction) -> Result<(), String> {
    if available_actions(ctx).contains(&action) {
        return Ok(());
    }
    Err(format!(
        "Action '{}' not allowed for role '{}' at status '{}'",
        action.as_str(),
        ctx.actor_role.as_str(),
        ctx.status.as_str()
    ))
}

/// Status the order moves to when the action applies.
pub fn next_status(ctx: &ActionContext, action: OrderAction) -> Result<OrderStatus, String> {
    use OrderStatus::*;

    let no_transition = || {
        format!(
            "No valid transition for action '{}' from status '{}'",
            action.as_str(),
            ctx.status.as_str()
        )
    };

    match action {
        OrderAction::Cancel if !ctx.status.is_terminal() => Ok(Cancelled),
        OrderAction::Reject if ctx.status.is_pending_stage() => Ok(Rejected),
        OrderAction::Accept => match ctx.kind {
            OrderKind::Product if ctx.status == PendingWarehouse => Ok(AwaitingDelivery),
            OrderKind::Product => Err(no_transition()),
            OrderKind::Service => chain::advance(ctx.creator_role, ctx.fulfiller, ctx.status)
                .ok_or_else(no_transition),
        },
        OrderAction::StartDelivery
            if ctx.kind == OrderKind::Product && ctx.status == AwaitingDelivery =>
        {
            // Progress marker only; the status does not move
            Ok(AwaitingDelivery)
        }
        OrderAction::Deliver if ctx.kind == OrderKind::Product && ctx.status == AwaitingDelivery => {
            Ok(Delivered)
        }
        OrderAction::CreateService
            if ctx.kind == OrderKind::Service && ctx.status.is_accepted_stage() =>
        {
            Ok(ServiceCreated)
        }
        _ => Err(no_transition()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(kind: OrderKind, status: OrderStatus, actor_role: Role) -> ActionContext {
        ActionContext {
            kind,
            status,
            actor_role,
            creator_role: Role::Site,
            fulfiller: FinalActor::Coordinator,
            is_creator: false,
            is_participant: false,
        }
    }

    #[test]
    fn field_crews_cannot_create_service_orders() {
        for role in Role::ALL {
            assert!(can_create(role, OrderKind::Product));
        }
        assert!(!can_create(Role::FieldCrew, OrderKind::Service));
        assert!(can_create(Role::Site, OrderKind::Service));
        assert!(can_create(Role::Depot, OrderKind::Service));
    }

    #[test]
    fn depot_grid_covers_the_product_track() {
        let c = ctx(OrderKind::Product, OrderStatus::PendingWarehouse, Role::Depot);
        assert_eq!(
            available_actions(&c),
            vec![OrderAction::Accept, OrderAction::Reject]
        );

        let c = ctx(OrderKind::Product, OrderStatus::AwaitingDelivery, Role::Depot);
        assert_eq!(
            available_actions(&c),
            vec![OrderAction::StartDelivery, OrderAction::Deliver]
        );
    }

    #[test]
    fn sites_and_crews_have_no_table_actions() {
        for status in [
            OrderStatus::PendingWarehouse,
            OrderStatus::AwaitingDelivery,
            OrderStatus::PendingCustomer,
            OrderStatus::ManagerAccepted,
        ] {
            assert!(available_actions(&ctx(OrderKind::Service, status, Role::Site)).is_empty());
            assert!(available_actions(&ctx(OrderKind::Service, status, Role::FieldCrew)).is_empty());
        }
    }

    #[test]
    fn terminal_statuses_offer_nothing() {
        for status in [
            OrderStatus::Delivered,
            OrderStatus::ServiceCreated,
            OrderStatus::Rejected,
            OrderStatus::Cancelled,
        ] {
            for role in Role::ALL {
                let mut c = ctx(OrderKind::Service, status, role);
                c.is_creator = true;
                c.is_participant = true;
                assert!(available_actions(&c).is_empty(), "{role} at {status}");
            }
        }
    }

    #[test]
    fn creator_may_cancel_queued_product_order() {
        let mut c = ctx(OrderKind::Product, OrderStatus::PendingWarehouse, Role::Site);
        assert!(authorize(&c, OrderAction::Cancel).is_err());
        c.is_creator = true;
        assert!(authorize(&c, OrderAction::Cancel).is_ok());
    }

    #[test]
    fn only_the_depot_cancels_mid_delivery() {
        let mut c = ctx(OrderKind::Product, OrderStatus::AwaitingDelivery, Role::Depot);
        assert!(!cancel_allowed(&c));
        c.is_participant = true;
        assert!(cancel_allowed(&c));

        let mut site = ctx(OrderKind::Product, OrderStatus::AwaitingDelivery, Role::Site);
        site.is_creator = true;
        site.is_participant = true;
        assert!(!cancel_allowed(&site));
    }

    #[test]
    fn contractor_cancel_extends_into_warehouse_review() {
        let mut c = ctx(OrderKind::Service, OrderStatus::PendingWarehouse, Role::Contractor);
        c.is_participant = true;
        assert!(cancel_allowed(&c));

        let mut c = ctx(OrderKind::Service, OrderStatus::PendingManager, Role::Contractor);
        c.is_participant = true;
        assert!(cancel_allowed(&c));
    }

    #[test]
    fn denial_reason_names_action_role_status() {
        let c = ctx(OrderKind::Product, OrderStatus::PendingWarehouse, Role::FieldCrew);
        let reason = authorize(&c, OrderAction::Accept).unwrap_err();
        assert_eq!(
            reason,
            "Action 'accept' not allowed for role 'field-crew' at status 'pending_warehouse'"
        );
    }

    #[test]
    fn product_accept_moves_to_awaiting_delivery() {
        let c = ctx(OrderKind::Product, OrderStatus::PendingWarehouse, Role::Depot);
        assert_eq!(
            next_status(&c, OrderAction::Accept).unwrap(),
            OrderStatus::AwaitingDelivery
        );
    }

    #[test]
    fn start_delivery_keeps_the_status() {
        let c = ctx(OrderKind::Product, OrderStatus::AwaitingDelivery, Role::Depot);
        assert_eq!(
            next_status(&c, OrderAction::StartDelivery).unwrap(),
            OrderStatus::AwaitingDelivery
        );
    }

    #[test]
    fn service_accept_follows_the_chain_redirect() {
        let mut c = ctx(OrderKind::Service, OrderStatus::PendingContractor, Role::Contractor);
        c.fulfiller = FinalActor::Depot;
        assert_eq!(
            next_status(&c, OrderAction::Accept).unwrap(),
            OrderStatus::PendingWarehouse
        );

        c.fulfiller = FinalActor::Coordinator;
        assert_eq!(
            next_status(&c, OrderAction::Accept).unwrap(),
            OrderStatus::PendingManager
        );
    }

    #[test]
    fn no_transition_error_names_action_and_status() {
        let c = ctx(OrderKind::Service, OrderStatus::ManagerAccepted, Role::Coordinator);
        let reason = next_status(&c, OrderAction::Deliver).unwrap_err();
        assert_eq!(
            reason,
            "No valid transition for action 'deliver' from status 'manager_accepted'"
        );
    }

    #[test]
    fn create_service_requires_an_accepted_stage() {
        let c = ctx(OrderKind::Service, OrderStatus::WarehouseAccepted, Role::Depot);
        assert_eq!(
            next_status(&c, OrderAction::CreateService).unwrap(),
            OrderStatus::ServiceCreated
        );

        let c = ctx(OrderKind::Service, OrderStatus::PendingManager, Role::Coordinator);
        assert!(next_status(&c, OrderAction::CreateService).is_err());
    }
}
