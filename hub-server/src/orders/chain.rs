//! Service approval chain
//!
//! A service order walks an ordered list of approvers derived from who
//! created it, ending at the fulfilling party named by the catalog
//! (`managed_by`). Creators at the end of the hierarchy (coordinator,
//! depot) self-approve and start at the accepted stage directly.
//!
//! The chain also fixes the contractor hand-off: when the fulfiller is a
//! depot, the step after the contractor is `pending_warehouse`, skipping
//! the coordinator entirely.

use shared::models::{FinalActor, OrderStatus, Role};

/// Ordered approvers for a service order, creator excluded, fulfiller last.
pub fn approval_chain(creator: Role, fulfiller: FinalActor) -> Vec<Role> {
    match creator {
        Role::Site => vec![Role::Client, Role::Contractor, fulfiller.as_role()],
        Role::Client => vec![Role::Contractor, fulfiller.as_role()],
        Role::Contractor => vec![fulfiller.as_role()],
        Role::Coordinator | Role::Depot => vec![],
        // Field crews cannot create service orders; no chain exists for them.
        Role::FieldCrew => vec![],
    }
}

/// The pending status that parks an order in front of a given approver.
pub fn pending_status_for(role: Role) -> Option<OrderStatus> {
    match role {
        Role::Client => Some(OrderStatus::PendingCustomer),
        Role::Contractor => Some(OrderStatus::PendingContractor),
        Role::Coordinator => Some(OrderStatus::PendingManager),
        Role::Depot => Some(OrderStatus::PendingWarehouse),
        Role::Site | Role::FieldCrew => None,
    }
}

/// Which role a pending status is waiting on.
pub fn role_waiting_on(status: OrderStatus) -> Option<Role> {
    match status {
        OrderStatus::PendingCustomer => Some(Role::Client),
        OrderStatus::PendingContractor => Some(Role::Contractor),
        OrderStatus::PendingManager => Some(Role::Coordinator),
        OrderStatus::PendingWarehouse => Some(Role::Depot),
        _ => None,
    }
}

/// Accepted stage reached once the fulfiller has approved.
pub fn accepted_status_for(fulfiller: FinalActor) -> OrderStatus {
    match fulfiller {
        FinalActor::Coordinator => OrderStatus::ManagerAccepted,
        FinalActor::Depot => OrderStatus::WarehouseAccepted,
    }
}

/// Status and next actor for a freshly created service order.
pub fn initial_stage(creator: Role, fulfiller: FinalActor) -> (OrderStatus, Role) {
    let chain = approval_chain(creator, fulfiller);
    match chain.first() {
        Some(first) => {
            // Chain roles always have a pending status
            let status = pending_status_for(*first).unwrap_or(OrderStatus::PendingManager);
            (status, *first)
        }
        None => (accepted_status_for(fulfiller), fulfiller.as_role()),
    }
}

/// Where an accept from the currently waiting approver moves the order.
///
/// Returns `None` when the status is not a chain stage for this
/// creator/fulfiller pair, which the policy reports as an invalid
/// transition.
pub fn advance(creator: Role, fulfiller: FinalActor, status: OrderStatus) -> Option<OrderStatus> {
    let waiting = role_waiting_on(status)?;
    let chain = approval_chain(creator, fulfiller);
    let position = chain.iter().position(|role| *role == waiting)?;
    match chain.get(position + 1) {
        Some(next) => pending_status_for(*next),
        None => Some(accepted_status_for(fulfiller)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn site_chain_runs_client_contractor_fulfiller() {
        assert_eq!(
            approval_chain(Role::Site, FinalActor::Coordinator),
            vec![Role::Client, Role::Contractor, Role::Coordinator]
        );
        assert_eq!(
            approval_chain(Role::Site, FinalActor::Depot),
            vec![Role::Client, Role::Contractor, Role::Depot]
        );
    }

    #[test]
    fn short_chains_for_mid_hierarchy_creators() {
        assert_eq!(
            approval_chain(Role::Client, FinalActor::Coordinator),
            vec![Role::Contractor, Role::Coordinator]
        );
        assert_eq!(
            approval_chain(Role::Contractor, FinalActor::Depot),
            vec![Role::Depot]
        );
    }

    #[test]
    fn end_of_hierarchy_creators_self_approve() {
        assert!(approval_chain(Role::Coordinator, FinalActor::Coordinator).is_empty());
        assert!(approval_chain(Role::Depot, FinalActor::Depot).is_empty());

        let (status, next) = initial_stage(Role::Coordinator, FinalActor::Coordinator);
        assert_eq!(status, OrderStatus::ManagerAccepted);
        assert_eq!(next, Role::Coordinator);

        let (status, next) = initial_stage(Role::Depot, FinalActor::Depot);
        assert_eq!(status, OrderStatus::WarehouseAccepted);
        assert_eq!(next, Role::Depot);
    }

    #[test]
    fn site_order_starts_with_the_client() {
        let (status, next) = initial_stage(Role::Site, FinalActor::Coordinator);
        assert_eq!(status, OrderStatus::PendingCustomer);
        assert_eq!(next, Role::Client);
    }

    #[test]
    fn contractor_accept_goes_to_manager_for_coordinator_services() {
        let next = advance(Role::Site, FinalActor::Coordinator, OrderStatus::PendingContractor);
        assert_eq!(next, Some(OrderStatus::PendingManager));
    }

    #[test]
    fn contractor_accept_redirects_to_warehouse_for_depot_services() {
        let next = advance(Role::Site, FinalActor::Depot, OrderStatus::PendingContractor);
        assert_eq!(next, Some(OrderStatus::PendingWarehouse));
    }

    #[test]
    fn fulfiller_accept_lands_on_accepted_stage() {
        assert_eq!(
            advance(Role::Site, FinalActor::Coordinator, OrderStatus::PendingManager),
            Some(OrderStatus::ManagerAccepted)
        );
        assert_eq!(
            advance(Role::Contractor, FinalActor::Depot, OrderStatus::PendingWarehouse),
            Some(OrderStatus::WarehouseAccepted)
        );
    }

    #[test]
    fn advance_rejects_stages_outside_the_chain() {
        // A coordinator-created order never sits in pending_manager
        assert_eq!(
            advance(Role::Coordinator, FinalActor::Coordinator, OrderStatus::PendingManager),
            None
        );
        // Client stage does not exist on a client-created order
        assert_eq!(
            advance(Role::Client, FinalActor::Coordinator, OrderStatus::PendingCustomer),
            None
        );
    }
}
