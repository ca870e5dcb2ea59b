//! Identity and token normalization
//!
//! Party codes arrive from headers, payloads and old database rows in
//! inconsistent shapes. Everything funnels through here before it is
//! compared, stored or used in an ID, so `cen-01`, ` CEN  01 ` and
//! `CEN 01` all resolve to the same party.

use shared::models::{OrderKind, OrderStatus, Role};

/// Canonical form of a party code: trimmed, inner whitespace collapsed,
/// uppercased. Empty input normalizes to `None`.
pub fn normalize_code(raw: &str) -> Option<String> {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return None;
    }
    Some(collapsed.to_uppercase())
}

/// Test-pool membership. Normalized codes ending in `-TEST` belong to the
/// test pool; everything else is production.
pub fn is_test_code(code: &str) -> bool {
    code.ends_with("-TEST")
}

/// Parse a role token leniently: case-insensitive, `_` accepted for `-`.
pub fn normalize_role(raw: &str) -> Option<Role> {
    raw.trim().to_lowercase().replace('_', "-").parse().ok()
}

/// Normalize a stored status token, mapping the legacy vocabulary written
/// by earlier releases onto the canonical set. Unknown tokens fall back to
/// the start of the product track rather than failing the read.
pub fn normalize_status(raw: &str) -> OrderStatus {
    let token = raw.trim().to_lowercase();
    if let Ok(status) = token.parse::<OrderStatus>() {
        return status;
    }
    match token.as_str() {
        "pending" => OrderStatus::PendingWarehouse,
        "in-progress" => OrderStatus::AwaitingDelivery,
        "approved" => OrderStatus::PendingContractor,
        "service-created" => OrderStatus::ServiceCreated,
        _ => OrderStatus::PendingWarehouse,
    }
}

/// Normalize a stored kind token. Rows written by this server are always
/// canonical; anything else reads as a product order.
pub fn normalize_kind(raw: &str) -> OrderKind {
    raw.trim()
        .to_lowercase()
        .parse()
        .unwrap_or(OrderKind::Product)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_trimmed_collapsed_uppercased() {
        assert_eq!(normalize_code("  cen-01  "), Some("CEN-01".to_string()));
        assert_eq!(normalize_code("cen   01"), Some("CEN 01".to_string()));
        assert_eq!(normalize_code("BLD-07"), Some("BLD-07".to_string()));
        assert_eq!(normalize_code("   "), None);
        assert_eq!(normalize_code(""), None);
    }

    #[test]
    fn test_pool_is_suffix_based() {
        assert!(is_test_code("DEP-TEST"));
        assert!(is_test_code("CEN-01-TEST"));
        assert!(!is_test_code("DEP-01"));
        assert!(!is_test_code("TEST-DEP"));
    }

    #[test]
    fn roles_parse_leniently() {
        assert_eq!(normalize_role("Depot"), Some(Role::Depot));
        assert_eq!(normalize_role(" field_crew "), Some(Role::FieldCrew));
        assert_eq!(normalize_role("FIELD-CREW"), Some(Role::FieldCrew));
        assert_eq!(normalize_role("warehouse"), None);
    }

    #[test]
    fn legacy_statuses_map_onto_canonical() {
        assert_eq!(normalize_status("pending"), OrderStatus::PendingWarehouse);
        assert_eq!(normalize_status("in-progress"), OrderStatus::AwaitingDelivery);
        assert_eq!(normalize_status("approved"), OrderStatus::PendingContractor);
        assert_eq!(normalize_status("service-created"), OrderStatus::ServiceCreated);
    }

    #[test]
    fn canonical_statuses_pass_through() {
        assert_eq!(normalize_status("pending_manager"), OrderStatus::PendingManager);
        assert_eq!(normalize_status("DELIVERED"), OrderStatus::Delivered);
    }

    #[test]
    fn unknown_status_falls_back_to_pending_warehouse() {
        assert_eq!(normalize_status("???"), OrderStatus::PendingWarehouse);
        assert_eq!(normalize_status(""), OrderStatus::PendingWarehouse);
    }
}
