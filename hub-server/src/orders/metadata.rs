//! Order metadata facets
//!
//! The `metadata` column is a JSON bag shared by callers and the lifecycle
//! engine. The engine owns a handful of well-known keys (`approvals`,
//! `cancellation`, `rejection`, `contacts`, `delivery`, `service*`); every
//! write below touches only its own keys so caller-supplied entries survive
//! any number of lifecycle actions.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::models::{ContactCard, Role};

/// Who cancelled, when, and optionally why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancellationStamp {
    pub code: String,
    pub role: Role,
    pub at: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Who rejected, when, and the mandatory reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectionStamp {
    pub code: String,
    pub role: Role,
    pub at: i64,
    pub reason: String,
}

/// Contact snapshot frozen at creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactsFacet {
    pub creator: ContactCard,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<ContactCard>,
}

/// Delivery progress marker for the product track.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryProgress {
    #[serde(default)]
    pub started: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_at: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivered_at: Option<i64>,
}

fn ensure_object(meta: &mut Value) {
    if !meta.is_object() {
        *meta = Value::Object(serde_json::Map::new());
    }
}

fn set(meta: &mut Value, key: &str, value: Value) {
    ensure_object(meta);
    if let Some(map) = meta.as_object_mut() {
        map.insert(key.to_string(), value);
    }
}

/// Ordered list of approval tokens recorded so far.
pub fn approvals(meta: &Value) -> Vec<String> {
    meta.get("approvals")
        .and_then(Value::as_array)
        .map(|list| {
            list.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Append an approval token unless it is already recorded, keeping a
/// replayed accept from double-counting.
pub fn append_approval(meta: &mut Value, token: &str) {
    let mut list = approvals(meta);
    if !list.iter().any(|t| t == token) {
        list.push(token.to_string());
    }
    set(meta, "approvals", Value::from(list));
}

/// Mark the order as having spawned a service record.
pub fn record_service(meta: &mut Value, service_code: &str, at: i64) {
    set(meta, "serviceStatus", Value::from("created"));
    set(meta, "serviceCode", Value::from(service_code));
    set(meta, "serviceCreatedAt", Value::from(at));
}

pub fn record_cancellation(meta: &mut Value, stamp: &CancellationStamp) {
    set(
        meta,
        "cancellation",
        serde_json::to_value(stamp).unwrap_or_default(),
    );
}

pub fn record_rejection(meta: &mut Value, stamp: &RejectionStamp) {
    set(
        meta,
        "rejection",
        serde_json::to_value(stamp).unwrap_or_default(),
    );
}

pub fn record_contacts(meta: &mut Value, facet: &ContactsFacet) {
    set(
        meta,
        "contacts",
        serde_json::to_value(facet).unwrap_or_default(),
    );
}

fn delivery_facet(meta: &Value) -> DeliveryProgress {
    meta.get("delivery")
        .cloned()
        .and_then(|v| serde_json::from_value(v).ok())
        .unwrap_or_default()
}

/// Flag the delivery as underway without moving the order status.
pub fn record_delivery_started(meta: &mut Value, by: &str, at: i64) {
    let mut delivery = delivery_facet(meta);
    delivery.started = true;
    delivery.started_at = Some(at);
    delivery.started_by = Some(by.to_string());
    set(
        meta,
        "delivery",
        serde_json::to_value(&delivery).unwrap_or_default(),
    );
}

/// Stamp the completed delivery, keeping any started markers.
pub fn record_delivered(meta: &mut Value, at: i64) {
    let mut delivery = delivery_facet(meta);
    delivery.delivered_at = Some(at);
    set(
        meta,
        "delivery",
        serde_json::to_value(&delivery).unwrap_or_default(),
    );
}

/// Merge caller-supplied keys into the bag, one key at a time. The bag is
/// never replaced wholesale.
pub fn merge_extra(meta: &mut Value, extra: &Value) {
    let Some(entries) = extra.as_object() else {
        return;
    };
    ensure_object(meta);
    if let Some(map) = meta.as_object_mut() {
        for (key, value) in entries {
            map.insert(key.clone(), value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn approvals_append_is_idempotent() {
        let mut meta = json!({});
        append_approval(&mut meta, "customer");
        append_approval(&mut meta, "contractor");
        append_approval(&mut meta, "customer");

        assert_eq!(approvals(&meta), vec!["customer", "contractor"]);
    }

    #[test]
    fn facet_writes_leave_caller_keys_alone() {
        let mut meta = json!({"jobRef": "J-1883", "priority": "high"});

        append_approval(&mut meta, "customer");
        record_service(&mut meta, "CEN-01-SRV-004", 1000);
        record_cancellation(
            &mut meta,
            &CancellationStamp {
                code: "CEN-01".into(),
                role: Role::Site,
                at: 2000,
                reason: None,
            },
        );

        assert_eq!(meta["jobRef"], "J-1883");
        assert_eq!(meta["priority"], "high");
        assert_eq!(meta["serviceStatus"], "created");
    }

    #[test]
    fn merge_extra_is_key_by_key() {
        let mut meta = json!({"approvals": ["customer"], "jobRef": "J-1883"});
        merge_extra(&mut meta, &json!({"priority": "low", "jobRef": "J-2000"}));

        // Existing caller key overwritten, facet key untouched
        assert_eq!(meta["jobRef"], "J-2000");
        assert_eq!(meta["priority"], "low");
        assert_eq!(approvals(&meta), vec!["customer"]);
    }

    #[test]
    fn cancellation_reason_is_omitted_when_absent() {
        let mut meta = json!({});
        record_cancellation(
            &mut meta,
            &CancellationStamp {
                code: "BLD-07".into(),
                role: Role::Contractor,
                at: 3000,
                reason: None,
            },
        );
        assert!(meta["cancellation"].get("reason").is_none());
        assert_eq!(meta["cancellation"]["role"], "contractor");
    }

    #[test]
    fn delivery_markers_accumulate() {
        let mut meta = json!({});
        record_delivery_started(&mut meta, "DEP-01", 1000);
        record_delivered(&mut meta, 2000);

        assert_eq!(meta["delivery"]["started"], true);
        assert_eq!(meta["delivery"]["startedAt"], 1000);
        assert_eq!(meta["delivery"]["startedBy"], "DEP-01");
        assert_eq!(meta["delivery"]["deliveredAt"], 2000);
    }

    #[test]
    fn non_object_bag_is_reset_before_writing() {
        let mut meta = Value::Null;
        append_approval(&mut meta, "manager");
        assert_eq!(approvals(&meta), vec!["manager"]);
    }
}
