//! # Query Builders
//!
//! Selector strings for the common read patterns. The projection passes
//! them to the ledger verbatim, like any caller-supplied predicate. Keys are
//! emitted in canonical order so equal queries are equal strings.

use fc_02_entity_repository::canonicalize;
use serde_json::{json, Value};
use shared_types::DeliveryStatus;

fn selector(fields: Value) -> String {
    canonicalize(json!({ "selector": fields })).to_string()
}

/// Units currently owned by `org`.
pub fn units_by_owner(org: &str) -> String {
    selector(json!({ "docType": "unit", "currentOwnerOrg": org }))
}

/// Deliveries in `status`.
pub fn deliveries_by_status(status: DeliveryStatus) -> String {
    selector(json!({ "docType": "delivery", "status": status.as_str() }))
}

/// Units whose delivery link is `delivery_id`.
pub fn units_by_delivery(delivery_id: &str) -> String {
    selector(json!({ "docType": "unit", "deliveryId": delivery_id }))
}
