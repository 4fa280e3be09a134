//! Curated record templates
//!
//! Realistic rows for the entities the behavior kits ship. Keyed by entity
//! id; anything unknown falls through to the per-field heuristics.

use appforge_schema::Record;
use serde_json::{json, Value};

/// Curated rows for a known entity id
///
/// Rows cycle when more records are requested than a template provides.
#[must_use]
pub(crate) fn rows(entity_id: &str) -> Option<Vec<Record>> {
    let raw = match entity_id {
        "customer" => json!([
            { "name": "Ava Thompson", "email": "ava.thompson@example.com", "phone": "+1 555 0101" },
            { "name": "Liam Garcia", "email": "liam.garcia@example.com", "phone": "+1 555 0102" },
            { "name": "Maya Patel", "email": "maya.patel@example.com", "phone": "+1 555 0103" },
            { "name": "Noah Kim", "email": "noah.kim@example.com", "phone": "+1 555 0104" },
            { "name": "Sofia Rossi", "email": "sofia.rossi@example.com", "phone": "+1 555 0105" }
        ]),
        "appointment" => json!([
            { "title": "Initial consultation", "status": "confirmed" },
            { "title": "Follow-up visit", "status": "pending" },
            { "title": "Quarterly review", "status": "confirmed" },
            { "title": "Walk-in session", "status": "cancelled" }
        ]),
        "product" => json!([
            { "name": "Sourdough Loaf", "sku": "SKU-1001", "price": 6.5, "quantity": 24 },
            { "name": "Almond Croissant", "sku": "SKU-1002", "price": 3.75, "quantity": 48 },
            { "name": "Rye Batard", "sku": "SKU-1003", "price": 5.25, "quantity": 12 },
            { "name": "Cinnamon Roll", "sku": "SKU-1004", "price": 4.0, "quantity": 36 }
        ]),
        "order" => json!([
            { "total": 26.0, "status": "placed" },
            { "total": 11.25, "status": "shipped" },
            { "total": 54.5, "status": "delivered" }
        ]),
        "ticket" => json!([
            { "subject": "Cannot log in", "status": "open", "priority": "urgent" },
            { "subject": "Invoice shows wrong total", "status": "in-progress", "priority": "normal" },
            { "subject": "Feature request: dark mode", "status": "open", "priority": "low" },
            { "subject": "Export to CSV fails", "status": "resolved", "priority": "normal" }
        ]),
        _ => return None,
    };

    let Value::Array(items) = raw else {
        return None;
    };
    Some(
        items
            .into_iter()
            .map(|item| {
                let Value::Object(map) = item else {
                    return Record::new();
                };
                map.into_iter().collect()
            })
            .collect(),
    )
}
