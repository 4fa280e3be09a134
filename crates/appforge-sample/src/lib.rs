//! AppForge Sample Data Generator
//!
//! Synthesizes plausible records for every entity of a blueprint so a freshly
//! generated app is immediately explorable without a real backing store.
//!
//! # Algorithm
//!
//! Two passes over the blueprint's entities:
//!
//! 1. **Independent generation.** Each entity gets its records from a curated
//!    template when one exists for its id, otherwise from per-field
//!    name/type heuristics. Every record receives generated
//!    `createdAt`/`updatedAt` timestamps inside a recent window.
//! 2. **Reference resolution.** Every reference field on every record is
//!    pointed at a uniformly random id from the *already generated* target
//!    entity's records (or left null when that set is empty). This pass runs
//!    strictly after pass 1 completes for all entities, since any entity may
//!    be referenced by any other.
//!
//! Output is randomized by design — illustrative data, not deterministic
//! fixtures.

#![warn(unreachable_pub)]

mod heuristics;
mod templates;

use appforge_schema::{AppBlueprint, Entity, Record};
use chrono::{Duration, Utc};
use indexmap::IndexMap;
use rand::prelude::*;
use serde_json::{json, Value};
use std::collections::HashMap;

/// Records generated per entity when the caller has no preference
pub const DEFAULT_RECORDS_PER_ENTITY: usize = 8;

/// Entity id → ordered record list
pub type SampleData = IndexMap<String, Vec<Record>>;

/// Generate sample records for every entity of a blueprint
///
/// Every non-null reference value in the result is an id present in the
/// target entity's record set.
#[must_use]
pub fn generate_sample_data(blueprint: &AppBlueprint, records_per_entity: usize) -> SampleData {
    let mut rng = rand::rng();
    let mut data = SampleData::new();

    // Pass 1: independent generation.
    for entity in &blueprint.entities {
        let records = (0..records_per_entity)
            .map(|index| generate_record(entity, index, &mut rng))
            .collect();
        data.insert(entity.id.clone(), records);
    }

    // Pass 2: reference resolution over the completed set.
    let ids_by_entity: HashMap<String, Vec<Value>> = data
        .iter()
        .map(|(entity_id, records)| {
            let ids = records.iter().filter_map(|r| r.get("id").cloned()).collect();
            (entity_id.clone(), ids)
        })
        .collect();

    for entity in &blueprint.entities {
        let Some(records) = data.get_mut(&entity.id) else {
            continue;
        };
        for field in entity.reference_fields() {
            let Some(descriptor) = &field.reference else {
                continue;
            };
            let targets = ids_by_entity
                .get(&descriptor.target_entity)
                .map(Vec::as_slice)
                .unwrap_or_default();
            for record in records.iter_mut() {
                let value = targets.choose(&mut rng).cloned().unwrap_or(Value::Null);
                record.insert(field.id.clone(), value);
            }
        }
    }

    tracing::debug!(
        entities = data.len(),
        records_per_entity,
        "sample data generated"
    );
    data
}

/// Same shape as [`generate_sample_data`] with zero records per entity
///
/// Used when an app must start with no data (e.g. production).
#[must_use]
pub fn generate_empty_data(blueprint: &AppBlueprint) -> SampleData {
    blueprint
        .entities
        .iter()
        .map(|entity| (entity.id.clone(), Vec::new()))
        .collect()
}

fn generate_record(entity: &Entity, index: usize, rng: &mut impl Rng) -> Record {
    let template = templates::rows(&entity.id);
    let mut record = Record::new();
    record.insert("id".to_string(), json!(uuid::Uuid::new_v4().to_string()));

    let template_row = template
        .as_ref()
        .and_then(|rows| rows.get(index % rows.len()).cloned());
    let cycled = template
        .as_ref()
        .is_some_and(|rows| index >= rows.len());

    for field in &entity.fields {
        // The generated primary key wins over a declared "id" field.
        if field.id == "id" {
            continue;
        }
        let mut value = match template_row.as_ref().and_then(|row| row.get(&field.id)) {
            Some(value) if !field.is_reference() => value.clone(),
            _ => heuristics::value_for(field, index, rng),
        };
        // A cycled template row would repeat unique values verbatim.
        if cycled && field.unique {
            if let Value::String(s) = &value {
                value = json!(format!("{s}-{index}"));
            }
        }
        record.insert(field.id.clone(), value);
    }

    let timestamps = entity.timestamps.clone().unwrap_or_default();
    let (created_at, updated_at) = recent_window(rng);
    record.insert(timestamps.created_field, json!(created_at));
    record.insert(timestamps.updated_field, json!(updated_at));
    record
}

/// Random `createdAt <= updatedAt <= now` pair inside the last ninety days
fn recent_window(rng: &mut impl Rng) -> (String, String) {
    let now = Utc::now();
    let created = now - Duration::minutes(rng.random_range(60..60 * 24 * 90));
    let updated = created + Duration::minutes(rng.random_range(0..60 * 24 * 3));
    let updated = updated.min(now);
    (created.to_rfc3339(), updated.to_rfc3339())
}
