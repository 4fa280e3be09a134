//! Per-field value synthesis
//!
//! Used when no curated template covers an entity: field names are tried
//! first (a field called "email" gets a synthetic email regardless of its
//! declared type), then the declared type decides.

use appforge_schema::{Field, FieldType};
use rand::prelude::*;
use serde_json::{json, Value};

const FIRST_NAMES: &[&str] = &[
    "Ava", "Liam", "Maya", "Noah", "Sofia", "Ethan", "Zoe", "Lucas", "Ines", "Omar",
];
const LAST_NAMES: &[&str] = &[
    "Thompson", "Garcia", "Patel", "Kim", "Rossi", "Nguyen", "Okafor", "Silva", "Novak", "Haddad",
];
const WORDS: &[&str] = &[
    "summary", "report", "draft", "proposal", "review", "plan", "update", "note", "brief", "memo",
];

/// Synthesize a value for one field
///
/// `index` is the record's position within its entity, used to keep
/// unique-marked string fields distinct.
pub(crate) fn value_for(field: &Field, index: usize, rng: &mut impl Rng) -> Value {
    if field.field_type != FieldType::Reference {
        if let Some(default) = &field.default_value {
            // Defaults win for half the records so the data stays varied.
            if rng.random_bool(0.5) {
                return default.clone();
            }
        }
    }

    let name = field.id.to_ascii_lowercase();
    if name.contains("email") {
        let first = FIRST_NAMES.choose(rng).copied().unwrap_or("sam");
        let last = LAST_NAMES.choose(rng).copied().unwrap_or("doe");
        return json!(format!(
            "{}.{}{}@example.com",
            first.to_lowercase(),
            last.to_lowercase(),
            index
        ));
    }
    if name.contains("name") && field.field_type == FieldType::String {
        let first = FIRST_NAMES.choose(rng).copied().unwrap_or("Sam");
        let last = LAST_NAMES.choose(rng).copied().unwrap_or("Doe");
        return json!(format!("{first} {last}"));
    }
    if name.contains("phone") {
        return json!(format!("+1 555 {:04}", rng.random_range(0..10_000)));
    }

    by_type(field, index, rng)
}

fn by_type(field: &Field, index: usize, rng: &mut impl Rng) -> Value {
    match field.field_type {
        FieldType::String => {
            let word = WORDS.choose(rng).copied().unwrap_or("item");
            if field.unique {
                json!(format!("{} {} {}", field.name, word, index + 1))
            } else {
                json!(format!("{} {}", field.name, word))
            }
        }
        FieldType::Number => json!(rng.random_range(1..1_000)),
        FieldType::Boolean => json!(rng.random_bool(0.5)),
        FieldType::Date => {
            let days = rng.random_range(0..365_i64);
            let date = chrono::Utc::now().date_naive() - chrono::Days::new(days.unsigned_abs());
            json!(date.to_string())
        }
        FieldType::DateTime => {
            let minutes = rng.random_range(0..60 * 24 * 90_i64);
            let at = chrono::Utc::now() - chrono::Duration::minutes(minutes);
            json!(at.to_rfc3339())
        }
        FieldType::Email => json!(format!("user{index}@example.com")),
        FieldType::Url => json!(format!("https://example.com/{}", field.id)),
        FieldType::Phone => json!(format!("+1 555 {:04}", rng.random_range(0..10_000))),
        FieldType::Image => json!(format!("https://picsum.photos/seed/{}{index}/400", field.id)),
        FieldType::File => json!(format!("files/{}-{index}.pdf", field.id)),
        // Resolved in the second pass, once every entity has records.
        FieldType::Reference => Value::Null,
        FieldType::Enum => field
            .options
            .as_ref()
            .and_then(|options| options.choose(rng))
            .map_or(Value::Null, |option| json!(option)),
        FieldType::Currency => {
            let cents = rng.random_range(100..100_000_i64);
            json!(f64::from(u32::try_from(cents).unwrap_or(100)) / 100.0)
        }
        FieldType::Percentage => json!(rng.random_range(0..=100)),
        FieldType::RichText => {
            let word = WORDS.choose(rng).copied().unwrap_or("note");
            json!(format!("A short {word} about this record."))
        }
        FieldType::Json => json!({}),
    }
}
