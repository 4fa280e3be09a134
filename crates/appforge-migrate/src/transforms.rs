//! The type compatibility table
//!
//! `UpdateFieldType` looks its transform up here, keyed by the (old, new)
//! type pair. A pair absent from the table is unsupported and the migration
//! fails rather than silently dropping or nulling data. Transforms are pure
//! functions over a single stored value; a value that cannot be converted
//! within a supported pair becomes null.
//!
//! Pairs that would require extra schema input (converting *to* `reference`
//! or `enum`) are deliberately absent: there is no descriptor or option set
//! to attach, so the result could never validate.

use appforge_schema::FieldType;
use serde_json::Value;

/// Pure per-value transform carried by a
/// [`TransformFieldData`](crate::DataMigration::TransformFieldData) migration
pub type ValueTransform = fn(&Value) -> Value;

/// Look up the transform for a type change
#[must_use]
pub fn transform_for(from: FieldType, to: FieldType) -> Option<ValueTransform> {
    use FieldType as T;

    if from == to {
        return Some(identity);
    }

    match (from, to) {
        // Numeric family: representation is unchanged.
        (T::Number | T::Currency | T::Percentage, T::Number | T::Currency | T::Percentage) => {
            Some(identity)
        }

        // String relabels: the stored value is already a string.
        (T::String, T::Email | T::Url | T::Phone | T::RichText)
        | (T::Email | T::Url | T::Phone | T::RichText, T::String)
        | (T::Enum, T::String)
        | (T::Image | T::File, T::Url)
        | (T::Url, T::Image | T::File)
        | (T::Image, T::File)
        | (T::File, T::Image) => Some(identity),

        (T::Number | T::Currency | T::Percentage, T::String) => Some(number_to_string),
        (T::String, T::Number | T::Currency | T::Percentage) => Some(string_to_number),

        (T::Boolean, T::String) => Some(boolean_to_string),
        (T::String, T::Boolean) => Some(string_to_boolean),

        (T::Date, T::DateTime) => Some(date_to_datetime),
        (T::DateTime, T::Date) => Some(datetime_to_date),
        (T::Date | T::DateTime, T::String) => Some(identity),

        // Everything is already JSON; wrapping loses nothing.
        (_, T::Json) => Some(identity),

        _ => None,
    }
}

fn identity(value: &Value) -> Value {
    value.clone()
}

fn number_to_string(value: &Value) -> Value {
    match value {
        Value::Number(n) => Value::String(n.to_string()),
        other => other.clone(),
    }
}

fn string_to_number(value: &Value) -> Value {
    match value {
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(serde_json::Number::from_f64)
            .map_or(Value::Null, Value::Number),
        Value::Number(_) => value.clone(),
        _ => Value::Null,
    }
}

fn boolean_to_string(value: &Value) -> Value {
    match value {
        Value::Bool(b) => Value::String(b.to_string()),
        other => other.clone(),
    }
}

fn string_to_boolean(value: &Value) -> Value {
    match value {
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" | "on" => Value::Bool(true),
            "false" | "no" | "0" | "off" => Value::Bool(false),
            _ => Value::Null,
        },
        Value::Bool(_) => value.clone(),
        _ => Value::Null,
    }
}

fn date_to_datetime(value: &Value) -> Value {
    match value {
        Value::String(s) if !s.contains('T') => Value::String(format!("{s}T00:00:00Z")),
        other => other.clone(),
    }
}

fn datetime_to_date(value: &Value) -> Value {
    match value {
        Value::String(s) => Value::String(s.split('T').next().unwrap_or(s).to_string()),
        other => other.clone(),
    }
}
