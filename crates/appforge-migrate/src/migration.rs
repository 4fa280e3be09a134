//! Migration instructions
//!
//! A [`Migration`] is a typed, timestamped instruction describing one
//! structural edit: an operation tag plus its target identifiers and
//! parameters. The operation set is a closed sum type matched exhaustively
//! by the engines, so adding a new kind is a single localized addition.

use crate::transforms::ValueTransform;
use appforge_schema::{Component, Field, FieldType, FieldValidation};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::{self, Debug, Formatter};

/// Partial update to a field's metadata
///
/// Only the populated members are applied; everything else is left as is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldPatch {
    /// New display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New required flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    /// New unique flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique: Option<bool>,
    /// New default value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    /// New enum options
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    /// New validation rules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<FieldValidation>,
}

/// One structural edit, dispatched by tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum MigrationOp {
    /// Append a field to an entity
    AddField {
        /// Target entity id
        entity: String,
        /// The field to add
        field: Field,
    },
    /// Remove a field from an entity
    RemoveField {
        /// Target entity id
        entity: String,
        /// Field id to remove
        field: String,
    },
    /// Change a field's type, transforming stored values
    UpdateFieldType {
        /// Target entity id
        entity: String,
        /// Field id
        field: String,
        /// New type
        new_type: FieldType,
    },
    /// Update field metadata without touching stored values
    UpdateFieldProperties {
        /// Target entity id
        entity: String,
        /// Field id
        field: String,
        /// The metadata to apply
        patch: FieldPatch,
    },
    /// Rename a field's display name; the id and stored values are unaffected
    RenameField {
        /// Target entity id
        entity: String,
        /// Field id
        field: String,
        /// New display name
        new_name: String,
    },
    /// Set one prop on a component
    UpdateComponentProp {
        /// Target page id
        page: String,
        /// Component id
        component: String,
        /// Prop name
        prop: String,
        /// New value
        value: Value,
    },
    /// Set one style override on a component
    UpdateComponentStyle {
        /// Target page id
        page: String,
        /// Component id
        component: String,
        /// Style name
        style: String,
        /// New value
        value: Value,
    },
    /// Insert a component at the page root or under a parent
    AddComponent {
        /// Target page id
        page: String,
        /// Parent component id; `None` inserts at the page root
        #[serde(default, skip_serializing_if = "Option::is_none")]
        parent: Option<String>,
        /// Insertion index; `None` appends
        #[serde(default, skip_serializing_if = "Option::is_none")]
        index: Option<usize>,
        /// The component to insert
        component: Component,
    },
    /// Remove a component at any nesting depth
    RemoveComponent {
        /// Target page id
        page: String,
        /// Component id to remove
        component: String,
    },
}

impl MigrationOp {
    /// Entity id this operation targets, if it is a field operation
    #[must_use]
    pub fn entity(&self) -> Option<&str> {
        match self {
            Self::AddField { entity, .. }
            | Self::RemoveField { entity, .. }
            | Self::UpdateFieldType { entity, .. }
            | Self::UpdateFieldProperties { entity, .. }
            | Self::RenameField { entity, .. } => Some(entity),
            _ => None,
        }
    }

    /// Page id this operation targets, if it is a component operation
    #[must_use]
    pub fn page(&self) -> Option<&str> {
        match self {
            Self::UpdateComponentProp { page, .. }
            | Self::UpdateComponentStyle { page, .. }
            | Self::AddComponent { page, .. }
            | Self::RemoveComponent { page, .. } => Some(page),
            _ => None,
        }
    }

    /// Human-readable summary
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::AddField { entity, field } => {
                format!("add field '{}' to entity '{entity}'", field.id)
            }
            Self::RemoveField { entity, field } => {
                format!("remove field '{field}' from entity '{entity}'")
            }
            Self::UpdateFieldType {
                entity,
                field,
                new_type,
            } => format!("change '{entity}.{field}' to type '{new_type}'"),
            Self::UpdateFieldProperties { entity, field, .. } => {
                format!("update properties of '{entity}.{field}'")
            }
            Self::RenameField {
                entity,
                field,
                new_name,
            } => format!("rename '{entity}.{field}' to '{new_name}'"),
            Self::UpdateComponentProp {
                page,
                component,
                prop,
                ..
            } => format!("set prop '{prop}' on '{page}.{component}'"),
            Self::UpdateComponentStyle {
                page,
                component,
                style,
                ..
            } => format!("set style '{style}' on '{page}.{component}'"),
            Self::AddComponent {
                page, component, ..
            } => format!("add component '{}' to page '{page}'", component.id),
            Self::RemoveComponent { page, component } => {
                format!("remove component '{component}' from page '{page}'")
            }
        }
    }
}

/// A typed, timestamped structural edit instruction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Migration {
    /// Instruction id
    pub id: String,
    /// When the instruction was issued
    pub created_at: DateTime<Utc>,
    /// The edit to perform
    pub operation: MigrationOp,
    /// Human-readable summary
    pub description: String,
}

impl Migration {
    /// Wrap an operation into a timestamped instruction
    #[must_use]
    pub fn new(operation: MigrationOp) -> Self {
        let description = operation.describe();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            operation,
            description,
        }
    }

    /// Shorthand for an `AddField` instruction
    #[must_use]
    pub fn add_field(entity: impl Into<String>, field: Field) -> Self {
        Self::new(MigrationOp::AddField {
            entity: entity.into(),
            field,
        })
    }

    /// Shorthand for a `RemoveField` instruction
    #[must_use]
    pub fn remove_field(entity: impl Into<String>, field: impl Into<String>) -> Self {
        Self::new(MigrationOp::RemoveField {
            entity: entity.into(),
            field: field.into(),
        })
    }

    /// Shorthand for an `UpdateFieldType` instruction
    #[must_use]
    pub fn update_field_type(
        entity: impl Into<String>,
        field: impl Into<String>,
        new_type: FieldType,
    ) -> Self {
        Self::new(MigrationOp::UpdateFieldType {
            entity: entity.into(),
            field: field.into(),
            new_type,
        })
    }

    /// Shorthand for a `RenameField` instruction
    #[must_use]
    pub fn rename_field(
        entity: impl Into<String>,
        field: impl Into<String>,
        new_name: impl Into<String>,
    ) -> Self {
        Self::new(MigrationOp::RenameField {
            entity: entity.into(),
            field: field.into(),
            new_name: new_name.into(),
        })
    }

    /// Shorthand for an `UpdateFieldProperties` instruction
    #[must_use]
    pub fn update_field_properties(
        entity: impl Into<String>,
        field: impl Into<String>,
        patch: FieldPatch,
    ) -> Self {
        Self::new(MigrationOp::UpdateFieldProperties {
            entity: entity.into(),
            field: field.into(),
            patch,
        })
    }
}

/// Companion artifact describing how stored records must be reshaped to stay
/// consistent with a migration's schema change
///
/// Emitted by the field engine whenever an edit affects stored values; never
/// emitted for metadata-only edits. Not serializable: the transform variant
/// carries the pure function itself.
#[derive(Clone)]
pub enum DataMigration {
    /// Backfill a new field into every existing record
    AddFieldToRecords {
        /// Entity id
        entity: String,
        /// New field id
        field: String,
        /// Value to backfill
        default: Value,
    },
    /// Drop a field from every existing record
    RemoveFieldFromRecords {
        /// Entity id
        entity: String,
        /// Removed field id
        field: String,
    },
    /// Rewrite a field's value in every existing record
    TransformFieldData {
        /// Entity id
        entity: String,
        /// Field id
        field: String,
        /// Pure value transform from the compatibility table
        transform: ValueTransform,
    },
}

impl Debug for DataMigration {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddFieldToRecords {
                entity,
                field,
                default,
            } => f
                .debug_struct("AddFieldToRecords")
                .field("entity", entity)
                .field("field", field)
                .field("default", default)
                .finish(),
            Self::RemoveFieldFromRecords { entity, field } => f
                .debug_struct("RemoveFieldFromRecords")
                .field("entity", entity)
                .field("field", field)
                .finish(),
            Self::TransformFieldData { entity, field, .. } => f
                .debug_struct("TransformFieldData")
                .field("entity", entity)
                .field("field", field)
                .finish_non_exhaustive(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migration_wraps_operation_with_metadata() {
        let migration = Migration::remove_field("order", "notes");
        assert!(!migration.id.is_empty());
        assert_eq!(
            migration.description,
            "remove field 'notes' from entity 'order'"
        );
        assert_eq!(migration.operation.entity(), Some("order"));
        assert_eq!(migration.operation.page(), None);
    }

    #[test]
    fn operations_roundtrip_through_json() {
        let op = MigrationOp::UpdateFieldType {
            entity: "order".to_string(),
            field: "total".to_string(),
            new_type: FieldType::String,
        };
        let json = serde_json::to_value(&op).unwrap();
        assert_eq!(json["kind"], "updateFieldType");
        assert_eq!(json["newType"], "string");

        let back: MigrationOp = serde_json::from_value(json).unwrap();
        assert_eq!(back, op);
    }
}
