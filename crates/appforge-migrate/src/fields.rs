//! Field migration engine
//!
//! Applies one field-level edit to a single entity. Never mutates its input;
//! the caller receives a fresh entity plus the companion data migration when
//! the edit reshapes stored values.

use crate::error::MigrationError;
use crate::migration::{DataMigration, FieldPatch, Migration, MigrationOp};
use crate::transforms;
use appforge_schema::{Entity, Field, FieldType};
use serde_json::Value;

/// Stateless engine for field-level edits on one entity
#[derive(Debug, Default, Clone, Copy)]
pub struct FieldEngine;

impl FieldEngine {
    /// Apply a field migration to an entity
    ///
    /// # Errors
    /// - [`MigrationError::DuplicateField`] when adding an existing field id
    /// - [`MigrationError::FieldNotFound`] when the target field is absent
    /// - [`MigrationError::UnsupportedTypeTransform`] for a type pair outside
    ///   the compatibility table
    /// - [`MigrationError::UnsupportedOperation`] for component operations
    pub fn apply(
        entity: &Entity,
        migration: &Migration,
    ) -> Result<(Entity, Option<DataMigration>), MigrationError> {
        match &migration.operation {
            MigrationOp::AddField { field, .. } => Self::add_field(entity, field),
            MigrationOp::RemoveField { field, .. } => Self::remove_field(entity, field),
            MigrationOp::UpdateFieldType {
                field, new_type, ..
            } => Self::update_field_type(entity, field, *new_type),
            MigrationOp::UpdateFieldProperties { field, patch, .. } => {
                Self::update_field_properties(entity, field, patch)
            }
            MigrationOp::RenameField {
                field, new_name, ..
            } => Self::rename_field(entity, field, new_name),
            other => Err(MigrationError::UnsupportedOperation(other.describe())),
        }
    }

    fn add_field(
        entity: &Entity,
        field: &Field,
    ) -> Result<(Entity, Option<DataMigration>), MigrationError> {
        if entity.has_field(&field.id) {
            return Err(MigrationError::DuplicateField {
                entity: entity.id.clone(),
                field: field.id.clone(),
            });
        }

        let mut next = entity.clone();
        next.fields.push(field.clone());

        let data = DataMigration::AddFieldToRecords {
            entity: entity.id.clone(),
            field: field.id.clone(),
            default: field.default_value.clone().unwrap_or(Value::Null),
        };
        Ok((next, Some(data)))
    }

    fn remove_field(
        entity: &Entity,
        field_id: &str,
    ) -> Result<(Entity, Option<DataMigration>), MigrationError> {
        if !entity.has_field(field_id) {
            return Err(MigrationError::FieldNotFound {
                entity: entity.id.clone(),
                field: field_id.to_string(),
            });
        }

        let mut next = entity.clone();
        next.fields.retain(|f| f.id != field_id);

        let data = DataMigration::RemoveFieldFromRecords {
            entity: entity.id.clone(),
            field: field_id.to_string(),
        };
        Ok((next, Some(data)))
    }

    fn update_field_type(
        entity: &Entity,
        field_id: &str,
        new_type: FieldType,
    ) -> Result<(Entity, Option<DataMigration>), MigrationError> {
        let index = entity
            .fields
            .iter()
            .position(|f| f.id == field_id)
            .ok_or_else(|| MigrationError::FieldNotFound {
                entity: entity.id.clone(),
                field: field_id.to_string(),
            })?;
        let field = &entity.fields[index];

        let transform = transforms::transform_for(field.field_type, new_type).ok_or(
            MigrationError::UnsupportedTypeTransform {
                field: field_id.to_string(),
                from: field.field_type,
                to: new_type,
            },
        )?;

        let mut next = entity.clone();
        let slot = &mut next.fields[index];
        slot.field_type = new_type;
        // The old default follows the same transform the stored data does;
        // metadata tied to the old type cannot survive the change.
        slot.default_value = slot.default_value.take().map(|v| transform(&v));
        if new_type != FieldType::Reference {
            slot.reference = None;
        }
        if new_type != FieldType::Enum {
            slot.options = None;
        }

        let data = DataMigration::TransformFieldData {
            entity: entity.id.clone(),
            field: field_id.to_string(),
            transform,
        };
        Ok((next, Some(data)))
    }

    fn update_field_properties(
        entity: &Entity,
        field_id: &str,
        patch: &FieldPatch,
    ) -> Result<(Entity, Option<DataMigration>), MigrationError> {
        let index = entity
            .fields
            .iter()
            .position(|f| f.id == field_id)
            .ok_or_else(|| MigrationError::FieldNotFound {
                entity: entity.id.clone(),
                field: field_id.to_string(),
            })?;

        let mut next = entity.clone();
        let slot = &mut next.fields[index];
        if let Some(name) = &patch.name {
            slot.name = name.clone();
        }
        if let Some(required) = patch.required {
            slot.required = required;
        }
        if let Some(unique) = patch.unique {
            slot.unique = unique;
        }
        if let Some(default_value) = &patch.default_value {
            slot.default_value = Some(default_value.clone());
        }
        if let Some(options) = &patch.options {
            slot.options = Some(options.clone());
        }
        if let Some(validation) = &patch.validation {
            slot.validation = Some(validation.clone());
        }

        // Metadata only; stored values are unaffected.
        Ok((next, None))
    }

    fn rename_field(
        entity: &Entity,
        field_id: &str,
        new_name: &str,
    ) -> Result<(Entity, Option<DataMigration>), MigrationError> {
        let index = entity
            .fields
            .iter()
            .position(|f| f.id == field_id)
            .ok_or_else(|| MigrationError::FieldNotFound {
                entity: entity.id.clone(),
                field: field_id.to_string(),
            })?;

        let mut next = entity.clone();
        next.fields[index].name = new_name.to_string();

        Ok((next, None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn order_entity() -> Entity {
        Entity::new("order", "Order", "Orders")
            .with_field(Field::new("id", "Id", FieldType::String))
            .with_field(Field::new("total", "Total", FieldType::Number))
    }

    #[test]
    fn add_field_appends_and_emits_backfill() {
        let entity = order_entity();
        let field = Field::new("notes", "Notes", FieldType::String).with_default(json!(""));

        let (next, data) = FieldEngine::apply(&entity, &Migration::add_field("order", field))
            .unwrap();

        assert!(next.has_field("notes"));
        assert_eq!(entity.fields.len(), 2, "input must stay untouched");
        match data.unwrap() {
            DataMigration::AddFieldToRecords { field, default, .. } => {
                assert_eq!(field, "notes");
                assert_eq!(default, json!(""));
            }
            other => panic!("unexpected data migration: {other:?}"),
        }
    }

    #[test]
    fn add_existing_field_fails_fast() {
        let entity = order_entity();
        let migration =
            Migration::add_field("order", Field::new("total", "Total", FieldType::Number));

        let err = FieldEngine::apply(&entity, &migration).unwrap_err();
        assert_eq!(
            err,
            MigrationError::DuplicateField {
                entity: "order".to_string(),
                field: "total".to_string(),
            }
        );
    }

    #[test]
    fn remove_field_emits_removal() {
        let entity = order_entity();
        let (next, data) =
            FieldEngine::apply(&entity, &Migration::remove_field("order", "total")).unwrap();

        assert!(!next.has_field("total"));
        assert!(matches!(
            data,
            Some(DataMigration::RemoveFieldFromRecords { .. })
        ));
    }

    #[test]
    fn remove_missing_field_fails() {
        let err = FieldEngine::apply(&order_entity(), &Migration::remove_field("order", "ghost"))
            .unwrap_err();
        assert!(matches!(err, MigrationError::FieldNotFound { .. }));
    }

    #[test]
    fn add_then_remove_restores_the_field_set() {
        let entity = order_entity();
        let field = Field::new("notes", "Notes", FieldType::String);

        let (with_field, _) =
            FieldEngine::apply(&entity, &Migration::add_field("order", field)).unwrap();
        let (restored, _) =
            FieldEngine::apply(&with_field, &Migration::remove_field("order", "notes")).unwrap();

        assert_eq!(restored.fields, entity.fields);
    }

    #[test]
    fn update_field_type_transforms_stored_shape() {
        let entity = order_entity();
        let migration = Migration::update_field_type("order", "total", FieldType::String);

        let (next, data) = FieldEngine::apply(&entity, &migration).unwrap();
        assert_eq!(next.field("total").unwrap().field_type, FieldType::String);

        match data.unwrap() {
            DataMigration::TransformFieldData { transform, .. } => {
                assert_eq!(transform(&json!(42)), json!("42"));
            }
            other => panic!("unexpected data migration: {other:?}"),
        }
    }

    #[test]
    fn unsupported_type_pair_is_rejected() {
        let entity = order_entity().with_field(Field::new("meta", "Meta", FieldType::Json));
        let migration = Migration::update_field_type("order", "meta", FieldType::Phone);

        let err = FieldEngine::apply(&entity, &migration).unwrap_err();
        assert!(matches!(
            err,
            MigrationError::UnsupportedTypeTransform {
                from: FieldType::Json,
                to: FieldType::Phone,
                ..
            }
        ));
    }

    #[test]
    fn type_change_away_from_enum_drops_options() {
        let entity = Entity::new("task", "Task", "Tasks").with_field(Field::enumeration(
            "status",
            "Status",
            vec!["open".to_string(), "done".to_string()],
        ));
        let migration = Migration::update_field_type("task", "status", FieldType::String);

        let (next, _) = FieldEngine::apply(&entity, &migration).unwrap();
        let status = next.field("status").unwrap();
        assert_eq!(status.field_type, FieldType::String);
        assert!(status.options.is_none());
    }

    #[test]
    fn rename_and_properties_emit_no_data_migration() {
        let entity = order_entity();

        let (renamed, data) =
            FieldEngine::apply(&entity, &Migration::rename_field("order", "total", "Amount"))
                .unwrap();
        assert_eq!(renamed.field("total").unwrap().name, "Amount");
        assert!(data.is_none());

        let patch = FieldPatch {
            required: Some(true),
            ..FieldPatch::default()
        };
        let (patched, data) = FieldEngine::apply(
            &entity,
            &Migration::update_field_properties("order", "total", patch),
        )
        .unwrap();
        assert!(patched.field("total").unwrap().required);
        assert!(data.is_none());
    }

    #[test]
    fn component_operation_is_rejected_by_the_field_engine() {
        let migration = Migration::new(MigrationOp::RemoveComponent {
            page: "home".to_string(),
            component: "hero".to_string(),
        });
        let err = FieldEngine::apply(&order_entity(), &migration).unwrap_err();
        assert!(matches!(err, MigrationError::UnsupportedOperation(_)));
    }
}
