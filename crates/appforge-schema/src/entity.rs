//! Entity definitions

use crate::field::Field;
use serde::{Deserialize, Serialize};

/// Per-operation CRUD permissions for an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrudRules {
    /// Records may be created
    pub create: bool,
    /// Records may be read
    pub read: bool,
    /// Records may be updated
    pub update: bool,
    /// Records may be deleted
    pub delete: bool,
}

impl Default for CrudRules {
    fn default() -> Self {
        Self {
            create: true,
            read: true,
            update: true,
            delete: true,
        }
    }
}

/// How records of an entity are rendered in lists and cards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayConfig {
    /// Field shown as the record title
    pub title_field: String,
    /// Field shown as the record subtitle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle_field: Option<String>,
    /// Icon name for the entity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Names of the automatic timestamp fields stamped onto records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimestampConfig {
    /// Creation timestamp field name
    pub created_field: String,
    /// Last-update timestamp field name
    pub updated_field: String,
}

impl Default for TimestampConfig {
    fn default() -> Self {
        Self {
            created_field: "createdAt".to_string(),
            updated_field: "updatedAt".to_string(),
        }
    }
}

/// A named, typed data model owned exclusively by its blueprint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    /// Stable entity id, unique within the blueprint
    pub id: String,
    /// Singular display name
    pub name: String,
    /// Plural display name
    pub plural_name: String,
    /// Ordered field list; ids unique within the entity
    pub fields: Vec<Field>,
    /// CRUD permissions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crud: Option<CrudRules>,
    /// Display configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<DisplayConfig>,
    /// Automatic timestamp configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamps: Option<TimestampConfig>,
}

impl Entity {
    /// Create a new entity with no fields
    #[inline]
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        plural_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            plural_name: plural_name.into(),
            fields: Vec::new(),
            crud: None,
            display: None,
            timestamps: None,
        }
    }

    /// Append a field
    #[inline]
    #[must_use]
    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// With display configuration
    #[inline]
    #[must_use]
    pub fn with_display(mut self, display: DisplayConfig) -> Self {
        self.display = Some(display);
        self
    }

    /// With automatic timestamps
    #[inline]
    #[must_use]
    pub fn with_timestamps(mut self) -> Self {
        self.timestamps = Some(TimestampConfig::default());
        self
    }

    /// Look up a field by id
    #[inline]
    #[must_use]
    pub fn field(&self, id: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// Check whether a field id exists
    #[inline]
    #[must_use]
    pub fn has_field(&self, id: &str) -> bool {
        self.field(id).is_some()
    }

    /// Iterate over reference fields
    pub fn reference_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|f| f.is_reference())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{FieldType, ReferenceDescriptor};

    #[test]
    fn entity_builder_and_lookup() {
        let entity = Entity::new("customer", "Customer", "Customers")
            .with_field(Field::new("name", "Name", FieldType::String).required())
            .with_field(Field::new("email", "Email", FieldType::Email))
            .with_timestamps();

        assert_eq!(entity.fields.len(), 2);
        assert!(entity.has_field("email"));
        assert!(!entity.has_field("missing"));
        assert_eq!(entity.field("name").unwrap().name, "Name");
        assert!(entity.timestamps.is_some());
    }

    #[test]
    fn reference_fields_iterator() {
        let entity = Entity::new("order", "Order", "Orders")
            .with_field(Field::new("total", "Total", FieldType::Currency))
            .with_field(Field::reference(
                "customer",
                "Customer",
                ReferenceDescriptor::new("customer", "name"),
            ));

        let refs: Vec<_> = entity.reference_fields().collect();
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].id, "customer");
    }

    #[test]
    fn crud_defaults_allow_everything() {
        let crud = CrudRules::default();
        assert!(crud.create && crud.read && crud.update && crud.delete);
    }
}
