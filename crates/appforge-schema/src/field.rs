//! Field definitions
//!
//! A [`Field`] is a typed, named attribute of an [`Entity`](crate::Entity).
//! The type set is closed; reference fields carry a [`ReferenceDescriptor`]
//! and enum fields carry their declared options.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::{self, Display, Formatter};

/// Closed set of field types a blueprint may declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Free-form text
    String,
    /// Numeric value (integer or float)
    Number,
    /// True/false flag
    Boolean,
    /// Calendar date
    Date,
    /// Date with time of day
    DateTime,
    /// Email address
    Email,
    /// Web address
    Url,
    /// Phone number
    Phone,
    /// Image asset reference
    Image,
    /// File asset reference
    File,
    /// Reference to a record of another entity
    Reference,
    /// One of a declared set of options
    Enum,
    /// Monetary amount
    Currency,
    /// Percentage (0–100)
    Percentage,
    /// Rich text document
    RichText,
    /// Arbitrary JSON value
    Json,
}

impl Display for FieldType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::Email => "email",
            Self::Url => "url",
            Self::Phone => "phone",
            Self::Image => "image",
            Self::File => "file",
            Self::Reference => "reference",
            Self::Enum => "enum",
            Self::Currency => "currency",
            Self::Percentage => "percentage",
            Self::RichText => "richtext",
            Self::Json => "json",
        };
        write!(f, "{name}")
    }
}

/// Cardinality of a reference between two entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Relationship {
    /// One source record per target record
    OneToOne,
    /// One source record, many target records
    OneToMany,
    /// Many source records, one target record
    #[default]
    ManyToOne,
    /// Many to many
    ManyToMany,
}

/// Reference descriptor — present iff the field type is [`FieldType::Reference`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceDescriptor {
    /// Entity id the reference points at
    pub target_entity: String,
    /// Field on the target entity shown when rendering the reference
    pub display_field: String,
    /// Cardinality of the relationship
    #[serde(default)]
    pub relationship: Relationship,
}

impl ReferenceDescriptor {
    /// Create a descriptor with the default many-to-one relationship
    #[inline]
    #[must_use]
    pub fn new(target_entity: impl Into<String>, display_field: impl Into<String>) -> Self {
        Self {
            target_entity: target_entity.into(),
            display_field: display_field.into(),
            relationship: Relationship::default(),
        }
    }
}

/// Declarative validation rules attached to a field
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldValidation {
    /// Minimum numeric value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Maximum numeric value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Minimum string length
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    /// Maximum string length
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    /// Regex pattern the value must match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Message shown when validation fails
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Typed, named attribute of an entity
///
/// # Invariants
/// - `reference` is `Some` iff `field_type` is [`FieldType::Reference`]
/// - `options` is `Some` (and non-empty) iff `field_type` is [`FieldType::Enum`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    /// Stable field id, unique within the owning entity
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Field type
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Whether a value is required
    #[serde(default)]
    pub required: bool,
    /// Whether values must be unique across records
    #[serde(default)]
    pub unique: bool,
    /// Default value used when a record omits the field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
    /// Reference descriptor (reference fields only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<ReferenceDescriptor>,
    /// Declared options (enum fields only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    /// Declarative validation rules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<FieldValidation>,
}

impl Field {
    /// Create a new field
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            field_type,
            required: false,
            unique: false,
            default_value: None,
            reference: None,
            options: None,
            validation: None,
        }
    }

    /// Create a reference field with its descriptor
    #[inline]
    #[must_use]
    pub fn reference(
        id: impl Into<String>,
        name: impl Into<String>,
        descriptor: ReferenceDescriptor,
    ) -> Self {
        let mut field = Self::new(id, name, FieldType::Reference);
        field.reference = Some(descriptor);
        field
    }

    /// Create an enum field with its options
    #[inline]
    #[must_use]
    pub fn enumeration(
        id: impl Into<String>,
        name: impl Into<String>,
        options: Vec<String>,
    ) -> Self {
        let mut field = Self::new(id, name, FieldType::Enum);
        field.options = Some(options);
        field
    }

    /// Mark as required
    #[inline]
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Mark as unique
    #[inline]
    #[must_use]
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// With default value
    #[inline]
    #[must_use]
    pub fn with_default(mut self, value: Value) -> Self {
        self.default_value = Some(value);
        self
    }

    /// With validation rules
    #[inline]
    #[must_use]
    pub fn with_validation(mut self, validation: FieldValidation) -> Self {
        self.validation = Some(validation);
        self
    }

    /// Check if the field is a reference
    #[inline]
    #[must_use]
    pub fn is_reference(&self) -> bool {
        self.field_type == FieldType::Reference
    }
}
