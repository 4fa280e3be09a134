//! Processed intent — the upstream input
//!
//! Produced by the natural-language understanding collaborator. Sparse or
//! absent fields mean "apply defaults", never an error. This core never
//! persists a [`ProcessedIntent`].

use crate::field::FieldType;
use crate::page::{PageType, Surface};
use serde::{Deserialize, Serialize};

/// What the user asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IntentType {
    /// Build a new application
    CreateApp,
    /// Modify an existing application
    CustomizeApp,
    /// Could not be classified
    #[default]
    Unknown,
}

/// Best-effort field extracted from the user's description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedField {
    /// Field name as the user phrased it
    pub name: String,
    /// Type hint, when the extractor could tell
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<FieldType>,
    /// Whether the user marked it mandatory
    #[serde(default)]
    pub required: bool,
}

impl ExtractedField {
    /// Create a field hint with no type
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: None,
            required: false,
        }
    }

    /// With a type hint
    #[inline]
    #[must_use]
    pub fn with_type(mut self, field_type: FieldType) -> Self {
        self.field_type = Some(field_type);
        self
    }
}

/// Best-effort entity extracted from the user's description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedEntity {
    /// Entity name as the user phrased it
    pub name: String,
    /// Field hints
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<ExtractedField>,
}

impl ExtractedEntity {
    /// Create an entity hint with no fields
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field hint
    #[inline]
    #[must_use]
    pub fn with_field(mut self, field: ExtractedField) -> Self {
        self.fields.push(field);
        self
    }
}

/// Best-effort page extracted from the user's description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedPage {
    /// Page name
    pub name: String,
    /// Page kind hint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_type: Option<PageType>,
    /// Entity the page should bind to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
    /// Surface hint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface: Option<Surface>,
}

/// Everything the extractor could pull out of the raw input
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedDetails {
    /// Entity hints
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entities: Vec<ExtractedEntity>,
    /// Page hints
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pages: Vec<ExtractedPage>,
    /// Feature keywords (e.g. `notifications`, `reminders`)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
}

/// The upstream input to the generation pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedIntent {
    /// The user's raw natural-language description
    pub raw_input: String,
    /// Intent classification
    #[serde(rename = "type", default)]
    pub intent_type: IntentType,
    /// Detected behavior kit id, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub behavior: Option<String>,
    /// Best-effort extracted structure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extracted_details: Option<ExtractedDetails>,
}

impl ProcessedIntent {
    /// Create an intent with nothing extracted
    #[inline]
    #[must_use]
    pub fn new(raw_input: impl Into<String>, intent_type: IntentType) -> Self {
        Self {
            raw_input: raw_input.into(),
            intent_type,
            behavior: None,
            extracted_details: None,
        }
    }

    /// With a behavior kit id
    #[inline]
    #[must_use]
    pub fn with_behavior(mut self, behavior: impl Into<String>) -> Self {
        self.behavior = Some(behavior.into());
        self
    }

    /// With extracted details
    #[inline]
    #[must_use]
    pub fn with_details(mut self, details: ExtractedDetails) -> Self {
        self.extracted_details = Some(details);
        self
    }

    /// Extracted details, defaulted when absent
    #[inline]
    #[must_use]
    pub fn details(&self) -> ExtractedDetails {
        self.extracted_details.clone().unwrap_or_default()
    }
}
