//! Migration error types

use appforge_schema::{FieldType, ValidationErrors};

/// Typed failure of a single structural edit
///
/// Structural edits are fail-fast, not idempotent-by-default: replaying an
/// `AddField` for a field that already exists raises [`Self::DuplicateField`]
/// rather than silently no-op'ing, so callers can detect out-of-order or
/// duplicate replay of a migration log.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MigrationError {
    /// Field id already exists on the entity
    #[error("duplicate field '{field}' on entity '{entity}'")]
    DuplicateField {
        /// Entity id
        entity: String,
        /// Offending field id
        field: String,
    },

    /// Field id does not exist on the entity
    #[error("field '{field}' not found on entity '{entity}'")]
    FieldNotFound {
        /// Entity id
        entity: String,
        /// Missing field id
        field: String,
    },

    /// No transform exists for the requested type pair
    #[error("unsupported type transform for field '{field}': {from} -> {to}")]
    UnsupportedTypeTransform {
        /// Field id
        field: String,
        /// Current type
        from: FieldType,
        /// Requested type
        to: FieldType,
    },

    /// Entity id does not exist on the blueprint
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    /// Page id does not exist on the blueprint
    #[error("page not found: {0}")]
    PageNotFound(String),

    /// Component id does not exist in the page tree
    #[error("component '{component}' not found on page '{page}'")]
    ComponentNotFound {
        /// Page id
        page: String,
        /// Missing component id
        component: String,
    },

    /// Operation routed to an engine that cannot handle it
    #[error("operation not supported by this engine: {0}")]
    UnsupportedOperation(String),

    /// The edited blueprint no longer validates; the edit was rejected and
    /// the pre-migration blueprint preserved
    #[error("migration result failed validation: {0}")]
    InvalidResult(#[from] ValidationErrors),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_identify_the_offending_ids() {
        let err = MigrationError::DuplicateField {
            entity: "order".to_string(),
            field: "total".to_string(),
        };
        assert!(err.to_string().contains("order"));
        assert!(err.to_string().contains("total"));

        let err = MigrationError::UnsupportedTypeTransform {
            field: "total".to_string(),
            from: FieldType::Json,
            to: FieldType::Phone,
        };
        assert!(err.to_string().contains("json -> phone"));
    }
}
