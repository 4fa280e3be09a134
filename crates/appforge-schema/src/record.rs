//! Stored record shape
//!
//! Records are ordered field-id → value maps. This core never persists them;
//! the type is shared by the sample-data generator and the data-migration
//! engine so both reshape the same structure the action executor stores.

use indexmap::IndexMap;
use serde_json::Value;

/// One stored record of an entity
pub type Record = IndexMap<String, Value>;
