//! AppForge Blueprint Schema
//!
//! Canonical shape of an application blueprint and its enforced invariants.
//!
//! # Core Concepts
//!
//! - [`AppBlueprint`]: the complete declarative description of a generated
//!   application — entities, pages, workflows, navigation, theme. Single
//!   source of truth shared by every surface.
//! - [`Entity`] / [`Field`]: named, typed data models and their attributes.
//! - [`Component`]: a node in a page's component tree. Children are
//!   `Arc`-owned so structural edits can share unmodified subtrees.
//! - [`ProcessedIntent`]: the upstream input produced by the understanding
//!   collaborator. Never persisted by this core.
//! - [`Validator`]: all-or-nothing parsing and invariant enforcement.
//!   Invalid input yields a list of `{path, message}` issues and no blueprint.
//!
//! # Example
//!
//! ```rust,ignore
//! use appforge_schema::Validator;
//!
//! let blueprint = Validator::parse(raw_json)?;
//! assert!(blueprint.entities.len() <= AppBlueprint::MAX_ENTITIES);
//! ```

#![warn(unreachable_pub)]

mod blueprint;
mod component;
mod entity;
mod field;
mod intent;
mod navigation;
mod page;
mod record;
mod validate;
mod workflow;

pub use blueprint::{AppBlueprint, Theme};
pub use component::Component;
pub use entity::{CrudRules, DisplayConfig, Entity, TimestampConfig};
pub use field::{Field, FieldType, FieldValidation, ReferenceDescriptor, Relationship};
pub use intent::{
    ExtractedDetails, ExtractedEntity, ExtractedField, ExtractedPage, IntentType, ProcessedIntent,
};
pub use navigation::{NavigationRule, NavigationTrigger};
pub use page::{LayoutConfig, Page, PageType, Surface};
pub use record::Record;
pub use validate::{ValidationErrors, ValidationIssue, Validator};
pub use workflow::{Action, Trigger, Workflow};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
