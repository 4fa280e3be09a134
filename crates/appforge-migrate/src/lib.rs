//! AppForge Migration Engine
//!
//! Applies one structural edit to a live blueprint and, where the edit
//! reshapes previously stored data, emits a companion [`DataMigration`]
//! describing the required reshape — without ever discarding data implicitly.
//!
//! # Core Concepts
//!
//! - [`Migration`]: a typed, timestamped instruction; its [`MigrationOp`] is
//!   a closed sum type matched exhaustively by the engines.
//! - [`FieldEngine`]: field-level edits on a single entity (add, remove,
//!   retype, rename, update properties).
//! - [`ComponentEngine`]: copy-on-write edits on a page's component tree.
//! - [`MigrationEngine`]: routes an instruction into a whole blueprint,
//!   bumps the version and re-validates atomically.
//! - [`DataBatchApplier`]: cursor-driven execution of data migrations over
//!   large record sets.
//!
//! Every operation has the contract
//! `(model, &Migration) -> (new model, Option<DataMigration>)` and never
//! mutates its input. Edits are fail-fast, not idempotent-by-default:
//! replaying an `AddField` raises [`MigrationError::DuplicateField`] so
//! callers can detect duplicate replay of a migration log.

#![warn(unreachable_pub)]

mod components;
mod data;
mod engine;
mod error;
mod fields;
mod migration;
mod transforms;

pub use components::ComponentEngine;
pub use data::{apply_to_record, apply_to_records, DataBatchApplier};
pub use engine::{BatchFailure, BatchMode, BatchOutcome, MigrationEngine};
pub use error::MigrationError;
pub use fields::FieldEngine;
pub use migration::{DataMigration, FieldPatch, Migration, MigrationOp};
pub use transforms::{transform_for, ValueTransform};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
