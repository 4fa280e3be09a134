//! AppForge Blueprint Generation Pipeline
//!
//! Deterministically converts a [`ProcessedIntent`](appforge_schema::ProcessedIntent)
//! into a valid [`AppBlueprint`](appforge_schema::AppBlueprint) through
//! ordered, single-purpose builder stages:
//!
//! 1. Entity inference
//! 2. Page construction
//! 3. Workflow construction
//! 4. Navigation construction
//! 5. Theme construction
//!
//! Each stage is a pure function of the context accumulated by the stages
//! before it; no stage performs I/O. Missing or sparse intent detail degrades
//! to sensible defaults — the pipeline always returns a renderable,
//! schema-valid blueprint, because the downstream renderer has no fallback
//! path.

#![warn(unreachable_pub)]

mod context;
mod entities;
mod kits;
mod navigation;
mod pages;
mod pipeline;
mod slug;
mod theme;
mod workflows;

pub use context::GeneratorContext;
pub use kits::{find as find_kit, BehaviorKit};
pub use pipeline::BlueprintGenerator;
pub use slug::{field_id, pluralize, slugify, title_case};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
