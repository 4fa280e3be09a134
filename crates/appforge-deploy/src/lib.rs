//! AppForge Versioning & Deployment
//!
//! Wraps a blueprint into an immutable, semantically versioned,
//! environment-scoped snapshot and supports promotion and rollback across
//! the lineage of snapshots per (app, environment).
//!
//! # Core Concepts
//!
//! - [`AppVersion`]: an immutable snapshot with a blake3 content checksum.
//! - [`compare_versions`]: strict numeric (major, minor, patch) ordering.
//! - [`DeploymentManager`]: publish / rollback with the
//!   exactly-one-current-version invariant, writers serialized per
//!   (app, environment).
//! - [`DeploymentStorage`]: the injected persistence boundary — the only
//!   suspension points in the whole engine.
//!
//! Failed outcomes (unknown version, scope mismatch, nothing to roll back
//! to) are ordinary [`DeployError`] values for callers to branch on.

#![warn(unreachable_pub)]

mod error;
mod manager;
mod storage;
mod version;

pub use error::{DeployError, StorageError};
pub use manager::DeploymentManager;
pub use storage::{DeploymentStorage, MemoryStorage};
pub use version::{
    blueprint_checksum, compare_versions, next_version, AppVersion, Environment, SemVer,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
