//! Deployment error types
//!
//! These are expected, recoverable business states a caller branches on
//! (e.g. to render "nothing to roll back to"), not exceptional conditions —
//! hence a plain error enum returned by value, never a panic.

use crate::version::Environment;

/// Storage-level failure, wrapped by the hosting application's backend
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// The backend rejected or lost the operation
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Recoverable outcome of a publish or rollback
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DeployError {
    /// No version with the requested id exists
    #[error("version not found: {0}")]
    VersionNotFound(String),

    /// The requested version belongs to a different app or environment
    #[error(
        "version {version} belongs to app '{actual_app}' in {actual_env}, \
         not app '{expected_app}' in {expected_env}"
    )]
    VersionMismatch {
        /// Version id that was requested
        version: String,
        /// App the version actually belongs to
        actual_app: String,
        /// Environment the version is actually scoped to
        actual_env: Environment,
        /// App the caller asked about
        expected_app: String,
        /// Environment the caller asked about
        expected_env: Environment,
    },

    /// Nothing is currently published for the (app, environment)
    #[error("no current version for app '{app_id}' in {environment}")]
    NoCurrentVersion {
        /// App id
        app_id: String,
        /// Environment
        environment: Environment,
    },

    /// The current version is already the oldest; rollback never wraps around
    #[error("No previous version found")]
    NoPreviousVersion,

    /// The storage backend failed
    #[error(transparent)]
    Storage(#[from] StorageError),
}
