//! Publish and rollback
//!
//! Maintains the invariant that at most one version per (app, environment)
//! carries `is_current = true`. Both publish and rollback first clear every
//! set flag, then set the target's, as one logical operation. Because the
//! storage contract alone is read-then-write, concurrent writers for the
//! same (app, environment) could race; the manager closes that gap by
//! serializing them through an async mutex keyed on the pair. Callers with
//! multiple manager instances over shared storage must instead rely on a
//! backend with conditional-write semantics.

use crate::error::DeployError;
use crate::storage::DeploymentStorage;
use crate::version::{compare_versions, next_version, AppVersion, Environment};
use appforge_schema::AppBlueprint;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Versioning and deployment engine over injected storage
pub struct DeploymentManager {
    storage: Arc<dyn DeploymentStorage>,
    writer_locks: DashMap<(String, Environment), Arc<Mutex<()>>>,
}

impl DeploymentManager {
    /// Create a manager over a storage backend
    #[must_use]
    pub fn new(storage: Arc<dyn DeploymentStorage>) -> Self {
        Self {
            storage,
            writer_locks: DashMap::new(),
        }
    }

    /// Publish a blueprint as the next version of (app, environment)
    ///
    /// The new snapshot gets the highest existing version patch-bumped
    /// (`1.0.0` when none exist) and becomes current; every previously
    /// current version has its flag cleared.
    ///
    /// # Errors
    /// Propagates storage failures.
    pub async fn publish(
        &self,
        app_id: &str,
        environment: Environment,
        blueprint: AppBlueprint,
    ) -> Result<AppVersion, DeployError> {
        let lock = self.writer_lock(app_id, environment);
        let _guard = lock.lock().await;

        let existing = self.storage.get_versions(app_id, Some(environment)).await?;
        let semver = next_version(&existing);

        let version = AppVersion::snapshot(app_id, semver, environment, blueprint);
        self.storage.save_version(version.clone()).await?;
        let published = self.make_current(app_id, environment, &version).await?;

        tracing::info!(
            app = app_id,
            %environment,
            version = %published.version,
            "published"
        );
        Ok(published)
    }

    /// Promote an explicit version back to current
    ///
    /// # Errors
    /// - [`DeployError::VersionNotFound`] for an unknown id
    /// - [`DeployError::VersionMismatch`] when the version belongs to a
    ///   different app or environment
    pub async fn rollback_to_version(
        &self,
        app_id: &str,
        environment: Environment,
        version_id: &str,
    ) -> Result<AppVersion, DeployError> {
        let lock = self.writer_lock(app_id, environment);
        let _guard = lock.lock().await;

        let version = self
            .storage
            .get_version(version_id)
            .await?
            .ok_or_else(|| DeployError::VersionNotFound(version_id.to_string()))?;

        if version.app_id != app_id || version.environment != environment {
            return Err(DeployError::VersionMismatch {
                version: version_id.to_string(),
                actual_app: version.app_id,
                actual_env: version.environment,
                expected_app: app_id.to_string(),
                expected_env: environment,
            });
        }

        let promoted = self.make_current(app_id, environment, &version).await?;
        tracing::info!(
            app = app_id,
            %environment,
            version = %promoted.version,
            "rolled back to explicit version"
        );
        Ok(promoted)
    }

    /// Roll back to the version immediately preceding the current one
    ///
    /// Versions are ordered descending by numeric version; the entry right
    /// after the current one is promoted. The operation never wraps around:
    /// a current version that is already the oldest yields
    /// [`DeployError::NoPreviousVersion`].
    ///
    /// # Errors
    /// Also [`DeployError::NoCurrentVersion`] when nothing is published.
    pub async fn rollback_to_previous(
        &self,
        app_id: &str,
        environment: Environment,
    ) -> Result<AppVersion, DeployError> {
        let lock = self.writer_lock(app_id, environment);
        let _guard = lock.lock().await;

        let current = self
            .storage
            .get_current_version(app_id, environment)
            .await?
            .ok_or_else(|| DeployError::NoCurrentVersion {
                app_id: app_id.to_string(),
                environment,
            })?;

        let mut versions = self.storage.get_versions(app_id, Some(environment)).await?;
        versions.sort_by(|a, b| compare_versions(&b.version, &a.version));

        let position = versions
            .iter()
            .position(|v| v.id == current.id)
            .ok_or_else(|| DeployError::VersionNotFound(current.id.clone()))?;
        let previous = versions
            .get(position + 1)
            .ok_or(DeployError::NoPreviousVersion)?;

        let promoted = self.make_current(app_id, environment, previous).await?;
        tracing::info!(
            app = app_id,
            %environment,
            from = %current.version,
            to = %promoted.version,
            "rolled back to previous version"
        );
        Ok(promoted)
    }

    /// All versions for (app, environment), newest first
    ///
    /// # Errors
    /// Propagates storage failures.
    pub async fn history(
        &self,
        app_id: &str,
        environment: Environment,
    ) -> Result<Vec<AppVersion>, DeployError> {
        let mut versions = self.storage.get_versions(app_id, Some(environment)).await?;
        versions.sort_by(|a, b| compare_versions(&b.version, &a.version));
        Ok(versions)
    }

    /// Clear every current flag for (app, environment), then set the target's
    ///
    /// Runs under the caller-held writer lock, so the two steps are one
    /// logical operation: no interleaving can observe zero or two current
    /// versions through this manager.
    async fn make_current(
        &self,
        app_id: &str,
        environment: Environment,
        target: &AppVersion,
    ) -> Result<AppVersion, DeployError> {
        let versions = self.storage.get_versions(app_id, Some(environment)).await?;
        for version in versions {
            if version.is_current && version.id != target.id {
                let mut cleared = version;
                cleared.is_current = false;
                self.storage.save_version(cleared).await?;
            }
        }

        let mut promoted = target.clone();
        promoted.is_current = true;
        self.storage.save_version(promoted.clone()).await?;
        self.storage
            .set_current_version(app_id, environment, &promoted.id)
            .await?;
        Ok(promoted)
    }

    fn writer_lock(&self, app_id: &str, environment: Environment) -> Arc<Mutex<()>> {
        self.writer_locks
            .entry((app_id.to_string(), environment))
            .or_default()
            .clone()
    }
}

impl std::fmt::Debug for DeploymentManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeploymentManager")
            .field("writer_locks", &self.writer_locks.len())
            .finish_non_exhaustive()
    }
}
