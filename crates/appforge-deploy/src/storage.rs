//! The deployment storage boundary
//!
//! The engine never assumes a storage technology; everything goes through
//! [`DeploymentStorage`], implemented by the hosting application over
//! whatever store it prefers. [`MemoryStorage`] is the reference
//! implementation used by tests and embedded hosts — an explicit store
//! object with caller-controlled lifetime, not a process-wide singleton, so
//! concurrent tests and multiple app instances never leak state into one
//! another.

use crate::error::StorageError;
use crate::version::{AppVersion, Environment};
use async_trait::async_trait;
use dashmap::DashMap;

/// Persistence interface consumed by the deployment engine
#[async_trait]
pub trait DeploymentStorage: Send + Sync {
    /// Insert or replace a version snapshot
    async fn save_version(&self, version: AppVersion) -> Result<(), StorageError>;

    /// Fetch a version by id
    async fn get_version(&self, id: &str) -> Result<Option<AppVersion>, StorageError>;

    /// All versions of an app, optionally narrowed to one environment
    async fn get_versions(
        &self,
        app_id: &str,
        environment: Option<Environment>,
    ) -> Result<Vec<AppVersion>, StorageError>;

    /// Point the (app, environment) current marker at a version id
    async fn set_current_version(
        &self,
        app_id: &str,
        environment: Environment,
        version_id: &str,
    ) -> Result<(), StorageError>;

    /// The version the current marker points at, if any
    async fn get_current_version(
        &self,
        app_id: &str,
        environment: Environment,
    ) -> Result<Option<AppVersion>, StorageError>;
}

/// In-memory reference storage
#[derive(Debug, Default)]
pub struct MemoryStorage {
    versions: DashMap<String, AppVersion>,
    current: DashMap<(String, Environment), String>,
}

impl MemoryStorage {
    /// Create an empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored versions
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.versions.len()
    }

    /// Whether the store holds no versions
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}

#[async_trait]
impl DeploymentStorage for MemoryStorage {
    async fn save_version(&self, version: AppVersion) -> Result<(), StorageError> {
        self.versions.insert(version.id.clone(), version);
        Ok(())
    }

    async fn get_version(&self, id: &str) -> Result<Option<AppVersion>, StorageError> {
        Ok(self.versions.get(id).map(|v| v.clone()))
    }

    async fn get_versions(
        &self,
        app_id: &str,
        environment: Option<Environment>,
    ) -> Result<Vec<AppVersion>, StorageError> {
        Ok(self
            .versions
            .iter()
            .filter(|entry| {
                entry.app_id == app_id
                    && environment.map_or(true, |env| entry.environment == env)
            })
            .map(|entry| entry.clone())
            .collect())
    }

    async fn set_current_version(
        &self,
        app_id: &str,
        environment: Environment,
        version_id: &str,
    ) -> Result<(), StorageError> {
        if !self.versions.contains_key(version_id) {
            return Err(StorageError::Backend(format!(
                "cannot mark unknown version '{version_id}' current"
            )));
        }
        self.current
            .insert((app_id.to_string(), environment), version_id.to_string());
        Ok(())
    }

    async fn get_current_version(
        &self,
        app_id: &str,
        environment: Environment,
    ) -> Result<Option<AppVersion>, StorageError> {
        let id = self
            .current
            .get(&(app_id.to_string(), environment))
            .map(|entry| entry.clone());
        match id {
            Some(id) => self.get_version(&id).await,
            None => Ok(None),
        }
    }
}
