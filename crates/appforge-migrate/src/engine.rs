//! Whole-blueprint migration
//!
//! Routes an instruction to the entity or page it targets, swaps the edited
//! model into a fresh blueprint, bumps the structural version and re-validates
//! the result. A migration whose result fails validation is rejected
//! atomically: the error carries the issues and the caller's pre-migration
//! blueprint is untouched.

use crate::components::ComponentEngine;
use crate::error::MigrationError;
use crate::fields::FieldEngine;
use crate::migration::{DataMigration, Migration};
use appforge_schema::{AppBlueprint, Validator};

/// How a batch of migrations reacts to a failing entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchMode {
    /// Abort on the first failure, discarding the partial result
    FailFast,
    /// Skip failing entries, apply the rest, and collect the failures
    CollectFailures,
}

/// One failed entry of a batch
#[derive(Debug, Clone)]
pub struct BatchFailure {
    /// Position of the migration within the submitted batch
    pub index: usize,
    /// Why it was rejected
    pub error: MigrationError,
}

/// Result of applying a batch of migrations
#[derive(Debug)]
pub struct BatchOutcome {
    /// The blueprint after every applied migration
    pub blueprint: AppBlueprint,
    /// Companion data migrations, in application order
    pub data_migrations: Vec<DataMigration>,
    /// Skipped entries (empty under [`BatchMode::FailFast`])
    pub failures: Vec<BatchFailure>,
}

/// Routes migrations onto a blueprint
#[derive(Debug, Default, Clone, Copy)]
pub struct MigrationEngine;

impl MigrationEngine {
    /// Apply one migration to a blueprint
    ///
    /// Never mutates its input; returns the edited blueprint (version bumped
    /// by one) and the companion data migration when stored records must be
    /// reshaped.
    ///
    /// # Errors
    /// Routing errors ([`MigrationError::EntityNotFound`],
    /// [`MigrationError::PageNotFound`]), the engine errors of the targeted
    /// edit, and [`MigrationError::InvalidResult`] when the edited blueprint
    /// no longer validates.
    pub fn apply(
        blueprint: &AppBlueprint,
        migration: &Migration,
    ) -> Result<(AppBlueprint, Option<DataMigration>), MigrationError> {
        let mut next = blueprint.clone();
        let data = if let Some(entity_id) = migration.operation.entity() {
            let index = blueprint
                .entities
                .iter()
                .position(|e| e.id == entity_id)
                .ok_or_else(|| MigrationError::EntityNotFound(entity_id.to_string()))?;
            let (entity, data) = FieldEngine::apply(&blueprint.entities[index], migration)?;
            next.entities[index] = entity;
            data
        } else if let Some(page_id) = migration.operation.page() {
            let index = blueprint
                .pages
                .iter()
                .position(|p| p.id == page_id)
                .ok_or_else(|| MigrationError::PageNotFound(page_id.to_string()))?;
            let (page, data) = ComponentEngine::apply(&blueprint.pages[index], migration)?;
            next.pages[index] = page;
            data
        } else {
            return Err(MigrationError::UnsupportedOperation(
                migration.operation.describe(),
            ));
        };

        next.version = blueprint.version + 1;
        Validator::validate(&next)?;

        tracing::info!(
            blueprint = %blueprint.id,
            version = next.version,
            migration = %migration.description,
            "migration applied"
        );
        Ok((next, data))
    }

    /// Apply a batch of migrations in order
    ///
    /// # Errors
    /// Under [`BatchMode::FailFast`] the first failure is returned and the
    /// partial result discarded. Under [`BatchMode::CollectFailures`] the
    /// call succeeds with the failures listed in the outcome.
    pub fn apply_batch(
        blueprint: &AppBlueprint,
        migrations: &[Migration],
        mode: BatchMode,
    ) -> Result<BatchOutcome, MigrationError> {
        let mut current = blueprint.clone();
        let mut data_migrations = Vec::new();
        let mut failures = Vec::new();

        for (index, migration) in migrations.iter().enumerate() {
            match Self::apply(&current, migration) {
                Ok((next, data)) => {
                    current = next;
                    data_migrations.extend(data);
                }
                Err(error) => match mode {
                    BatchMode::FailFast => return Err(error),
                    BatchMode::CollectFailures => {
                        tracing::warn!(index, %error, "skipping failed migration");
                        failures.push(BatchFailure { index, error });
                    }
                },
            }
        }

        Ok(BatchOutcome {
            blueprint: current,
            data_migrations,
            failures,
        })
    }
}
