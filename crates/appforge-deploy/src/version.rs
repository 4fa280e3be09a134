//! Version snapshots and semantic version arithmetic

use appforge_schema::AppBlueprint;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Deployment environment a snapshot is scoped to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Work-in-progress snapshots
    Draft,
    /// Pre-production verification
    Staging,
    /// Live
    Production,
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Draft => "draft",
            Self::Staging => "staging",
            Self::Production => "production",
        };
        write!(f, "{name}")
    }
}

/// Parsed `major.minor.patch` triple, ordered numerically
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SemVer {
    /// Major component
    pub major: u64,
    /// Minor component
    pub minor: u64,
    /// Patch component
    pub patch: u64,
}

impl SemVer {
    /// The first version ever published for an (app, environment)
    pub const INITIAL: Self = Self {
        major: 1,
        minor: 0,
        patch: 0,
    };

    /// Next patch release
    #[inline]
    #[must_use]
    pub fn bump_patch(self) -> Self {
        Self {
            patch: self.patch + 1,
            ..self
        }
    }
}

impl Display for SemVer {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for SemVer {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, '.');
        let mut next = || parts.next().and_then(|p| p.parse::<u64>().ok()).ok_or(());
        Ok(Self {
            major: next()?,
            minor: next()?,
            patch: next()?,
        })
    }
}

/// Three-way numeric comparison of two version strings
///
/// Never lexicographic: `"2.0.0"` compares greater than `"1.9.9"` and
/// `"0.10.0"` greater than `"0.9.0"`. A malformed string sorts below every
/// well-formed one, so garbage in a store never masks a real version.
#[must_use]
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let a = SemVer::from_str(a).ok();
    let b = SemVer::from_str(b).ok();
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}

/// An immutable, environment-scoped snapshot of a published blueprint
///
/// Created only by the versioning layer; never mutated in place except for
/// its `is_current`/`is_active` flags during publish and rollback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppVersion {
    /// Snapshot id
    pub id: String,
    /// Application the snapshot belongs to
    pub app_id: String,
    /// Semantic version string (`major.minor.patch`)
    pub version: String,
    /// Environment the snapshot is scoped to
    pub environment: Environment,
    /// The bundled blueprint
    pub blueprint: AppBlueprint,
    /// Blake3 checksum of the bundled blueprint's canonical JSON
    pub checksum: String,
    /// Snapshot creation time
    pub created_at: DateTime<Utc>,
    /// Whether this is the current version for its (app, environment)
    pub is_current: bool,
    /// Whether the snapshot is serviceable at all
    pub is_active: bool,
}

impl AppVersion {
    /// Snapshot a blueprint
    #[must_use]
    pub fn snapshot(
        app_id: impl Into<String>,
        version: SemVer,
        environment: Environment,
        blueprint: AppBlueprint,
    ) -> Self {
        let checksum = blueprint_checksum(&blueprint);
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            app_id: app_id.into(),
            version: version.to_string(),
            environment,
            blueprint,
            checksum,
            created_at: Utc::now(),
            is_current: false,
            is_active: true,
        }
    }

    /// Parsed semantic version; malformed strings yield `None`
    #[inline]
    #[must_use]
    pub fn semver(&self) -> Option<SemVer> {
        SemVer::from_str(&self.version).ok()
    }
}

/// Blake3 hex digest of a blueprint's canonical JSON
#[must_use]
pub fn blueprint_checksum(blueprint: &AppBlueprint) -> String {
    let bytes = serde_json::to_vec(blueprint).unwrap_or_default();
    blake3::hash(&bytes).to_hex().to_string()
}

/// The next version to publish given every existing version of one
/// (app, environment): highest existing patch-bumped, or `1.0.0`
#[must_use]
pub fn next_version(existing: &[AppVersion]) -> SemVer {
    existing
        .iter()
        .filter_map(AppVersion::semver)
        .max()
        .map_or(SemVer::INITIAL, SemVer::bump_patch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compare_is_numeric_not_lexicographic() {
        assert_eq!(compare_versions("2.0.0", "1.9.9"), Ordering::Greater);
        assert_eq!(compare_versions("0.10.0", "0.9.0"), Ordering::Greater);
        assert_eq!(compare_versions("1.2.3", "1.2.3"), Ordering::Equal);
        assert_eq!(compare_versions("1.2.3", "1.2.10"), Ordering::Less);
    }

    #[test]
    fn malformed_versions_sort_lowest() {
        assert_eq!(compare_versions("garbage", "0.0.1"), Ordering::Less);
        assert_eq!(compare_versions("1.0.0", "1.0"), Ordering::Greater);
    }

    #[test]
    fn next_version_without_history_is_initial() {
        assert_eq!(next_version(&[]), SemVer::INITIAL);
    }

    #[test]
    fn next_version_bumps_the_highest_patch() {
        let blueprint = AppBlueprint::new("a", "A");
        let versions: Vec<AppVersion> = ["1.0.0", "1.0.2", "1.0.1"]
            .iter()
            .map(|v| {
                AppVersion::snapshot(
                    "a",
                    SemVer::from_str(v).unwrap(),
                    Environment::Production,
                    blueprint.clone(),
                )
            })
            .collect();

        assert_eq!(next_version(&versions).to_string(), "1.0.3");
    }

    #[test]
    fn checksum_tracks_content() {
        let blueprint = AppBlueprint::new("a", "A");
        let mut changed = blueprint.clone();
        changed.name = "B".to_string();

        assert_eq!(blueprint_checksum(&blueprint), blueprint_checksum(&blueprint));
        assert_ne!(blueprint_checksum(&blueprint), blueprint_checksum(&changed));
    }

    #[test]
    fn snapshot_starts_inactive_as_current() {
        let version = AppVersion::snapshot(
            "a",
            SemVer::INITIAL,
            Environment::Draft,
            AppBlueprint::new("a", "A"),
        );
        assert!(!version.is_current);
        assert!(version.is_active);
        assert_eq!(version.version, "1.0.0");
    }
}
