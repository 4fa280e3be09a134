//! The blueprint root type

use crate::entity::Entity;
use crate::navigation::NavigationRule;
use crate::page::{Page, Surface};
use crate::workflow::Workflow;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Theme tokens consumed by the renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    /// Primary brand color
    pub primary_color: String,
    /// Secondary accent color
    pub secondary_color: String,
    /// Page background color
    pub background_color: String,
    /// Base text color
    pub text_color: String,
    /// Font stack
    pub font_family: String,
    /// Corner radius token (e.g. `8px`)
    pub border_radius: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_color: "#2563eb".to_string(),
            secondary_color: "#64748b".to_string(),
            background_color: "#f8fafc".to_string(),
            text_color: "#0f172a".to_string(),
            font_family: "Inter, system-ui, sans-serif".to_string(),
            border_radius: "8px".to_string(),
        }
    }
}

/// The complete declarative description of a generated application
///
/// Single source of truth shared by every surface; entities and workflows
/// are never duplicated per surface.
///
/// # Invariants (enforced by [`Validator`](crate::Validator))
/// - ≤ [`Self::MAX_ENTITIES`] entities, [`Self::MAX_PAGES`] pages,
///   [`Self::MAX_COMPONENTS`] components in total,
///   [`Self::MAX_WORKFLOWS`] workflows
/// - Ids unique per collection; navigation endpoints and entity bindings
///   resolve to declared pages/entities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppBlueprint {
    /// Stable application id
    pub id: String,
    /// Monotonically increasing structural version, bumped per migration
    pub version: u64,
    /// Application name
    pub name: String,
    /// Short description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Behavior kit id the app was generated from, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub behavior: Option<String>,
    /// Surfaces the app exposes
    #[serde(default = "default_surfaces")]
    pub surfaces: Vec<Surface>,
    /// Data models
    pub entities: Vec<Entity>,
    /// Pages across all surfaces
    pub pages: Vec<Page>,
    /// Declarative automations
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub workflows: Vec<Workflow>,
    /// Navigation rules per surface
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub navigation: IndexMap<Surface, Vec<NavigationRule>>,
    /// Theme tokens
    #[serde(default)]
    pub theme: Theme,
    /// Free-form global settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<IndexMap<String, Value>>,
}

fn default_surfaces() -> Vec<Surface> {
    vec![Surface::Admin]
}

impl AppBlueprint {
    /// Maximum number of entities
    pub const MAX_ENTITIES: usize = 50;
    /// Maximum number of pages
    pub const MAX_PAGES: usize = 100;
    /// Maximum number of components across all pages
    pub const MAX_COMPONENTS: usize = 500;
    /// Maximum number of workflows
    pub const MAX_WORKFLOWS: usize = 100;

    /// Create an empty blueprint at version 1
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            version: 1,
            name: name.into(),
            description: None,
            behavior: None,
            surfaces: default_surfaces(),
            entities: Vec::new(),
            pages: Vec::new(),
            workflows: Vec::new(),
            navigation: IndexMap::new(),
            theme: Theme::default(),
            settings: None,
        }
    }

    /// Look up an entity by id
    #[inline]
    #[must_use]
    pub fn entity(&self, id: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Look up a page by id
    #[inline]
    #[must_use]
    pub fn page(&self, id: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.id == id)
    }

    /// Look up a workflow by id
    #[inline]
    #[must_use]
    pub fn workflow(&self, id: &str) -> Option<&Workflow> {
        self.workflows.iter().find(|w| w.id == id)
    }

    /// Total number of components across all pages
    #[must_use]
    pub fn total_component_count(&self) -> usize {
        self.pages.iter().map(Page::component_count).sum()
    }

    /// Pages belonging to one surface
    pub fn pages_for(&self, surface: Surface) -> impl Iterator<Item = &Page> {
        self.pages.iter().filter(move |p| p.surface == surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{Field, FieldType};
    use crate::page::PageType;

    #[test]
    fn new_blueprint_starts_at_version_one() {
        let blueprint = AppBlueprint::new("crm", "CRM");
        assert_eq!(blueprint.version, 1);
        assert_eq!(blueprint.surfaces, vec![Surface::Admin]);
    }

    #[test]
    fn lookups_by_id() {
        let mut blueprint = AppBlueprint::new("crm", "CRM");
        blueprint.entities.push(
            Entity::new("customer", "Customer", "Customers")
                .with_field(Field::new("name", "Name", FieldType::String)),
        );
        blueprint
            .pages
            .push(Page::new("home", "Home", "/", PageType::Dashboard));

        assert!(blueprint.entity("customer").is_some());
        assert!(blueprint.entity("order").is_none());
        assert!(blueprint.page("home").is_some());
    }

    #[test]
    fn blueprint_roundtrips_through_json() {
        let mut blueprint = AppBlueprint::new("crm", "CRM");
        blueprint
            .pages
            .push(Page::new("home", "Home", "/", PageType::Dashboard));
        blueprint.navigation.insert(
            Surface::Admin,
            vec![crate::navigation::NavigationRule::new(
                "home",
                "home",
                crate::navigation::NavigationTrigger::Click,
            )],
        );

        let json = serde_json::to_value(&blueprint).unwrap();
        assert_eq!(json["navigation"]["admin"][0]["fromPage"], "home");

        let back: AppBlueprint = serde_json::from_value(json).unwrap();
        assert_eq!(back, blueprint);
    }
}
