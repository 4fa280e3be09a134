//! Page definitions

use crate::component::Component;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::sync::Arc;

/// What kind of page the renderer materializes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageType {
    /// Tabular listing of an entity's records
    List,
    /// Single-record view
    Detail,
    /// Create/edit form
    Form,
    /// Landing page with stats and shortcuts
    Dashboard,
    /// Free-form page
    Custom,
}

/// Audience-specific view of the shared blueprint
///
/// Same entities and workflows, different pages and navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Surface {
    /// Back-office surface
    #[default]
    Admin,
    /// Service-provider surface
    Provider,
    /// Customer-facing surface
    Customer,
    /// Patient-facing surface
    Patient,
}

impl Display for Surface {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Admin => "admin",
            Self::Provider => "provider",
            Self::Customer => "customer",
            Self::Patient => "patient",
        };
        write!(f, "{name}")
    }
}

/// Page-level layout configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Layout kind tag (e.g. `sidebar`, `single`, `grid`)
    pub kind: String,
    /// Whether content spans the full viewport width
    #[serde(default)]
    pub full_width: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            kind: "sidebar".to_string(),
            full_width: false,
        }
    }
}

/// A routable page composed of a component tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Stable page id, unique within the blueprint
    pub id: String,
    /// Display name
    pub name: String,
    /// URL-path-safe route (e.g. `/orders/:id`)
    pub route: String,
    /// Page kind
    #[serde(rename = "type")]
    pub page_type: PageType,
    /// Audience surface; defaults to admin
    #[serde(default)]
    pub surface: Surface,
    /// Entity this page is bound to, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
    /// Layout configuration
    #[serde(default)]
    pub layout: LayoutConfig,
    /// Ordered root components
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<Arc<Component>>,
}

impl Page {
    /// Create a new page with no components
    #[inline]
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        route: impl Into<String>,
        page_type: PageType,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            route: route.into(),
            page_type,
            surface: Surface::default(),
            entity: None,
            layout: LayoutConfig::default(),
            components: Vec::new(),
        }
    }

    /// Bind to an entity
    #[inline]
    #[must_use]
    pub fn with_entity(mut self, entity_id: impl Into<String>) -> Self {
        self.entity = Some(entity_id.into());
        self
    }

    /// With a surface tag
    #[inline]
    #[must_use]
    pub fn with_surface(mut self, surface: Surface) -> Self {
        self.surface = surface;
        self
    }

    /// Append a root component
    #[inline]
    #[must_use]
    pub fn with_component(mut self, component: Component) -> Self {
        self.components.push(Arc::new(component));
        self
    }

    /// Find a component by id anywhere in the page tree
    #[must_use]
    pub fn find_component(&self, id: &str) -> Option<&Component> {
        self.components.iter().find_map(|c| c.find(id))
    }

    /// Total number of components on the page
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.components.iter().map(|c| c.subtree_size()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_defaults_to_admin_surface() {
        let page = Page::new("orders", "Orders", "/orders", PageType::List);
        assert_eq!(page.surface, Surface::Admin);

        let json = serde_json::to_value(&page).unwrap();
        let back: Page = serde_json::from_value(json).unwrap();
        assert_eq!(back.surface, Surface::Admin);
    }

    #[test]
    fn missing_surface_deserializes_to_admin() {
        let raw = serde_json::json!({
            "id": "home",
            "name": "Home",
            "route": "/",
            "type": "dashboard"
        });
        let page: Page = serde_json::from_value(raw).unwrap();
        assert_eq!(page.surface, Surface::Admin);
    }

    #[test]
    fn component_count_spans_roots() {
        let page = Page::new("orders", "Orders", "/orders", PageType::List)
            .with_component(Component::new("header", "header"))
            .with_component(
                Component::new("body", "container")
                    .with_child(Component::new("table", "table")),
            );
        assert_eq!(page.component_count(), 3);
        assert!(page.find_component("table").is_some());
    }
}
