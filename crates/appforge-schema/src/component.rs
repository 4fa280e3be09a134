//! Component tree nodes
//!
//! Pages own ordered trees of [`Component`]s. Children are held behind `Arc`
//! so that structural edits can rebuild only the path from the root to the
//! mutated node and share every untouched sibling subtree with the previous
//! tree.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// A node in a page's component tree
///
/// # Invariants
/// - Children are owned exclusively by their parent — no shared or cyclic
///   references within one tree value.
/// - Component ids are unique within a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    /// Stable component id, unique within the owning page
    pub id: String,
    /// Renderer type tag (e.g. `table`, `form`, `statGrid`)
    #[serde(rename = "type")]
    pub component_type: String,
    /// Ordered name → value props
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub props: IndexMap<String, Value>,
    /// Data bindings (prop name → binding expression)
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub bindings: IndexMap<String, String>,
    /// Event handlers (event name → action id)
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub events: IndexMap<String, String>,
    /// Ordered children
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Arc<Component>>,
    /// Style overrides
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub styles: IndexMap<String, Value>,
    /// Visibility condition expression
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible_when: Option<String>,
}

impl Component {
    /// Create a new component with no props or children
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>, component_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            component_type: component_type.into(),
            props: IndexMap::new(),
            bindings: IndexMap::new(),
            events: IndexMap::new(),
            children: Vec::new(),
            styles: IndexMap::new(),
            visible_when: None,
        }
    }

    /// Set a prop
    #[inline]
    #[must_use]
    pub fn with_prop(mut self, name: impl Into<String>, value: Value) -> Self {
        self.props.insert(name.into(), value);
        self
    }

    /// Set a data binding
    #[inline]
    #[must_use]
    pub fn with_binding(mut self, name: impl Into<String>, expression: impl Into<String>) -> Self {
        self.bindings.insert(name.into(), expression.into());
        self
    }

    /// Append a child
    #[inline]
    #[must_use]
    pub fn with_child(mut self, child: Component) -> Self {
        self.children.push(Arc::new(child));
        self
    }

    /// Find a component by id anywhere in this subtree
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Component> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }

    /// Check whether an id exists anywhere in this subtree
    #[inline]
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Total number of components in this subtree (including self)
    #[must_use]
    pub fn subtree_size(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(|c| c.subtree_size())
            .sum::<usize>()
    }
}
