//! Navigation rules

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// What causes a navigation to fire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NavigationTrigger {
    /// A navigation link or button was clicked
    Click,
    /// A list row was clicked
    RowClick,
    /// A form was submitted successfully
    Submit,
    /// Fires automatically when the source page loads
    Auto,
}

/// A directed navigation edge between two pages of one surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationRule {
    /// Source page id
    pub from_page: String,
    /// Destination page id
    pub to_page: String,
    /// Trigger kind
    pub trigger: NavigationTrigger,
    /// Optional condition expression gating the navigation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    /// Route parameters carried to the destination (name → expression)
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub params: IndexMap<String, String>,
}

impl NavigationRule {
    /// Create a new rule
    #[inline]
    #[must_use]
    pub fn new(
        from_page: impl Into<String>,
        to_page: impl Into<String>,
        trigger: NavigationTrigger,
    ) -> Self {
        Self {
            from_page: from_page.into(),
            to_page: to_page.into(),
            trigger,
            condition: None,
            params: IndexMap::new(),
        }
    }

    /// Carry a route parameter
    #[inline]
    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, expression: impl Into<String>) -> Self {
        self.params.insert(name.into(), expression.into());
        self
    }
}
