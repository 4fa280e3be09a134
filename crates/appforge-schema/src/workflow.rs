//! Workflow definitions
//!
//! Workflows are declarative data only — this core never executes them.
//! A workflow has exactly one trigger and an ordered list of 1–10 actions;
//! a conditional action carries its own then/else action lists.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Event that starts a workflow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Trigger {
    /// A record of the entity was created
    RecordCreated {
        /// Entity id
        entity: String,
    },
    /// A record of the entity was updated
    RecordUpdated {
        /// Entity id
        entity: String,
    },
    /// A record of the entity was deleted
    RecordDeleted {
        /// Entity id
        entity: String,
    },
    /// A form page was submitted
    FormSubmitted {
        /// Page id
        page: String,
    },
    /// Cron-style schedule
    Schedule {
        /// Cron expression
        cron: String,
    },
    /// Started explicitly by a user
    Manual,
}

/// One step of a workflow
///
/// Structurally recursive: [`Action::Condition`] nests its own branches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Action {
    /// Create a record
    CreateRecord {
        /// Entity id
        entity: String,
        /// Field id → value expression
        values: IndexMap<String, Value>,
    },
    /// Update the triggering record
    UpdateRecord {
        /// Entity id
        entity: String,
        /// Field id → value expression
        values: IndexMap<String, Value>,
    },
    /// Delete the triggering record
    DeleteRecord {
        /// Entity id
        entity: String,
    },
    /// Send an email
    SendEmail {
        /// Recipient expression
        to: String,
        /// Subject line
        subject: String,
        /// Body template
        body: String,
    },
    /// Post an in-app notification
    Notify {
        /// Message template
        message: String,
    },
    /// Branch on an expression
    Condition {
        /// Boolean expression over the triggering record
        expression: String,
        /// Actions when the expression holds
        then_actions: Vec<Action>,
        /// Actions when it does not
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        else_actions: Vec<Action>,
    },
}

/// A declarative automation attached to the blueprint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    /// Stable workflow id, unique within the blueprint
    pub id: String,
    /// Display name
    pub name: String,
    /// Whether the workflow is active
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// The single trigger
    pub trigger: Trigger,
    /// Ordered actions (1–10)
    pub actions: Vec<Action>,
}

fn default_enabled() -> bool {
    true
}

impl Workflow {
    /// Minimum number of actions
    pub const MIN_ACTIONS: usize = 1;
    /// Maximum number of actions
    pub const MAX_ACTIONS: usize = 10;

    /// Create a new enabled workflow
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, trigger: Trigger) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            enabled: true,
            trigger,
            actions: Vec::new(),
        }
    }

    /// Append an action
    #[inline]
    #[must_use]
    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }
}
