//! Append-only audit trail entries for agent task runs.

use super::{ActionId, AgentTaskId, AgentTaskKind};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Step label recorded on an action.
///
/// Labels outside the known set are kept verbatim in [`ActionType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActionType {
    /// A run began.
    Start,
    /// A triage run finished.
    Triage,
    /// A root-cause run finished, successfully or for lack of logs.
    Rca,
    /// A fix plan was produced.
    Plan,
    /// A run failed during dispatch.
    Error,
    /// Any other label.
    Other(String),
}

impl ActionType {
    /// Returns the label used when a run of `kind` finishes normally.
    #[must_use]
    pub const fn for_kind(kind: AgentTaskKind) -> Self {
        match kind {
            AgentTaskKind::Triage => Self::Triage,
            AgentTaskKind::Rca => Self::Rca,
            AgentTaskKind::Fix => Self::Plan,
        }
    }

    /// Returns the stored label.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Start => "start",
            Self::Triage => "triage",
            Self::Rca => "rca",
            Self::Plan => "plan",
            Self::Error => "error",
            Self::Other(label) => label,
        }
    }
}

impl From<&str> for ActionType {
    fn from(value: &str) -> Self {
        match value {
            "start" => Self::Start,
            "triage" => Self::Triage,
            "rca" => Self::Rca,
            "plan" => Self::Plan,
            "error" => Self::Error,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl From<String> for ActionType {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<ActionType> for String {
    fn from(value: ActionType) -> Self {
        match value {
            ActionType::Other(label) => label,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An action that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAgentAction {
    /// Owning task.
    pub task_id: AgentTaskId,
    /// Step label.
    pub action_type: ActionType,
    /// Short free-text detail.
    pub payload: String,
    /// When the step happened.
    pub created_at: DateTime<Utc>,
}

impl NewAgentAction {
    /// Creates an action stamped with the current clock time.
    #[must_use]
    pub fn new(
        task_id: AgentTaskId,
        action_type: ActionType,
        payload: impl Into<String>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            task_id,
            action_type,
            payload: payload.into(),
            created_at: clock.utc(),
        }
    }
}

/// A stored, immutable action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentAction {
    id: ActionId,
    task_id: AgentTaskId,
    action_type: ActionType,
    payload: String,
    created_at: DateTime<Utc>,
}

impl AgentAction {
    /// Binds a store-assigned identifier to a new action.
    #[must_use]
    pub fn assign(id: ActionId, action: NewAgentAction) -> Self {
        Self {
            id,
            task_id: action.task_id,
            action_type: action.action_type,
            payload: action.payload,
            created_at: action.created_at,
        }
    }

    /// Returns the action identifier.
    #[must_use]
    pub const fn id(&self) -> ActionId {
        self.id
    }

    /// Returns the owning task.
    #[must_use]
    pub const fn task_id(&self) -> AgentTaskId {
        self.task_id
    }

    /// Returns the step label.
    #[must_use]
    pub const fn action_type(&self) -> &ActionType {
        &self.action_type
    }

    /// Returns the free-text detail.
    #[must_use]
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Returns when the step happened.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
