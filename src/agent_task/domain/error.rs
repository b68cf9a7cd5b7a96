//! Error types for agent task validation and parsing.

use super::{AgentTaskId, AgentTaskStatus};
use thiserror::Error;

/// Errors returned by agent task state changes.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AgentTaskDomainError {
    /// The requested status change is not permitted.
    #[error("invalid status transition for agent task {task_id}: {from} -> {to}")]
    InvalidStatusTransition {
        /// Task being changed.
        task_id: AgentTaskId,
        /// Current status.
        from: AgentTaskStatus,
        /// Requested status.
        to: AgentTaskStatus,
    },

    /// A run was requested while the task is already running.
    #[error("agent task {0} is already running")]
    RunInProgress(AgentTaskId),
}

/// Error returned while parsing task kinds.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown agent task kind: {0}")]
pub struct ParseAgentTaskKindError(pub String);

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown agent task status: {0}")]
pub struct ParseAgentTaskStatusError(pub String);
