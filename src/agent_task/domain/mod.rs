//! Domain model for agent tasks and their audit trail.
//!
//! Status changes go through [`AgentTask`] methods that enforce the run
//! state machine; persistence and provider concerns stay outside.

mod action;
mod error;
mod ids;
mod result;
mod task;

pub use action::{ActionType, AgentAction, NewAgentAction};
pub use error::{AgentTaskDomainError, ParseAgentTaskKindError, ParseAgentTaskStatusError};
pub use ids::{ActionId, AgentTaskId};
pub use result::TaskResult;
pub use task::{AgentTask, AgentTaskKind, AgentTaskStatus, PersistedAgentTaskData};
