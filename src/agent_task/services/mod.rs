//! Application services for agent task orchestration.

mod dispatch;
mod error;
mod orchestrator;
mod run_locks;

pub use dispatch::{DiagnosticProviders, DispatchError};
pub use error::{AgentTaskServiceError, AgentTaskServiceResult};
pub use orchestrator::{AgentTaskService, CreateAgentTaskRequest};
pub use run_locks::TaskRunLocks;
