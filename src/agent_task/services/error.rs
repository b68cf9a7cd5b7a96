//! Service-level errors for agent task orchestration.

use crate::agent_task::{
    domain::{AgentTaskDomainError, AgentTaskId},
    ports::AgentTaskRepositoryError,
};
use crate::pipeline::domain::PipelineDomainError;
use thiserror::Error;

/// Errors surfaced to callers of the orchestrator.
///
/// Failures inside a run's dispatch step never appear here; they end the
/// run in `failed` instead.
#[derive(Debug, Error)]
pub enum AgentTaskServiceError {
    /// A task state change was rejected.
    #[error(transparent)]
    Domain(#[from] AgentTaskDomainError),
    /// The request named an invalid pipeline.
    #[error(transparent)]
    Pipeline(#[from] PipelineDomainError),
    /// The task store failed.
    #[error(transparent)]
    Repository(#[from] AgentTaskRepositoryError),
    /// The task does not exist.
    #[error("agent task not found: {0}")]
    NotFound(AgentTaskId),
}

/// Result type for orchestrator operations.
pub type AgentTaskServiceResult<T> = Result<T, AgentTaskServiceError>;
