//! Repository port for agent tasks and their action trail.

use crate::agent_task::domain::{AgentAction, AgentTask, AgentTaskId, NewAgentAction};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for agent task repository operations.
pub type AgentTaskRepositoryResult<T> = Result<T, AgentTaskRepositoryError>;

/// Limit and offset for task listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// Maximum number of tasks returned.
    pub limit: usize,
    /// Number of tasks skipped first.
    pub offset: usize,
}

impl Page {
    /// Default listing size.
    pub const DEFAULT_LIMIT: usize = 50;

    /// Creates a page.
    #[must_use]
    pub const fn new(limit: usize, offset: usize) -> Self {
        Self { limit, offset }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LIMIT, 0)
    }
}

/// Agent task persistence contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AgentTaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`AgentTaskRepositoryError::DuplicateTask`] when the task ID
    /// already exists.
    async fn store(&self, task: &AgentTask) -> AgentTaskRepositoryResult<()>;

    /// Persists status, result, and timestamp changes to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`AgentTaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn update(&self, task: &AgentTask) -> AgentTaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: AgentTaskId) -> AgentTaskRepositoryResult<Option<AgentTask>>;

    /// Lists tasks most recently created first.
    async fn list(&self, page: Page) -> AgentTaskRepositoryResult<Vec<AgentTask>>;

    /// Appends an action and returns it with its assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AgentTaskRepositoryError::NotFound`] when the owning task
    /// does not exist.
    async fn append_action(&self, action: NewAgentAction)
    -> AgentTaskRepositoryResult<AgentAction>;

    /// Returns a task's actions in insertion order.
    async fn list_actions(
        &self,
        task_id: AgentTaskId,
    ) -> AgentTaskRepositoryResult<Vec<AgentAction>>;
}

/// Errors returned by agent task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum AgentTaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate agent task identifier: {0}")]
    DuplicateTask(AgentTaskId),

    /// The task was not found.
    #[error("agent task not found: {0}")]
    NotFound(AgentTaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl AgentTaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
