//! In-memory repository for agent tasks and their action trail.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::agent_task::{
    domain::{ActionId, AgentAction, AgentTask, AgentTaskId, NewAgentAction},
    ports::{AgentTaskRepository, AgentTaskRepositoryError, AgentTaskRepositoryResult, Page},
};

/// Thread-safe in-memory agent task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAgentTaskRepository {
    state: Arc<RwLock<InMemoryAgentTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryAgentTaskState {
    tasks: HashMap<AgentTaskId, AgentTask>,
    creation_order: Vec<AgentTaskId>,
    actions: HashMap<AgentTaskId, Vec<AgentAction>>,
    last_action_id: i64,
}

impl InMemoryAgentTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> AgentTaskRepositoryError {
    AgentTaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl AgentTaskRepository for InMemoryAgentTaskRepository {
    async fn store(&self, task: &AgentTask) -> AgentTaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.tasks.contains_key(&task.id()) {
            return Err(AgentTaskRepositoryError::DuplicateTask(task.id()));
        }
        state.creation_order.push(task.id());
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &AgentTask) -> AgentTaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let stored = state
            .tasks
            .get_mut(&task.id())
            .ok_or(AgentTaskRepositoryError::NotFound(task.id()))?;
        *stored = task.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: AgentTaskId) -> AgentTaskRepositoryResult<Option<AgentTask>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn list(&self, page: Page) -> AgentTaskRepositoryResult<Vec<AgentTask>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .creation_order
            .iter()
            .rev()
            .skip(page.offset)
            .take(page.limit)
            .filter_map(|id| state.tasks.get(id).cloned())
            .collect())
    }

    async fn append_action(
        &self,
        action: NewAgentAction,
    ) -> AgentTaskRepositoryResult<AgentAction> {
        let mut state = self.state.write().map_err(lock_error)?;
        if !state.tasks.contains_key(&action.task_id) {
            return Err(AgentTaskRepositoryError::NotFound(action.task_id));
        }
        state.last_action_id += 1;
        let stored = AgentAction::assign(ActionId::new(state.last_action_id), action);
        state
            .actions
            .entry(stored.task_id())
            .or_default()
            .push(stored.clone());
        Ok(stored)
    }

    async fn list_actions(
        &self,
        task_id: AgentTaskId,
    ) -> AgentTaskRepositoryResult<Vec<AgentAction>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.actions.get(&task_id).cloned().unwrap_or_default())
    }
}
