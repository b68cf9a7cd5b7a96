//! Agent task orchestrator: creation, runs, and audit trail queries.

use super::{
    AgentTaskServiceError, AgentTaskServiceResult, DiagnosticProviders, DispatchError,
    TaskRunLocks, dispatch::RunOutcome,
};
use crate::agent_task::{
    domain::{
        ActionType, AgentAction, AgentTask, AgentTaskId, AgentTaskKind, AgentTaskStatus,
        NewAgentAction, TaskResult,
    },
    ports::{AgentTaskRepository, Page},
};
use crate::diagnosis::ports::ProviderError;
use crate::pipeline::{
    domain::{LogQuery, PipelineId},
    ports::PipelineLogStore,
};
use mockable::Clock;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Request payload for creating an agent task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAgentTaskRequest {
    kind: AgentTaskKind,
    pipeline_id: String,
}

impl CreateAgentTaskRequest {
    /// Creates a request for a task of `kind` against `pipeline_id`.
    #[must_use]
    pub fn new(kind: AgentTaskKind, pipeline_id: impl Into<String>) -> Self {
        Self {
            kind,
            pipeline_id: pipeline_id.into(),
        }
    }

    /// Creates a root-cause request, the default kind.
    #[must_use]
    pub fn for_pipeline(pipeline_id: impl Into<String>) -> Self {
        Self::new(AgentTaskKind::default(), pipeline_id)
    }
}

/// Orchestrates agent task runs against pipeline logs.
#[derive(Clone)]
pub struct AgentTaskService<R, L, C>
where
    R: AgentTaskRepository,
    L: PipelineLogStore,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    logs: Arc<L>,
    providers: DiagnosticProviders,
    clock: Arc<C>,
    run_locks: Arc<TaskRunLocks>,
}

impl<R, L, C> AgentTaskService<R, L, C>
where
    R: AgentTaskRepository,
    L: PipelineLogStore,
    C: Clock + Send + Sync,
{
    /// Creates a new orchestrator.
    #[must_use]
    pub fn new(
        repository: Arc<R>,
        logs: Arc<L>,
        providers: DiagnosticProviders,
        clock: Arc<C>,
    ) -> Self {
        Self {
            repository,
            logs,
            providers,
            clock,
            run_locks: Arc::new(TaskRunLocks::new()),
        }
    }

    /// Creates a queued task and runs it to completion.
    ///
    /// Returns the task in its end state.
    ///
    /// # Errors
    ///
    /// Returns [`AgentTaskServiceError::Pipeline`] for a blank pipeline
    /// identifier and [`AgentTaskServiceError::Repository`] when the task
    /// store fails.
    pub async fn create_task(
        &self,
        request: CreateAgentTaskRequest,
    ) -> AgentTaskServiceResult<AgentTask> {
        let pipeline_id = PipelineId::new(request.pipeline_id)?;
        let task = AgentTask::new(request.kind, pipeline_id, &*self.clock);
        self.repository.store(&task).await?;
        info!(
            task_id = %task.id(),
            kind = %task.kind(),
            pipeline_id = %task.pipeline_id(),
            "agent task queued"
        );
        self.run_task(task.id()).await
    }

    /// Runs an existing task and returns it in its end state.
    ///
    /// Runs of the same task are serialized. A re-run overwrites the
    /// previous result and appends to the existing action trail. A task
    /// still stored as `running` once the run lock is held was left by an
    /// interrupted run; that run is closed as `failed` before restarting.
    ///
    /// # Errors
    ///
    /// Returns [`AgentTaskServiceError::NotFound`] for an unknown task and
    /// [`AgentTaskServiceError::Repository`] when the task store fails.
    /// Dispatch failures do not produce an error; they end the run in
    /// `failed`.
    pub async fn run_task(&self, task_id: AgentTaskId) -> AgentTaskServiceResult<AgentTask> {
        let _run_guard = self.run_locks.acquire(task_id).await;
        let mut task = self.require_task(task_id).await?;

        if task.status() == AgentTaskStatus::Running {
            self.close_abandoned_run(&mut task).await?;
        }
        task.begin_run(&*self.clock)?;
        self.repository.update(&task).await?;

        if let Err(err) = self.execute_run(&mut task).await {
            self.abandon_run(&mut task, &err).await;
            return Err(err);
        }

        info!(task_id = %task_id, status = %task.status(), "agent task run finished");
        Ok(task)
    }

    /// Returns a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AgentTaskServiceError::NotFound`] for an unknown task and
    /// [`AgentTaskServiceError::Repository`] when the lookup fails.
    pub async fn get_task(&self, task_id: AgentTaskId) -> AgentTaskServiceResult<AgentTask> {
        self.require_task(task_id).await
    }

    /// Lists tasks most recently created first.
    ///
    /// # Errors
    ///
    /// Returns [`AgentTaskServiceError::Repository`] when the lookup fails.
    pub async fn list_tasks(&self, page: Page) -> AgentTaskServiceResult<Vec<AgentTask>> {
        Ok(self.repository.list(page).await?)
    }

    /// Returns a task's action trail in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`AgentTaskServiceError::NotFound`] for an unknown task and
    /// [`AgentTaskServiceError::Repository`] when the lookup fails.
    pub async fn list_actions(
        &self,
        task_id: AgentTaskId,
    ) -> AgentTaskServiceResult<Vec<AgentAction>> {
        self.require_task(task_id).await?;
        Ok(self.repository.list_actions(task_id).await?)
    }

    async fn require_task(&self, task_id: AgentTaskId) -> AgentTaskServiceResult<AgentTask> {
        self.repository
            .find_by_id(task_id)
            .await?
            .ok_or(AgentTaskServiceError::NotFound(task_id))
    }

    async fn close_abandoned_run(&self, task: &mut AgentTask) -> AgentTaskServiceResult<()> {
        warn!(task_id = %task.id(), "closing abandoned agent task run");
        task.close_abandoned_run(&*self.clock)?;
        let detail = task
            .result()
            .and_then(TaskResult::error_detail)
            .unwrap_or_default()
            .to_owned();
        self.record_action(task.id(), ActionType::Error, detail).await?;
        Ok(())
    }

    async fn execute_run(&self, task: &mut AgentTask) -> AgentTaskServiceResult<()> {
        self.record_action(
            task.id(),
            ActionType::Start,
            format!("Running {} on pipeline {}", task.kind(), task.pipeline_id()),
        )
        .await?;

        let outcome = match self.dispatch(task).await {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(task_id = %task.id(), error = %err, "agent task dispatch failed");
                RunOutcome::dispatch_failed(&err)
            }
        };

        let RunOutcome {
            status,
            result,
            action_type,
            payload,
        } = outcome;
        task.finish_run(status, result, &*self.clock)?;
        self.repository.update(task).await?;
        self.record_action(task.id(), action_type, payload).await?;
        Ok(())
    }

    /// Best-effort write of a `failed` end state after a store failure, so
    /// the stored task does not stay `running`.
    async fn abandon_run(&self, task: &mut AgentTask, err: &AgentTaskServiceError) {
        if task.status() == AgentTaskStatus::Running {
            let result = TaskResult::error(err.to_string());
            if let Err(domain_err) =
                task.finish_run(AgentTaskStatus::Failed, result, &*self.clock)
            {
                warn!(task_id = %task.id(), error = %domain_err, "could not fail agent task run");
                return;
            }
        }
        if let Err(write_err) = self.repository.update(task).await {
            warn!(
                task_id = %task.id(),
                error = %write_err,
                "could not record abandoned agent task run"
            );
        }
    }

    async fn dispatch(&self, task: &AgentTask) -> Result<RunOutcome, DispatchError> {
        let Some(provider) = self.providers.for_kind(task.kind()) else {
            return Ok(RunOutcome::awaiting_approval());
        };

        let query = LogQuery::latest(provider.log_window());
        let logs = self.logs.query(task.pipeline_id(), &query).await?;
        debug!(task_id = %task.id(), entries = logs.len(), "dispatching agent task");

        match provider.analyze(&logs).await {
            Ok(diagnosis) => Ok(RunOutcome::from_diagnosis(diagnosis)),
            Err(ProviderError::NoLogs) => Ok(RunOutcome::no_logs(task.kind())),
        }
    }

    async fn record_action(
        &self,
        task_id: AgentTaskId,
        action_type: ActionType,
        payload: String,
    ) -> AgentTaskServiceResult<AgentAction> {
        let action = NewAgentAction::new(task_id, action_type, payload, &*self.clock);
        Ok(self.repository.append_action(action).await?)
    }
}
