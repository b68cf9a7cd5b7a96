//! Agent task aggregate root and its run state machine.

use super::{
    AgentTaskDomainError, AgentTaskId, ParseAgentTaskKindError, ParseAgentTaskStatusError,
    TaskResult,
};
use crate::pipeline::domain::PipelineId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of diagnostic work a task performs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentTaskKind {
    /// Fast keyword heuristics over recent logs.
    Triage,
    /// Root-cause analysis through the remote provider.
    #[default]
    Rca,
    /// Fix planning; stops for operator approval.
    Fix,
}

impl AgentTaskKind {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Triage => "triage",
            Self::Rca => "rca",
            Self::Fix => "fix",
        }
    }
}

impl TryFrom<&str> for AgentTaskKind {
    type Error = ParseAgentTaskKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "triage" => Ok(Self::Triage),
            "rca" => Ok(Self::Rca),
            "fix" => Ok(Self::Fix),
            _ => Err(ParseAgentTaskKindError(value.to_owned())),
        }
    }
}

impl fmt::Display for AgentTaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status of an agent task.
///
/// `queued -> running -> {awaiting_approval | completed | failed}`, and any
/// of the three end states may go back to `running` when the task is re-run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentTaskStatus {
    /// Created, not yet run.
    Queued,
    /// A run is in progress.
    Running,
    /// A fix plan was produced and waits for an operator.
    AwaitingApproval,
    /// The last run finished with a diagnostic.
    Completed,
    /// The last run failed.
    Failed,
}

impl AgentTaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Queued => "queued",
            Self::Running => "running",
            Self::AwaitingApproval => "awaiting_approval",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    /// Returns `true` for the statuses a run ends in.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::AwaitingApproval | Self::Completed | Self::Failed
        )
    }

    /// Returns `true` when the run state machine permits `self -> target`.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        match (self, target) {
            (Self::Queued, Self::Running) => true,
            (Self::Running, end) => end.is_terminal(),
            (from, Self::Running) => from.is_terminal(),
            _ => false,
        }
    }
}

impl TryFrom<&str> for AgentTaskStatus {
    type Error = ParseAgentTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "queued" => Ok(Self::Queued),
            "running" => Ok(Self::Running),
            "awaiting_approval" => Ok(Self::AwaitingApproval),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            _ => Err(ParseAgentTaskStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for AgentTaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Agent task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentTask {
    id: AgentTaskId,
    kind: AgentTaskKind,
    pipeline_id: PipelineId,
    status: AgentTaskStatus,
    result: Option<TaskResult>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted agent task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedAgentTaskData {
    /// Persisted task identifier.
    pub id: AgentTaskId,
    /// Persisted task kind.
    pub kind: AgentTaskKind,
    /// Pipeline under diagnosis.
    pub pipeline_id: PipelineId,
    /// Persisted lifecycle status.
    pub status: AgentTaskStatus,
    /// Result of the latest finished run, if any.
    pub result: Option<TaskResult>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest change timestamp.
    pub updated_at: DateTime<Utc>,
}

impl AgentTask {
    /// Creates a queued task for `pipeline_id`.
    #[must_use]
    pub fn new(kind: AgentTaskKind, pipeline_id: PipelineId, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: AgentTaskId::new(),
            kind,
            pipeline_id,
            status: AgentTaskStatus::Queued,
            result: None,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedAgentTaskData) -> Self {
        Self {
            id: data.id,
            kind: data.kind,
            pipeline_id: data.pipeline_id,
            status: data.status,
            result: data.result,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> AgentTaskId {
        self.id
    }

    /// Returns the task kind.
    #[must_use]
    pub const fn kind(&self) -> AgentTaskKind {
        self.kind
    }

    /// Returns the pipeline under diagnosis.
    #[must_use]
    pub const fn pipeline_id(&self) -> &PipelineId {
        &self.pipeline_id
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> AgentTaskStatus {
        self.status
    }

    /// Returns the result of the latest finished run.
    #[must_use]
    pub const fn result(&self) -> Option<&TaskResult> {
        self.result.as_ref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest change timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Moves the task into `running`.
    ///
    /// The previous result is kept until the run finishes.
    ///
    /// # Errors
    ///
    /// Returns [`AgentTaskDomainError::RunInProgress`] when the task is
    /// already running.
    pub fn begin_run(&mut self, clock: &impl Clock) -> Result<(), AgentTaskDomainError> {
        if self.status == AgentTaskStatus::Running {
            return Err(AgentTaskDomainError::RunInProgress(self.id));
        }
        self.transition_to(AgentTaskStatus::Running)?;
        self.touch(clock);
        Ok(())
    }

    /// Ends the current run in `status` and records `result`.
    ///
    /// # Errors
    ///
    /// Returns [`AgentTaskDomainError::InvalidStatusTransition`] unless the
    /// task is running and `status` is an end state.
    pub fn finish_run(
        &mut self,
        status: AgentTaskStatus,
        result: TaskResult,
        clock: &impl Clock,
    ) -> Result<(), AgentTaskDomainError> {
        if self.status != AgentTaskStatus::Running {
            return Err(self.invalid_transition(status));
        }
        self.transition_to(status)?;
        self.result = Some(result);
        self.touch(clock);
        Ok(())
    }

    /// Fails a run that was left `running` by an interrupted writer.
    ///
    /// The task can be started again with [`Self::begin_run`] afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`AgentTaskDomainError::InvalidStatusTransition`] unless the
    /// task is running.
    pub fn close_abandoned_run(&mut self, clock: &impl Clock) -> Result<(), AgentTaskDomainError> {
        self.finish_run(AgentTaskStatus::Failed, TaskResult::abandoned_run(), clock)
    }

    fn transition_to(&mut self, target: AgentTaskStatus) -> Result<(), AgentTaskDomainError> {
        if !self.status.can_transition_to(target) {
            return Err(self.invalid_transition(target));
        }
        self.status = target;
        Ok(())
    }

    const fn invalid_transition(&self, target: AgentTaskStatus) -> AgentTaskDomainError {
        AgentTaskDomainError::InvalidStatusTransition {
            task_id: self.id,
            from: self.status,
            to: target,
        }
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
