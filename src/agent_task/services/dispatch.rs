//! Provider selection by task kind and the outcome of a single dispatch.

use crate::agent_task::domain::{ActionType, AgentTaskKind, AgentTaskStatus, TaskResult};
use crate::diagnosis::{
    adapters::{HeuristicTriageProvider, RemoteRootCauseProvider},
    ports::{Diagnosis, DiagnosticProvider},
};
use crate::pipeline::ports::LogStoreError;
use std::sync::Arc;
use thiserror::Error;

const NO_LOGS_PAYLOAD: &str = "no logs";
const ANALYSIS_COMPLETE_PAYLOAD: &str = "analysis complete";
const FIX_PLAN_PAYLOAD: &str = "generated fix plan (placeholder)";

/// Dispatch table from task kind to diagnostic provider.
///
/// `fix` has no provider; it produces a placeholder plan and waits for
/// approval.
#[derive(Clone)]
pub struct DiagnosticProviders {
    triage: Arc<dyn DiagnosticProvider>,
    root_cause: Arc<dyn DiagnosticProvider>,
}

impl DiagnosticProviders {
    /// Creates a table from explicit providers.
    #[must_use]
    pub const fn new(
        triage: Arc<dyn DiagnosticProvider>,
        root_cause: Arc<dyn DiagnosticProvider>,
    ) -> Self {
        Self { triage, root_cause }
    }

    /// Pairs the keyword triage heuristic with a remote root-cause provider.
    #[must_use]
    pub fn standard(root_cause: Arc<RemoteRootCauseProvider>) -> Self {
        Self::new(Arc::new(HeuristicTriageProvider::new()), root_cause)
    }

    /// Returns the provider for `kind`, or `None` for kinds that do not
    /// consult logs.
    #[must_use]
    pub fn for_kind(&self, kind: AgentTaskKind) -> Option<&dyn DiagnosticProvider> {
        match kind {
            AgentTaskKind::Triage => Some(self.triage.as_ref()),
            AgentTaskKind::Rca => Some(self.root_cause.as_ref()),
            AgentTaskKind::Fix => None,
        }
    }
}

impl std::fmt::Debug for DiagnosticProviders {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiagnosticProviders").finish_non_exhaustive()
    }
}

/// Failure raised while a run is being dispatched.
///
/// These are captured on the task as a `failed` result with an `error`
/// action rather than returned to the caller.
#[derive(Debug, Clone, Error)]
pub enum DispatchError {
    /// The pipeline's logs could not be read.
    #[error("failed to read pipeline logs: {0}")]
    Logs(#[from] LogStoreError),
}

/// End state, result, and terminal action of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct RunOutcome {
    pub(super) status: AgentTaskStatus,
    pub(super) result: TaskResult,
    pub(super) action_type: ActionType,
    pub(super) payload: String,
}

impl RunOutcome {
    pub(super) fn from_diagnosis(diagnosis: Diagnosis) -> Self {
        match diagnosis {
            Diagnosis::Triage(report) => Self {
                status: AgentTaskStatus::Completed,
                payload: format!("severity={}", report.severity),
                result: TaskResult::Triage(report),
                action_type: ActionType::Triage,
            },
            Diagnosis::RootCause(diagnostic) => Self {
                status: AgentTaskStatus::Completed,
                result: TaskResult::Rca(diagnostic),
                action_type: ActionType::Rca,
                payload: ANALYSIS_COMPLETE_PAYLOAD.to_owned(),
            },
        }
    }

    pub(super) fn no_logs(kind: AgentTaskKind) -> Self {
        Self {
            status: AgentTaskStatus::Failed,
            result: TaskResult::no_logs(),
            action_type: ActionType::for_kind(kind),
            payload: NO_LOGS_PAYLOAD.to_owned(),
        }
    }

    pub(super) fn awaiting_approval() -> Self {
        Self {
            status: AgentTaskStatus::AwaitingApproval,
            result: TaskResult::fix_plan_placeholder(),
            action_type: ActionType::Plan,
            payload: FIX_PLAN_PAYLOAD.to_owned(),
        }
    }

    pub(super) fn dispatch_failed(err: &DispatchError) -> Self {
        let detail = err.to_string();
        Self {
            status: AgentTaskStatus::Failed,
            result: TaskResult::error(detail.clone()),
            action_type: ActionType::Error,
            payload: detail,
        }
    }
}
