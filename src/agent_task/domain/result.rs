//! Structured outcome stored on an agent task.

use crate::diagnosis::domain::{DiagnosticResult, TriageReport};
use serde::{Deserialize, Serialize};

const NO_LOGS: &str = "no logs";
const ABANDONED_RUN: &str = "run abandoned before completion";
const FIX_PLAN_PLACEHOLDER: &str = "fix plan requires approval";

/// Result payload of the latest run, tagged by `kind` when serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TaskResult {
    /// Heuristic triage report.
    Triage(TriageReport),
    /// Root-cause diagnostic.
    Rca(DiagnosticResult),
    /// Placeholder plan awaiting operator approval.
    FixPlan {
        /// Human-readable note.
        info: String,
    },
    /// The run failed.
    Error {
        /// Failure detail.
        error: String,
    },
}

impl TaskResult {
    /// Failure result for a pipeline without logs.
    #[must_use]
    pub fn no_logs() -> Self {
        Self::error(NO_LOGS)
    }

    /// Failure result for a run that never reached an end state.
    #[must_use]
    pub fn abandoned_run() -> Self {
        Self::error(ABANDONED_RUN)
    }

    /// Failure result carrying `detail`.
    #[must_use]
    pub fn error(detail: impl Into<String>) -> Self {
        Self::Error {
            error: detail.into(),
        }
    }

    /// Placeholder produced for fix tasks.
    #[must_use]
    pub fn fix_plan_placeholder() -> Self {
        Self::FixPlan {
            info: FIX_PLAN_PLACEHOLDER.to_owned(),
        }
    }

    /// Returns the failure detail for error results.
    #[must_use]
    pub fn error_detail(&self) -> Option<&str> {
        match self {
            Self::Error { error } => Some(error.as_str()),
            Self::Triage(_) | Self::Rca(_) | Self::FixPlan { .. } => None,
        }
    }

    /// Returns `true` for the missing-logs failure.
    #[must_use]
    pub fn is_no_logs(&self) -> bool {
        self.error_detail() == Some(NO_LOGS)
    }
}
