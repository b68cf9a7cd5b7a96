//! Diagnostic provider port shared by every analysis strategy.

use crate::diagnosis::domain::{DiagnosticResult, TriageReport};
use crate::pipeline::domain::LogEntry;
use async_trait::async_trait;
use thiserror::Error;

/// Result type for diagnostic provider calls.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Finding produced by a diagnostic provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnosis {
    /// Heuristic triage outcome.
    Triage(TriageReport),
    /// Root-cause analysis outcome, possibly a degraded placeholder.
    RootCause(DiagnosticResult),
}

/// Failures a provider reports to its caller.
///
/// Transport and response-format problems are absorbed inside the remote
/// provider and never appear here.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ProviderError {
    /// The pipeline has no log entries to analyze.
    #[error("no logs")]
    NoLogs,
}

/// Strategy turning recent pipeline logs into a diagnosis.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DiagnosticProvider: Send + Sync {
    /// Maximum number of most recent log entries the provider consumes.
    fn log_window(&self) -> usize;

    /// Analyzes log entries given newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::NoLogs`] when the provider needs at least one
    /// entry and `logs` is empty.
    async fn analyze(&self, logs: &[LogEntry]) -> ProviderResult<Diagnosis>;
}
