//! Keyword-based triage of recent pipeline logs.

use crate::diagnosis::{
    domain::{Severity, TriageReport},
    ports::{Diagnosis, DiagnosticProvider, ProviderResult},
};
use crate::pipeline::domain::{LogEntry, join_log_contents};
use async_trait::async_trait;

/// Number of most recent entries inspected by triage.
const TRIAGE_LOG_WINDOW: usize = 50;

/// Lowercase substrings that mark a log as failing.
const FAILURE_MARKERS: [&str; 2] = ["error", "failed"];

/// Generic next steps attached to every triage report.
pub const TRIAGE_HINTS: [&str; 2] = ["Check failing steps", "Open pipeline detail"];

/// Returns [`Severity::High`] when `text` mentions a failure marker in any
/// letter case.
#[must_use]
pub fn assess_severity(text: &str) -> Severity {
    let lowered = text.to_lowercase();
    if FAILURE_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
    {
        Severity::High
    } else {
        Severity::Low
    }
}

/// Triage strategy that never fails, even without logs.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicTriageProvider;

impl HeuristicTriageProvider {
    /// Creates the provider.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Builds a report from entries given newest first.
    #[must_use]
    pub fn triage(&self, logs: &[LogEntry]) -> TriageReport {
        let text = join_log_contents(logs, "\n");
        TriageReport {
            severity: assess_severity(&text),
            hints: TRIAGE_HINTS.iter().map(|hint| (*hint).to_owned()).collect(),
        }
    }
}

#[async_trait]
impl DiagnosticProvider for HeuristicTriageProvider {
    fn log_window(&self) -> usize {
        TRIAGE_LOG_WINDOW
    }

    async fn analyze(&self, logs: &[LogEntry]) -> ProviderResult<Diagnosis> {
        Ok(Diagnosis::Triage(self.triage(logs)))
    }
}
