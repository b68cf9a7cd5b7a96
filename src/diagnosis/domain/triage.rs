//! Heuristic triage output.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse severity assigned by heuristic triage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Failure markers were found.
    High,
    /// No failure markers were found.
    #[default]
    Low,
}

impl Severity {
    /// Returns the canonical representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity plus generic next steps for an operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageReport {
    /// Computed severity.
    pub severity: Severity,
    /// Suggested next steps.
    pub hints: Vec<String>,
}
