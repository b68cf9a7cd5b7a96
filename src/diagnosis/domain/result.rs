//! Root-cause diagnostic result.

use super::Confidence;
use serde::{Deserialize, Serialize};

/// Structured answer produced by a root-cause provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticResult {
    /// Free-text description of the likely cause.
    pub root_cause: String,
    /// Free-text remediation advice.
    pub suggested_fix: String,
    /// Provider confidence in the finding.
    pub confidence: Confidence,
}

impl DiagnosticResult {
    /// Creates a diagnostic result.
    #[must_use]
    pub fn new(
        root_cause: impl Into<String>,
        suggested_fix: impl Into<String>,
        confidence: Confidence,
    ) -> Self {
        Self {
            root_cause: root_cause.into(),
            suggested_fix: suggested_fix.into(),
            confidence,
        }
    }
}
