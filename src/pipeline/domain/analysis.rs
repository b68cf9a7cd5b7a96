//! Stored results of one-shot pipeline analyses.

use super::{AnalysisId, PipelineId};
use crate::diagnosis::domain::DiagnosticResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Analysis result awaiting persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAnalysisRecord {
    /// Analyzed pipeline.
    pub pipeline_id: PipelineId,
    /// Diagnostic produced for the pipeline.
    pub diagnostic: DiagnosticResult,
    /// Time the analysis finished.
    pub created_at: DateTime<Utc>,
}

/// Persisted analysis result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    /// Store-assigned identifier.
    pub id: AnalysisId,
    /// Analyzed pipeline.
    pub pipeline_id: PipelineId,
    /// Diagnostic produced for the pipeline.
    #[serde(flatten)]
    pub diagnostic: DiagnosticResult,
    /// Time the analysis finished.
    pub created_at: DateTime<Utc>,
}

impl AnalysisRecord {
    /// Attaches a store-assigned identifier to a new record.
    #[must_use]
    pub fn assign(id: AnalysisId, record: NewAnalysisRecord) -> Self {
        Self {
            id,
            pipeline_id: record.pipeline_id,
            diagnostic: record.diagnostic,
            created_at: record.created_at,
        }
    }
}
