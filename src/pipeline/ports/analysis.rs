//! Analysis history port.

use crate::pipeline::domain::{AnalysisRecord, NewAnalysisRecord, PipelineId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for analysis history operations.
pub type AnalysisHistoryResult<T> = Result<T, AnalysisHistoryError>;

/// Append-only history of pipeline analyses.
#[async_trait]
pub trait AnalysisHistory: Send + Sync {
    /// Stores an analysis and returns it with its assigned identifier.
    async fn store(&self, record: NewAnalysisRecord) -> AnalysisHistoryResult<AnalysisRecord>;

    /// Returns the most recently stored analysis for a pipeline.
    async fn latest(&self, pipeline_id: &PipelineId)
    -> AnalysisHistoryResult<Option<AnalysisRecord>>;
}

/// Errors returned by analysis history implementations.
#[derive(Debug, Clone, Error)]
pub enum AnalysisHistoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl AnalysisHistoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
