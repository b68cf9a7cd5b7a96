//! Pipeline registry port.

use crate::pipeline::domain::{Pipeline, PipelineId, PipelineUpsert, RunOutcome};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for pipeline registry operations.
pub type PipelineRegistryResult<T> = Result<T, PipelineRegistryError>;

/// Upsertable record of pipeline identity, status, and success rate.
#[async_trait]
pub trait PipelineRegistry: Send + Sync {
    /// Creates or updates a pipeline record and returns the stored value.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineRegistryError::Persistence`] when the record cannot
    /// be written.
    async fn upsert(&self, upsert: PipelineUpsert) -> PipelineRegistryResult<Pipeline>;

    /// Records a finished run and recomputes the pipeline's success rate from
    /// every recorded outcome.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineRegistryError::NotFound`] when the pipeline has not
    /// been registered.
    async fn record_run(
        &self,
        pipeline_id: &PipelineId,
        outcome: RunOutcome,
    ) -> PipelineRegistryResult<Pipeline>;

    /// Finds a pipeline by identifier.
    async fn find(&self, pipeline_id: &PipelineId) -> PipelineRegistryResult<Option<Pipeline>>;

    /// Lists pipelines, most recently active first.
    async fn list(&self) -> PipelineRegistryResult<Vec<Pipeline>>;
}

/// Errors returned by pipeline registry implementations.
#[derive(Debug, Clone, Error)]
pub enum PipelineRegistryError {
    /// The pipeline was not found.
    #[error("pipeline not found: {0}")]
    NotFound(PipelineId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl PipelineRegistryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
