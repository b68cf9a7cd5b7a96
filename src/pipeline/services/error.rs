//! Service-level errors for pipeline operations.

use crate::pipeline::{
    domain::{PipelineDomainError, PipelineId},
    ports::{AnalysisHistoryError, LogStoreError, PipelineRegistryError},
};
use thiserror::Error;

/// Errors returned by pipeline services.
#[derive(Debug, Error)]
pub enum PipelineServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] PipelineDomainError),
    /// Log store operation failed.
    #[error(transparent)]
    LogStore(#[from] LogStoreError),
    /// Registry operation failed.
    #[error(transparent)]
    Registry(#[from] PipelineRegistryError),
    /// Analysis history operation failed.
    #[error(transparent)]
    History(#[from] AnalysisHistoryError),
    /// The pipeline has no logs to analyze.
    #[error("no logs for pipeline {0}")]
    NoLogs(PipelineId),
}

/// Result type for pipeline service operations.
pub type PipelineServiceResult<T> = Result<T, PipelineServiceError>;
