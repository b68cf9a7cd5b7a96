//! Log store port: append-only pipeline log text.

use crate::pipeline::domain::{LogEntry, LogQuery, PipelineId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for log store operations.
pub type LogStoreResult<T> = Result<T, LogStoreError>;

/// Append-only store of timestamped log text keyed by pipeline.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PipelineLogStore: Send + Sync {
    /// Appends a log entry and returns it with its assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`LogStoreError::Persistence`] when the entry cannot be
    /// written.
    async fn append(
        &self,
        pipeline_id: &PipelineId,
        content: &str,
        timestamp: DateTime<Utc>,
    ) -> LogStoreResult<LogEntry>;

    /// Returns entries for a pipeline, newest first, honouring the query's
    /// filter, offset and limit.
    ///
    /// An unknown pipeline yields an empty list.
    async fn query(&self, pipeline_id: &PipelineId, query: &LogQuery)
    -> LogStoreResult<Vec<LogEntry>>;
}

/// Errors returned by log store implementations.
#[derive(Debug, Clone, Error)]
pub enum LogStoreError {
    /// Persistence-layer failure.
    #[error("log store error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl LogStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
