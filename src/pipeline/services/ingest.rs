//! Log ingestion: pipelines report log text, status, and run outcomes.

use super::PipelineServiceResult;
use crate::pipeline::{
    domain::{
        LogEntry, LogQuery, Pipeline, PipelineId, PipelineStatus, PipelineUpsert, SuccessRate,
    },
    ports::{PipelineLogStore, PipelineRegistry},
};
use mockable::Clock;
use std::sync::Arc;
use tracing::info;

/// Request payload for a pipeline log report.
#[derive(Debug, Clone, PartialEq)]
pub struct IngestLogsRequest {
    pipeline_id: String,
    logs: String,
    name: Option<String>,
    status: Option<PipelineStatus>,
    success_rate: Option<f64>,
}

impl IngestLogsRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(pipeline_id: impl Into<String>, logs: impl Into<String>) -> Self {
        Self {
            pipeline_id: pipeline_id.into(),
            logs: logs.into(),
            name: None,
            status: None,
            success_rate: None,
        }
    }

    /// Sets the pipeline display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the reported pipeline status.
    #[must_use]
    pub const fn with_status(mut self, status: PipelineStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets a success rate override in `0..=1`.
    #[must_use]
    pub const fn with_success_rate(mut self, rate: f64) -> Self {
        self.success_rate = Some(rate);
        self
    }
}

/// Stores pipeline log reports and keeps the registry current.
#[derive(Clone)]
pub struct LogIngestionService<L, P, C>
where
    L: PipelineLogStore,
    P: PipelineRegistry,
    C: Clock + Send + Sync,
{
    logs: Arc<L>,
    registry: Arc<P>,
    clock: Arc<C>,
}

impl<L, P, C> LogIngestionService<L, P, C>
where
    L: PipelineLogStore,
    P: PipelineRegistry,
    C: Clock + Send + Sync,
{
    /// Creates a new ingestion service.
    #[must_use]
    pub const fn new(logs: Arc<L>, registry: Arc<P>, clock: Arc<C>) -> Self {
        Self {
            logs,
            registry,
            clock,
        }
    }

    /// Registers the pipeline, stores the log text, and records a run when
    /// the reported status is terminal.
    ///
    /// # Errors
    ///
    /// Returns [`super::PipelineServiceError`] when validation fails or a
    /// store rejects the write.
    pub async fn ingest(&self, request: IngestLogsRequest) -> PipelineServiceResult<LogEntry> {
        let IngestLogsRequest {
            pipeline_id,
            logs,
            name,
            status,
            success_rate,
        } = request;

        let id = PipelineId::new(pipeline_id)?;
        let mut upsert = PipelineUpsert::new(id.clone());
        if let Some(display_name) = name {
            upsert = upsert.with_name(display_name);
        }
        if let Some(reported) = status {
            upsert = upsert.with_status(reported);
        }
        if let Some(rate) = success_rate {
            upsert = upsert.with_success_rate(SuccessRate::new(rate)?);
        }

        self.registry.upsert(upsert).await?;
        let entry = self.logs.append(&id, &logs, self.clock.utc()).await?;
        if let Some(outcome) = status.and_then(PipelineStatus::run_outcome) {
            self.registry.record_run(&id, outcome).await?;
        }

        info!(pipeline_id = %id, log_id = %entry.id, "pipeline logs stored");
        Ok(entry)
    }

    /// Returns stored logs for a pipeline, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`super::PipelineServiceError::LogStore`] when the lookup
    /// fails.
    pub async fn logs(
        &self,
        pipeline_id: &PipelineId,
        query: &LogQuery,
    ) -> PipelineServiceResult<Vec<LogEntry>> {
        Ok(self.logs.query(pipeline_id, query).await?)
    }

    /// Lists registered pipelines, most recently active first.
    ///
    /// # Errors
    ///
    /// Returns [`super::PipelineServiceError::Registry`] when the lookup
    /// fails.
    pub async fn pipelines(&self) -> PipelineServiceResult<Vec<Pipeline>> {
        Ok(self.registry.list().await?)
    }
}
