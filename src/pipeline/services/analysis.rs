//! One-shot root-cause analysis of a pipeline, outside the agent task flow.

use super::{PipelineServiceError, PipelineServiceResult};
use crate::diagnosis::adapters::RemoteRootCauseProvider;
use crate::pipeline::{
    domain::{AnalysisRecord, LogQuery, NewAnalysisRecord, PipelineId, join_log_contents},
    ports::{AnalysisHistory, PipelineLogStore},
};
use mockable::Clock;
use std::sync::Arc;
use tracing::info;

/// Number of most recent entries included in a one-shot analysis.
const ANALYSIS_LOG_SAMPLE: usize = 20;

/// Analyzes a pipeline's latest logs and records the finding.
#[derive(Clone)]
pub struct PipelineAnalysisService<L, H, C>
where
    L: PipelineLogStore,
    H: AnalysisHistory,
    C: Clock + Send + Sync,
{
    logs: Arc<L>,
    history: Arc<H>,
    provider: Arc<RemoteRootCauseProvider>,
    clock: Arc<C>,
}

impl<L, H, C> PipelineAnalysisService<L, H, C>
where
    L: PipelineLogStore,
    H: AnalysisHistory,
    C: Clock + Send + Sync,
{
    /// Creates a new analysis service.
    #[must_use]
    pub const fn new(
        logs: Arc<L>,
        history: Arc<H>,
        provider: Arc<RemoteRootCauseProvider>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            logs,
            history,
            provider,
            clock,
        }
    }

    /// Analyzes the most recent logs of a pipeline and stores the result.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineServiceError::NoLogs`] when the pipeline has no
    /// logs, or a store error when reading logs or writing history fails.
    pub async fn analyze_pipeline(
        &self,
        pipeline_id: &PipelineId,
    ) -> PipelineServiceResult<AnalysisRecord> {
        let entries = self
            .logs
            .query(pipeline_id, &LogQuery::latest(ANALYSIS_LOG_SAMPLE))
            .await?;
        if entries.is_empty() {
            return Err(PipelineServiceError::NoLogs(pipeline_id.clone()));
        }

        let joined = join_log_contents(&entries, "\n\n");
        let diagnostic = self.provider.analyze_text(&joined).await;
        let record = self
            .history
            .store(NewAnalysisRecord {
                pipeline_id: pipeline_id.clone(),
                diagnostic,
                created_at: self.clock.utc(),
            })
            .await?;

        info!(
            pipeline_id = %pipeline_id,
            confidence = %record.diagnostic.confidence,
            "pipeline analysis recorded"
        );
        Ok(record)
    }

    /// Returns the most recent stored analysis for a pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineServiceError::History`] when the lookup fails.
    pub async fn latest_analysis(
        &self,
        pipeline_id: &PipelineId,
    ) -> PipelineServiceResult<Option<AnalysisRecord>> {
        Ok(self.history.latest(pipeline_id).await?)
    }
}
