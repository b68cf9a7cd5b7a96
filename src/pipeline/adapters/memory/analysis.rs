//! In-memory analysis history.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::pipeline::{
    domain::{AnalysisId, AnalysisRecord, NewAnalysisRecord, PipelineId},
    ports::{AnalysisHistory, AnalysisHistoryError, AnalysisHistoryResult},
};

/// Thread-safe in-memory analysis history.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAnalysisHistory {
    records: Arc<RwLock<Vec<AnalysisRecord>>>,
}

impl InMemoryAnalysisHistory {
    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl std::fmt::Display) -> AnalysisHistoryError {
    AnalysisHistoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl AnalysisHistory for InMemoryAnalysisHistory {
    async fn store(&self, record: NewAnalysisRecord) -> AnalysisHistoryResult<AnalysisRecord> {
        let mut records = self.records.write().map_err(poisoned)?;
        let next_id = records
            .last()
            .map_or(1, |last| last.id.value().saturating_add(1));
        let stored = AnalysisRecord::assign(AnalysisId::new(next_id), record);
        records.push(stored.clone());
        Ok(stored)
    }

    async fn latest(
        &self,
        pipeline_id: &PipelineId,
    ) -> AnalysisHistoryResult<Option<AnalysisRecord>> {
        let records = self.records.read().map_err(poisoned)?;
        Ok(records
            .iter()
            .rev()
            .find(|record| &record.pipeline_id == pipeline_id)
            .cloned())
    }
}
