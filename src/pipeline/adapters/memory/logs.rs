//! In-memory log store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::pipeline::{
    domain::{LogEntry, LogEntryId, LogQuery, PipelineId},
    ports::{LogStoreError, LogStoreResult, PipelineLogStore},
};

/// Thread-safe in-memory log store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLogStore {
    state: Arc<RwLock<InMemoryLogState>>,
}

#[derive(Debug, Default)]
struct InMemoryLogState {
    last_id: i64,
    entries: HashMap<PipelineId, Vec<LogEntry>>,
}

impl InMemoryLogStore {
    /// Creates an empty in-memory log store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl std::fmt::Display) -> LogStoreError {
    LogStoreError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl PipelineLogStore for InMemoryLogStore {
    async fn append(
        &self,
        pipeline_id: &PipelineId,
        content: &str,
        timestamp: DateTime<Utc>,
    ) -> LogStoreResult<LogEntry> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.last_id += 1;
        let entry = LogEntry {
            id: LogEntryId::new(state.last_id),
            pipeline_id: pipeline_id.clone(),
            timestamp,
            content: content.to_owned(),
        };
        state
            .entries
            .entry(pipeline_id.clone())
            .or_default()
            .push(entry.clone());
        Ok(entry)
    }

    async fn query(
        &self,
        pipeline_id: &PipelineId,
        query: &LogQuery,
    ) -> LogStoreResult<Vec<LogEntry>> {
        let state = self.state.read().map_err(poisoned)?;
        let entries = state
            .entries
            .get(pipeline_id)
            .map(|entries| {
                entries
                    .iter()
                    .rev()
                    .filter(|entry| query.matches(entry))
                    .skip(query.offset)
                    .take(query.limit)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(entries)
    }
}
