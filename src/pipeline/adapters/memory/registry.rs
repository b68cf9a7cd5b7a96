//! In-memory pipeline registry.

use async_trait::async_trait;
use mockable::Clock;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::pipeline::{
    domain::{Pipeline, PipelineId, PipelineUpsert, RunOutcome, SuccessRate},
    ports::{PipelineRegistry, PipelineRegistryError, PipelineRegistryResult},
};

/// Thread-safe in-memory pipeline registry.
#[derive(Debug, Clone)]
pub struct InMemoryPipelineRegistry<C> {
    state: Arc<RwLock<InMemoryRegistryState>>,
    clock: Arc<C>,
}

#[derive(Debug, Default)]
struct InMemoryRegistryState {
    pipelines: HashMap<PipelineId, Pipeline>,
    run_tallies: HashMap<PipelineId, RunTally>,
}

#[derive(Debug, Default, Clone, Copy)]
struct RunTally {
    total: u32,
    succeeded: u32,
}

impl RunTally {
    fn record(&mut self, outcome: RunOutcome) -> SuccessRate {
        self.total = self.total.saturating_add(1);
        if outcome == RunOutcome::Success {
            self.succeeded = self.succeeded.saturating_add(1);
        }
        SuccessRate::from_counts(self.succeeded, self.total)
    }
}

impl<C> InMemoryPipelineRegistry<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty registry stamping records with `clock`.
    #[must_use]
    pub fn new(clock: Arc<C>) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryRegistryState::default())),
            clock,
        }
    }
}

fn poisoned(err: impl std::fmt::Display) -> PipelineRegistryError {
    PipelineRegistryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl<C> PipelineRegistry for InMemoryPipelineRegistry<C>
where
    C: Clock + Send + Sync,
{
    async fn upsert(&self, upsert: PipelineUpsert) -> PipelineRegistryResult<Pipeline> {
        let mut state = self.state.write().map_err(poisoned)?;
        if let Some(existing) = state.pipelines.get_mut(&upsert.id) {
            existing.apply(upsert, &*self.clock);
            return Ok(existing.clone());
        }
        let created = Pipeline::from_upsert(upsert, &*self.clock);
        state
            .pipelines
            .insert(created.id().clone(), created.clone());
        Ok(created)
    }

    async fn record_run(
        &self,
        pipeline_id: &PipelineId,
        outcome: RunOutcome,
    ) -> PipelineRegistryResult<Pipeline> {
        let mut state = self.state.write().map_err(poisoned)?;
        if !state.pipelines.contains_key(pipeline_id) {
            return Err(PipelineRegistryError::NotFound(pipeline_id.clone()));
        }
        let rate = state
            .run_tallies
            .entry(pipeline_id.clone())
            .or_default()
            .record(outcome);
        let pipeline = state
            .pipelines
            .get_mut(pipeline_id)
            .ok_or_else(|| PipelineRegistryError::NotFound(pipeline_id.clone()))?;
        pipeline.record_run(outcome, rate, &*self.clock);
        Ok(pipeline.clone())
    }

    async fn find(&self, pipeline_id: &PipelineId) -> PipelineRegistryResult<Option<Pipeline>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.pipelines.get(pipeline_id).cloned())
    }

    async fn list(&self) -> PipelineRegistryResult<Vec<Pipeline>> {
        let state = self.state.read().map_err(poisoned)?;
        let mut pipelines: Vec<Pipeline> = state.pipelines.values().cloned().collect();
        pipelines.sort_by(|left, right| {
            right
                .last_run()
                .cmp(&left.last_run())
                .then_with(|| left.id().cmp(right.id()))
        });
        Ok(pipelines)
    }
}
