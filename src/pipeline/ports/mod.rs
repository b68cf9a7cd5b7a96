//! Port contracts for pipeline bookkeeping.
//!
//! Ports define infrastructure-agnostic interfaces used by pipeline services
//! and by the agent task orchestrator.

pub mod analysis;
pub mod log_store;
pub mod registry;

pub use analysis::{AnalysisHistory, AnalysisHistoryError, AnalysisHistoryResult};
pub use log_store::{LogStoreError, LogStoreResult, PipelineLogStore};
pub use registry::{PipelineRegistry, PipelineRegistryError, PipelineRegistryResult};

#[cfg(test)]
pub use log_store::MockPipelineLogStore;
