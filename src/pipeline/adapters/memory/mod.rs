//! In-memory adapters for pipeline bookkeeping.

mod analysis;
mod logs;
mod registry;

pub use analysis::InMemoryAnalysisHistory;
pub use logs::InMemoryLogStore;
pub use registry::InMemoryPipelineRegistry;
