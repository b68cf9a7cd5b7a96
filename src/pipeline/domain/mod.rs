//! Domain model for pipelines, their logs, and analysis history.

mod analysis;
mod error;
mod ids;
mod log_entry;
mod pipeline;

pub use analysis::{AnalysisRecord, NewAnalysisRecord};
pub use error::{ParsePipelineStatusError, PipelineDomainError};
pub use ids::{AnalysisId, LogEntryId, PipelineId};
pub use log_entry::{LogEntry, LogQuery, join_log_contents};
pub use pipeline::{Pipeline, PipelineStatus, PipelineUpsert, RunOutcome, SuccessRate};
