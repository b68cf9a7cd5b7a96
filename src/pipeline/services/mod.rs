//! Application services for pipeline log ingestion and analysis.

mod analysis;
mod error;
mod ingest;

pub use analysis::PipelineAnalysisService;
pub use error::{PipelineServiceError, PipelineServiceResult};
pub use ingest::{IngestLogsRequest, LogIngestionService};
