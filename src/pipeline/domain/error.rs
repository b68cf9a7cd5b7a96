//! Error types for pipeline domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing pipeline domain values.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PipelineDomainError {
    /// The pipeline identifier is empty after trimming.
    #[error("pipeline identifier must not be empty")]
    EmptyPipelineId,

    /// The success rate is outside the closed range `0..=1`.
    #[error("invalid success rate {0}, expected a value between 0 and 1")]
    InvalidSuccessRate(f64),
}

/// Error returned while parsing pipeline statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown pipeline status: {0}")]
pub struct ParsePipelineStatusError(pub String);
