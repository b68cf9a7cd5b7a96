//! Identifier types for the pipeline domain.

use super::PipelineDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// External pipeline identifier, such as a CI provider run or workflow id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PipelineId(String);

impl PipelineId {
    /// Creates a validated pipeline identifier.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineDomainError::EmptyPipelineId`] when the value is
    /// empty after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, PipelineDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(PipelineDomainError::EmptyPipelineId);
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PipelineId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for PipelineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Store-assigned identifier of a log entry. Increases with insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogEntryId(i64);

impl LogEntryId {
    /// Wraps a raw store value.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw store value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for LogEntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Store-assigned identifier of an analysis record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisId(i64);

impl AnalysisId {
    /// Wraps a raw store value.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw store value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}
