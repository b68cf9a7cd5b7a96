//! Pipeline log entries and log queries.

use super::{LogEntryId, PipelineId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One timestamped chunk of raw log text reported by a pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Store-assigned identifier.
    pub id: LogEntryId,
    /// Owning pipeline.
    pub pipeline_id: PipelineId,
    /// Time the entry was stored.
    pub timestamp: DateTime<Utc>,
    /// Raw log text.
    pub content: String,
}

/// Pagination and filtering options for log lookups.
///
/// Results are always returned newest-first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogQuery {
    /// Maximum number of entries to return.
    pub limit: usize,
    /// Number of newest entries to skip.
    pub offset: usize,
    /// Optional case-sensitive substring the content must contain.
    pub contains: Option<String>,
}

impl LogQuery {
    /// Default page size used by log listings.
    pub const DEFAULT_LIMIT: usize = 50;

    /// Returns a query for the `limit` most recent entries.
    #[must_use]
    pub const fn latest(limit: usize) -> Self {
        Self {
            limit,
            offset: 0,
            contains: None,
        }
    }

    /// Skips the given number of newest entries.
    #[must_use]
    pub const fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Keeps only entries whose content contains `needle`, ignoring ASCII
    /// case.
    #[must_use]
    pub fn containing(mut self, needle: impl Into<String>) -> Self {
        self.contains = Some(needle.into());
        self
    }

    /// Returns `true` when `entry` passes the substring filter.
    #[must_use]
    pub fn matches(&self, entry: &LogEntry) -> bool {
        self.contains.as_deref().is_none_or(|needle| {
            entry
                .content
                .to_ascii_lowercase()
                .contains(&needle.to_ascii_lowercase())
        })
    }
}

impl Default for LogQuery {
    fn default() -> Self {
        Self::latest(Self::DEFAULT_LIMIT)
    }
}

/// Concatenates entry contents in the given order with `separator`.
#[must_use]
pub fn join_log_contents(entries: &[LogEntry], separator: &str) -> String {
    entries
        .iter()
        .map(|entry| entry.content.as_str())
        .collect::<Vec<_>>()
        .join(separator)
}
