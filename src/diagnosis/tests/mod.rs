
use crate::pipeline::domain::{LogEntry, LogEntryId, PipelineId};
use chrono::Utc;

/// Builds entries newest first, numbering ids so the first is the newest.
pub(super) fn log_entries(contents: &[&str]) -> Vec<LogEntry> {
    let pipeline_id = PipelineId::new("pipeline-under-test").expect("valid pipeline id");
    let newest_id = i64::try_from(contents.len()).unwrap_or(i64::MAX);
    contents
        .iter()
        .zip((1..=newest_id).rev())
        .map(|(content, id)| LogEntry {
            id: LogEntryId::new(id),
            pipeline_id: pipeline_id.clone(),
            timestamp: Utc::now(),
            content: (*content).to_owned(),
        })
        .collect()
}
