//! Diagnostic provider implementations.

mod openai;
mod remote;
mod response;
mod triage;

pub use openai::OpenAiChatClient;
pub use remote::{
    DEGRADED_ROOT_CAUSE, MAX_LOG_CHARS, RemoteRootCauseProvider, UNCONFIGURED_ROOT_CAUSE,
};
pub use response::{ResponseParseError, parse_diagnostic_response};
pub use triage::{HeuristicTriageProvider, TRIAGE_HINTS, assess_severity};

#[cfg(test)]
pub(crate) use remote::truncate_log_text;
