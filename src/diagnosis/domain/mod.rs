//! Diagnostic result types.

mod confidence;
mod result;
mod triage;

pub use confidence::Confidence;
pub use result::DiagnosticResult;
pub use triage::{Severity, TriageReport};
