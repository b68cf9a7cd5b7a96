//! Repair and normalization of model answers.
//!
//! Models asked for strict JSON still wrap it in prose or code fences and
//! drift between key spellings. Parsing tries, in order: the whole text, the
//! interior of the first fenced block, then the span from the first `{` to
//! the last `}`. Keys are resolved through fixed alias tables so the first
//! listed spelling always wins.

use crate::diagnosis::domain::{Confidence, DiagnosticResult};
use serde_json::{Map, Value};
use thiserror::Error;

const FENCE: &str = "```";

const ROOT_CAUSE_KEYS: &[&str] = &["root_cause", "rootCause"];
const SUGGESTED_FIX_KEYS: &[&str] = &["suggested_fix", "fix"];
const CONFIDENCE_KEYS: &[&str] = &["confidence"];

const DEFAULT_ROOT_CAUSE: &str = "Unknown";
const DEFAULT_SUGGESTED_FIX: &str = "Investigate further.";

/// Error returned when no JSON object can be recovered from a response.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResponseParseError {
    /// None of the repair stages produced a JSON object.
    #[error("analysis response did not contain a JSON object")]
    NoJsonObject,
}

/// Extracts a normalized diagnostic from a raw model answer.
///
/// # Errors
///
/// Returns [`ResponseParseError::NoJsonObject`] when every repair stage
/// fails.
pub fn parse_diagnostic_response(raw: &str) -> Result<DiagnosticResult, ResponseParseError> {
    let object = extract_json_object(raw.trim()).ok_or(ResponseParseError::NoJsonObject)?;
    Ok(normalize(&object))
}

fn extract_json_object(text: &str) -> Option<Map<String, Value>> {
    parse_object(text)
        .or_else(|| fenced_block(text).and_then(parse_object))
        .or_else(|| brace_span(text).and_then(parse_object))
}

fn parse_object(text: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(text).ok()? {
        Value::Object(object) => Some(object),
        _ => None,
    }
}

/// Returns the interior of the first fenced block, with an optional
/// language tag removed.
fn fenced_block(text: &str) -> Option<&str> {
    let (_, after_open) = text.split_once(FENCE)?;
    let body = match after_open.split_once('\n') {
        Some((tag, rest)) if is_language_tag(tag) => rest,
        _ => after_open,
    };
    let (interior, _) = body.split_once(FENCE)?;
    Some(interior.trim())
}

fn is_language_tag(candidate: &str) -> bool {
    candidate
        .trim()
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_')
}

fn brace_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }
    text.get(start..=end)
}

fn first_text<'a>(object: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|key| {
        object
            .get(*key)
            .and_then(Value::as_str)
            .filter(|value| !value.is_empty())
    })
}

fn normalize(object: &Map<String, Value>) -> DiagnosticResult {
    let root_cause = first_text(object, ROOT_CAUSE_KEYS).unwrap_or(DEFAULT_ROOT_CAUSE);
    let suggested_fix = first_text(object, SUGGESTED_FIX_KEYS).unwrap_or(DEFAULT_SUGGESTED_FIX);
    let confidence = first_text(object, CONFIDENCE_KEYS)
        .and_then(Confidence::parse_label)
        .unwrap_or_default();
    DiagnosticResult::new(root_cause, suggested_fix, confidence)
}
