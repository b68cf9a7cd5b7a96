//! Confidence levels attached to root-cause findings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How sure a provider is about its finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Confidence {
    /// Strong evidence in the logs.
    High,
    /// Plausible but not conclusive.
    Medium,
    /// Weak evidence, or a placeholder answer.
    #[default]
    Low,
}

impl Confidence {
    /// Returns the canonical representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    /// Parses a confidence label case-insensitively.
    ///
    /// Returns `None` for anything other than high, medium, or low.
    #[must_use]
    pub fn parse_label(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
