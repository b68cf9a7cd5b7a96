//! Configuration for the remote analysis provider.
//!
//! A missing credential is a supported mode: the remote provider then
//! answers with a configuration reminder instead of calling the network.

use serde::Deserialize;
use std::fmt;
use std::time::Duration;

/// Environment variable holding the provider credential.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
/// Environment variable overriding the provider base URL.
pub const BASE_URL_ENV: &str = "OPENAI_BASE_URL";
/// Environment variable overriding the model identifier.
pub const MODEL_ENV: &str = "OPENAI_MODEL";

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Credential, endpoint, and model used by the remote analysis provider.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AnalysisProviderConfig {
    /// Provider credential; `None` disables network calls.
    pub api_key: Option<String>,
    /// OpenAI-compatible API base URL.
    pub base_url: String,
    /// Model identifier sent with each request.
    pub model: String,
    /// Upper bound on a single request, in seconds.
    pub timeout_secs: u64,
}

impl AnalysisProviderConfig {
    /// Loads configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// Blank values fall back to defaults; blank or placeholder credentials
    /// count as absent.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();
        Self {
            api_key: lookup(API_KEY_ENV).filter(|key| !is_placeholder_api_key(key)),
            base_url: non_blank(BASE_URL_ENV).unwrap_or(defaults.base_url),
            model: non_blank(MODEL_ENV).unwrap_or(defaults.model),
            timeout_secs: defaults.timeout_secs,
        }
    }

    /// Sets the provider credential.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into()).filter(|key| !is_placeholder_api_key(key));
        self
    }

    /// Sets the API base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the model identifier.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the request timeout in seconds.
    #[must_use]
    pub const fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Returns the credential when one is configured.
    #[must_use]
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .filter(|key| !is_placeholder_api_key(key))
    }

    /// Returns the request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for AnalysisProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_owned(),
            model: DEFAULT_MODEL.to_owned(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl fmt::Debug for AnalysisProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalysisProviderConfig")
            .field("api_key", &self.credential().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn is_placeholder_api_key(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("x")
        || trimmed.eq_ignore_ascii_case("placeholder")
}
