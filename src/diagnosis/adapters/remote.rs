//! Root-cause analysis through a remote chat-completion model.

use super::{OpenAiChatClient, ResponseParseError, parse_diagnostic_response};
use crate::diagnosis::{
    config::AnalysisProviderConfig,
    domain::{Confidence, DiagnosticResult},
    ports::{
        ChatCompletionClient, ChatCompletionRequest, ChatMessage, CompletionError,
        CompletionResult, Diagnosis, DiagnosticProvider, ProviderError, ProviderResult,
        ResponseFormat,
    },
};
use crate::pipeline::domain::{LogEntry, join_log_contents};
use async_trait::async_trait;
use minijinja::{Environment, context};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Number of most recent entries sent for analysis.
const RCA_LOG_WINDOW: usize = 100;

/// Separator placed between log entries.
const LOG_SEPARATOR: &str = "\n\n";

/// Character budget for log text sent to the model.
pub const MAX_LOG_CHARS: usize = 12_000;

const TEMPERATURE: f32 = 0.2;

const SYSTEM_PROMPT: &str = concat!(
    "You are a CI/CD diagnostics assistant. Analyze CI/CD logs and return a concise JSON ",
    "object with exactly the keys root_cause, suggested_fix, and confidence ",
    "(High/Medium/Low). Respond with only JSON."
);

const USER_PROMPT_TEMPLATE: &str = concat!(
    "Analyze the following CI/CD pipeline logs and identify the likely root cause and a fix.",
    "\n\n{{ logs }}"
);

/// Root cause reported when no provider credential is configured.
pub const UNCONFIGURED_ROOT_CAUSE: &str =
    "Analysis provider credential not configured. Returning placeholder analysis.";
const UNCONFIGURED_SUGGESTED_FIX: &str = "Set OPENAI_API_KEY and re-run analysis.";

/// Root cause reported when the provider cannot be reached or understood.
pub const DEGRADED_ROOT_CAUSE: &str = "Failed to reach analysis provider or parse response.";
const DEGRADED_SUGGESTED_FIX: &str = "Check network connectivity and API key permissions.";

#[derive(Debug, Error)]
enum RemoteAnalysisError {
    #[error("failed to render analysis prompt: {0}")]
    Prompt(#[from] minijinja::Error),
    #[error(transparent)]
    Completion(#[from] CompletionError),
    #[error(transparent)]
    Parse(#[from] ResponseParseError),
}

/// Root-cause provider backed by an OpenAI-compatible model.
///
/// Analysis always yields a [`DiagnosticResult`]: a missing credential or a
/// failed call produces a low-confidence placeholder.
#[derive(Clone)]
pub struct RemoteRootCauseProvider {
    client: Option<Arc<dyn ChatCompletionClient>>,
    model: String,
}

impl RemoteRootCauseProvider {
    /// Builds the provider from configuration, creating an HTTP client only
    /// when a credential is present.
    ///
    /// # Errors
    ///
    /// Returns [`CompletionError::Transport`] when the HTTP client cannot be
    /// constructed.
    pub fn from_config(config: &AnalysisProviderConfig) -> CompletionResult<Self> {
        let Some(api_key) = config.credential() else {
            return Ok(Self::unconfigured(config.model.clone()));
        };
        let client = OpenAiChatClient::new(&config.base_url, api_key, config.timeout())?;
        Ok(Self::new(Arc::new(client), config.model.clone()))
    }

    /// Creates a provider sending requests through `client`.
    #[must_use]
    pub fn new(client: Arc<dyn ChatCompletionClient>, model: impl Into<String>) -> Self {
        Self {
            client: Some(client),
            model: model.into(),
        }
    }

    /// Creates a provider without a credential; it never calls the network.
    #[must_use]
    pub fn unconfigured(model: impl Into<String>) -> Self {
        Self {
            client: None,
            model: model.into(),
        }
    }

    /// Returns `true` when a completion client is available.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    /// Analyzes concatenated log text.
    pub async fn analyze_text(&self, logs: &str) -> DiagnosticResult {
        let Some(client) = self.client.as_deref() else {
            info!("analysis provider credential missing; returning placeholder analysis");
            return unconfigured_placeholder();
        };
        match self.request_diagnosis(client, logs).await {
            Ok(result) => result,
            Err(err) => {
                warn!(error = %err, model = %self.model, "remote analysis degraded to placeholder");
                degraded_placeholder()
            }
        }
    }

    async fn request_diagnosis(
        &self,
        client: &dyn ChatCompletionClient,
        logs: &str,
    ) -> Result<DiagnosticResult, RemoteAnalysisError> {
        let request = self.build_request(logs)?;
        debug!(model = %self.model, "sending remote analysis request");
        let raw = client.complete(&request).await?;
        Ok(parse_diagnostic_response(&raw)?)
    }

    fn build_request(&self, logs: &str) -> Result<ChatCompletionRequest, RemoteAnalysisError> {
        let environment = Environment::new();
        let prompt = environment.render_str(
            USER_PROMPT_TEMPLATE,
            context! { logs => truncate_log_text(logs, MAX_LOG_CHARS) },
        )?;
        Ok(ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(prompt)],
            temperature: TEMPERATURE,
            response_format: ResponseFormat::json_object(),
        })
    }
}

impl std::fmt::Debug for RemoteRootCauseProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteRootCauseProvider")
            .field("configured", &self.is_configured())
            .field("model", &self.model)
            .finish()
    }
}

#[async_trait]
impl DiagnosticProvider for RemoteRootCauseProvider {
    fn log_window(&self) -> usize {
        RCA_LOG_WINDOW
    }

    async fn analyze(&self, logs: &[LogEntry]) -> ProviderResult<Diagnosis> {
        if logs.is_empty() {
            return Err(ProviderError::NoLogs);
        }
        let joined = join_log_contents(logs, LOG_SEPARATOR);
        Ok(Diagnosis::RootCause(self.analyze_text(&joined).await))
    }
}

fn unconfigured_placeholder() -> DiagnosticResult {
    DiagnosticResult::new(
        UNCONFIGURED_ROOT_CAUSE,
        UNCONFIGURED_SUGGESTED_FIX,
        Confidence::Low,
    )
}

fn degraded_placeholder() -> DiagnosticResult {
    DiagnosticResult::new(DEGRADED_ROOT_CAUSE, DEGRADED_SUGGESTED_FIX, Confidence::Low)
}

/// Keeps at most `budget` characters of `text`.
///
/// When the cut would split an entry and at least one whole entry fits, the
/// text is shortened to the last complete entry instead.
pub(crate) fn truncate_log_text(text: &str, budget: usize) -> &str {
    let Some((cut, _)) = text.char_indices().nth(budget) else {
        return text;
    };
    let (prefix, rest) = text.split_at(cut);
    if rest.starts_with(LOG_SEPARATOR) {
        return prefix;
    }
    // The cut may fall inside a separator.
    let straddled = LOG_SEPARATOR.char_indices().skip(1).find_map(|(split, _)| {
        let (head, tail) = LOG_SEPARATOR.split_at(split);
        prefix.strip_suffix(head).filter(|_| rest.starts_with(tail))
    });
    if let Some(kept) = straddled.filter(|kept| !kept.is_empty()) {
        return kept;
    }
    match prefix.rfind(LOG_SEPARATOR) {
        Some(boundary) if boundary > 0 => prefix.get(..boundary).unwrap_or(prefix),
        _ => prefix,
    }
}
