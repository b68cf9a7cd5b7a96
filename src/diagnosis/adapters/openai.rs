//! HTTP client for OpenAI-compatible chat-completion endpoints.

use crate::diagnosis::ports::{
    ChatCompletionClient, ChatCompletionRequest, CompletionError, CompletionResult,
};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

const ERROR_DETAIL_LIMIT: usize = 500;

/// Chat-completion client issuing one bearer-authenticated request per call.
///
/// Timeouts surface as [`CompletionError::Transport`]; there is no retry.
#[derive(Clone)]
pub struct OpenAiChatClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl OpenAiChatClient {
    /// Creates a client for the API rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`CompletionError::Transport`] when the underlying HTTP client
    /// cannot be built.
    pub fn new(
        base_url: &str,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> CompletionResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(CompletionError::transport)?;
        Ok(Self {
            client,
            endpoint: chat_completions_url(base_url),
            api_key: api_key.into(),
        })
    }

    /// Returns the chat-completions endpoint URL.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl std::fmt::Debug for OpenAiChatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiChatClient")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ChatCompletionClient for OpenAiChatClient {
    async fn complete(&self, request: &ChatCompletionRequest) -> CompletionResult<String> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(CompletionError::transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Status {
                status: status.as_u16(),
                detail: truncate_for_error(&body, ERROR_DETAIL_LIMIT),
            });
        }

        let body: Value = response.json().await.map_err(CompletionError::transport)?;
        extract_message_content(&body).ok_or(CompletionError::MissingContent)
    }
}

fn chat_completions_url(base_url: &str) -> String {
    format!("{}/chat/completions", base_url.trim_end_matches('/'))
}

/// Reads `choices[0].message.content`, trimmed.
pub(super) fn extract_message_content(body: &Value) -> Option<String> {
    body.get("choices")?
        .get(0)?
        .get("message")?
        .get("content")?
        .as_str()
        .map(str::trim)
        .filter(|content| !content.is_empty())
        .map(str::to_owned)
}

fn truncate_for_error(input: &str, max_chars: usize) -> String {
    if input.chars().count() <= max_chars {
        return input.to_owned();
    }
    let truncated: String = input.chars().take(max_chars).collect();
    format!("{truncated}...")
}
