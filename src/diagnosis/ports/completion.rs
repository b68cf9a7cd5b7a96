//! Chat-completion port used by the remote root-cause provider.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

/// Result type for chat-completion calls.
pub type CompletionResult<T> = Result<T, CompletionError>;

/// Speaker of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// Instruction fixing the model's behaviour and output schema.
    System,
    /// Payload supplied on behalf of the operator.
    User,
}

/// One message of a chat-completion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    /// Speaker.
    pub role: ChatRole,
    /// Message text.
    pub content: String,
}

impl ChatMessage {
    /// Creates a system message.
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    /// Creates a user message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// Requested response encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseFormat {
    /// Format name, such as `json_object`.
    #[serde(rename = "type")]
    pub kind: String,
}

impl ResponseFormat {
    /// Requests a single JSON object.
    #[must_use]
    pub fn json_object() -> Self {
        Self {
            kind: "json_object".to_owned(),
        }
    }
}

/// Body of an OpenAI-compatible chat-completion request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatCompletionRequest {
    /// Model identifier.
    pub model: String,
    /// Conversation sent to the model.
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature.
    pub temperature: f32,
    /// Requested response encoding.
    pub response_format: ResponseFormat,
}

/// Client able to execute a single chat-completion request.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatCompletionClient: Send + Sync {
    /// Sends one request and returns the completion text.
    ///
    /// Implementations make a single attempt within a bounded wait.
    ///
    /// # Errors
    ///
    /// Returns [`CompletionError`] on transport failures, timeouts,
    /// non-success statuses, or responses without completion content.
    async fn complete(&self, request: &ChatCompletionRequest) -> CompletionResult<String>;
}

/// Errors returned by chat-completion clients.
#[derive(Debug, Clone, Error)]
pub enum CompletionError {
    /// The request could not be sent or the response could not be read.
    #[error("analysis provider transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),

    /// The provider answered with a non-success status.
    #[error("analysis provider returned status {status}: {detail}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Truncated response body or error message.
        detail: String,
    },

    /// The response carried no completion text.
    #[error("analysis provider response carried no completion content")]
    MissingContent,
}

impl CompletionError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
