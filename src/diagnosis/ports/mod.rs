//! Port contracts for diagnostic providers.

pub mod completion;
pub mod provider;

pub use completion::{
    ChatCompletionClient, ChatCompletionRequest, ChatMessage, ChatRole, CompletionError,
    CompletionResult, ResponseFormat,
};
pub use provider::{Diagnosis, DiagnosticProvider, ProviderError, ProviderResult};

#[cfg(test)]
pub use completion::MockChatCompletionClient;
#[cfg(test)]
pub use provider::MockDiagnosticProvider;
