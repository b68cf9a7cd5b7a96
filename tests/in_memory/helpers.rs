//! Shared test helpers for in-memory integration tests.

use async_trait::async_trait;
use mockable::DefaultClock;
use pipeline_copilot::agent_task::{
    adapters::memory::InMemoryAgentTaskRepository,
    services::{AgentTaskService, DiagnosticProviders},
};
use pipeline_copilot::diagnosis::{
    adapters::RemoteRootCauseProvider,
    ports::{ChatCompletionClient, ChatCompletionRequest, CompletionError, CompletionResult},
};
use pipeline_copilot::pipeline::{
    adapters::memory::{InMemoryLogStore, InMemoryPipelineRegistry},
    services::LogIngestionService,
};
use rstest::fixture;
use std::sync::{Arc, Mutex};

/// Model name used by test providers.
pub const MODEL: &str = "gpt-4o-mini";

/// Orchestrator type wired over in-memory stores.
pub type TestAgentTaskService =
    AgentTaskService<InMemoryAgentTaskRepository, InMemoryLogStore, DefaultClock>;

/// Ingestion service type wired over in-memory stores.
pub type TestIngestionService =
    LogIngestionService<InMemoryLogStore, InMemoryPipelineRegistry<DefaultClock>, DefaultClock>;

/// Completion client that records requests and replays a fixed outcome.
#[derive(Debug)]
pub struct RecordingCompletionClient {
    outcome: CompletionResult<String>,
    requests: Mutex<Vec<ChatCompletionRequest>>,
}

impl RecordingCompletionClient {
    /// Creates a client answering every request with `answer`.
    #[must_use]
    pub fn answering(answer: impl Into<String>) -> Self {
        Self {
            outcome: Ok(answer.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Creates a client failing every request with `error`.
    #[must_use]
    pub fn failing(error: CompletionError) -> Self {
        Self {
            outcome: Err(error),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Returns the requests received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<ChatCompletionRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ChatCompletionClient for RecordingCompletionClient {
    async fn complete(&self, request: &ChatCompletionRequest) -> CompletionResult<String> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        self.outcome.clone()
    }
}

/// In-memory stores shared by ingestion and the orchestrator.
pub struct Workbench {
    pub logs: Arc<InMemoryLogStore>,
    pub ingestion: TestIngestionService,
}

impl Workbench {
    /// Builds an orchestrator whose root-cause provider uses `client`, or
    /// runs unconfigured when `client` is `None`.
    #[must_use]
    pub fn orchestrator(
        &self,
        client: Option<Arc<RecordingCompletionClient>>,
    ) -> TestAgentTaskService {
        AgentTaskService::new(
            Arc::new(InMemoryAgentTaskRepository::new()),
            Arc::clone(&self.logs),
            DiagnosticProviders::standard(Arc::new(root_cause_provider(client))),
            Arc::new(DefaultClock),
        )
    }
}

/// Builds a remote provider over `client`, or an unconfigured one.
#[must_use]
pub fn root_cause_provider(
    client: Option<Arc<RecordingCompletionClient>>,
) -> RemoteRootCauseProvider {
    match client {
        Some(recording) => {
            RemoteRootCauseProvider::new(recording as Arc<dyn ChatCompletionClient>, MODEL)
        }
        None => RemoteRootCauseProvider::unconfigured(MODEL),
    }
}

/// Provides fresh in-memory stores for each test.
#[fixture]
pub fn workbench() -> Workbench {
    let logs = Arc::new(InMemoryLogStore::new());
    let clock = Arc::new(DefaultClock);
    let registry = Arc::new(InMemoryPipelineRegistry::new(Arc::clone(&clock)));
    Workbench {
        ingestion: LogIngestionService::new(Arc::clone(&logs), registry, clock),
        logs,
    }
}
