//! Shared world state for agent task run BDD scenarios.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::DefaultClock;
use pipeline_copilot::agent_task::{
    adapters::memory::InMemoryAgentTaskRepository,
    domain::AgentTask,
    services::{AgentTaskService, DiagnosticProviders},
};
use pipeline_copilot::diagnosis::{
    adapters::RemoteRootCauseProvider,
    ports::{ChatCompletionClient, ChatCompletionRequest, CompletionResult},
};
use pipeline_copilot::pipeline::adapters::memory::InMemoryLogStore;
use rstest::fixture;

/// Service type used by the BDD world.
pub type TestAgentTaskService =
    AgentTaskService<InMemoryAgentTaskRepository, InMemoryLogStore, DefaultClock>;

const MODEL: &str = "gpt-4o-mini";

/// Completion client that always returns the same answer.
#[derive(Debug)]
pub struct ScriptedCompletionClient {
    answer: String,
}

impl ScriptedCompletionClient {
    /// Creates a client returning `answer`.
    #[must_use]
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
        }
    }
}

#[async_trait]
impl ChatCompletionClient for ScriptedCompletionClient {
    async fn complete(&self, _request: &ChatCompletionRequest) -> CompletionResult<String> {
        Ok(self.answer.clone())
    }
}

/// Scenario world for agent task run behaviour tests.
pub struct AgentTaskRunWorld {
    pub logs: Arc<InMemoryLogStore>,
    pub repository: Arc<InMemoryAgentTaskRepository>,
    pub completion: Option<Arc<ScriptedCompletionClient>>,
    pub last_task: Option<AgentTask>,
}

impl AgentTaskRunWorld {
    /// Creates a world with empty stores and no provider credential.
    #[must_use]
    pub fn new() -> Self {
        Self {
            logs: Arc::new(InMemoryLogStore::new()),
            repository: Arc::new(InMemoryAgentTaskRepository::new()),
            completion: None,
            last_task: None,
        }
    }

    /// Builds an orchestrator over the world's stores and provider setup.
    #[must_use]
    pub fn service(&self) -> TestAgentTaskService {
        let root_cause = match &self.completion {
            Some(client) => RemoteRootCauseProvider::new(
                Arc::clone(client) as Arc<dyn ChatCompletionClient>,
                MODEL,
            ),
            None => RemoteRootCauseProvider::unconfigured(MODEL),
        };
        AgentTaskService::new(
            Arc::clone(&self.repository),
            Arc::clone(&self.logs),
            DiagnosticProviders::standard(Arc::new(root_cause)),
            Arc::new(DefaultClock),
        )
    }

    /// Returns the task produced by the latest step.
    ///
    /// # Errors
    ///
    /// Returns an error when no task has been created yet.
    pub fn task(&self) -> Result<&AgentTask, eyre::Report> {
        self.last_task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
    }
}

impl Default for AgentTaskRunWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> AgentTaskRunWorld {
    AgentTaskRunWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
