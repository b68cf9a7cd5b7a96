//! In-memory adapters for agent task persistence.

mod task;

pub use task::InMemoryAgentTaskRepository;
