//! Port contracts for agent task persistence.

pub mod repository;

pub use repository::{
    AgentTaskRepository, AgentTaskRepositoryError, AgentTaskRepositoryResult, Page,
};

#[cfg(test)]
pub use repository::MockAgentTaskRepository;
