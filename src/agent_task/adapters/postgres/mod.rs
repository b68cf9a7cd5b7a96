//! `PostgreSQL` adapters for agent task persistence.

pub(crate) mod models;
mod repository;
mod schema;

pub use repository::{AgentTaskPgPool, PostgresAgentTaskRepository};
#[cfg(test)]
pub(crate) use repository::{row_to_action, row_to_task, to_new_row};
