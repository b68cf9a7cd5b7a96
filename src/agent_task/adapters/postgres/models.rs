//! Diesel row models for agent task persistence.

use super::schema::{agent_actions, agent_tasks};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for agent task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = agent_tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AgentTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task kind.
    pub kind: String,
    /// Pipeline under diagnosis.
    pub pipeline_id: String,
    /// Lifecycle status.
    pub status: String,
    /// Result JSON payload.
    pub result: Option<Value>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for agent task records. `seq` is assigned by the database.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = agent_tasks)]
pub struct NewAgentTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task kind.
    pub kind: String,
    /// Pipeline under diagnosis.
    pub pipeline_id: String,
    /// Lifecycle status.
    pub status: String,
    /// Result JSON payload.
    pub result: Option<Value>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Changeset written when a run moves a task through its lifecycle.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = agent_tasks)]
#[diesel(treat_none_as_null = true)]
pub struct AgentTaskChanges {
    /// Lifecycle status.
    pub status: String,
    /// Result JSON payload.
    pub result: Option<Value>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result row for action records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = agent_actions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AgentActionRow {
    /// Action identifier.
    pub id: i64,
    /// Owning task.
    pub task_id: uuid::Uuid,
    /// Step label.
    pub action_type: String,
    /// Free-text detail.
    pub payload: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for action records. `id` is assigned by the database.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = agent_actions)]
pub struct NewAgentActionRow {
    /// Owning task.
    pub task_id: uuid::Uuid,
    /// Step label.
    pub action_type: String,
    /// Free-text detail.
    pub payload: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
