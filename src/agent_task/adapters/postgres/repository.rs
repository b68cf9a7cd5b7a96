//! `PostgreSQL` repository implementation for agent tasks and actions.

use super::{
    models::{AgentActionRow, AgentTaskChanges, AgentTaskRow, NewAgentActionRow, NewAgentTaskRow},
    schema::{agent_actions, agent_tasks},
};
use crate::agent_task::{
    domain::{
        ActionId, ActionType, AgentAction, AgentTask, AgentTaskId, AgentTaskKind, AgentTaskStatus,
        NewAgentAction, PersistedAgentTaskData, TaskResult,
    },
    ports::{AgentTaskRepository, AgentTaskRepositoryError, AgentTaskRepositoryResult, Page},
};
use crate::pipeline::domain::PipelineId;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by agent task adapters.
pub type AgentTaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed agent task repository.
#[derive(Debug, Clone)]
pub struct PostgresAgentTaskRepository {
    pool: AgentTaskPgPool,
}

impl PostgresAgentTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: AgentTaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> AgentTaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> AgentTaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(AgentTaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(AgentTaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl AgentTaskRepository for PostgresAgentTaskRepository {
    async fn store(&self, task: &AgentTask) -> AgentTaskRepositoryResult<()> {
        let task_id = task.id();
        let new_row = to_new_row(task)?;

        self.run_blocking(move |connection| {
            diesel::insert_into(agent_tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        AgentTaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => AgentTaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &AgentTask) -> AgentTaskRepositoryResult<()> {
        let task_id = task.id();
        let changes = AgentTaskChanges {
            status: task.status().as_str().to_owned(),
            result: result_to_value(task.result())?,
            updated_at: task.updated_at(),
        };

        self.run_blocking(move |connection| {
            let updated = diesel::update(agent_tasks::table.find(task_id.into_inner()))
                .set(&changes)
                .execute(connection)
                .map_err(AgentTaskRepositoryError::persistence)?;
            if updated == 0 {
                return Err(AgentTaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: AgentTaskId) -> AgentTaskRepositoryResult<Option<AgentTask>> {
        self.run_blocking(move |connection| {
            let row = agent_tasks::table
                .find(id.into_inner())
                .select(AgentTaskRow::as_select())
                .first::<AgentTaskRow>(connection)
                .optional()
                .map_err(AgentTaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list(&self, page: Page) -> AgentTaskRepositoryResult<Vec<AgentTask>> {
        let limit = i64::try_from(page.limit).map_err(AgentTaskRepositoryError::persistence)?;
        let offset = i64::try_from(page.offset).map_err(AgentTaskRepositoryError::persistence)?;

        self.run_blocking(move |connection| {
            let rows = agent_tasks::table
                .order(agent_tasks::seq.desc())
                .limit(limit)
                .offset(offset)
                .select(AgentTaskRow::as_select())
                .load::<AgentTaskRow>(connection)
                .map_err(AgentTaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn append_action(
        &self,
        action: NewAgentAction,
    ) -> AgentTaskRepositoryResult<AgentAction> {
        let task_id = action.task_id;
        let new_row = NewAgentActionRow {
            task_id: task_id.into_inner(),
            action_type: action.action_type.as_str().to_owned(),
            payload: action.payload.clone(),
            created_at: action.created_at,
        };

        self.run_blocking(move |connection| {
            let id = diesel::insert_into(agent_actions::table)
                .values(&new_row)
                .returning(agent_actions::id)
                .get_result::<i64>(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                        AgentTaskRepositoryError::NotFound(task_id)
                    }
                    _ => AgentTaskRepositoryError::persistence(err),
                })?;
            Ok(AgentAction::assign(ActionId::new(id), action))
        })
        .await
    }

    async fn list_actions(
        &self,
        task_id: AgentTaskId,
    ) -> AgentTaskRepositoryResult<Vec<AgentAction>> {
        self.run_blocking(move |connection| {
            let rows = agent_actions::table
                .filter(agent_actions::task_id.eq(task_id.into_inner()))
                .order(agent_actions::id.asc())
                .select(AgentActionRow::as_select())
                .load::<AgentActionRow>(connection)
                .map_err(AgentTaskRepositoryError::persistence)?;
            Ok(rows.into_iter().map(row_to_action).collect())
        })
        .await
    }
}

fn result_to_value(
    result: Option<&TaskResult>,
) -> AgentTaskRepositoryResult<Option<serde_json::Value>> {
    result
        .map(serde_json::to_value)
        .transpose()
        .map_err(AgentTaskRepositoryError::persistence)
}

pub(crate) fn to_new_row(task: &AgentTask) -> AgentTaskRepositoryResult<NewAgentTaskRow> {
    Ok(NewAgentTaskRow {
        id: task.id().into_inner(),
        kind: task.kind().as_str().to_owned(),
        pipeline_id: task.pipeline_id().as_str().to_owned(),
        status: task.status().as_str().to_owned(),
        result: result_to_value(task.result())?,
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    })
}

pub(crate) fn row_to_task(row: AgentTaskRow) -> AgentTaskRepositoryResult<AgentTask> {
    let AgentTaskRow {
        id,
        kind: persisted_kind,
        pipeline_id: persisted_pipeline_id,
        status: persisted_status,
        result: persisted_result,
        created_at,
        updated_at,
    } = row;

    let kind = AgentTaskKind::try_from(persisted_kind.as_str())
        .map_err(AgentTaskRepositoryError::persistence)?;
    let status = AgentTaskStatus::try_from(persisted_status.as_str())
        .map_err(AgentTaskRepositoryError::persistence)?;
    let pipeline_id =
        PipelineId::new(persisted_pipeline_id).map_err(AgentTaskRepositoryError::persistence)?;
    let result = persisted_result
        .map(serde_json::from_value::<TaskResult>)
        .transpose()
        .map_err(AgentTaskRepositoryError::persistence)?;

    Ok(AgentTask::from_persisted(PersistedAgentTaskData {
        id: AgentTaskId::from_uuid(id),
        kind,
        pipeline_id,
        status,
        result,
        created_at,
        updated_at,
    }))
}

pub(crate) fn row_to_action(row: AgentActionRow) -> AgentAction {
    AgentAction::assign(
        ActionId::new(row.id),
        NewAgentAction {
            task_id: AgentTaskId::from_uuid(row.task_id),
            action_type: ActionType::from(row.action_type),
            payload: row.payload,
            created_at: row.created_at,
        },
    )
}
