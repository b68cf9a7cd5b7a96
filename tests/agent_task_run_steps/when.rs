//! When steps for agent task run BDD scenarios.

use super::world::{AgentTaskRunWorld, run_async};
use chrono::Utc;
use eyre::WrapErr;
use pipeline_copilot::agent_task::{domain::AgentTaskKind, services::CreateAgentTaskRequest};
use pipeline_copilot::pipeline::{domain::PipelineId, ports::PipelineLogStore};
use rstest_bdd_macros::when;

#[when(r#"a "{kind}" task is created for pipeline "{pipeline}""#)]
fn task_is_created(
    world: &mut AgentTaskRunWorld,
    kind: String,
    pipeline: String,
) -> Result<(), eyre::Report> {
    let task_kind = AgentTaskKind::try_from(kind.as_str())?;
    let created = run_async(
        world
            .service()
            .create_task(CreateAgentTaskRequest::new(task_kind, pipeline)),
    )
    .wrap_err("create agent task")?;
    world.last_task = Some(created);
    Ok(())
}

#[when("the task is run again")]
fn task_is_run_again(world: &mut AgentTaskRunWorld) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    let rerun = run_async(world.service().run_task(task_id)).wrap_err("re-run agent task")?;
    world.last_task = Some(rerun);
    Ok(())
}

#[when(r#"pipeline "{pipeline}" receives the log "{content}""#)]
fn pipeline_receives_log(
    world: &mut AgentTaskRunWorld,
    pipeline: String,
    content: String,
) -> Result<(), eyre::Report> {
    let pipeline_id = PipelineId::new(pipeline)?;
    run_async(world.logs.append(&pipeline_id, &content, Utc::now()))
        .wrap_err("append pipeline log")?;
    Ok(())
}
