//! Given steps for agent task run BDD scenarios.

use super::world::{AgentTaskRunWorld, ScriptedCompletionClient, run_async};
use chrono::Utc;
use eyre::WrapErr;
use pipeline_copilot::pipeline::{domain::PipelineId, ports::PipelineLogStore};
use rstest_bdd_macros::given;
use std::sync::Arc;

#[given(r#"pipeline "{pipeline}" has the log "{content}""#)]
fn pipeline_has_log(
    world: &mut AgentTaskRunWorld,
    pipeline: String,
    content: String,
) -> Result<(), eyre::Report> {
    let pipeline_id = PipelineId::new(pipeline)?;
    run_async(world.logs.append(&pipeline_id, &content, Utc::now()))
        .wrap_err("seed pipeline log")?;
    Ok(())
}

#[given("no analysis credential is configured")]
fn no_analysis_credential(world: &mut AgentTaskRunWorld) {
    world.completion = None;
}

#[given(
    r#"the analysis provider wraps root cause "{root_cause}", fix "{fix}" and confidence "{confidence}" in a fenced block"#
)]
fn provider_answers_fenced(
    world: &mut AgentTaskRunWorld,
    root_cause: String,
    fix: String,
    confidence: String,
) -> Result<(), eyre::Report> {
    let body = serde_json::json!({
        "root_cause": root_cause,
        "fix": fix,
        "confidence": confidence,
    });
    let answer = format!("Sure! ```json\n{}\n```", serde_json::to_string(&body)?);
    world.completion = Some(Arc::new(ScriptedCompletionClient::new(answer)));
    Ok(())
}
