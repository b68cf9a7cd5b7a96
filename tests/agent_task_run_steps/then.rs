//! Then steps for agent task run BDD scenarios.

use super::world::{AgentTaskRunWorld, run_async};
use eyre::WrapErr;
use pipeline_copilot::agent_task::domain::{AgentTaskStatus, TaskResult};
use pipeline_copilot::diagnosis::domain::{Confidence, DiagnosticResult};
use rstest_bdd_macros::then;

fn root_cause_result(world: &AgentTaskRunWorld) -> Result<&DiagnosticResult, eyre::Report> {
    match world.task()?.result() {
        Some(TaskResult::Rca(diagnostic)) => Ok(diagnostic),
        other => Err(eyre::eyre!("expected root-cause result, got {other:?}")),
    }
}

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &AgentTaskRunWorld, status: String) -> Result<(), eyre::Report> {
    let expected = AgentTaskStatus::try_from(status.as_str())?;
    let actual = world.task()?.status();
    eyre::ensure!(actual == expected, "expected status {expected}, found {actual}");
    Ok(())
}

#[then(r#"the triage severity is "{severity}""#)]
fn triage_severity_is(world: &AgentTaskRunWorld, severity: String) -> Result<(), eyre::Report> {
    match world.task()?.result() {
        Some(TaskResult::Triage(report)) => {
            eyre::ensure!(
                report.severity.as_str() == severity,
                "expected severity {severity}, found {}",
                report.severity
            );
            Ok(())
        }
        other => Err(eyre::eyre!("expected triage result, got {other:?}")),
    }
}

#[then(r#"the task error is "{detail}""#)]
fn task_error_is(world: &AgentTaskRunWorld, detail: String) -> Result<(), eyre::Report> {
    let actual = world.task()?.result().and_then(TaskResult::error_detail);
    eyre::ensure!(
        actual == Some(detail.as_str()),
        "expected error {detail}, found {actual:?}"
    );
    Ok(())
}

#[then(r#"the diagnosis confidence is "{confidence}""#)]
fn diagnosis_confidence_is(
    world: &AgentTaskRunWorld,
    confidence: String,
) -> Result<(), eyre::Report> {
    let expected = Confidence::parse_label(&confidence)
        .ok_or_else(|| eyre::eyre!("invalid confidence in scenario: {confidence}"))?;
    let actual = root_cause_result(world)?.confidence;
    eyre::ensure!(actual == expected, "expected {expected}, found {actual}");
    Ok(())
}

#[then(r#"the root cause mentions "{fragment}""#)]
fn root_cause_mentions(world: &AgentTaskRunWorld, fragment: String) -> Result<(), eyre::Report> {
    let diagnostic = root_cause_result(world)?;
    eyre::ensure!(
        diagnostic.root_cause.contains(&fragment),
        "root cause {:?} does not mention {fragment:?}",
        diagnostic.root_cause
    );
    Ok(())
}

#[then(r#"the root cause is "{root_cause}""#)]
fn root_cause_is(world: &AgentTaskRunWorld, root_cause: String) -> Result<(), eyre::Report> {
    let actual = &root_cause_result(world)?.root_cause;
    eyre::ensure!(*actual == root_cause, "expected {root_cause:?}, found {actual:?}");
    Ok(())
}

#[then(r#"the suggested fix is "{fix}""#)]
fn suggested_fix_is(world: &AgentTaskRunWorld, fix: String) -> Result<(), eyre::Report> {
    let actual = &root_cause_result(world)?.suggested_fix;
    eyre::ensure!(*actual == fix, "expected {fix:?}, found {actual:?}");
    Ok(())
}

#[then(r#"the action trail is "{trail}""#)]
fn action_trail_is(world: &AgentTaskRunWorld, trail: String) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    let actions = run_async(world.service().list_actions(task_id)).wrap_err("list actions")?;
    let labels: Vec<_> = actions
        .iter()
        .map(|action| action.action_type().as_str())
        .collect();
    let expected: Vec<_> = trail.split(", ").collect();
    eyre::ensure!(labels == expected, "expected trail {expected:?}, found {labels:?}");
    Ok(())
}
