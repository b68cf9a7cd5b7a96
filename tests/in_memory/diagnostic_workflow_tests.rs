//! In-memory integration tests for log ingestion feeding agent task runs.

use super::helpers::{Workbench, workbench};
use pipeline_copilot::agent_task::{
    domain::{AgentTaskKind, AgentTaskStatus, TaskResult},
    ports::Page,
    services::CreateAgentTaskRequest,
};
use pipeline_copilot::diagnosis::domain::Severity;
use pipeline_copilot::pipeline::{
    domain::{LogQuery, PipelineId, PipelineStatus},
    services::IngestLogsRequest,
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn ingested_failure_logs_drive_high_severity_triage(
    workbench: Workbench,
) -> eyre::Result<()> {
    workbench
        .ingestion
        .ingest(
            IngestLogsRequest::new("deploy-9", "Step 3/5 FAILED: integration tests")
                .with_status(PipelineStatus::Failed),
        )
        .await?;
    let orchestrator = workbench.orchestrator(None);

    let task = orchestrator
        .create_task(CreateAgentTaskRequest::new(AgentTaskKind::Triage, "deploy-9"))
        .await?;

    eyre::ensure!(task.status() == AgentTaskStatus::Completed);
    eyre::ensure!(matches!(
        task.result(),
        Some(TaskResult::Triage(report)) if report.severity == Severity::High
    ));
    let pipelines = workbench.ingestion.pipelines().await?;
    let pipeline = pipelines
        .first()
        .ok_or_else(|| eyre::eyre!("expected the ingested pipeline"))?;
    eyre::ensure!(pipeline.status() == PipelineStatus::Failed);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn every_kind_leaves_a_complete_trail(workbench: Workbench) -> eyre::Result<()> {
    workbench
        .ingestion
        .ingest(IngestLogsRequest::new("nightly", "Build succeeded"))
        .await?;
    let orchestrator = workbench.orchestrator(None);

    for kind in [AgentTaskKind::Triage, AgentTaskKind::Rca, AgentTaskKind::Fix] {
        let task = orchestrator
            .create_task(CreateAgentTaskRequest::new(kind, "nightly"))
            .await?;
        let actions = orchestrator.list_actions(task.id()).await?;
        let labels: Vec<_> = actions
            .iter()
            .map(|action| action.action_type().as_str())
            .collect();
        eyre::ensure!(
            labels.first() == Some(&"start") && labels.len() == 2,
            "unexpected trail for {kind}: {labels:?}"
        );
        eyre::ensure!(task.status().is_terminal());
    }

    let listed = orchestrator.list_tasks(Page::default()).await?;
    let kinds: Vec<_> = listed.iter().map(|task| task.kind()).collect();
    eyre::ensure!(
        kinds == [AgentTaskKind::Fix, AgentTaskKind::Rca, AgentTaskKind::Triage],
        "unexpected listing order: {kinds:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn ingestion_keeps_logs_newest_first(workbench: Workbench) -> eyre::Result<()> {
    for line in ["checkout", "compile", "test"] {
        workbench
            .ingestion
            .ingest(IngestLogsRequest::new("ci-1", line))
            .await?;
    }

    let pipeline_id = PipelineId::new("ci-1")?;
    let entries = workbench
        .ingestion
        .logs(&pipeline_id, &LogQuery::latest(2))
        .await?;

    let contents: Vec<_> = entries.iter().map(|entry| entry.content.as_str()).collect();
    eyre::ensure!(contents == ["test", "compile"], "unexpected order: {contents:?}");
    Ok(())
}
