//! In-memory integration tests for root-cause analysis through a
//! completion client.

use super::helpers::{MODEL, RecordingCompletionClient, Workbench, root_cause_provider, workbench};
use mockable::DefaultClock;
use pipeline_copilot::agent_task::{
    domain::{AgentTaskKind, AgentTaskStatus, TaskResult},
    services::CreateAgentTaskRequest,
};
use pipeline_copilot::diagnosis::{
    adapters::DEGRADED_ROOT_CAUSE,
    domain::{Confidence, DiagnosticResult},
    ports::CompletionError,
};
use pipeline_copilot::pipeline::{
    adapters::memory::InMemoryAnalysisHistory,
    domain::PipelineId,
    services::{IngestLogsRequest, PipelineAnalysisService},
};
use rstest::rstest;
use std::sync::Arc;

async fn ingest(workbench: &Workbench, pipeline_id: &str, lines: &[&str]) -> eyre::Result<()> {
    for line in lines {
        workbench
            .ingestion
            .ingest(IngestLogsRequest::new(pipeline_id, *line))
            .await?;
    }
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn root_cause_task_sends_one_json_mode_request(workbench: Workbench) -> eyre::Result<()> {
    ingest(&workbench, "p3", &["resolving deps", "error: linker `cc` not found"]).await?;
    let client = Arc::new(RecordingCompletionClient::answering(
        r#"{"rootCause": "missing C toolchain", "suggested_fix": "install build-essential", "confidence": "medium"}"#,
    ));
    let orchestrator = workbench.orchestrator(Some(Arc::clone(&client)));

    let task = orchestrator
        .create_task(CreateAgentTaskRequest::new(AgentTaskKind::Rca, "p3"))
        .await?;

    eyre::ensure!(task.status() == AgentTaskStatus::Completed);
    eyre::ensure!(
        task.result()
            == Some(&TaskResult::Rca(DiagnosticResult::new(
                "missing C toolchain",
                "install build-essential",
                Confidence::Medium,
            ))),
        "unexpected result: {:?}",
        task.result()
    );

    let requests = client.requests();
    eyre::ensure!(requests.len() == 1, "expected one request");
    let body = serde_json::to_value(
        requests
            .first()
            .ok_or_else(|| eyre::eyre!("missing request"))?,
    )?;
    eyre::ensure!(body["model"] == MODEL);
    eyre::ensure!(body["temperature"] == 0.2_f32);
    eyre::ensure!(body["response_format"]["type"] == "json_object");
    eyre::ensure!(body["messages"][0]["role"] == "system");
    eyre::ensure!(body["messages"][1]["role"] == "user");
    let prompt = body["messages"][1]["content"]
        .as_str()
        .ok_or_else(|| eyre::eyre!("user prompt is not text"))?;
    eyre::ensure!(
        prompt.contains("error: linker `cc` not found\n\nresolving deps"),
        "logs missing from prompt: {prompt}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn transport_failure_still_completes_with_degraded_result(
    workbench: Workbench,
) -> eyre::Result<()> {
    ingest(&workbench, "p4", &["job timed out"]).await?;
    let client = Arc::new(RecordingCompletionClient::failing(CompletionError::Status {
        status: 503,
        detail: "upstream unavailable".to_owned(),
    }));
    let orchestrator = workbench.orchestrator(Some(client));

    let task = orchestrator
        .create_task(CreateAgentTaskRequest::new(AgentTaskKind::Rca, "p4"))
        .await?;

    eyre::ensure!(task.status() == AgentTaskStatus::Completed);
    eyre::ensure!(matches!(
        task.result(),
        Some(TaskResult::Rca(diagnostic))
            if diagnostic.root_cause == DEGRADED_ROOT_CAUSE
                && diagnostic.confidence == Confidence::Low
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn one_shot_analysis_is_recorded_in_history(workbench: Workbench) -> eyre::Result<()> {
    ingest(&workbench, "p5", &["segfault in worker"]).await?;
    let client = Arc::new(RecordingCompletionClient::answering(
        "Here you go:\n{\"root_cause\": \"null deref\", \"fix\": \"guard pointer\"}\nThanks!",
    ));
    let analysis = PipelineAnalysisService::new(
        Arc::clone(&workbench.logs),
        Arc::new(InMemoryAnalysisHistory::new()),
        Arc::new(root_cause_provider(Some(client))),
        Arc::new(DefaultClock),
    );
    let pipeline_id = PipelineId::new("p5")?;

    let record = analysis.analyze_pipeline(&pipeline_id).await?;
    let latest = analysis.latest_analysis(&pipeline_id).await?;

    eyre::ensure!(record.diagnostic.root_cause == "null deref");
    eyre::ensure!(record.diagnostic.suggested_fix == "guard pointer");
    eyre::ensure!(record.diagnostic.confidence == Confidence::Low);
    eyre::ensure!(latest == Some(record));
    Ok(())
}
