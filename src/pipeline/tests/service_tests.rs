//! Service tests for log ingestion and one-shot analysis.

use crate::diagnosis::{
    adapters::{RemoteRootCauseProvider, UNCONFIGURED_ROOT_CAUSE},
    domain::Confidence,
    ports::MockChatCompletionClient,
};
use crate::pipeline::{
    adapters::memory::{InMemoryAnalysisHistory, InMemoryLogStore, InMemoryPipelineRegistry},
    domain::{LogQuery, PipelineDomainError, PipelineId, PipelineStatus},
    services::{
        IngestLogsRequest, LogIngestionService, PipelineAnalysisService, PipelineServiceError,
    },
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use std::sync::Arc;

type TestIngestion =
    LogIngestionService<InMemoryLogStore, InMemoryPipelineRegistry<DefaultClock>, DefaultClock>;
type TestAnalysis = PipelineAnalysisService<InMemoryLogStore, InMemoryAnalysisHistory, DefaultClock>;

struct Harness {
    ingestion: TestIngestion,
    logs: Arc<InMemoryLogStore>,
}

impl Harness {
    fn analysis(&self, provider: RemoteRootCauseProvider) -> TestAnalysis {
        PipelineAnalysisService::new(
            Arc::clone(&self.logs),
            Arc::new(InMemoryAnalysisHistory::new()),
            Arc::new(provider),
            Arc::new(DefaultClock),
        )
    }
}

#[fixture]
fn harness() -> Harness {
    let logs = Arc::new(InMemoryLogStore::new());
    let clock = Arc::new(DefaultClock);
    let registry = Arc::new(InMemoryPipelineRegistry::new(Arc::clone(&clock)));
    Harness {
        ingestion: LogIngestionService::new(Arc::clone(&logs), registry, clock),
        logs,
    }
}

fn pipeline(id: &str) -> PipelineId {
    PipelineId::new(id).expect("valid pipeline id")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn ingest_registers_pipeline_and_stores_logs(harness: Harness) {
    harness
        .ingestion
        .ingest(IngestLogsRequest::new("ci-7", "Build succeeded").with_name("Nightly"))
        .await
        .expect("ingest succeeds");

    let pipelines = harness.ingestion.pipelines().await.expect("list succeeds");
    assert_eq!(pipelines.len(), 1);
    let registered = pipelines.first().expect("one pipeline");
    assert_eq!(registered.name(), "Nightly");
    assert_eq!(registered.status(), PipelineStatus::Unknown);

    let entries = harness
        .ingestion
        .logs(&pipeline("ci-7"), &LogQuery::default())
        .await
        .expect("query succeeds");
    assert_eq!(entries.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn terminal_statuses_update_success_rate(harness: Harness) {
    for status in [PipelineStatus::Success, PipelineStatus::Failed] {
        harness
            .ingestion
            .ingest(IngestLogsRequest::new("ci-8", "run finished").with_status(status))
            .await
            .expect("ingest succeeds");
    }
    harness
        .ingestion
        .ingest(IngestLogsRequest::new("ci-8", "run started").with_status(PipelineStatus::Running))
        .await
        .expect("ingest succeeds");

    let pipelines = harness.ingestion.pipelines().await.expect("list succeeds");
    let registered = pipelines.first().expect("one pipeline");
    assert_eq!(registered.status(), PipelineStatus::Running);
    assert!((registered.success_rate().value() - 0.5).abs() < f64::EPSILON);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn ingest_rejects_invalid_success_rate(harness: Harness) {
    let result = harness
        .ingestion
        .ingest(IngestLogsRequest::new("ci-9", "logs").with_success_rate(1.2))
        .await;

    assert!(matches!(
        result,
        Err(PipelineServiceError::Domain(
            PipelineDomainError::InvalidSuccessRate(_)
        ))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn analysis_without_logs_fails(harness: Harness) {
    let analysis = harness.analysis(RemoteRootCauseProvider::unconfigured("gpt-test"));

    let result = analysis.analyze_pipeline(&pipeline("empty")).await;

    assert!(matches!(result, Err(PipelineServiceError::NoLogs(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn analysis_is_recorded_and_retrievable(harness: Harness) {
    harness
        .ingestion
        .ingest(IngestLogsRequest::new("ci-10", "error: tests failed"))
        .await
        .expect("ingest succeeds");
    let analysis = harness.analysis(RemoteRootCauseProvider::unconfigured("gpt-test"));

    let record = analysis
        .analyze_pipeline(&pipeline("ci-10"))
        .await
        .expect("analysis succeeds");
    let latest = analysis
        .latest_analysis(&pipeline("ci-10"))
        .await
        .expect("lookup succeeds");

    assert_eq!(record.diagnostic.root_cause, UNCONFIGURED_ROOT_CAUSE);
    assert_eq!(record.diagnostic.confidence, Confidence::Low);
    assert_eq!(latest, Some(record));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn analysis_samples_twenty_most_recent_entries(harness: Harness) {
    for index in 0..25 {
        harness
            .ingestion
            .ingest(IngestLogsRequest::new("ci-11", format!("entry-{index:02}")))
            .await
            .expect("ingest succeeds");
    }
    let mut client = MockChatCompletionClient::new();
    client
        .expect_complete()
        .withf(|request| {
            request.messages.last().is_some_and(|message| {
                message.content.contains("entry-24\n\nentry-23")
                    && message.content.contains("entry-05")
                    && !message.content.contains("entry-04")
            })
        })
        .times(1)
        .returning(|_| Ok(r#"{"root_cause": "r", "fix": "f", "confidence": "High"}"#.to_owned()));
    let analysis = harness.analysis(RemoteRootCauseProvider::new(Arc::new(client), "gpt-test"));

    let record = analysis
        .analyze_pipeline(&pipeline("ci-11"))
        .await
        .expect("analysis succeeds");

    assert_eq!(record.diagnostic.suggested_fix, "f");
    assert_eq!(record.diagnostic.confidence, Confidence::High);
}
