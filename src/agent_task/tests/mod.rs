
use crate::agent_task::domain::{AgentTask, AgentTaskKind};
use crate::pipeline::domain::PipelineId;
use mockable::DefaultClock;

pub(super) fn pipeline(id: &str) -> PipelineId {
    PipelineId::new(id).expect("valid pipeline id")
}

pub(super) fn queued_task(kind: AgentTaskKind, pipeline_id: &str) -> AgentTask {
    AgentTask::new(kind, pipeline(pipeline_id), &DefaultClock)
}
