//! Pipeline copilot: diagnostic agent tasks for CI/CD pipelines.
//!
//! This crate tracks diagnostic attempts against CI/CD pipelines. An agent
//! task is created for a pipeline, run against the pipeline's recent logs
//! by a provider chosen from the task kind, and leaves an append-only
//! action trail describing what happened.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, APIs, etc.)
//!
//! # Modules
//!
//! - [`agent_task`]: Task state machine, task store, and the orchestrator
//! - [`diagnosis`]: Heuristic triage and remote root-cause analysis
//! - [`pipeline`]: Log storage, pipeline registry, and one-shot analysis

pub mod agent_task;
pub mod diagnosis;
pub mod pipeline;
