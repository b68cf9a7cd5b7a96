//! Agent task orchestration for pipeline diagnostics.
//!
//! An agent task is one tracked diagnostic attempt against a pipeline. The
//! orchestrator creates tasks in `queued`, runs them to completion, selects
//! a diagnostic provider by task kind, and records every step in an
//! append-only action trail. The module follows hexagonal architecture:
//!
//! - Domain types and the status state machine in [`domain`]
//! - The task store contract in [`ports`]
//! - In-memory and `PostgreSQL` task stores in [`adapters`]
//! - The orchestrator in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
