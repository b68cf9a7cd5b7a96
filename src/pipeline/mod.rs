//! CI/CD pipeline bookkeeping consumed by the diagnostic core.
//!
//! Pipelines report raw log text and run outcomes. This module stores those
//! logs, tracks pipeline identity and rolling success rates, and keeps a
//! history of one-shot root-cause analyses. Agent tasks read logs through
//! the [`ports::PipelineLogStore`] port.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Ingestion and analysis services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
