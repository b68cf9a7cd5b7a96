//! Diagnostic providers that turn pipeline log text into findings.
//!
//! Two interchangeable strategies share the
//! [`ports::DiagnosticProvider`] contract:
//!
//! - [`adapters::HeuristicTriageProvider`] scans recent logs for failure
//!   markers and never fails.
//! - [`adapters::RemoteRootCauseProvider`] asks a chat-completion model for
//!   a root cause, repairs loosely formatted answers, and degrades to a
//!   low-confidence placeholder instead of surfacing transport or parse
//!   failures.
//!
//! Provider credentials and endpoints are described by [`config`].

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
