//! Adapter implementations for the agent task repository port.

pub mod memory;
pub mod postgres;
