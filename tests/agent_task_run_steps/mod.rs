//! Step definitions for agent task run scenarios.

mod given;
mod then;
mod when;
pub mod world;
