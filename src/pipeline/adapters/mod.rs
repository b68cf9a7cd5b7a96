//! Adapter implementations for pipeline bookkeeping ports.

pub mod memory;
