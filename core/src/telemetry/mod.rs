//! telemetry/mod.rs
//! Byte and frame counters for readers and writers, with immutable snapshots.

pub mod counters;
pub mod snapshot;

pub use counters::*;
pub use snapshot::*;
