//! # Integration Tests
//!
//! Network-level scenarios for the event throttling subsystem.

pub mod throttling_simulation;
