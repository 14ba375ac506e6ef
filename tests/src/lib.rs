//! # Quantum-Chain Test Suite
//!
//! Unified test crate for the event throttling subsystem.
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── src/
//! │   ├── simulation.rs     # Lock-step DAG network of throttled validators
//! │   └── integration/      # Network-level scenarios
//! └── benches/              # Decision hot path benchmarks
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p qc-tests
//!
//! # With throttler logs
//! RUST_LOG=qc_18_event_throttling=debug cargo test -p qc-tests -- --nocapture
//!
//! # Benchmarks
//! cargo bench -p qc-tests
//! ```

pub mod integration;
