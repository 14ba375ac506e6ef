//! # Throttler Metrics
//!
//! Prometheus metrics for monitoring event emission throttling.
//!
//! ## Usage
//!
//! Enable with the `metrics` feature:
//! ```toml
//! qc-18-event-throttling = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `throttler_decisions_total` - Counter of decisions (by reason, `skip` included)
//! - `throttler_online_validators` - Gauge of validators considered online

use crate::domain::EmissionDecision;

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{register_int_counter_vec, register_int_gauge, IntCounterVec, IntGauge};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Total throttling decisions, labeled by reason
    pub static ref DECISIONS: IntCounterVec = register_int_counter_vec!(
        "throttler_decisions_total",
        "Total number of event emission decisions",
        &["reason"]
    )
    .expect("Failed to create DECISIONS metric");

    /// Validators currently considered online by the local throttler
    pub static ref ONLINE_VALIDATORS: IntGauge = register_int_gauge!(
        "throttler_online_validators",
        "Number of validators considered online"
    )
    .expect("Failed to create ONLINE_VALIDATORS metric");
}

/// Record a throttling decision
#[cfg(feature = "metrics")]
pub fn record_decision(decision: &EmissionDecision) {
    DECISIONS.with_label_values(&[decision.as_str()]).inc();
}

/// Record the number of online validators
#[cfg(feature = "metrics")]
pub fn record_online_validators(count: usize) {
    ONLINE_VALIDATORS.set(i64::try_from(count).unwrap_or(i64::MAX));
}

// No-op implementations when metrics feature is disabled
#[cfg(not(feature = "metrics"))]
pub fn record_decision(_decision: &EmissionDecision) {}

#[cfg(not(feature = "metrics"))]
pub fn record_online_validators(_count: usize) {}
