//! Error types for Event Throttling
//!
//! The decision path itself is total. Errors only surface while building
//! inputs for it: configuration and validator snapshots.

use super::value_objects::{Attempt, Weight};
use thiserror::Error;

/// Errors raised before a throttler can be constructed
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ThrottlerError {
    /// Dominant stake threshold outside of [0.7, 1.0]
    #[error("Invalid dominant stake threshold: {threshold} is not within [0.7, 1.0]")]
    InvalidDominantThreshold { threshold: f64 },

    /// Dominating timeout too short to tolerate a single missed round
    #[error("Invalid dominating timeout: {timeout} < 2")]
    InvalidDominatingTimeout { timeout: Attempt },

    /// Validator snapshot exceeds the supported total weight
    #[error("Total validator weight {total} exceeds maximum {max}")]
    TotalWeightOverflow { total: Weight, max: Weight },
}

/// Result type for throttler construction
pub type ThrottlerResult<T> = Result<T, ThrottlerError>;
