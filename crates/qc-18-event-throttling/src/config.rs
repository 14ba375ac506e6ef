//! Configuration for the Event Throttling Subsystem

use crate::domain::{Attempt, ThrottlerError, ThrottlerResult};
use serde::{Deserialize, Serialize};

/// Lowest accepted dominant stake threshold
pub const MIN_DOMINANT_STAKE_THRESHOLD: f64 = 0.7;

/// Highest accepted dominant stake threshold
pub const MAX_DOMINANT_STAKE_THRESHOLD: f64 = 1.0;

/// Lowest accepted dominating timeout
pub const MIN_DOMINATING_TIMEOUT: Attempt = 2;

/// Event emission throttler configuration
///
/// Loaded once per epoch and validated before a throttler is built from it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThrottlerConfig {
    /// Enable throttling; when off every attempt emits
    pub enabled: bool,
    /// Share of total stake the dominant set must cover
    pub dominant_stake_threshold: f64,
    /// Attempts without progress before a dominant validator is considered offline
    pub dominating_timeout: Attempt,
    /// Attempts without progress before a suppressed validator is considered offline
    pub non_dominating_timeout: Attempt,
    /// Suppressed rounds without frame progress before forcing an emission (0 = off)
    pub frame_stall_timeout: Attempt,
}

impl Default for ThrottlerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            dominant_stake_threshold: 0.75,
            dominating_timeout: 3,
            non_dominating_timeout: 100,
            frame_stall_timeout: 10,
        }
    }
}

impl ThrottlerConfig {
    /// Check all values against their accepted ranges
    pub fn validate(&self) -> ThrottlerResult<()> {
        let threshold = self.dominant_stake_threshold;
        if !(MIN_DOMINANT_STAKE_THRESHOLD..=MAX_DOMINANT_STAKE_THRESHOLD).contains(&threshold) {
            return Err(ThrottlerError::InvalidDominantThreshold { threshold });
        }
        if self.dominating_timeout < MIN_DOMINATING_TIMEOUT {
            return Err(ThrottlerError::InvalidDominatingTimeout {
                timeout: self.dominating_timeout,
            });
        }
        Ok(())
    }

    /// Default configuration with throttling switched on
    #[must_use]
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            ..Self::default()
        }
    }
}
