//! Outbound Ports (Driven Ports / SPI)
//!
//! What the throttler needs from the rest of the node. All of it is
//! read-only: the throttler never mutates the world it observes.

use crate::config::ThrottlerConfig;
use crate::domain::{Epoch, EventHeader, ValidatorId, Validators};
use std::sync::Arc;

/// Economy parameters relevant for emission
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EconomyRules {
    /// Number of blocks a validator may miss before being considered inactive
    pub block_missed_slack: u64,
}

impl Default for EconomyRules {
    fn default() -> Self {
        Self {
            block_missed_slack: 50,
        }
    }
}

/// Network rules as seen by the throttler
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rules {
    pub economy: EconomyRules,
}

/// World state needed to make throttling decisions
///
/// Implementations must hand out coherent snapshots: a single call never
/// observes a half-applied epoch transition.
pub trait WorldReader {
    /// Current network rules
    fn get_rules(&self) -> Rules;

    /// Validator snapshot of the current epoch
    fn get_epoch_validators(&self) -> (Arc<Validators>, Epoch);

    /// Most recent event known from `id` in the current epoch
    fn get_last_event(&self, id: ValidatorId) -> Option<EventHeader>;
}

impl<T: WorldReader + ?Sized> WorldReader for &T {
    fn get_rules(&self) -> Rules {
        (**self).get_rules()
    }

    fn get_epoch_validators(&self) -> (Arc<Validators>, Epoch) {
        (**self).get_epoch_validators()
    }

    fn get_last_event(&self, id: ValidatorId) -> Option<EventHeader> {
        (**self).get_last_event(id)
    }
}

impl<T: WorldReader + ?Sized> WorldReader for Arc<T> {
    fn get_rules(&self) -> Rules {
        (**self).get_rules()
    }

    fn get_epoch_validators(&self) -> (Arc<Validators>, Epoch) {
        (**self).get_epoch_validators()
    }

    fn get_last_event(&self, id: ValidatorId) -> Option<EventHeader> {
        (**self).get_last_event(id)
    }
}

/// Source of validated throttler configuration
pub trait ConfigProvider {
    fn get_throttler_config(&self) -> ThrottlerConfig;
}
