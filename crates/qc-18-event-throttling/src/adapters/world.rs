//! Shared world state
//!
//! Snapshot store fed by the gossip layer and read by the throttlers of
//! the node. Cloning the handle shares the underlying state.

use crate::domain::{Epoch, EventHeader, ValidatorId, Validators};
use crate::ports::outbound::{Rules, WorldReader};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

struct WorldState {
    rules: Rules,
    validators: Arc<Validators>,
    epoch: Epoch,
    last_events: HashMap<ValidatorId, EventHeader>,
}

/// Cloneable handle to the node's view of the current epoch
#[derive(Clone)]
pub struct SharedWorld {
    inner: Arc<RwLock<WorldState>>,
}

impl SharedWorld {
    pub fn new(validators: Validators, epoch: Epoch, rules: Rules) -> Self {
        Self {
            inner: Arc::new(RwLock::new(WorldState {
                rules,
                validators: Arc::new(validators),
                epoch,
                last_events: HashMap::new(),
            })),
        }
    }

    /// Switch to a new epoch, replacing the validator snapshot and
    /// forgetting all events of the previous epoch.
    pub fn begin_epoch(&self, epoch: Epoch, validators: Validators) {
        let mut state = self.inner.write();
        info!(
            from = state.epoch,
            to = epoch,
            validators = validators.len(),
            total_weight = validators.total_weight(),
            "World entering new epoch"
        );
        state.epoch = epoch;
        state.validators = Arc::new(validators);
        state.last_events.clear();
    }

    /// Record an event observed on the network.
    ///
    /// Keeps the highest sequence number per creator; events of other
    /// epochs are ignored. Returns whether the event was recorded.
    pub fn observe_event(&self, event: &EventHeader) -> bool {
        let mut state = self.inner.write();
        if event.epoch != state.epoch {
            return false;
        }
        let newer = state
            .last_events
            .get(&event.creator)
            .map_or(true, |known| known.seq < event.seq);
        if newer {
            state.last_events.insert(event.creator, event.clone());
        }
        newer
    }

    pub fn set_rules(&self, rules: Rules) {
        self.inner.write().rules = rules;
    }

    pub fn epoch(&self) -> Epoch {
        self.inner.read().epoch
    }
}

impl WorldReader for SharedWorld {
    fn get_rules(&self) -> Rules {
        self.inner.read().rules
    }

    fn get_epoch_validators(&self) -> (Arc<Validators>, Epoch) {
        let state = self.inner.read();
        (Arc::clone(&state.validators), state.epoch)
    }

    fn get_last_event(&self, id: ValidatorId) -> Option<EventHeader> {
        self.inner.read().last_events.get(&id).cloned()
    }
}
