//! Inbound Ports (Driving Ports / API)
//!
//! What the emitter loop calls into.

use crate::domain::{EmissionDecision, EventHeader};

/// Event emission throttling API
///
/// Called synchronously by the emitter right before a candidate event would
/// be signed and broadcast.
pub trait EmissionThrottler {
    /// Decide whether `candidate` can be dropped without hurting liveness.
    ///
    /// Must be called once per emission attempt; every call advances the
    /// attempt counter.
    fn can_skip_event_emission(&mut self, candidate: &EventHeader) -> EmissionDecision;

    /// Discard attendance and attempt history, e.g. on epoch change
    fn reset(&mut self);
}
