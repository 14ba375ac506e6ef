//! Validator attendance tracking
//!
//! Classifies validators as online or offline from the progress of their
//! event sequence numbers. Sequence numbers rather than event hashes are
//! compared, so a forking validator still counts as producing something.
//!
//! Timeouts are asymmetric: dominant validators are expected to emit every
//! round and are flagged quickly, suppressed ones are expected to stay
//! silent for long stretches.

use super::entities::DominantSet;
use super::validators::Validators;
use super::value_objects::{Attempt, EventSeq, ValidatorId};
use crate::config::ThrottlerConfig;
use crate::ports::WorldReader;
use std::collections::HashMap;
use tracing::debug;

/// Online status of a single validator
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ValidatorAttendance {
    /// Highest sequence number observed so far
    pub last_seen_seq: EventSeq,
    /// Attempt at which `last_seen_seq` was first observed
    pub last_seen_at: Attempt,
    pub online: bool,
}

/// Attendance of every validator observed in the current epoch
#[derive(Clone, Debug, Default)]
pub struct AttendanceList {
    attendance: HashMap<ValidatorId, ValidatorAttendance>,
}

impl AttendanceList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attendance entry of `id`; unknown validators are offline
    pub fn get_or_default(&self, id: ValidatorId) -> ValidatorAttendance {
        self.attendance.get(&id).copied().unwrap_or_default()
    }

    pub fn is_online(&self, id: ValidatorId) -> bool {
        self.attendance.get(&id).is_some_and(|a| a.online)
    }

    /// Refresh every validator of the snapshot from the latest observed events.
    ///
    /// A validator without progress for longer than its timeout is latched
    /// offline and stays so until a strictly higher sequence number shows up.
    pub fn update_attendance<W: WorldReader + ?Sized>(
        &mut self,
        validators: &Validators,
        world: &W,
        config: &ThrottlerConfig,
        dominant_set: &DominantSet,
        attempt: Attempt,
    ) {
        for id in validators.sorted_ids() {
            let Some(last_event) = world.get_last_event(id) else {
                continue;
            };

            let mut attendance = self.get_or_default(id);

            let timeout = if dominant_set.contains(id) {
                config.dominating_timeout
            } else {
                config.non_dominating_timeout
            };

            if attendance.last_seen_seq >= last_event.seq {
                let online = attendance.online
                    && attendance.last_seen_at.saturating_add(timeout) > attempt;
                if attendance.online && !online {
                    debug!(
                        validator = id,
                        last_seen_seq = attendance.last_seen_seq,
                        last_seen_at = attendance.last_seen_at,
                        attempt,
                        "Validator considered offline"
                    );
                }
                attendance.online = online;
            } else {
                if !attendance.online && attendance.last_seen_seq > 0 {
                    debug!(validator = id, seq = last_event.seq, attempt, "Validator back online");
                }
                attendance = ValidatorAttendance {
                    last_seen_seq: last_event.seq,
                    last_seen_at: attempt,
                    online: true,
                };
            }

            self.attendance.insert(id, attendance);
        }
    }

    /// Number of validators currently considered online
    pub fn online_count(&self) -> usize {
        self.attendance.values().filter(|a| a.online).count()
    }

    /// Number of validators with an entry
    pub fn len(&self) -> usize {
        self.attendance.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attendance.is_empty()
    }

    pub fn clear(&mut self) {
        self.attendance.clear();
    }

    #[cfg(test)]
    pub(crate) fn insert(&mut self, id: ValidatorId, attendance: ValidatorAttendance) {
        self.attendance.insert(id, attendance);
    }
}
