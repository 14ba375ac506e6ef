//! Domain entities for Event Throttling

use super::value_objects::{Epoch, EventId, EventSeq, Frame, ValidatorId};
use std::collections::BTreeSet;
use std::fmt;

/// The throttler's view of a DAG event.
///
/// Describes both the candidate the local emitter is about to broadcast and
/// the most recent event known from a peer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventHeader {
    /// Validator that created the event
    pub creator: ValidatorId,
    /// Epoch the event belongs to
    pub epoch: Epoch,
    /// Creator-local sequence number
    pub seq: EventSeq,
    /// Frame assigned by the consensus layer
    pub frame: Frame,
    /// Previous event of the same creator, `None` for the first event of an epoch
    pub self_parent: Option<EventId>,
    /// Number of transactions carried
    pub transaction_count: usize,
}

impl EventHeader {
    /// Create a header without self-parent, frame or transactions
    #[must_use]
    pub fn new(creator: ValidatorId, seq: EventSeq) -> Self {
        Self {
            creator,
            epoch: 0,
            seq,
            frame: 0,
            self_parent: None,
            transaction_count: 0,
        }
    }

    #[must_use]
    pub fn with_epoch(mut self, epoch: Epoch) -> Self {
        self.epoch = epoch;
        self
    }

    #[must_use]
    pub fn with_frame(mut self, frame: Frame) -> Self {
        self.frame = frame;
        self
    }

    #[must_use]
    pub fn with_self_parent(mut self, self_parent: EventId) -> Self {
        self.self_parent = Some(self_parent);
        self
    }

    #[must_use]
    pub fn with_transactions(mut self, count: usize) -> Self {
        self.transaction_count = count;
        self
    }

    /// First event of its creator in the epoch
    pub fn is_genesis(&self) -> bool {
        self.self_parent.is_none()
    }

    pub fn carries_transactions(&self) -> bool {
        self.transaction_count > 0
    }
}

/// Validators which cannot skip event emission
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DominantSet(BTreeSet<ValidatorId>);

impl DominantSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: ValidatorId) -> bool {
        self.0.insert(id)
    }

    pub fn contains(&self, id: ValidatorId) -> bool {
        self.0.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Members in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = ValidatorId> + '_ {
        self.0.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<ValidatorId> {
        self.iter().collect()
    }
}

impl FromIterator<ValidatorId> for DominantSet {
    fn from_iter<I: IntoIterator<Item = ValidatorId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Why an event must not be skipped
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EmitReason {
    /// Throttling is switched off
    ThrottlerDisabled,
    /// Transactions must never be delayed by throttling
    CarriesTransactions,
    /// First event of the validator in this epoch
    Genesis,
    /// Validator belongs to the dominant set
    DominantStake,
    /// Dominant validators are offline and this validator covers their stake
    StakeNotDominated,
    /// Validator has been silent long enough to risk being flagged offline
    Heartbeat,
    /// Frames stopped advancing while this validator was suppressed
    FrameStalled,
}

impl EmitReason {
    /// Stable label for logs and metrics
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ThrottlerDisabled => "throttler_disabled",
            Self::CarriesTransactions => "carries_transactions",
            Self::Genesis => "genesis",
            Self::DominantStake => "dominant_stake",
            Self::StakeNotDominated => "stake_not_dominated",
            Self::Heartbeat => "heartbeat",
            Self::FrameStalled => "frame_stalled",
        }
    }
}

impl fmt::Display for EmitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a throttling round
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EmissionDecision {
    /// The event can be dropped safely
    Skip,
    /// The event must be emitted
    Emit(EmitReason),
}

impl EmissionDecision {
    pub fn is_skip(&self) -> bool {
        matches!(self, Self::Skip)
    }

    pub fn should_emit(&self) -> bool {
        !self.is_skip()
    }

    /// Reason for emitting, `None` when skipping
    pub fn reason(&self) -> Option<EmitReason> {
        match self {
            Self::Skip => None,
            Self::Emit(reason) => Some(*reason),
        }
    }

    /// Stable label for logs and metrics
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Skip => "skip",
            Self::Emit(reason) => reason.as_str(),
        }
    }
}
