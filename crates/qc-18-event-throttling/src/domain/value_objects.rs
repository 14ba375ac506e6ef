//! Value objects for Event Throttling
//!
//! Plain identifiers and counters shared by every layer of the subsystem.

use primitive_types::H256;

/// Validator identifier, unique within an epoch's validator set
pub type ValidatorId = u32;

/// Validator voting power (stake)
pub type Weight = u64;

/// Per-creator event sequence number (1 for the first event of an epoch)
pub type EventSeq = u32;

/// DAG frame number assigned by the consensus layer
pub type Frame = u32;

/// Validator-set epoch
pub type Epoch = u32;

/// Event hash
pub type EventId = H256;

/// Emission attempt counter.
///
/// Counts decision rounds of one throttler instance and drives all timeouts.
/// It is deliberately not wall-clock time.
pub type Attempt = u64;

/// Upper bound for the total weight of a validator snapshot.
///
/// Keeps `total * threshold` exact in `f64` and every stake sum far away
/// from `u64` overflow.
pub const MAX_TOTAL_WEIGHT: Weight = (u32::MAX / 2) as Weight;
