//! Dominant Set Calculation
//!
//! The dominant set is the shortest prefix of the canonical validator order
//! whose cumulative stake reaches the needed stake. Every node computes it
//! from the same epoch snapshot, so all of them agree on who must emit
//! without exchanging a single message about it.
//!
//! No sorting happens here: the order comes from [`Validators`] itself.

use crate::domain::{DominantSet, ValidatorId, Validators, Weight};

/// Compute the dominant set of validators whose cumulative stake meets or
/// exceeds `needed_stake`.
///
/// If the needed stake cannot be reached the full validator set is returned:
/// none of them can be skipped without undershooting even further.
pub fn compute_dominant_set(validators: &Validators, needed_stake: Weight) -> DominantSet {
    let mut set = DominantSet::new();
    let mut accumulated: Weight = 0;

    for (id, weight) in validators.iter() {
        if accumulated >= needed_stake {
            return set;
        }
        accumulated += weight;
        set.insert(id);
    }

    set
}

/// Stake needed to meet `threshold`, rounded up.
pub fn compute_needed_stake(total_stake: Weight, threshold: f64) -> Weight {
    // Float to int casts saturate, negative thresholds yield 0.
    (total_stake as f64 * threshold).ceil() as Weight
}

/// Cumulative stake of the given validators
pub fn dominant_stake<'a>(
    ids: impl IntoIterator<Item = &'a ValidatorId>,
    validators: &Validators,
) -> Weight {
    ids.into_iter().map(|id| validators.get(*id)).sum()
}
