//! Domain invariants for Event Throttling
//!
//! Checked in tests and, in debug builds, by the throttling service.

use super::entities::DominantSet;
use super::validators::Validators;
use super::value_objects::Weight;

/// INVARIANT-1: Dominant Coverage
/// The dominant set carries at least the needed stake, or it is the whole
/// validator set when that stake is unreachable.
pub fn invariant_dominant_coverage(
    set: &DominantSet,
    validators: &Validators,
    needed_stake: Weight,
) -> bool {
    let covered: Weight = set.iter().map(|id| validators.get(id)).sum();
    if covered >= needed_stake {
        return true;
    }
    set.len() == validators.len() && validators.ids().into_iter().all(|id| set.contains(id))
}

/// INVARIANT-2: Minimality
/// Removing the last member in canonical order drops the set below the
/// needed stake, i.e. the set is a shortest canonical prefix.
pub fn invariant_dominant_minimality(
    set: &DominantSet,
    validators: &Validators,
    needed_stake: Weight,
) -> bool {
    let prefix: Vec<_> = validators
        .sorted_ids()
        .take_while(|id| set.contains(*id))
        .collect();
    if prefix.len() != set.len() {
        // not a canonical prefix
        return false;
    }
    let Some((_, head)) = prefix.split_last() else {
        return true;
    };
    let without_last: Weight = head.iter().map(|id| validators.get(*id)).sum();
    without_last < needed_stake
}
