//! Validator snapshot
//!
//! An immutable, epoch-scoped view of the validator set. The canonical
//! order (weight descending, ties by ascending id) is established once at
//! build time, so every algorithm walking [`Validators::sorted_ids`] sees
//! the same sequence no matter how the set was assembled.

use super::errors::{ThrottlerError, ThrottlerResult};
use super::value_objects::{ValidatorId, Weight, MAX_TOTAL_WEIGHT};
use std::collections::{BTreeMap, HashMap};

/// Validator set with stake information
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Validators {
    /// Validators in canonical order
    sorted: Vec<(ValidatorId, Weight)>,
    total_weight: Weight,
    /// Quick lookup by validator ID
    lookup: HashMap<ValidatorId, usize>,
}

impl Validators {
    /// Start building a new snapshot
    pub fn builder() -> ValidatorsBuilder {
        ValidatorsBuilder::default()
    }

    /// Snapshot without any validator
    pub fn empty() -> Self {
        Self::default()
    }

    fn from_sorted(sorted: Vec<(ValidatorId, Weight)>) -> Self {
        let total_weight = sorted.iter().map(|(_, weight)| *weight).sum();
        let lookup = sorted
            .iter()
            .enumerate()
            .map(|(i, (id, _))| (*id, i))
            .collect();
        Self {
            sorted,
            total_weight,
            lookup,
        }
    }

    /// Get the number of validators
    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    /// Check if a validator is in the set
    pub fn contains(&self, id: ValidatorId) -> bool {
        self.lookup.contains_key(&id)
    }

    /// Weight of a validator, 0 for unknown validators
    pub fn get(&self, id: ValidatorId) -> Weight {
        self.lookup
            .get(&id)
            .map(|&idx| self.sorted[idx].1)
            .unwrap_or(0)
    }

    /// Sum of all weights
    pub fn total_weight(&self) -> Weight {
        self.total_weight
    }

    /// Validator IDs in ascending order
    pub fn ids(&self) -> Vec<ValidatorId> {
        let mut ids: Vec<_> = self.sorted.iter().map(|(id, _)| *id).collect();
        ids.sort_unstable();
        ids
    }

    /// Validator IDs in canonical order: weight descending, then id ascending
    pub fn sorted_ids(&self) -> impl Iterator<Item = ValidatorId> + '_ {
        self.sorted.iter().map(|(id, _)| *id)
    }

    /// `(id, weight)` pairs in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (ValidatorId, Weight)> + '_ {
        self.sorted.iter().copied()
    }

    /// Subset of this snapshot keeping the validators accepted by `keep`.
    ///
    /// The canonical order of the retained validators is unchanged.
    pub fn filter(&self, mut keep: impl FnMut(ValidatorId) -> bool) -> Self {
        let sorted = self
            .sorted
            .iter()
            .copied()
            .filter(|(id, _)| keep(*id))
            .collect();
        Self::from_sorted(sorted)
    }
}

/// Builder for [`Validators`] snapshots
#[derive(Clone, Debug, Default)]
pub struct ValidatorsBuilder {
    weights: BTreeMap<ValidatorId, Weight>,
}

impl ValidatorsBuilder {
    /// Set the weight of a validator. A zero weight removes it.
    pub fn set(&mut self, id: ValidatorId, weight: Weight) -> &mut Self {
        if weight == 0 {
            self.weights.remove(&id);
        } else {
            self.weights.insert(id, weight);
        }
        self
    }

    /// Freeze the collected weights into a snapshot
    pub fn build(&self) -> ThrottlerResult<Validators> {
        let total = self
            .weights
            .values()
            .fold(0 as Weight, |acc, w| acc.saturating_add(*w));
        if total > MAX_TOTAL_WEIGHT {
            return Err(ThrottlerError::TotalWeightOverflow {
                total,
                max: MAX_TOTAL_WEIGHT,
            });
        }

        let mut sorted: Vec<_> = self.weights.iter().map(|(id, w)| (*id, *w)).collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        Ok(Validators::from_sorted(sorted))
    }
}

impl FromIterator<(ValidatorId, Weight)> for ValidatorsBuilder {
    fn from_iter<I: IntoIterator<Item = (ValidatorId, Weight)>>(iter: I) -> Self {
        let mut builder = Self::default();
        for (id, weight) in iter {
            builder.set(id, weight);
        }
        builder
    }
}
