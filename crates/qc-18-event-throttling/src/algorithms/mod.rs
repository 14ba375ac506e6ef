//! Algorithms for Event Throttling

pub mod dominant_set;

pub use dominant_set::{compute_dominant_set, compute_needed_stake, dominant_stake};
