// src/engine/sequence.rs

use crate::engine::types::Observation;

/// Ascending by (year, month). The sort is stable, so equal slots keep the
/// order they were collected in.
pub fn sequence(mut observations: Vec<Observation>) -> Vec<Observation> {
    observations.sort_by_key(Observation::slot);
    observations
}
