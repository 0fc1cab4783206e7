//! Random sampling helpers shared by the generator and mutation.

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::models::EmployeeId;

/// Draws `k` distinct employees uniformly from `pool`.
///
/// Returns the whole pool (in random order) when `k >= pool.len()`.
pub(crate) fn sample_unique<R: Rng>(pool: &[EmployeeId], k: usize, rng: &mut R) -> Vec<EmployeeId> {
    pool.choose_multiple(rng, k).copied().collect()
}
