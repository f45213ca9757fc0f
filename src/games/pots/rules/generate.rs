//! Random pot rows for new games.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Inclusive range of values a generated pot may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotRange {
    /// Smallest pot value.
    pub min: u32,
    /// Largest pot value.
    pub max: u32,
}

impl Default for PotRange {
    fn default() -> Self {
        Self { min: 1, max: 9 }
    }
}

/// Generates `count` pot values uniformly from `range`.
#[instrument(skip(rng))]
pub fn generate_pots<R: Rng + ?Sized>(count: usize, range: PotRange, rng: &mut R) -> Vec<u32> {
    (0..count).map(|_| rng.random_range(range.min..=range.max)).collect()
}
