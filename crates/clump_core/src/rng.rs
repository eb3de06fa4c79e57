//! Deterministic random number generation.
//!
//! Same seed produces an identical sequence, so a replay with a fixed seed
//! spawns strays at the same spots on every run.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::ops::Range;

/// Seedable RNG wrapper used for spawn placement.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an RNG seeded from OS entropy. The chosen seed is kept so it can
    /// be logged and reused to reproduce a run.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform float in `[range.start, range.end)`. An empty range yields `range.start`.
    pub fn gen_range_f32(&mut self, range: Range<f32>) -> f32 {
        if range.is_empty() {
            return range.start;
        }
        self.inner.gen_range(range)
    }
}
