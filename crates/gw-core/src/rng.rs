//! Random number generation for world building
//!
//! Uses a seeded ChaCha RNG so that a seed fully determines a world. The
//! generation phases consume draws in a fixed order; that order is part of
//! the determinism contract, so nothing here may be reordered lightly.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seeded random stream driving world generation
#[derive(Debug, Clone)]
pub struct WorldRng {
    rng: ChaCha8Rng,
    seed: u64,
}

impl WorldRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a new RNG with a random seed
    pub fn from_entropy() -> Self {
        let seed = rand::random();
        Self::new(seed)
    }

    /// Get the seed used to create this RNG
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns a uniform value in `[0, bound)`.
    ///
    /// Panics if `bound` is zero; every caller derives its bound from grid
    /// and room dimensions that are checked up front.
    pub fn below(&mut self, bound: u32) -> u32 {
        assert!(bound > 0, "random bound must be positive");
        self.rng.gen_range(0..bound)
    }
}
