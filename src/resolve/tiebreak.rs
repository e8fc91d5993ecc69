//! Injectable random choice for equal-creation-time conflicts.
//!
//! The random survivor pick is genuine nondeterminism in the resolution
//! policy, kept behind a trait rather than silently made deterministic.
//! Production uses an OS-seeded [`RandomTieBreaker`]; tests seed it or
//! supply a fixed implementation to pin outcomes.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Chooses the survivor of a same-creation-time conflict.
pub trait TieBreaker {
    /// Returns true to keep the first of the pair, false to keep the second.
    fn keep_first(&mut self) -> bool;
}

/// Uniform random tie breaker backed by [`StdRng`].
#[derive(Debug)]
pub struct RandomTieBreaker {
    rng: StdRng,
}

impl RandomTieBreaker {
    /// Create a tie breaker seeded from the operating system.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Create a reproducible tie breaker from a fixed seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomTieBreaker {
    fn default() -> Self {
        Self::new()
    }
}

impl TieBreaker for RandomTieBreaker {
    fn keep_first(&mut self) -> bool {
        self.rng.random_bool(0.5)
    }
}
