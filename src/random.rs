//! Explicit pseudo-random sources.
//!
//! Every stochastic operator and solver takes `&mut R where R: Rng`; nothing
//! in the crate reaches for a global generator. Runners build a [`StdRng`]
//! from the seed in their configuration.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Creates a seeded generator.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Creates a generator from an optional seed.
///
/// `None` draws a fresh seed from the thread-local source, so two unseeded
/// runs are independent streams.
pub fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => create_rng(seed),
        None => create_rng(rand::random()),
    }
}

/// Draws a uniformly random binary vector of length `d`.
pub fn random_bits<R: Rng>(d: usize, rng: &mut R) -> Vec<bool> {
    (0..d).map(|_| rng.random_bool(0.5)).collect()
}
