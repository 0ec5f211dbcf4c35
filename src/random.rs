//! Seedable random source shared by every stochastic operation.
//!
//! The engine never reaches for a global generator: initialization,
//! crossover, mutation, tournament selection and dataset shuffling all take
//! an explicit `&mut R: Rng`. [`create_rng`] is the one place a generator is
//! built, so a seed fully determines a single-threaded run.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates the crate's standard generator from a 64-bit seed.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Creates a generator from `seed`, or from a fresh random seed when `None`.
pub fn rng_from_option(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => create_rng(seed),
        None => create_rng(rand::random()),
    }
}
