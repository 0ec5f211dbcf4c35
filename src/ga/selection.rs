//! Tournament selection.
//!
//! Selection picks the parents for crossover. Only the integer score is
//! consulted here; separation is a ranking tie-breaker and plays no part in
//! parent choice.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use super::chromosome::Chromosome;
use rand::Rng;

/// Tournament selection: draw `k` members uniformly **with replacement** and
/// return the index of the highest-scoring one.
///
/// Ties go to the first member drawn. `k = 0` is treated as `k = 1`.
/// Higher `k` means stronger selection pressure.
///
/// # Complexity
/// O(k) per selection; the population does not need to be sorted.
///
/// # Panics
/// Panics if `population` is empty.
pub fn tournament<R: Rng>(population: &[Chromosome], k: usize, rng: &mut R) -> usize {
    assert!(
        !population.is_empty(),
        "cannot select from empty population"
    );
    let k = k.max(1);
    let n = population.len();

    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k {
        let idx = rng.random_range(0..n);
        if population[idx].score() > population[best_idx].score() {
            best_idx = idx;
        }
    }
    best_idx
}
