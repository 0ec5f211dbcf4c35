//! Candidate linear classifier.
//!
//! A [`Chromosome`] holds one signed 32-bit gain per feature plus an offset.
//! For crossover and mutation the gains and the offset are flattened into a
//! single genome of `F + 1` words (gains first, offset last) and handed to
//! the bit-level operators in [`operators`](super::operators).

use super::operators::{bit_flip_mutation, n_point_crossover, WORD_BITS};
use super::types::Fitness;
use rand::Rng;
use std::cmp::Ordering;
use std::fmt;

/// Default per-bit flip probability.
pub const DEFAULT_MUTATION_PROBABILITY: f64 = 1.0 / 100.0;

/// Gains and offset of a linear discriminant, with its cached fitness.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Chromosome {
    gains: Vec<i32>,
    offset: i32,
    fitness: Fitness,
}

impl Chromosome {
    /// Creates an unscored chromosome from explicit parameters.
    pub fn new(gains: Vec<i32>, offset: i32) -> Self {
        Self {
            gains,
            offset,
            fitness: Fitness::unscored(),
        }
    }

    /// Creates a chromosome whose every gain and offset is drawn uniformly
    /// over the full `i32` range.
    pub fn random<R: Rng>(feature_count: usize, rng: &mut R) -> Self {
        let gains = (0..feature_count).map(|_| rng.random::<i32>()).collect();
        let offset = rng.random::<i32>();
        Self::new(gains, offset)
    }

    /// Per-feature gains.
    pub fn gains(&self) -> &[i32] {
        &self.gains
    }

    /// Offset term.
    pub fn offset(&self) -> i32 {
        self.offset
    }

    /// Number of features this chromosome classifies.
    pub fn feature_count(&self) -> usize {
        self.gains.len()
    }

    /// Gains followed by the offset.
    pub fn to_vector(&self) -> Vec<i32> {
        let mut v = Vec::with_capacity(self.gains.len() + 1);
        v.extend_from_slice(&self.gains);
        v.push(self.offset);
        v
    }

    /// Total genome length in bits, `32 * (F + 1)`.
    pub fn genome_bits(&self) -> usize {
        (self.gains.len() + 1) * WORD_BITS
    }

    /// Cached fitness; [`Fitness::unscored`] until evaluated.
    pub fn fitness(&self) -> Fitness {
        self.fitness
    }

    /// Score component of the cached fitness.
    pub fn score(&self) -> i64 {
        self.fitness.score
    }

    /// Separation component of the cached fitness.
    pub fn separation(&self) -> f64 {
        self.fitness.separation
    }

    /// Stores a freshly computed fitness.
    pub fn set_fitness(&mut self, fitness: Fitness) {
        self.fitness = fitness;
    }

    /// Ranking comparator: `Less` when `self` ranks before `other`.
    ///
    /// Higher score first, then higher separation. Suitable for
    /// `sort_by`, which then yields best-first order.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other.fitness.cmp(&self.fitness)
    }

    /// n-point bitwise crossover producing a new, unscored child.
    ///
    /// Both parents are left untouched. The child copies from `self` until
    /// the first crossover point, then alternates at every point.
    ///
    /// # Panics
    /// Panics if the parents have different feature counts.
    pub fn crossover<R: Rng>(&self, other: &Self, points: usize, rng: &mut R) -> Self {
        assert_eq!(
            self.gains.len(),
            other.gains.len(),
            "parents must have equal length"
        );
        let child = n_point_crossover(&self.genome(), &other.genome(), points, rng);
        Self::from_genome(&child)
    }

    /// Flips each genome bit, offset included, with `probability`.
    ///
    /// The cached fitness is left as is; rescore after mutating.
    pub fn mutate<R: Rng>(&mut self, probability: f64, rng: &mut R) {
        let mut genome = self.genome();
        bit_flip_mutation(&mut genome, probability, rng);
        let (offset, gains) = genome
            .split_last()
            .expect("genome always holds the offset word");
        for (gain, &word) in self.gains.iter_mut().zip(gains) {
            *gain = word as i32;
        }
        self.offset = *offset as i32;
    }

    /// Flattened genome words: gains then offset, as raw bit patterns.
    pub fn genome(&self) -> Vec<u32> {
        self.gains
            .iter()
            .chain(std::iter::once(&self.offset))
            .map(|&w| w as u32)
            .collect()
    }

    /// Rebuilds an unscored chromosome from genome words.
    ///
    /// # Panics
    /// Panics if `words` is empty.
    pub fn from_genome(words: &[u32]) -> Self {
        let (offset, gains) = words
            .split_last()
            .expect("genome must contain at least the offset word");
        Self::new(gains.iter().map(|&w| w as i32).collect(), *offset as i32)
    }
}

impl fmt::Display for Chromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gains [")?;
        for (i, g) in self.gains.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{g}")?;
        }
        write!(f, "], offset {}", self.offset)
    }
}
