//! Fitness value and its ranking contract.
//!
//! A chromosome's fitness is a pair: an integer `score` (the objective) and a
//! real `separation` (tie-breaker only). [`Fitness`] implements [`Ord`] so
//! that **greater is better**: higher score wins, and on equal scores the
//! higher separation wins. Two fitness values are equal only when both
//! components are exactly equal.

use std::cmp::Ordering;

/// Score carried by a chromosome that has not been evaluated yet.
pub const UNSCORED: i64 = i64::MIN;

/// Result of scoring a chromosome against a dataset.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fitness {
    /// Bias-weighted count of correct classifications.
    pub score: i64,

    /// Sum of label-adjusted linear values across the dataset.
    pub separation: f64,
}

impl Fitness {
    /// Creates a fitness value.
    pub fn new(score: i64, separation: f64) -> Self {
        Self { score, separation }
    }

    /// Fitness of an unevaluated chromosome; ranks below anything scored.
    pub fn unscored() -> Self {
        Self {
            score: UNSCORED,
            separation: 0.0,
        }
    }

    /// Returns `true` while the score still holds the sentinel.
    pub fn is_unscored(&self) -> bool {
        self.score == UNSCORED
    }
}

impl Default for Fitness {
    fn default() -> Self {
        Self::unscored()
    }
}

impl PartialEq for Fitness {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Fitness {}

impl PartialOrd for Fitness {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Fitness {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .cmp(&other.score)
            .then_with(|| self.separation.total_cmp(&other.separation))
    }
}
