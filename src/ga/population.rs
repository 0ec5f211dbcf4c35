//! Bounded chromosome population with lazy ranking.
//!
//! Ranking is cached: `sorted` is cleared by every operation that can change
//! the order (adding a member, rescoring) and checked by every ranking
//! query, which sorts only when the flag is clear.

use super::chromosome::Chromosome;
use super::fitness::evaluate;
use super::selection::tournament;
use super::types::Fitness;
use crate::data::Dataset;
use crate::error::GaError;
use rand::Rng;

/// A generation of chromosomes, capped at `max_size`.
#[derive(Debug, Clone)]
pub struct Population {
    members: Vec<Chromosome>,
    max_size: usize,
    sorted: bool,
}

impl Population {
    /// Creates an empty population holding at most `max_size` chromosomes.
    pub fn new(max_size: usize) -> Self {
        Self {
            members: Vec::with_capacity(max_size),
            max_size,
            sorted: false,
        }
    }

    /// Creates a population filled to capacity with random chromosomes.
    pub fn random<R: Rng>(max_size: usize, feature_count: usize, rng: &mut R) -> Self {
        let members = (0..max_size)
            .map(|_| Chromosome::random(feature_count, rng))
            .collect();
        Self {
            members,
            max_size,
            sorted: false,
        }
    }

    /// Maximum number of members.
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Current number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` when the population has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns `true` when no further member can be added.
    pub fn is_full(&self) -> bool {
        self.members.len() >= self.max_size
    }

    /// Whether the cached ranking is current.
    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    /// Members in their current order (ranked only if [`is_sorted`](Self::is_sorted)).
    pub fn members(&self) -> &[Chromosome] {
        &self.members
    }

    /// Adds a member.
    ///
    /// Fails with [`GaError::CapacityExceeded`] when the population is
    /// already full, and with [`GaError::WidthMismatch`] when the gain count
    /// differs from the existing members. A rejected chromosome is not
    /// silently dropped.
    pub fn add(&mut self, chromosome: Chromosome) -> Result<(), GaError> {
        if self.is_full() {
            return Err(GaError::CapacityExceeded {
                max_size: self.max_size,
            });
        }
        if let Some(first) = self.members.first() {
            if first.feature_count() != chromosome.feature_count() {
                return Err(GaError::WidthMismatch {
                    expected: first.feature_count(),
                    found: chromosome.feature_count(),
                });
            }
        }
        self.members.push(chromosome);
        self.sorted = false;
        Ok(())
    }

    /// Members best first, sorting only if the cached order is stale.
    ///
    /// The sort is stable, so members that tie on both score and separation
    /// keep their insertion order.
    pub fn ranked(&mut self) -> &[Chromosome] {
        if !self.sorted {
            self.members.sort_by(Chromosome::rank_cmp);
            self.sorted = true;
        }
        &self.members
    }

    /// The `k` best members.
    pub fn best(&mut self, k: usize) -> Result<&[Chromosome], GaError> {
        if k > self.members.len() {
            return Err(GaError::NotEnoughChromosomes {
                requested: k,
                available: self.members.len(),
            });
        }
        Ok(&self.ranked()[..k])
    }

    /// Tournament selection over the current (possibly unsorted) members.
    ///
    /// See [`tournament`](super::selection::tournament); no sort is
    /// triggered.
    pub fn tournament_select<R: Rng>(&self, k: usize, rng: &mut R) -> Result<&Chromosome, GaError> {
        if self.members.is_empty() {
            return Err(GaError::EmptyPopulation);
        }
        Ok(&self.members[tournament(&self.members, k, rng)])
    }

    /// Scores every member against `dataset` and invalidates the ranking.
    ///
    /// All-or-nothing: on error no member is rescored and the cached
    /// ranking stays valid.
    pub fn score_all(&mut self, dataset: &Dataset, bias_factor: u32) -> Result<(), GaError> {
        let scores = self
            .members
            .iter()
            .map(|member| evaluate(member, dataset, bias_factor))
            .collect::<Result<Vec<_>, _>>()?;
        self.commit_scores(scores);
        Ok(())
    }

    /// [`score_all`](Self::score_all) spread across the rayon thread pool.
    #[cfg(feature = "parallel")]
    pub fn par_score_all(&mut self, dataset: &Dataset, bias_factor: u32) -> Result<(), GaError> {
        use rayon::prelude::*;

        let scores = self
            .members
            .par_iter()
            .map(|member| evaluate(member, dataset, bias_factor))
            .collect::<Result<Vec<_>, _>>()?;
        self.commit_scores(scores);
        Ok(())
    }

    fn commit_scores(&mut self, scores: Vec<Fitness>) {
        for (member, fitness) in self.members.iter_mut().zip(scores) {
            member.set_fitness(fitness);
        }
        self.sorted = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::LabeledRecord;
    use crate::random::create_rng;

    fn scored(score: i64, separation: f64) -> Chromosome {
        let mut c = Chromosome::new(vec![score as i32, 0], 0);
        c.set_fitness(Fitness::new(score, separation));
        c
    }

    fn population_of(fitness: &[(i64, f64)]) -> Population {
        let mut pop = Population::new(fitness.len());
        for &(s, sep) in fitness {
            pop.add(scored(s, sep)).unwrap();
        }
        pop
    }

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            LabeledRecord::new(vec![9, 8], true).unwrap(),
            LabeledRecord::new(vec![8, 9], true).unwrap(),
            LabeledRecord::new(vec![1, 2], false).unwrap(),
            LabeledRecord::new(vec![2, 1], false).unwrap(),
        ])
        .unwrap()
    }

    #[test]
    fn test_add_beyond_capacity_fails() {
        let mut pop = Population::new(2);
        pop.add(scored(1, 0.0)).unwrap();
        pop.add(scored(2, 0.0)).unwrap();
        assert!(pop.is_full());
        assert_eq!(
            pop.add(scored(3, 0.0)),
            Err(GaError::CapacityExceeded { max_size: 2 })
        );
        assert_eq!(pop.len(), 2);
    }

    #[test]
    fn test_random_fills_to_capacity() {
        let mut rng = create_rng(42);
        let pop = Population::random(25, 9, &mut rng);
        assert_eq!(pop.len(), 25);
        assert!(pop.is_full());
        assert!(pop.members().iter().all(|c| c.feature_count() == 9));
        assert!(pop.members().iter().all(|c| c.fitness().is_unscored()));
    }

    #[test]
    fn test_ranked_orders_by_score_then_separation() {
        let mut pop = population_of(&[(1, 5.0), (4, -1.0), (4, 3.0), (2, 0.0)]);
        let order: Vec<(i64, f64)> = pop
            .ranked()
            .iter()
            .map(|c| (c.score(), c.separation()))
            .collect();
        assert_eq!(order, vec![(4, 3.0), (4, -1.0), (2, 0.0), (1, 5.0)]);
        assert!(pop.is_sorted());
    }

    #[test]
    fn test_ranked_is_stable_for_exact_ties() {
        let mut pop = Population::new(3);
        for gain in [10, 20, 30] {
            let mut c = Chromosome::new(vec![gain], 0);
            c.set_fitness(Fitness::new(1, 1.0));
            pop.add(c).unwrap();
        }
        let gains: Vec<i32> = pop.ranked().iter().map(|c| c.gains()[0]).collect();
        assert_eq!(gains, vec![10, 20, 30]);
    }

    #[test]
    fn test_add_invalidates_sort() {
        let mut pop = Population::new(3);
        pop.add(scored(1, 0.0)).unwrap();
        pop.add(scored(2, 0.0)).unwrap();
        pop.ranked();
        assert!(pop.is_sorted());
        pop.add(scored(9, 0.0)).unwrap();
        assert!(!pop.is_sorted());
        assert_eq!(pop.best(1).unwrap()[0].score(), 9);
    }

    #[test]
    fn test_best_k() {
        let mut pop = population_of(&[(3, 0.0), (7, 0.0), (5, 0.0)]);
        let best: Vec<i64> = pop.best(2).unwrap().iter().map(Chromosome::score).collect();
        assert_eq!(best, vec![7, 5]);
        assert!(pop.best(3).is_ok());
        assert_eq!(
            pop.best(4).unwrap_err(),
            GaError::NotEnoughChromosomes {
                requested: 4,
                available: 3
            }
        );
    }

    #[test]
    fn test_elite_clone_is_independent() {
        let mut rng = create_rng(5);
        let mut pop = population_of(&[(3, 0.0), (7, 0.0)]);
        let mut elite = pop.best(1).unwrap()[0].clone();
        elite.mutate(1.0, &mut rng);
        assert_eq!(pop.best(1).unwrap()[0].to_vector(), vec![7, 0, 0]);
        assert_ne!(elite.to_vector(), vec![7, 0, 0]);
    }

    #[test]
    fn test_tournament_select_does_not_sort() {
        let mut rng = create_rng(42);
        let pop = population_of(&[(3, 0.0), (7, 0.0), (5, 0.0)]);
        for _ in 0..50 {
            let winner = pop.tournament_select(2, &mut rng).unwrap();
            assert!(pop.members().iter().any(|c| std::ptr::eq(c, winner)));
        }
        assert!(!pop.is_sorted());
    }

    #[test]
    fn test_tournament_select_full_size_prefers_best() {
        let mut rng = create_rng(8);
        let pop = population_of(&[(1, 0.0), (2, 0.0), (100, 0.0)]);
        let mut wins = 0;
        for _ in 0..1000 {
            if pop.tournament_select(10, &mut rng).unwrap().score() == 100 {
                wins += 1;
            }
        }
        // 1 - (2/3)^10 ≈ 0.98
        assert!(wins > 950, "best won only {wins}/1000 tournaments");
    }

    #[test]
    fn test_tournament_select_empty() {
        let mut rng = create_rng(1);
        let pop = Population::new(4);
        assert_eq!(
            pop.tournament_select(3, &mut rng).unwrap_err(),
            GaError::EmptyPopulation
        );
    }

    #[test]
    fn test_score_all_sets_fitness_and_invalidates() {
        let mut pop = Population::new(2);
        pop.add(Chromosome::new(vec![1, 1], -10)).unwrap();
        pop.add(Chromosome::new(vec![-1, -1], 10)).unwrap();
        pop.ranked();

        pop.score_all(&dataset(), 1).unwrap();
        assert!(!pop.is_sorted());
        let scores: Vec<i64> = pop.members().iter().map(Chromosome::score).collect();
        assert_eq!(scores, vec![4, 0]);
        assert_eq!(pop.members()[0].separation(), 7.0 + 7.0 + 7.0 + 7.0);

        let best = pop.best(1).unwrap()[0].clone();
        assert_eq!(best.to_vector(), vec![1, 1, -10]);
    }

    #[test]
    fn test_add_rejects_other_width() {
        let mut pop = Population::new(3);
        pop.add(Chromosome::new(vec![1, 2], 0)).unwrap();
        assert_eq!(
            pop.add(Chromosome::new(vec![1, 2, 3], 0)),
            Err(GaError::WidthMismatch {
                expected: 2,
                found: 3
            })
        );
        assert_eq!(pop.len(), 1);
    }

    #[test]
    fn test_failed_rescore_keeps_ranking() {
        let mut pop = population_of(&[(100, 0.0), (50, 0.0)]);
        assert_eq!(pop.ranked()[0].score(), 100);

        // three features against two-gain chromosomes
        let wide = Dataset::from_records(vec![LabeledRecord::new(vec![1, 1, 1], true).unwrap()])
            .unwrap();
        assert_eq!(
            pop.score_all(&wide, 1),
            Err(GaError::FeatureCountMismatch {
                chromosome: 2,
                dataset: 3
            })
        );

        let scores: Vec<i64> = pop.members().iter().map(Chromosome::score).collect();
        assert_eq!(scores, vec![100, 50]);
        assert!(pop.is_sorted());
        assert_eq!(pop.best(1).unwrap()[0].score(), 100);
    }

    #[test]
    fn test_score_all_empty_dataset() {
        let mut rng = create_rng(1);
        let mut pop = Population::random(3, 2, &mut rng);
        assert_eq!(
            pop.score_all(&Dataset::new(), 1),
            Err(GaError::EmptyDataset)
        );
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_par_score_all_matches_sequential() {
        let mut rng = create_rng(77);
        let mut seq = Population::random(64, 2, &mut rng);
        let mut par = seq.clone();
        seq.score_all(&dataset(), 3).unwrap();
        par.par_score_all(&dataset(), 3).unwrap();
        let a: Vec<i64> = seq.members().iter().map(Chromosome::score).collect();
        let b: Vec<i64> = par.members().iter().map(Chromosome::score).collect();
        assert_eq!(a, b);
    }
}
