//! GA evolutionary loop execution.
//!
//! [`GaRunner`] drives the complete process across independent restarts:
//! random initialization → scoring → (elitism → tournament selection →
//! crossover → mutation → rescoring) per generation. The best chromosome of
//! each restart competes with the overall best under the ranking contract.

use super::chromosome::Chromosome;
use super::config::GaConfig;
use super::fitness::percent_correct;
use super::population::Population;
use crate::data::Dataset;
use crate::error::GaError;
use crate::random::rng_from_option;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Result of a GA run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaResult {
    /// Best chromosome over all restarts.
    pub best: Chromosome,

    /// Best chromosome of each restart, in restart order.
    pub restart_bests: Vec<Chromosome>,

    /// Per restart: best score of the initial population and after each
    /// generation.
    pub score_history: Vec<Vec<i64>>,

    /// Generations executed, summed over restarts.
    pub generations: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,
}

/// Executes the GA.
///
/// # Usage
///
/// ```ignore
/// let config = GaConfig::default().with_seed(42);
/// let result = GaRunner::run(&training, &config)?;
/// println!("best: {}", result.best);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA with a generator seeded from `config.seed`.
    pub fn run(training: &Dataset, config: &GaConfig) -> Result<GaResult, GaError> {
        Self::run_with_cancel(training, config, None)
    }

    /// Runs the GA drawing every random decision from `rng`.
    pub fn run_with_rng<R: Rng>(
        training: &Dataset,
        config: &GaConfig,
        rng: &mut R,
    ) -> Result<GaResult, GaError> {
        Self::execute(training, config, rng, None)
    }

    /// Runs the GA with an optional cancellation token.
    ///
    /// When the flag is set, the current restart stops at the next
    /// generation boundary, its best chromosome is still considered, and no
    /// further restarts run.
    pub fn run_with_cancel(
        training: &Dataset,
        config: &GaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GaResult, GaError> {
        let mut rng = rng_from_option(config.seed);
        Self::execute(training, config, &mut rng, cancel.as_deref())
    }

    /// Builds the next generation from a scored population.
    ///
    /// The `elite_count` best chromosomes are cloned in unchanged; the rest
    /// of the capacity is filled with mutated crossover children of two
    /// tournament winners. The returned population is unscored.
    pub fn next_generation<R: Rng>(
        current: &mut Population,
        config: &GaConfig,
        rng: &mut R,
    ) -> Result<Population, GaError> {
        let mut next = Population::new(config.population_size);

        // Elite carry-over by value
        for elite in current.best(config.elite_count)? {
            next.add(elite.clone())?;
        }

        while !next.is_full() {
            let parent1 = current.tournament_select(config.tournament_size, rng)?;
            let parent2 = current.tournament_select(config.tournament_size, rng)?;
            let mut child = parent1.crossover(parent2, config.crossover_points, rng);
            child.mutate(config.mutation_probability, rng);
            next.add(child)?;
        }

        Ok(next)
    }

    fn execute<R: Rng>(
        training: &Dataset,
        config: &GaConfig,
        rng: &mut R,
        cancel: Option<&AtomicBool>,
    ) -> Result<GaResult, GaError> {
        config.validate()?;
        let feature_count = training.feature_count().ok_or(GaError::EmptyDataset)?;

        let mut best: Option<Chromosome> = None;
        let mut restart_bests = Vec::with_capacity(config.restarts);
        let mut score_history = Vec::with_capacity(config.restarts);
        let mut generations = 0usize;
        let mut cancelled = false;

        for restart in 0..config.restarts {
            // 1. Initialize and score a fresh population
            let mut population = Population::random(config.population_size, feature_count, rng);
            score_population(&mut population, training, config)?;

            let mut history = Vec::with_capacity(config.max_generations + 1);
            history.push(population.best(1)?[0].score());

            // 2. Evolve
            for gen in 0..config.max_generations {
                if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                    cancelled = true;
                    break;
                }

                population = Self::next_generation(&mut population, config, rng)?;
                score_population(&mut population, training, config)?;

                let gen_best = population.best(1)?[0].score();
                history.push(gen_best);
                generations += 1;
                log::debug!(
                    "restart {} generation {}: best score {}",
                    restart + 1,
                    gen + 1,
                    gen_best
                );
            }

            // 3. Keep the best of this restart
            let restart_best = population.best(1)?[0].clone();
            log::info!(
                "after restart {}/{}: score {}, {:.2}% correct on the training set",
                restart + 1,
                config.restarts,
                restart_best.score(),
                percent_correct(&restart_best, training)?
            );

            if best
                .as_ref()
                .map_or(true, |b| restart_best.fitness() > b.fitness())
            {
                best = Some(restart_best.clone());
            }
            restart_bests.push(restart_best);
            score_history.push(history);

            if cancelled {
                log::warn!("run cancelled during restart {}", restart + 1);
                break;
            }
        }

        let best = best.ok_or(GaError::EmptyPopulation)?;
        Ok(GaResult {
            best,
            restart_bests,
            score_history,
            generations,
            cancelled,
        })
    }
}

/// Scores with rayon when requested and compiled in.
fn score_population(
    population: &mut Population,
    training: &Dataset,
    config: &GaConfig,
) -> Result<(), GaError> {
    #[cfg(feature = "parallel")]
    if config.parallel {
        return population.par_score_all(training, config.bias_factor);
    }
    population.score_all(training, config.bias_factor)
}

// ============================================================================
// Tests
// ============================================================================
