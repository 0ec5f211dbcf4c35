//! GA configuration.
//!
//! [`GaConfig`] holds every parameter of the evolutionary loop. Values are
//! passed explicitly to the runner; nothing is read from global state.

use super::chromosome::DEFAULT_MUTATION_PROBABILITY;
use crate::error::GaError;

/// Configuration for the tumor-classifier GA.
///
/// # Defaults
///
/// ```
/// use tumor_ga::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 1000);
/// assert_eq!(config.max_generations, 1000);
/// assert_eq!(config.restarts, 5);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use tumor_ga::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(200)
///     .with_tournament_size(10)
///     .with_bias_factor(3)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of chromosomes per generation (the population capacity).
    pub population_size: usize,

    /// Generations per restart.
    pub max_generations: usize,

    /// Independent restarts; the best chromosome across all of them wins.
    pub restarts: usize,

    /// Best chromosomes cloned unchanged into the next generation.
    pub elite_count: usize,

    /// Crossover points per recombination.
    pub crossover_points: usize,

    /// Per-bit flip probability (0.0–1.0).
    pub mutation_probability: f64,

    /// Chromosomes drawn per tournament.
    ///
    /// Higher values mean stronger selection pressure.
    pub tournament_size: usize,

    /// Extra weight of malignant records in the score (≥ 1).
    ///
    /// `1` scores plain accuracy.
    pub bias_factor: u32,

    /// Score with rayon when the `parallel` feature is enabled.
    ///
    /// Ignored otherwise.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 1000,
            max_generations: 1000,
            restarts: 5,
            elite_count: 5,
            crossover_points: 3,
            mutation_probability: DEFAULT_MUTATION_PROBABILITY,
            tournament_size: 20,
            bias_factor: 1,
            parallel: false,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations per restart.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the number of restarts.
    pub fn with_restarts(mut self, n: usize) -> Self {
        self.restarts = n;
        self
    }

    /// Sets the elite carry-over count.
    pub fn with_elite_count(mut self, n: usize) -> Self {
        self.elite_count = n;
        self
    }

    /// Sets the number of crossover points.
    pub fn with_crossover_points(mut self, n: usize) -> Self {
        self.crossover_points = n;
        self
    }

    /// Sets the per-bit mutation probability.
    pub fn with_mutation_probability(mut self, p: f64) -> Self {
        self.mutation_probability = p.clamp(0.0, 1.0);
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Sets the malignancy bias factor.
    pub fn with_bias_factor(mut self, bias: u32) -> Self {
        self.bias_factor = bias;
        self
    }

    /// Enables or disables parallel scoring.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), GaError> {
        let invalid = |msg: &str| -> Result<(), GaError> { Err(GaError::InvalidConfig(msg.into())) };
        if self.population_size < 2 {
            return invalid("population_size must be at least 2");
        }
        if self.max_generations == 0 {
            return invalid("max_generations must be at least 1");
        }
        if self.restarts == 0 {
            return invalid("restarts must be at least 1");
        }
        if self.elite_count >= self.population_size {
            return invalid("elite_count must be smaller than population_size");
        }
        if self.tournament_size == 0 {
            return invalid("tournament_size must be at least 1");
        }
        if self.bias_factor < 1 {
            return invalid("bias_factor must be at least 1");
        }
        if !(0.0..=1.0).contains(&self.mutation_probability) {
            return invalid("mutation_probability must be within [0, 1]");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GaConfig::default();
        assert_eq!(config.population_size, 1000);
        assert_eq!(config.max_generations, 1000);
        assert_eq!(config.restarts, 5);
        assert_eq!(config.elite_count, 5);
        assert_eq!(config.crossover_points, 3);
        assert!((config.mutation_probability - 0.01).abs() < 1e-12);
        assert_eq!(config.tournament_size, 20);
        assert_eq!(config.bias_factor, 1);
        assert!(!config.parallel);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = GaConfig::default()
            .with_population_size(200)
            .with_max_generations(50)
            .with_restarts(2)
            .with_elite_count(4)
            .with_crossover_points(1)
            .with_mutation_probability(0.05)
            .with_tournament_size(7)
            .with_bias_factor(3)
            .with_parallel(true)
            .with_seed(42);

        assert_eq!(config.population_size, 200);
        assert_eq!(config.max_generations, 50);
        assert_eq!(config.restarts, 2);
        assert_eq!(config.elite_count, 4);
        assert_eq!(config.crossover_points, 1);
        assert!((config.mutation_probability - 0.05).abs() < 1e-12);
        assert_eq!(config.tournament_size, 7);
        assert_eq!(config.bias_factor, 3);
        assert!(config.parallel);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_validate_ok() {
        assert!(GaConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_population_too_small() {
        let config = GaConfig::default().with_population_size(1).with_elite_count(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_elite_fills_population() {
        let config = GaConfig::default()
            .with_population_size(5)
            .with_elite_count(5);
        assert!(matches!(config.validate(), Err(GaError::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_zero_counts() {
        assert!(GaConfig::default().with_max_generations(0).validate().is_err());
        assert!(GaConfig::default().with_restarts(0).validate().is_err());
        assert!(GaConfig::default().with_tournament_size(0).validate().is_err());
        assert!(GaConfig::default().with_bias_factor(0).validate().is_err());
    }

    #[test]
    fn test_zero_crossover_points_allowed() {
        assert!(GaConfig::default().with_crossover_points(0).validate().is_ok());
    }

    #[test]
    fn test_clamp_mutation_probability() {
        assert_eq!(
            GaConfig::default()
                .with_mutation_probability(1.5)
                .mutation_probability,
            1.0
        );
        assert_eq!(
            GaConfig::default()
                .with_mutation_probability(-0.5)
                .mutation_probability,
            0.0
        );
    }

    #[test]
    fn test_validate_rejects_out_of_range_probability() {
        let mut config = GaConfig::default();
        config.mutation_probability = f64::NAN;
        assert!(config.validate().is_err());
    }
}
