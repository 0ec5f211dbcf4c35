//! Genetic algorithm for evolving a linear tumor classifier.
//!
//! A [`Chromosome`] is a linear discriminant: one signed 32-bit gain per
//! feature plus an offset. The GA recombines chromosomes at bit granularity
//! across the flattened genome, flips bits independently, and ranks them by
//! a bias-weighted classification score with the summed discriminant value
//! ("separation") as tie-breaker.
//!
//! # Key Types
//!
//! - [`Chromosome`]: genome, genetic operators, cached fitness
//! - [`Fitness`]: (score, separation) with the ranking order
//! - [`Population`]: bounded generation with lazy ranking and selection
//! - [`GaConfig`]: algorithm parameters
//! - [`GaRunner`]: multi-restart evolutionary loop
//!
//! # Submodules
//!
//! - [`fitness`]: scoring and accuracy functions
//! - [`operators`]: bit-level n-point crossover and bit-flip mutation
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Wolberg & Mangasarian (1990), "Multisurface method of pattern separation
//!   for medical diagnosis applied to breast cytology"

mod chromosome;
mod config;
pub mod fitness;
pub mod operators;
mod population;
mod runner;
mod selection;
mod types;

pub use chromosome::{Chromosome, DEFAULT_MUTATION_PROBABILITY};
pub use config::GaConfig;
pub use population::Population;
pub use runner::{GaResult, GaRunner};
pub use selection::tournament;
pub use types::{Fitness, UNSCORED};
