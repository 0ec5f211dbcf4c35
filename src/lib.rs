//! Genetic-algorithm search for a linear breast-tumor classifier.
//!
//! Evolves a linear discriminant (one integer gain per cytology feature plus
//! an offset) over labeled benign/malignant records:
//!
//! - **Data**: parsing of the Wisconsin breast-cancer format, datasets with
//!   label partitioning and random subsets, training/verification splits.
//! - **GA**: bit-level n-point crossover, per-bit mutation, tournament
//!   selection, elitism, and independent restarts, scored with an optional
//!   bias toward malignant records.
//! - **Report**: post-hoc evaluation on any split and CSV run logs.
//!
//! # Example
//!
//! ```ignore
//! use tumor_ga::data::{DataSplit, Dataset, SplitConfig};
//! use tumor_ga::ga::{GaConfig, GaRunner};
//! use tumor_ga::random::create_rng;
//!
//! let data = Dataset::load("breast-cancer-wisconsin.data.txt")?;
//! let split = DataSplit::new(data, &SplitConfig::default(), &mut create_rng(7))?;
//! let result = GaRunner::run(&split.training, &GaConfig::default().with_seed(7))?;
//! println!("{}", result.best);
//! ```

pub mod data;
pub mod error;
pub mod ga;
pub mod random;
pub mod report;

pub use error::{DataError, GaError};
