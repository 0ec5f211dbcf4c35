//! Error types.
//!
//! [`GaError`] covers precondition failures inside the evolutionary engine;
//! [`DataError`] covers dataset ingestion and splitting. Both are
//! deterministic: every variant is the direct result of a violated
//! precondition and is never retried.

use std::path::PathBuf;

/// Errors raised by the GA engine (population, fitness, configuration).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GaError {
    #[error("population is full ({max_size} chromosomes)")]
    CapacityExceeded { max_size: usize },

    #[error("requested {requested} best chromosomes but the population holds {available}")]
    NotEnoughChromosomes { requested: usize, available: usize },

    #[error("cannot select from an empty population")]
    EmptyPopulation,

    #[error("cannot score against an empty dataset")]
    EmptyDataset,

    #[error("dataset contains no malignant records")]
    NoMalignantRecords,

    #[error("chromosome has {chromosome} gains but the dataset has {dataset} features")]
    FeatureCountMismatch { chromosome: usize, dataset: usize },

    #[error("chromosome has {found} gains but the population holds {expected}-gain chromosomes")]
    WidthMismatch { expected: usize, found: usize },

    #[error("invalid GA configuration: {0}")]
    InvalidConfig(String),
}

/// Errors raised while reading or splitting a dataset.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("feature value {value} at index {index} is outside 1..=10")]
    FeatureOutOfRange { index: usize, value: i64 },

    #[error("record has {found} features, dataset expects {expected}")]
    FeatureCountMismatch { expected: usize, found: usize },

    #[error("cannot remove {requested} records from a dataset of {available}")]
    SubsetTooLarge { requested: usize, available: usize },

    #[error("training size {requested} must be in 1..{total}")]
    InvalidTrainingSize { requested: usize, total: usize },
}
