//! Training/verification split.

use super::dataset::Dataset;
use crate::error::DataError;
use rand::Rng;

/// Controls how the source records are divided.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SplitConfig {
    /// Number of records in the training set.
    pub training_size: usize,

    /// Keep the malignant fraction of the training set equal to that of
    /// the whole dataset.
    pub balance: bool,

    /// Shuffle before slicing. Disable for repeatable splits.
    pub shuffle: bool,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            training_size: 200,
            balance: false,
            shuffle: true,
        }
    }
}

impl SplitConfig {
    /// Sets the training set size.
    pub fn with_training_size(mut self, n: usize) -> Self {
        self.training_size = n;
        self
    }

    /// Enables or disables malignant rebalancing.
    pub fn with_balance(mut self, balance: bool) -> Self {
        self.balance = balance;
        self
    }

    /// Enables or disables shuffling.
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }
}

/// A dataset divided into training and verification parts.
#[derive(Debug, Clone)]
pub struct DataSplit {
    pub training: Dataset,
    pub verification: Dataset,
}

impl DataSplit {
    /// Splits `source` according to `config`.
    ///
    /// Without balancing the records are merged benign-first and the
    /// training set is sliced off the front (after an optional shuffle).
    /// With balancing, `round(training_size * malignant / total)` malignant
    /// records and the remaining quota of benign records go to training.
    pub fn new<R: Rng>(
        source: Dataset,
        config: &SplitConfig,
        rng: &mut R,
    ) -> Result<Self, DataError> {
        let total = source.len();
        if config.training_size == 0 || config.training_size >= total {
            return Err(DataError::InvalidTrainingSize {
                requested: config.training_size,
                total,
            });
        }

        let (mut benign, mut malignant) = source.partition_by_label();

        let split = if config.balance {
            let fraction = config.training_size as f64 / total as f64;
            let malignant_quota =
                ((fraction * malignant.len() as f64).round() as usize).min(malignant.len());
            let benign_quota = config.training_size - malignant_quota;

            let train_malignant =
                malignant.remove_random_subset(malignant_quota, config.shuffle, rng)?;
            let train_benign = benign.remove_random_subset(benign_quota, config.shuffle, rng)?;

            DataSplit {
                training: Dataset::merge(train_malignant, train_benign)?,
                verification: Dataset::merge(benign, malignant)?,
            }
        } else {
            let mut verification = Dataset::merge(benign, malignant)?;
            let training =
                verification.remove_random_subset(config.training_size, config.shuffle, rng)?;
            DataSplit {
                training,
                verification,
            }
        };

        log::info!(
            "split {} records: training {} ({} malignant), verification {} ({} malignant)",
            total,
            split.training.len(),
            split.training.malignant_count(),
            split.verification.len(),
            split.verification.malignant_count()
        );
        Ok(split)
    }
}
