//! Dataset ingestion.
//!
//! Reads labeled tumor samples, validates them, and divides them into
//! training and verification sets for the GA.
//!
//! - [`LabeledRecord`]: one sample (feature vector + malignancy label)
//! - [`Dataset`]: width-checked record collection with subset extraction
//! - [`DataSplit`] / [`SplitConfig`]: training/verification split with
//!   optional malignant rebalancing

mod dataset;
mod record;
mod split;

pub use dataset::Dataset;
pub use record::{LabeledRecord, FEATURE_MAX, FEATURE_MIN, WISCONSIN_FEATURES};
pub use split::{DataSplit, SplitConfig};
