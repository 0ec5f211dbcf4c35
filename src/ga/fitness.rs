//! Fitness evaluation of a chromosome against labeled records.
//!
//! The discriminant is `offset + Σ gains[i] * feature[i]`, computed in 64-bit
//! arithmetic (the worst case is about `F * 2^31 * 10`, well past `i32`).
//! The value is kept for malignant records and negated for benign ones, so a
//! record is classified correctly iff the label-adjusted value is strictly
//! positive.
//!
//! All functions here are stateless and can be called post hoc on any split
//! (training or verification).

use super::chromosome::Chromosome;
use super::types::Fitness;
use crate::data::{Dataset, LabeledRecord};
use crate::error::GaError;

/// Label-adjusted discriminant value of `record` under `chromosome`.
///
/// Positive means correctly classified. Widths must match; the checked
/// entry points below verify that first.
pub fn linear_value(chromosome: &Chromosome, record: &LabeledRecord) -> i64 {
    debug_assert_eq!(
        chromosome.feature_count(),
        record.feature_count(),
        "chromosome and record widths differ"
    );
    let raw = chromosome
        .gains()
        .iter()
        .zip(record.features())
        .fold(i64::from(chromosome.offset()), |acc, (&g, &x)| {
            acc + i64::from(g) * i64::from(x)
        });
    if record.is_malignant() {
        raw
    } else {
        -raw
    }
}

/// Scores `chromosome` against `dataset` with a malignancy bias.
///
/// Every record adds its label-adjusted value to `separation`. A correct
/// record adds 1 to `score`; a malignant record additionally adds
/// `bias_factor - 1` when correct and subtracts it when wrong. With
/// `bias_factor == 1` the score is the plain number of correct records.
pub fn evaluate(
    chromosome: &Chromosome,
    dataset: &Dataset,
    bias_factor: u32,
) -> Result<Fitness, GaError> {
    check_compatible(chromosome, dataset)?;
    let bias = i64::from(bias_factor) - 1;

    let mut score = 0i64;
    let mut separation = 0.0f64;
    for record in dataset {
        let v = linear_value(chromosome, record);
        separation += v as f64;
        if v > 0 {
            score += 1;
            if record.is_malignant() {
                score += bias;
            }
        } else if record.is_malignant() {
            score -= bias;
        }
    }

    Ok(Fitness::new(score, separation))
}

/// Number of records classified correctly.
pub fn correct_count(chromosome: &Chromosome, dataset: &Dataset) -> Result<usize, GaError> {
    check_compatible(chromosome, dataset)?;
    Ok(dataset
        .iter()
        .filter(|r| linear_value(chromosome, r) > 0)
        .count())
}

/// Percentage of records classified correctly.
pub fn percent_correct(chromosome: &Chromosome, dataset: &Dataset) -> Result<f64, GaError> {
    let correct = correct_count(chromosome, dataset)?;
    Ok(correct as f64 * 100.0 / dataset.len() as f64)
}

/// Percentage of malignant records classified correctly.
///
/// Returns [`GaError::NoMalignantRecords`] when the dataset has none, since
/// the percentage is undefined.
pub fn malignancy_accuracy(chromosome: &Chromosome, dataset: &Dataset) -> Result<f64, GaError> {
    check_compatible(chromosome, dataset)?;
    let (total, correct) = dataset
        .iter()
        .filter(|r| r.is_malignant())
        .fold((0usize, 0usize), |(total, correct), r| {
            let hit = usize::from(linear_value(chromosome, r) > 0);
            (total + 1, correct + hit)
        });
    if total == 0 {
        return Err(GaError::NoMalignantRecords);
    }
    Ok(correct as f64 * 100.0 / total as f64)
}

fn check_compatible(chromosome: &Chromosome, dataset: &Dataset) -> Result<(), GaError> {
    let width = dataset.feature_count().ok_or(GaError::EmptyDataset)?;
    if width != chromosome.feature_count() {
        return Err(GaError::FeatureCountMismatch {
            chromosome: chromosome.feature_count(),
            dataset: width,
        });
    }
    Ok(())
}
