//! Reporting of evolved classifiers.
//!
//! [`Evaluation`] summarizes a chromosome on any split, [`describe`] renders
//! its gains with feature names, and [`ResultsFile`] appends one CSV row per
//! run for later comparison across settings.

use crate::data::{Dataset, WISCONSIN_FEATURES};
use crate::error::GaError;
use crate::ga::{fitness, Chromosome};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

/// Summary of a chromosome on one dataset.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Evaluation {
    /// Bias-weighted score.
    pub score: i64,
    /// Percentage of records classified correctly.
    pub percent_correct: f64,
    /// Percentage of malignant records classified correctly, `None` when
    /// the dataset has no malignant records.
    pub malignancy_accuracy: Option<f64>,
}

impl Evaluation {
    /// Evaluates `chromosome` on `dataset`.
    pub fn of(chromosome: &Chromosome, dataset: &Dataset, bias_factor: u32) -> Result<Self, GaError> {
        let score = fitness::evaluate(chromosome, dataset, bias_factor)?.score;
        let percent_correct = fitness::percent_correct(chromosome, dataset)?;
        let malignancy_accuracy = match fitness::malignancy_accuracy(chromosome, dataset) {
            Ok(pct) => Some(pct),
            Err(GaError::NoMalignantRecords) => None,
            Err(e) => return Err(e),
        };
        Ok(Self {
            score,
            percent_correct,
            malignancy_accuracy,
        })
    }
}

/// Multi-line listing of the gains and offset.
///
/// Uses the Wisconsin feature names when the widths match, generic
/// `Feature N` labels otherwise.
pub fn describe(chromosome: &Chromosome) -> String {
    let mut out = String::new();
    let named = chromosome.feature_count() == WISCONSIN_FEATURES.len();
    for (i, gain) in chromosome.gains().iter().enumerate() {
        if named {
            out.push_str(&format!("{} Weight: {gain}\n", WISCONSIN_FEATURES[i]));
        } else {
            out.push_str(&format!("Feature {} Weight: {gain}\n", i + 1));
        }
    }
    out.push_str(&format!("Offset Weight: {}", chromosome.offset()));
    out
}

/// One CSV row describing a finished run.
#[derive(Debug, Clone)]
pub struct ResultRow<'a> {
    pub population_size: usize,
    pub bias_factor: u32,
    pub training_size: usize,
    pub balanced: bool,
    pub verification: &'a Evaluation,
    pub chromosome: &'a Chromosome,
}

/// Append-only CSV file of run results.
#[derive(Debug, Clone)]
pub struct ResultsFile {
    path: PathBuf,
}

impl ResultsFile {
    /// Points at `path`; nothing is created until the first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Target path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends `row`, writing the header first if the file is new or empty.
    pub fn append(&self, row: &ResultRow<'_>) -> Result<(), csv::Error> {
        let needs_header = std::fs::metadata(&self.path)
            .map(|m| m.len() == 0)
            .unwrap_or(true);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = csv::Writer::from_writer(file);
        if needs_header {
            writer.write_record(header(row.chromosome.feature_count()))?;
        }
        writer.write_record(fields(row))?;
        writer.flush()?;
        log::info!("appended results to {}", self.path.display());
        Ok(())
    }
}

fn header(feature_count: usize) -> Vec<String> {
    let mut columns: Vec<String> = [
        "Chromosomes Per Generation",
        "Malignancy Bias Factor",
        "Training Data Set Size",
        "Balance Malignant Patients",
        "Total Percent Correct",
        "Malignant Percent Correct",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    if feature_count == WISCONSIN_FEATURES.len() {
        columns.extend(WISCONSIN_FEATURES.iter().map(|s| s.to_string()));
    } else {
        columns.extend((1..=feature_count).map(|i| format!("Feature {i}")));
    }
    columns.push("Offset".to_string());
    columns
}

fn fields(row: &ResultRow<'_>) -> Vec<String> {
    let mut fields = vec![
        row.population_size.to_string(),
        row.bias_factor.to_string(),
        row.training_size.to_string(),
        row.balanced.to_string(),
        row.verification.percent_correct.to_string(),
        row.verification
            .malignancy_accuracy
            .map(|v| v.to_string())
            .unwrap_or_default(),
    ];
    fields.extend(row.chromosome.to_vector().iter().map(i32::to_string));
    fields
}
