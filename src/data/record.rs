//! A single labeled tumor sample.

use crate::error::DataError;

/// Smallest legal feature value.
pub const FEATURE_MIN: u8 = 1;

/// Largest legal feature value.
pub const FEATURE_MAX: u8 = 10;

/// Feature names of the Wisconsin breast-cancer dataset, in file order.
///
/// Gains of a chromosome evolved on this dataset line up with these names.
pub const WISCONSIN_FEATURES: [&str; 9] = [
    "Clump Thickness",
    "Cell Size Uniformity",
    "Cell Shape Uniformity",
    "Marginal Adhesion",
    "Single Epithelial Cell Size",
    "Bare Nuclei",
    "Bland Chromatin",
    "Normal Nucleoli",
    "Mitoses",
];

const BENIGN_CLASS: &str = "2";
const MALIGNANT_CLASS: &str = "4";

/// An immutable feature vector plus its malignancy label.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LabeledRecord {
    id: Option<u64>,
    features: Vec<u8>,
    malignant: bool,
}

impl LabeledRecord {
    /// Builds a record, checking every feature lies in `1..=10`.
    pub fn new(features: Vec<u8>, malignant: bool) -> Result<Self, DataError> {
        if let Some((index, &value)) = features
            .iter()
            .enumerate()
            .find(|(_, v)| !(FEATURE_MIN..=FEATURE_MAX).contains(*v))
        {
            return Err(DataError::FeatureOutOfRange {
                index,
                value: i64::from(value),
            });
        }
        Ok(Self {
            id: None,
            features,
            malignant,
        })
    }

    /// Attaches the sample id from the source file.
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    /// Parses one line of the Wisconsin dataset.
    ///
    /// Format: `id,f1,...,f9,class` with class `2` (benign) or `4`
    /// (malignant). Blank lines and lines with missing values (`?`) yield
    /// `Ok(None)`. `line` is the 1-based line number used in errors.
    pub fn parse_line(line: usize, text: &str) -> Result<Option<Self>, DataError> {
        match wisconsin_reader(text.as_bytes()).records().next() {
            None => Ok(None),
            Some(Err(e)) => Err(DataError::Parse {
                line,
                message: e.to_string(),
            }),
            Some(Ok(fields)) => Self::from_csv_record(line, &fields),
        }
    }

    /// Converts one CSV record of the Wisconsin dataset.
    ///
    /// Same rules as [`parse_line`](Self::parse_line); `line` is reported
    /// in errors.
    pub fn from_csv_record(line: usize, fields: &csv::StringRecord) -> Result<Option<Self>, DataError> {
        let blank = fields.iter().all(str::is_empty);
        if blank || fields.iter().any(|f| f.contains('?')) {
            return Ok(None);
        }
        parse_fields(fields)
            .map(Some)
            .map_err(|message| DataError::Parse { line, message })
    }

    /// Sample id, when the record came from a file.
    pub fn id(&self) -> Option<u64> {
        self.id
    }

    /// Feature values in dataset column order.
    pub fn features(&self) -> &[u8] {
        &self.features
    }

    /// Number of features.
    pub fn feature_count(&self) -> usize {
        self.features.len()
    }

    /// Whether the tumor is malignant.
    pub fn is_malignant(&self) -> bool {
        self.malignant
    }
}

/// Reader for headerless, comma-separated Wisconsin data.
///
/// Flexible so that a short or long row surfaces as a line-numbered
/// [`DataError::Parse`] instead of a reader error.
pub(crate) fn wisconsin_reader<R: std::io::Read>(source: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source)
}

fn parse_fields(fields: &csv::StringRecord) -> Result<LabeledRecord, String> {
    let expected = WISCONSIN_FEATURES.len() + 2;
    if fields.len() != expected {
        return Err(format!(
            "expected {expected} comma-separated fields, found {}",
            fields.len()
        ));
    }

    let id: u64 = fields[0]
        .parse()
        .map_err(|_| format!("invalid sample id {:?}", &fields[0]))?;

    let features = fields
        .iter()
        .skip(1)
        .take(WISCONSIN_FEATURES.len())
        .map(|f| {
            f.parse::<u8>()
                .map_err(|_| format!("invalid feature value {f:?}"))
        })
        .collect::<Result<Vec<u8>, String>>()?;

    let malignant = match &fields[expected - 1] {
        BENIGN_CLASS => false,
        MALIGNANT_CLASS => true,
        other => return Err(format!("unknown class {other:?}, expected 2 or 4")),
    };

    LabeledRecord::new(features, malignant)
        .map(|r| r.with_id(id))
        .map_err(|e| e.to_string())
}
