//! Ordered, width-checked collection of labeled records.

use super::record::{wisconsin_reader, LabeledRecord};
use crate::error::DataError;
use rand::seq::SliceRandom;
use rand::Rng;
use std::io::Read;
use std::path::Path;

/// A set of labeled records sharing one feature width.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    records: Vec<LabeledRecord>,
}

impl Dataset {
    /// Creates an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a dataset, rejecting records whose width differs from the first.
    pub fn from_records(records: Vec<LabeledRecord>) -> Result<Self, DataError> {
        let mut dataset = Self::new();
        for record in records {
            dataset.push(record)?;
        }
        Ok(dataset)
    }

    /// Reads Wisconsin-format CSV, skipping incomplete samples.
    ///
    /// Errors carry the 1-based line number reported by the CSV reader.
    pub fn from_reader<R: Read>(source: R) -> Result<Self, DataError> {
        let mut dataset = Self::new();
        for result in wisconsin_reader(source).records() {
            let fields = result.map_err(|e| DataError::Parse {
                line: e.position().map_or(0, |p| p.line() as usize),
                message: e.to_string(),
            })?;
            let line_no = fields.position().map_or(0, |p| p.line() as usize);
            if let Some(record) = LabeledRecord::from_csv_record(line_no, &fields)? {
                dataset.push(record).map_err(|e| DataError::Parse {
                    line: line_no,
                    message: e.to_string(),
                })?;
            }
        }
        log::debug!(
            "parsed {} records ({} malignant)",
            dataset.len(),
            dataset.malignant_count()
        );
        Ok(dataset)
    }

    /// Loads a dataset file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file)
    }

    /// Appends a record.
    pub fn push(&mut self, record: LabeledRecord) -> Result<(), DataError> {
        if let Some(expected) = self.feature_count() {
            if record.feature_count() != expected {
                return Err(DataError::FeatureCountMismatch {
                    expected,
                    found: record.feature_count(),
                });
            }
        }
        self.records.push(record);
        Ok(())
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` when the dataset holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Feature width shared by all records, `None` when empty.
    pub fn feature_count(&self) -> Option<usize> {
        self.records.first().map(LabeledRecord::feature_count)
    }

    /// All records in order.
    pub fn records(&self) -> &[LabeledRecord] {
        &self.records
    }

    /// Iterates over the records.
    pub fn iter(&self) -> std::slice::Iter<'_, LabeledRecord> {
        self.records.iter()
    }

    /// Number of malignant records.
    pub fn malignant_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_malignant()).count()
    }

    /// Number of benign records.
    pub fn benign_count(&self) -> usize {
        self.len() - self.malignant_count()
    }

    /// Splits into `(benign, malignant)`, preserving relative order.
    pub fn partition_by_label(self) -> (Dataset, Dataset) {
        let (malignant, benign): (Vec<_>, Vec<_>) =
            self.records.into_iter().partition(|r| r.is_malignant());
        (Dataset { records: benign }, Dataset { records: malignant })
    }

    /// Concatenates `first` and `second`, in that order.
    pub fn merge(first: Dataset, second: Dataset) -> Result<Dataset, DataError> {
        let mut merged = first;
        for record in second.records {
            merged.push(record)?;
        }
        Ok(merged)
    }

    /// Moves `count` records out of `self` into a new dataset.
    ///
    /// When `shuffle` is set the records are shuffled first, so the subset
    /// is uniformly random; otherwise the first `count` records are taken,
    /// which keeps runs repeatable.
    pub fn remove_random_subset<R: Rng>(
        &mut self,
        count: usize,
        shuffle: bool,
        rng: &mut R,
    ) -> Result<Dataset, DataError> {
        if count > self.len() {
            return Err(DataError::SubsetTooLarge {
                requested: count,
                available: self.len(),
            });
        }
        if shuffle {
            self.records.shuffle(rng);
        }
        let rest = self.records.split_off(count);
        let taken = std::mem::replace(&mut self.records, rest);
        Ok(Dataset { records: taken })
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a LabeledRecord;
    type IntoIter = std::slice::Iter<'a, LabeledRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use std::io::Write;

    const SAMPLE: &str = "\
1000025,5,1,1,1,2,1,3,1,1,2
1002945,5,4,4,5,7,10,3,2,1,2
1015425,3,1,1,1,2,2,3,1,1,2
1057013,8,4,5,1,2,?,7,3,1,4
1017023,4,1,1,3,2,1,3,1,1,4
1017122,8,10,10,8,7,10,9,7,1,4
";

    fn record(value: u8, malignant: bool) -> LabeledRecord {
        LabeledRecord::new(vec![value; 3], malignant).unwrap()
    }

    #[test]
    fn test_from_reader_skips_missing() {
        let ds = Dataset::from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(ds.len(), 5);
        assert_eq!(ds.malignant_count(), 2);
        assert_eq!(ds.benign_count(), 3);
        assert_eq!(ds.feature_count(), Some(9));
    }

    #[test]
    fn test_from_reader_reports_line() {
        let err = Dataset::from_reader("1000025,5,1,1,1,2,1,3,1,1,2\nbad\n".as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_from_reader_counts_skipped_lines() {
        // line 3 is incomplete, line 4 is blank
        let text = "1000025,5,1,1,1,2,1,3,1,1,2\n\
                    1002945,5,4,4,5,7,10,3,2,1,2\n\
                    1057013,8,4,5,1,2,?,7,3,1,4\n\
                    \n\
                    1017023,4,1,1,3,2,1,3,1,1,7\n";
        let err = Dataset::from_reader(text.as_bytes()).unwrap_err();
        assert!(
            matches!(err, DataError::Parse { line: 5, .. }),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let ds = Dataset::load(file.path()).unwrap();
        assert_eq!(ds.len(), 5);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Dataset::load("/nonexistent/tumor.data").unwrap_err();
        assert!(matches!(err, DataError::Io { .. }));
    }

    #[test]
    fn test_push_rejects_width_mismatch() {
        let mut ds = Dataset::new();
        ds.push(record(1, true)).unwrap();
        let err = ds
            .push(LabeledRecord::new(vec![1, 2], false).unwrap())
            .unwrap_err();
        assert!(matches!(
            err,
            DataError::FeatureCountMismatch {
                expected: 3,
                found: 2
            }
        ));
    }

    #[test]
    fn test_partition_and_merge() {
        let ds = Dataset::from_records(vec![
            record(1, true),
            record(2, false),
            record(3, true),
            record(4, false),
        ])
        .unwrap();
        let (benign, malignant) = ds.partition_by_label();
        assert_eq!(benign.len(), 2);
        assert_eq!(malignant.len(), 2);
        assert!(malignant.iter().all(LabeledRecord::is_malignant));

        let merged = Dataset::merge(benign, malignant).unwrap();
        let firsts: Vec<u8> = merged.iter().map(|r| r.features()[0]).collect();
        assert_eq!(firsts, vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_remove_subset_without_shuffle_takes_prefix() {
        let mut ds =
            Dataset::from_records((1..=6).map(|v| record(v, v % 2 == 0)).collect()).unwrap();
        let mut rng = create_rng(1);
        let taken = ds.remove_random_subset(2, false, &mut rng).unwrap();
        assert_eq!(taken.iter().map(|r| r.features()[0]).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(ds.len(), 4);
        assert_eq!(ds.records()[0].features()[0], 3);
    }

    #[test]
    fn test_remove_subset_with_shuffle_conserves_records() {
        let mut ds =
            Dataset::from_records((1..=10).map(|v| record(v, v > 5)).collect()).unwrap();
        let mut rng = create_rng(42);
        let taken = ds.remove_random_subset(4, true, &mut rng).unwrap();
        assert_eq!(taken.len(), 4);
        assert_eq!(ds.len(), 6);
        let mut all: Vec<u8> = taken
            .iter()
            .chain(ds.iter())
            .map(|r| r.features()[0])
            .collect();
        all.sort_unstable();
        assert_eq!(all, (1..=10).collect::<Vec<u8>>());
    }

    #[test]
    fn test_remove_subset_too_large() {
        let mut ds = Dataset::from_records(vec![record(1, true)]).unwrap();
        let mut rng = create_rng(1);
        assert!(matches!(
            ds.remove_random_subset(2, true, &mut rng),
            Err(DataError::SubsetTooLarge {
                requested: 2,
                available: 1
            })
        ));
    }
}
