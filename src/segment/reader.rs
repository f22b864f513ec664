use std::{collections::HashMap, path::PathBuf, sync::Arc};

use tracing::debug;

use super::SegmentTable;
use crate::{
    dictionary::DataDictionary,
    error::Result,
    types::Value,
};

/// Column holding the logical record number in every SF1 segment row.
pub const LOGRECNO_COLUMN: usize = 4;

/// Reads census fields for one state out of its SF1 segment files.
///
/// Nothing is cached: every read reopens and reparses the segment file.
/// Wrap in a [`super::CachedSegmentReader`] to keep parsed segments around.
#[derive(Debug, Clone)]
pub struct SegmentReader {
    dictionary: Arc<DataDictionary>,
    state: String,
    base_path: String,
}

impl SegmentReader {
    /// `base_path` is prepended verbatim to segment file names, so directories need a trailing separator.
    pub fn new(dictionary: Arc<DataDictionary>, state: impl Into<String>, base_path: impl Into<String>) -> Self {
        Self { dictionary, state: state.into(), base_path: base_path.into() }
    }

    #[inline] pub fn dictionary(&self) -> &DataDictionary { &self.dictionary }

    #[inline] pub fn state(&self) -> &str { &self.state }

    #[inline] pub fn base_path(&self) -> &str { &self.base_path }

    /// Path of a segment file: `{base}{state}000{segment:02}2010.sf1`.
    pub fn segment_path(&self, segment: &str) -> PathBuf {
        PathBuf::from(format!("{}{}000{:0>2}2010.sf1", self.base_path, self.state, segment))
    }

    /// Read `code` for every logical record in the state, as numbers or raw text.
    pub fn read(&self, code: &str, as_number: bool) -> Result<HashMap<u32, Value>> {
        let location = self.dictionary.lookup(code)?;
        let table = self.load_segment(&location.segment)?;
        table.field(location.column, as_number)
    }

    /// Read `code` for every logical record in the state as numbers.
    pub fn read_numbers(&self, code: &str) -> Result<HashMap<u32, f64>> {
        let location = self.dictionary.lookup(code)?;
        self.load_segment(&location.segment)?.numbers(location.column)
    }

    /// Parse the segment file holding `segment`.
    pub(crate) fn load_segment(&self, segment: &str) -> Result<SegmentTable> {
        let path = self.segment_path(segment);
        let table = SegmentTable::from_path(&path)?;
        debug!("[segment] parsed {} rows from {}", table.len(), path.display());
        Ok(table)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::{dictionary::DescriptorRow, error::Sf1Error};
    use std::path::Path;

    pub(crate) fn make_dictionary() -> Arc<DataDictionary> {
        Arc::new(DataDictionary::build(&[
            DescriptorRow::new("SORT ID", "SEGMENT", "", "FIELD CODE"),
            DescriptorRow::new("1", "1", "P1. TOTAL POPULATION [1]", ""),
            DescriptorRow::new("2", "1", "Total", "P0010001"),
            DescriptorRow::new("3", "1", "P2. URBAN AND RURAL [2]", ""),
            DescriptorRow::new("4", "1", "Total:", "P0020001"),
            DescriptorRow::new("5", "1", "Urban", "P0020002"),
            DescriptorRow::new("6", "2", "P3. RACE [1]", ""),
            DescriptorRow::new("7", "2", "Total", "P0030001"),
        ]).unwrap())
    }

    pub(crate) fn write_segment(dir: &Path, state: &str, segment: u32, rows: &[&str]) {
        let path = dir.join(format!("{state}000{segment:02}2010.sf1"));
        std::fs::write(path, rows.join("\n") + "\n").unwrap();
    }

    fn base(dir: &Path) -> String {
        format!("{}/", dir.display())
    }

    #[test]
    fn segment_path_pads_segment() {
        let reader = SegmentReader::new(make_dictionary(), "ny", "data/");
        assert_eq!((reader.state(), reader.base_path()), ("ny", "data/"));
        assert_eq!(reader.segment_path("1"), PathBuf::from("data/ny000012010.sf1"));
        assert_eq!(reader.segment_path("12"), PathBuf::from("data/ny000122010.sf1"));
    }

    #[test]
    fn read_keys_by_logrecno_column() {
        let dir = tempfile::tempdir().unwrap();
        write_segment(dir.path(), "ny", 1, &[
            "SF1ST,NY,000,01,0000007,120,100,20",
            "SF1ST,NY,000,01,0000009,35,0,35",
        ]);
        let reader = SegmentReader::new(make_dictionary(), "ny", base(dir.path()));

        let values = reader.read("P0010001", true).unwrap();
        assert_eq!(values.len(), 2);
        assert_eq!(values[&7], Value::Number(120.0));
        assert_eq!(values[&9], Value::Number(35.0));

        let urban = reader.read_numbers("P0020002").unwrap();
        assert_eq!(urban, HashMap::from([(7, 20.0), (9, 35.0)]));

        let text = reader.read("P0020001", false).unwrap();
        assert_eq!(text[&9], Value::Text("0".into()));
    }

    #[test]
    fn read_unknown_code() {
        let reader = SegmentReader::new(make_dictionary(), "ny", "nowhere/");
        assert!(matches!(reader.read("H0010001", true), Err(Sf1Error::FieldNotFound(_))));
    }

    #[test]
    fn read_missing_segment_file() {
        let dir = tempfile::tempdir().unwrap();
        let reader = SegmentReader::new(make_dictionary(), "ny", base(dir.path()));
        assert!(matches!(reader.read("P0030001", true), Err(Sf1Error::MissingFile(p)) if p.ends_with("ny000022010.sf1")));
    }

    #[test]
    fn read_rejects_non_numeric_values() {
        let dir = tempfile::tempdir().unwrap();
        write_segment(dir.path(), "ny", 2, &["SF1ST,NY,000,02,0000001,abc"]);
        let reader = SegmentReader::new(make_dictionary(), "ny", base(dir.path()));

        assert!(matches!(reader.read("P0030001", true), Err(Sf1Error::InvalidValue { row: 0, .. })));
        assert_eq!(reader.read("P0030001", false).unwrap()[&1], Value::Text("abc".into()));
    }

    #[test]
    fn read_rejects_short_rows() {
        let dir = tempfile::tempdir().unwrap();
        write_segment(dir.path(), "ny", 1, &["SF1ST,NY,000,01,0000001,5"]);
        let reader = SegmentReader::new(make_dictionary(), "ny", base(dir.path()));

        assert!(matches!(reader.read("P0020002", true), Err(Sf1Error::ShortRow { column: 7, .. })));
    }
}
