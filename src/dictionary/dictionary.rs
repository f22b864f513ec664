use std::{collections::HashMap, path::Path};

use tracing::debug;

use crate::{
    error::{Result, Sf1Error},
    io::csv::{read_delimited, text_cell, text_column},
};

/// Column of the first data field in every segment file.
/// Columns 0..5 hold the file id, state, characteristic iteration, segment, and logrecno.
pub const FIRST_DATA_COLUMN: usize = 5;

/// One row of the field descriptor table: `[sequence, segment, _, label, code]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescriptorRow {
    pub sequence: String,
    pub segment: String,
    pub label: String,
    pub code: String, // empty for heading rows
}

impl DescriptorRow {
    pub fn new(sequence: &str, segment: &str, label: &str, code: &str) -> Self {
        Self {
            sequence: sequence.into(),
            segment: segment.into(),
            label: label.into(),
            code: code.into(),
        }
    }

    #[inline]
    fn is_heading(&self) -> bool { self.code.is_empty() }
}

/// Where a field lives: the segment number (as written in the descriptor) and column index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldLocation {
    pub segment: String,
    pub column: usize,
}

/// A line of a heading group: a bare label, or a labelled field code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadingEntry {
    Label(String),
    Field { label: String, code: String },
}

/// Census field codebook: field code → segment file and column, plus the table headings.
#[derive(Debug, Clone, Default)]
pub struct DataDictionary {
    headings: Vec<Vec<HeadingEntry>>,
    codes: HashMap<String, FieldLocation>,
}

impl DataDictionary {
    /// Read the comma-delimited descriptor table at `path` and build the dictionary.
    pub fn from_path(path: &Path) -> Result<Self> {
        let df = read_delimited(path)?;
        let (segment, label, code) = (text_column(&df, 1), text_column(&df, 3), text_column(&df, 4));

        let rows = (0..df.height())
            .map(|i| DescriptorRow {
                sequence: text_cell(text_column(&df, 0), i).to_string(),
                segment: text_cell(segment, i).trim().to_string(),
                label: text_cell(label, i).to_string(),
                code: text_cell(code, i).trim().to_string(),
            })
            .collect::<Vec<_>>();

        let dictionary = Self::build(&rows)?;
        debug!("[dictionary] {} codes in {} headings from {}", dictionary.len(), dictionary.headings.len(), path.display());
        Ok(dictionary)
    }

    /// Build the dictionary from descriptor rows. Row 0 is the table header and is skipped,
    /// but still counts as the predecessor of row 1 when grouping heading lines.
    ///
    /// Columns start at [`FIRST_DATA_COLUMN`] and advance by one per coded row; whenever a
    /// row's segment exceeds the current one, the segment advances by one and the column resets.
    pub fn build(rows: &[DescriptorRow]) -> Result<Self> {
        let mut dictionary = Self::default();
        let mut segment = 0_u32;
        let mut column = FIRST_DATA_COLUMN;

        for (i, row) in rows.iter().enumerate().skip(1) {
            let row_segment = row.segment.trim().parse::<u32>()
                .map_err(|_| Sf1Error::InvalidSegment { row: i, value: row.segment.clone() })?;
            if row_segment > segment {
                segment += 1;
                column = FIRST_DATA_COLUMN;
            }

            if row.is_heading() {
                // Consecutive heading rows continue the same group.
                match dictionary.headings.last_mut() {
                    Some(group) if rows[i - 1].is_heading() => group.push(HeadingEntry::Label(row.label.clone())),
                    _ => dictionary.headings.push(vec![HeadingEntry::Label(row.label.clone())]),
                }
                continue;
            }

            if dictionary.codes.contains_key(&row.code) {
                return Err(Sf1Error::DuplicateFieldCode { code: row.code.clone(), row: i });
            }
            dictionary.codes.insert(row.code.clone(), FieldLocation { segment: row.segment.clone(), column });

            if dictionary.headings.is_empty() { dictionary.headings.push(Vec::new()) }
            if let Some(group) = dictionary.headings.last_mut() {
                group.push(HeadingEntry::Field { label: row.label.clone(), code: row.code.clone() });
            }
            column += 1;
        }

        Ok(dictionary)
    }

    /// Resolve a field code to its segment file and column.
    pub fn lookup(&self, code: &str) -> Result<&FieldLocation> {
        self.codes.get(code)
            .ok_or_else(|| Sf1Error::FieldNotFound(code.to_string()))
    }

    /// Get the descriptor label of a field code, if it exists.
    pub fn label(&self, code: &str) -> Option<&str> {
        self.headings.iter().flatten().find_map(|entry| match entry {
            HeadingEntry::Field { label, code: c } if c == code => Some(label.as_str()),
            _ => None,
        })
    }

    #[inline] pub fn contains(&self, code: &str) -> bool { self.codes.contains_key(code) }

    /// Heading groups in descriptor order.
    #[inline] pub fn headings(&self) -> &[Vec<HeadingEntry>] { &self.headings }

    /// Iterate over all field codes in descriptor order.
    pub fn codes(&self) -> impl Iterator<Item = &str> + '_ {
        self.headings.iter().flatten().filter_map(|entry| match entry {
            HeadingEntry::Field { code, .. } => Some(code.as_str()),
            HeadingEntry::Label(_) => None,
        })
    }

    #[inline] pub fn len(&self) -> usize { self.codes.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.codes.is_empty() }
}
