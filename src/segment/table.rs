use std::{collections::HashMap, path::{Path, PathBuf}};

use polars::frame::DataFrame;

use super::reader::LOGRECNO_COLUMN;
use crate::{
    error::{Result, Sf1Error},
    io::csv::{read_delimited, text_cell, text_column},
    types::Value,
};

/// A parsed SF1 segment file, every cell kept as text.
#[derive(Debug, Clone)]
pub struct SegmentTable {
    path: PathBuf,
    data: DataFrame,
}

impl SegmentTable {
    /// Read and parse the segment file at `path`.
    pub fn from_path(path: &Path) -> Result<Self> {
        Ok(Self { path: path.to_path_buf(), data: read_delimited(path)? })
    }

    #[inline] pub fn path(&self) -> &Path { &self.path }

    /// Get the number of rows (logical records) in the segment.
    #[inline] pub fn len(&self) -> usize { self.data.height() }

    #[inline] pub fn is_empty(&self) -> bool { self.data.height() == 0 }

    /// Map each row's logical record number to its value in `column`, as a number
    /// when `as_number` is set and raw text otherwise.
    pub fn field(&self, column: usize, as_number: bool) -> Result<HashMap<u32, Value>> {
        if as_number {
            Ok(self.numbers(column)?.into_iter().map(|(k, v)| (k, Value::Number(v))).collect())
        } else {
            Ok(self.cells(column, |_, raw| Ok(raw.to_string()))?.into_iter().map(|(k, v)| (k, Value::Text(v))).collect())
        }
    }

    /// Map each row's logical record number to the number in `column`.
    pub fn numbers(&self, column: usize) -> Result<HashMap<u32, f64>> {
        self.cells(column, |row, raw| raw.trim().parse::<f64>().map_err(|_| self.invalid(row, raw)))
    }

    /// Walk the rows, keying `parse(row, cell)` by logical record number.
    ///
    /// A row that repeats a logical record number replaces the earlier one.
    /// Cells missing from ragged rows read as empty text.
    fn cells<T>(&self, column: usize, parse: impl Fn(usize, &str) -> Result<T>) -> Result<HashMap<u32, T>> {
        let keys = text_column(&self.data, LOGRECNO_COLUMN);
        let values = match text_column(&self.data, column) {
            Some(values) => values,
            None if self.is_empty() => return Ok(HashMap::new()),
            None => return Err(Sf1Error::ShortRow { path: self.path.clone(), row: 0, column }),
        };

        (0..self.data.height())
            .map(|row| {
                let raw_key = text_cell(keys, row);
                let key = raw_key.trim().parse::<u32>()
                    .map_err(|_| self.invalid(row, raw_key))?;
                Ok((key, parse(row, values.get(row).unwrap_or(""))?))
            })
            .collect()
    }

    fn invalid(&self, row: usize, value: &str) -> Sf1Error {
        Sf1Error::InvalidValue { path: self.path.clone(), row, value: value.to_string() }
    }
}
