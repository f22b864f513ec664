//! CSV reading operations.

use std::{fs::File, path::Path};

use polars::{frame::DataFrame, prelude::{CsvReadOptions, SerReader, StringChunked}};

use crate::error::{Result, Sf1Error};

/// Reads a headerless comma-delimited file from `path`, keeping every column as text.
///
/// Census tables carry zero-padded codes and logical record numbers, so no schema is inferred.
pub(crate) fn read_delimited(path: &Path) -> Result<DataFrame> {
    if !path.is_file() {
        return Err(Sf1Error::MissingFile(path.to_path_buf()));
    }
    let file = File::open(path)?;
    CsvReadOptions::default()
        .with_has_header(false)
        .with_infer_schema_length(Some(0))
        .map_parse_options(|po| po.with_separator(b',').with_truncate_ragged_lines(true))
        .into_reader_with_file_handle(file)
        .finish()
        .map_err(|source| Sf1Error::Csv { path: path.to_path_buf(), source })
}

/// Borrow column `idx` of a text table, or `None` if the table is narrower than that.
pub(crate) fn text_column(df: &DataFrame, idx: usize) -> Option<&StringChunked> {
    df.get_columns().get(idx).and_then(|col| col.str().ok())
}

/// Cell `row` of a text column, with missing cells read as empty.
#[inline]
pub(crate) fn text_cell(col: Option<&StringChunked>, row: usize) -> &str {
    col.and_then(|col| col.get(row)).unwrap_or("")
}
