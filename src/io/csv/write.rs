//! CSV writing operations.

use std::{fs::File, path::Path};

use anyhow::{Context, Result, ensure};
use polars::{frame::DataFrame, prelude::{CsvWriter, NamedFrom, SerWriter}, series::Series};

use crate::types::GeoId;

/// Write a DataFrame to a CSV file.
pub(crate) fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("[io::csv::write] Failed to create CSV file: {}", path.display()))?;
    CsvWriter::new(file)
        .finish(df)
        .with_context(|| format!("[io::csv::write] Failed to write CSV to {:?}", path))
}

/// Build a two-column `geoid,value` DataFrame from parallel sequences.
/// Geoid padding is trimmed so the output reads back as plain identifiers.
pub(crate) fn values_to_dataframe(geo_ids: &[GeoId], values: &[f64]) -> Result<DataFrame> {
    ensure!(
        geo_ids.len() == values.len(),
        "[io::csv::write] {} geoids but {} values", geo_ids.len(), values.len()
    );

    let geo_ids = geo_ids.iter()
        .map(|geo_id| geo_id.as_str().trim_end().to_string())
        .collect::<Vec<_>>();

    Ok(DataFrame::new(vec![
        Series::new("geoid".into(), geo_ids).into(),
        Series::new("value".into(), values).into(),
    ])?)
}

/// Write `geoid,value` rows to a CSV file.
pub(crate) fn write_values(geo_ids: &[GeoId], values: &[f64], path: &Path) -> Result<()> {
    let mut df = values_to_dataframe(geo_ids, values)?;
    write_csv(&mut df, path)
}
