//! Error types for SF1 parsing and geometry joins.

use std::path::PathBuf;

use polars::error::PolarsError;
use thiserror::Error;

/// Errors produced while building dictionaries, headers, segment maps, and joins.
#[derive(Debug, Error)]
pub enum Sf1Error {
    /// The requested census field code is not in the data dictionary.
    #[error("field code {0:?} not found in data dictionary")]
    FieldNotFound(String),

    /// A descriptor, geo header, segment, or shapefile path does not exist.
    #[error("file not found: {}", .0.display())]
    MissingFile(PathBuf),

    /// The descriptor table maps the same field code twice.
    #[error("duplicate field code {code:?} at descriptor row {row}")]
    DuplicateFieldCode { code: String, row: usize },

    /// A descriptor row has a segment number that is not an integer.
    #[error("invalid segment {value:?} at descriptor row {row}")]
    InvalidSegment { row: usize, value: String },

    /// A geo header record has a logical record number that is not an integer.
    #[error("invalid logical record number {value:?} in geo header record {record}")]
    InvalidLogrecno { record: usize, value: String },

    /// A delimited row holds a value that cannot be parsed as requested.
    #[error("invalid value {value:?} at row {row} of {}", .path.display())]
    InvalidValue { path: PathBuf, row: usize, value: String },

    /// A delimited row is too short for the requested column.
    #[error("row {row} of {} has no column {column}", .path.display())]
    ShortRow { path: PathBuf, row: usize, column: usize },

    /// A polygon's geoid has no logical record in the geo header.
    #[error("geoid {0:?} has no logical record in the geo header")]
    UnmappedGeoid(String),

    /// A logical record referenced by the header has no value in the segment data.
    #[error("logical record {logrecno} (geoid {geoid:?}) has no value")]
    MissingValue { geoid: String, logrecno: u32 },

    /// Two header records of the same summary level share a geoid.
    #[error("geoid {geoid:?} appears twice at summary level {sumlev:?} (logical records {first} and {second})")]
    GeoidCollision { geoid: String, sumlev: String, first: u32, second: u32 },

    /// A header value needed for arithmetic is blank or non-numeric.
    #[error("geoid {geoid:?} has non-numeric {field}: {value:?}")]
    NonNumeric { geoid: String, field: &'static str, value: String },

    /// A percentage was requested for a record with zero population.
    #[error("geoid {0:?} has zero population")]
    ZeroPopulation(String),

    /// A shapefile record lacks a required attribute.
    #[error("shape {shape} is missing attribute {field:?}")]
    MissingAttribute { shape: usize, field: String },

    #[error("failed to read delimited file {}: {source}", .path.display())]
    Csv { path: PathBuf, #[source] source: PolarsError },

    #[error("failed to read shapefile {}: {source}", .path.display())]
    Shapefile { path: PathBuf, #[source] source: shapefile::Error },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias for results carrying [`Sf1Error`].
pub type Result<T> = std::result::Result<T, Sf1Error>;
