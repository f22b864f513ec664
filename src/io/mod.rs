//! IO module for format-specific reading and writing operations.
//!
//! - `csv` - comma-delimited descriptor and segment tables, join output
//! - `fixed` - fixed-width geo header records
//! - `shp` - shapefile features for polygon geometry

pub(crate) mod csv;
pub(crate) mod fixed;
pub(crate) mod shp;
