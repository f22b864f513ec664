#![doc = "Census 2010 SF1 reader and polygon join for choropleth maps"]
pub mod config;
mod dictionary;
mod error;
mod geometry;
mod header;
mod io;
mod join;
mod segment;
mod state;
mod types;

#[doc(inline)]
pub use config::{Config, StateConfig};

#[doc(inline)]
pub use dictionary::{DataDictionary, DescriptorRow, FIRST_DATA_COLUMN, FieldLocation, HeadingEntry};

#[doc(inline)]
pub use error::{Result, Sf1Error};

#[doc(inline)]
pub use geometry::{Feature, GeometryAttributes, GeometryIndex, PolygonEntry};

#[doc(inline)]
pub use header::{CollisionPolicy, GeoField, GeoHeader, extract_column, extract_text_column, layout};

#[doc(inline)]
pub use join::{
    NormBounds, Percentages, VmaxRule, VminRule, ZeroPopulationPolicy,
    density, densities, join_by_geoid, join_by_key, percentage, percentages,
};

#[doc(inline)]
pub use segment::{CachedSegmentReader, LOGRECNO_COLUMN, SegmentReader, SegmentTable};

#[doc(inline)]
pub use state::{BBOX_MARGIN, Choropleth, ChoroplethOptions, DataSource, StateData};

#[doc(inline)]
pub use types::{GEOID_WIDTH, GeoId, Value};
