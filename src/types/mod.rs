mod geo_id;
mod value;

pub use geo_id::{GEOID_WIDTH, GeoId};
pub use value::Value;
