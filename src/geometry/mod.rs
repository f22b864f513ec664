mod feature;
mod index;

pub use feature::{Feature, GeometryAttributes};
pub use index::{GeometryIndex, PolygonEntry};
