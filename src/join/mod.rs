mod bounds;
mod join;
mod transform;

pub use bounds::{NormBounds, VmaxRule, VminRule};
pub use join::{join_by_geoid, join_by_key};
pub use transform::{Percentages, ZeroPopulationPolicy, density, densities, percentage, percentages};
