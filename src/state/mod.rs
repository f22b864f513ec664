mod choropleth;
mod state;

pub use choropleth::{BBOX_MARGIN, Choropleth, ChoroplethOptions, DataSource};
pub use state::StateData;
