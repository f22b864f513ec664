use std::sync::Arc;

use tracing::info;

use crate::{
    config::StateConfig,
    dictionary::DataDictionary,
    error::Result,
    geometry::{GeometryAttributes, GeometryIndex},
    header::{CollisionPolicy, GeoHeader},
    segment::SegmentReader,
};

/// Everything needed to map one state: its segment reader, geographic header, and polygons.
#[derive(Debug, Clone)]
pub struct StateData {
    reader: SegmentReader,
    header: GeoHeader,
    geometry: GeometryIndex,
}

impl StateData {
    pub fn new(reader: SegmentReader, header: GeoHeader, geometry: GeometryIndex) -> Self {
        Self { reader, header, geometry }
    }

    /// Load a state's geographic header and shapefile and set up its segment reader.
    pub fn load(
        dictionary: Arc<DataDictionary>,
        config: &StateConfig,
        attrs: &GeometryAttributes,
        policy: CollisionPolicy,
    ) -> Result<Self> {
        let reader = SegmentReader::new(dictionary, &config.state, &config.sf1_path);
        let header = GeoHeader::from_path_with_policy(&config.geo_header_path(), policy)?;
        let geometry = GeometryIndex::from_shapefile(&config.shape_path, attrs)?;

        info!("[state] {}: {} header records, {} polygons", config.state, header.len(), geometry.len());
        Ok(Self::new(reader, header, geometry))
    }

    #[inline] pub fn state(&self) -> &str { self.reader.state() }
    #[inline] pub fn reader(&self) -> &SegmentReader { &self.reader }
    #[inline] pub fn header(&self) -> &GeoHeader { &self.header }
    #[inline] pub fn geometry(&self) -> &GeometryIndex { &self.geometry }
}
