use std::{collections::HashMap, path::Path};

use geo::{LineString, Rect};
use tracing::{info, warn};

use super::StateData;
use crate::{
    error::Result,
    geometry::PolygonEntry,
    io::csv::write_values,
    join::{NormBounds, VmaxRule, VminRule, ZeroPopulationPolicy, densities, join_by_geoid, join_by_key, percentages},
    types::GeoId,
};

/// Degrees added on every side of a bounding box when selecting polygons.
pub const BBOX_MARGIN: f64 = 0.5;

/// Where polygon values come from.
#[derive(Debug, Clone, Copy)]
pub enum DataSource<'a> {
    /// A census field code, read from each state's segment files.
    Field(&'a str),
    /// Precomputed values keyed by (padded) geoid.
    Values(&'a HashMap<GeoId, f64>),
}

#[derive(Debug, Clone, Default)]
pub struct ChoroplethOptions {
    /// Keep only polygons whose first point falls within this (lon, lat) box, grown by [`BBOX_MARGIN`].
    pub bbox: Option<Rect<f64>>,
    /// Divide values by land area.
    pub density: bool,
    /// Divide values by POP100.
    pub percentage: bool,
    pub zero_population: ZeroPopulationPolicy,
}

/// Polygon rings and their values across one or more states, ready for rendering.
#[derive(Debug, Clone, Default)]
pub struct Choropleth {
    pub rings: Vec<LineString<f64>>,
    pub values: Vec<f64>,
    pub geo_ids: Vec<GeoId>,
    /// Polygons whose percentage was set to 0 for lack of population.
    pub zero_population: Vec<GeoId>,
    percentage: bool,
}

impl Choropleth {
    /// Join every state's polygons to `source` and concatenate the results in state order.
    pub fn assemble(states: &[StateData], source: DataSource<'_>, options: &ChoroplethOptions) -> Result<Self> {
        let mut out = Self { percentage: options.percentage, ..Self::default() };

        for state in states {
            let entries = state.geometry().iter()
                .filter(|entry| options.bbox.is_none_or(|bbox| entry.starts_within(&bbox, BBOX_MARGIN)))
                .collect::<Vec<&PolygonEntry>>();

            let mut values = match source {
                DataSource::Field(code) => {
                    let raw = state.reader().read_numbers(code)?;
                    join_by_geoid(entries.iter().copied(), state.header().geoid_to_logrecno(), &raw)?
                }
                DataSource::Values(map) => join_by_key(entries.iter().copied(), map)?,
            };
            let geo_ids = entries.iter().map(|entry| entry.geoid.clone()).collect::<Vec<_>>();

            if options.density {
                let land_areas = entries.iter().map(|entry| entry.land_area as f64).collect::<Vec<_>>();
                values = densities(&values, &land_areas);
            }
            if options.percentage {
                let shares = percentages(&values, &geo_ids, state.header().geoid_to_pop100(), options.zero_population)?;
                if shares.exceptions() > 0 {
                    warn!("[choropleth] {}: {} polygons with zero population set to 0", state.state(), shares.exceptions());
                }
                values = shares.values;
                out.zero_population.extend(shares.zero_population);
            }

            info!("[choropleth] {}: {} of {} polygons selected", state.state(), entries.len(), state.geometry().len());
            out.rings.extend(entries.iter().map(|entry| entry.ring.clone()));
            out.values.extend(values);
            out.geo_ids.extend(geo_ids);
        }

        Ok(out)
    }

    #[inline] pub fn len(&self) -> usize { self.values.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.values.is_empty() }

    /// Color scale bounds for the assembled values.
    pub fn bounds(&self, vmax: VmaxRule, vmin: VminRule) -> Option<NormBounds> {
        NormBounds::compute(&self.values, vmax, vmin, self.percentage)
    }

    /// Write `geoid,value` rows to a CSV file.
    pub fn write_csv(&self, path: &Path) -> anyhow::Result<()> {
        write_values(&self.geo_ids, &self.values, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        geometry::{Feature, GeometryIndex},
        header::{CollisionPolicy, GeoHeader, block_record},
        segment::{SegmentReader, make_dictionary, write_segment},
    };
    use geo::coord;

    fn make_state(dir: &Path) -> StateData {
        write_segment(dir, "ny", 1, &[
            "SF1ST,NY,000,01,0000001,100,60,40",
            "SF1ST,NY,000,01,0000002,30,30,0",
            "SF1ST,NY,000,01,0000003,0,0,0",
        ]);
        let header = GeoHeader::from_records(vec![
            block_record("1", "36061", "000100", "1000", "100"),
            block_record("2", "36061", "000100", "1001", "30"),
            block_record("3", "36061", "000100", "1002", "0"),
        ], CollisionPolicy::default()).unwrap();
        let geometry = GeometryIndex::build([
            Feature::from_rings("360610001001000", 50.0, [
                vec![coord! { x: -74.0, y: 40.7 }],
                vec![coord! { x: -74.0, y: 40.8 }],
            ]),
            Feature::from_rings("360610001001001", 10.0, [vec![coord! { x: -70.0, y: 40.7 }]]),
            Feature::from_rings("360610001001002", 5.0, [vec![coord! { x: -74.0, y: 40.7 }]]),
            Feature::from_rings("360610001009999", 0.0, [vec![coord! { x: -74.0, y: 40.7 }]]),
        ]);
        let reader = SegmentReader::new(make_dictionary(), "ny", format!("{}/", dir.display()));
        StateData::new(reader, header, geometry)
    }

    #[test]
    fn assembles_field_values_per_polygon() {
        let dir = tempfile::tempdir().unwrap();
        let states = [make_state(dir.path())];

        let map = Choropleth::assemble(&states, DataSource::Field("P0010001"), &ChoroplethOptions::default()).unwrap();
        assert_eq!(map.len(), 4);
        assert_eq!(map.values, vec![100.0, 100.0, 30.0, 0.0]);
        assert_eq!(map.rings.len(), 4);
        assert_eq!(map.geo_ids[2].as_str(), "360610001001001");
    }

    #[test]
    fn density_and_percentage_transforms() {
        let dir = tempfile::tempdir().unwrap();
        let states = [make_state(dir.path())];

        let options = ChoroplethOptions { density: true, ..Default::default() };
        let map = Choropleth::assemble(&states, DataSource::Field("P0010001"), &options).unwrap();
        assert_eq!(map.values, vec![2.0, 2.0, 3.0, 0.0]);

        let options = ChoroplethOptions { percentage: true, ..Default::default() };
        let map = Choropleth::assemble(&states, DataSource::Field("P0020001"), &options).unwrap();
        assert_eq!(map.values, vec![0.6, 0.6, 1.0, 0.0]);
        assert_eq!(map.zero_population, vec![GeoId::new("360610001001002")]);
        assert_eq!(map.bounds(VmaxRule::Max, VminRule::Zero), Some(NormBounds { vmin: 0.0, vmax: 1.0 }));

        let options = ChoroplethOptions { percentage: true, zero_population: ZeroPopulationPolicy::Error, ..Default::default() };
        assert!(Choropleth::assemble(&states, DataSource::Field("P0020001"), &options).is_err());
    }

    #[test]
    fn bbox_selects_on_first_point() {
        let dir = tempfile::tempdir().unwrap();
        let states = [make_state(dir.path())];

        let options = ChoroplethOptions {
            bbox: Some(Rect::new(coord! { x: -74.2, y: 40.6 }, coord! { x: -73.9, y: 40.9 })),
            ..Default::default()
        };
        let map = Choropleth::assemble(&states, DataSource::Field("P0010001"), &options).unwrap();
        assert_eq!(map.len(), 3);
        assert!(map.geo_ids.iter().all(|geo_id| geo_id.as_str() != "360610001001001"));
    }

    #[test]
    fn precomputed_values_by_geoid() {
        let dir = tempfile::tempdir().unwrap();
        let states = [make_state(dir.path())];

        let mut values = HashMap::from([
            (GeoId::padded("360610001001000"), 1.0),
            (GeoId::padded("360610001001001"), 2.0),
        ]);
        assert!(Choropleth::assemble(&states, DataSource::Values(&values), &ChoroplethOptions::default()).is_err());

        values.insert(GeoId::padded("360610001001002"), 3.0);
        let map = Choropleth::assemble(&states, DataSource::Values(&values), &ChoroplethOptions::default()).unwrap();
        assert_eq!(map.values, vec![1.0, 1.0, 2.0, 3.0]);
    }
}
