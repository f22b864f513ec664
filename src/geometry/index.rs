use std::path::Path;

use geo::{LineString, Rect};
use tracing::debug;

use super::{Feature, GeometryAttributes};
use crate::{error::Result, io::shp::read_features, types::GeoId};

/// One ring of a feature, tagged with the feature's geoid and land area.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonEntry {
    pub geoid: GeoId, // space-padded to full width
    pub ring: LineString<f64>,
    pub land_area: i64,
}

impl PolygonEntry {
    /// Whether the ring's first point lies strictly within `bbox` grown by `margin` on every side.
    /// Empty rings are never inside.
    pub fn starts_within(&self, bbox: &Rect<f64>, margin: f64) -> bool {
        let Some(first) = self.ring.0.first() else { return false };
        let (min, max) = (bbox.min(), bbox.max());
        min.x - margin < first.x && first.x < max.x + margin
            && min.y - margin < first.y && first.y < max.y + margin
    }
}

/// Polygon rings of every land-bearing feature in one state's geometry.
#[derive(Debug, Clone, Default)]
pub struct GeometryIndex {
    entries: Vec<PolygonEntry>,
}

impl GeometryIndex {
    /// Split features into per-ring entries, skipping features with no land area.
    pub fn build(features: impl IntoIterator<Item = Feature>) -> Self {
        let mut skipped = 0;
        let mut entries = Vec::new();

        for feature in features {
            if !(feature.land_area > 0.0) {
                skipped += 1;
                continue;
            }
            let geoid = GeoId::padded(&feature.geoid);
            let land_area = feature.land_area as i64;
            entries.extend(feature.rings().map(|ring| PolygonEntry {
                geoid: geoid.clone(),
                ring: LineString::from(ring.to_vec()),
                land_area,
            }));
        }

        debug!("[geometry] {} polygon entries, {} features without land skipped", entries.len(), skipped);
        Self { entries }
    }

    /// Read a polygon shapefile and index its land-bearing features.
    pub fn from_shapefile(path: &Path, attrs: &GeometryAttributes) -> Result<Self> {
        Ok(Self::build(read_features(path, attrs)?))
    }

    #[inline] pub fn entries(&self) -> &[PolygonEntry] { &self.entries }

    #[inline] pub fn len(&self) -> usize { self.entries.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = &PolygonEntry> + '_ { self.entries.iter() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::coord;

    fn three_part_feature(land_area: f64) -> Feature {
        Feature::from_rings("360610001001000", land_area, [
            vec![coord! { x: -74.0, y: 40.7 }, coord! { x: -74.1, y: 40.7 }, coord! { x: -74.0, y: 40.8 }],
            vec![coord! { x: -73.9, y: 40.6 }, coord! { x: -73.8, y: 40.6 }],
            vec![coord! { x: -73.5, y: 40.5 }],
        ])
    }

    #[test]
    fn features_without_land_are_skipped() {
        assert!(GeometryIndex::build([three_part_feature(0.0)]).is_empty());
        assert!(GeometryIndex::build([three_part_feature(-5.0)]).is_empty());
        assert!(GeometryIndex::build([three_part_feature(f64::NAN)]).is_empty());
    }

    #[test]
    fn each_part_becomes_an_entry() {
        let index = GeometryIndex::build([three_part_feature(1234.9)]);
        assert_eq!(index.len(), 3);
        for entry in index.iter() {
            assert_eq!(entry.geoid.as_str(), "360610001001000");
            assert_eq!(entry.land_area, 1234);
        }
        assert_eq!(index.entries()[0].ring.0.len(), 3);
        assert_eq!(index.entries()[1].ring.0.len(), 2);
        assert_eq!(index.entries()[2].ring.0.len(), 1);
    }

    #[test]
    fn short_geoids_are_padded() {
        let index = GeometryIndex::build([Feature::from_rings("36061", 1.0, [vec![coord! { x: 0.0, y: 0.0 }]])]);
        assert_eq!(index.entries()[0].geoid.as_str(), "36061          ");
    }

    #[test]
    fn starts_within_uses_first_point_and_margin() {
        let entry = GeometryIndex::build([three_part_feature(1.0)]).entries()[0].clone();
        let bbox = Rect::new(coord! { x: -73.8, y: 40.0 }, coord! { x: -73.6, y: 40.5 });

        // First point (-74.0, 40.7) is inside once grown by 0.5
        assert!(entry.starts_within(&bbox, 0.5));
        assert!(!entry.starts_within(&bbox, 0.0));

        let empty = PolygonEntry { ring: LineString::new(vec![]), ..entry.clone() };
        assert!(!empty.starts_within(&bbox, 10.0));
    }
}
