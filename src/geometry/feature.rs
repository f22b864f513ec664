use geo::Coord;
use serde::{Deserialize, Serialize};

/// Attribute names to pull from each shapefile record.
/// The defaults match the 2010 TIGER/Line tabulation block files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryAttributes {
    pub land_area: String,
    pub geoid: String,
}

impl Default for GeometryAttributes {
    fn default() -> Self {
        Self { land_area: "ALAND10".into(), geoid: "GEOID10".into() }
    }
}

/// A decoded shapefile feature: attributes plus a flat point list split into parts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Feature {
    pub geoid: String,
    pub land_area: f64,
    pub points: Vec<Coord<f64>>, // (lon, lat)
    pub parts: Vec<usize>,       // start offset of each ring in `points`
}

impl Feature {
    /// Build a feature from a list of rings, recording each ring's start offset.
    pub fn from_rings(geoid: &str, land_area: f64, rings: impl IntoIterator<Item = Vec<Coord<f64>>>) -> Self {
        let mut feature = Self { geoid: geoid.into(), land_area, ..Self::default() };
        for ring in rings {
            feature.parts.push(feature.points.len());
            feature.points.extend(ring);
        }
        feature
    }

    /// Iterate over the rings delimited by `parts`; the last ring takes every remaining point.
    pub fn rings(&self) -> impl Iterator<Item = &[Coord<f64>]> + '_ {
        self.parts.iter().enumerate().map(|(i, &start)| {
            let end = self.parts.get(i + 1).copied().unwrap_or(self.points.len());
            let start = start.min(self.points.len());
            &self.points[start..end.clamp(start, self.points.len())]
        })
    }
}
