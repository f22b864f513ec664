//! Shapefile feature reading.

use std::path::Path;

use geo::Coord;
use shapefile::{PolygonRing, Reader, Shape, dbase::{FieldValue, Record}};
use tracing::{debug, warn};

use crate::{
    error::{Result, Sf1Error},
    geometry::{Feature, GeometryAttributes},
};

/// Reads every polygon feature of the `.shp` (with its `.dbf`) at `path`.
///
/// Non-polygon shapes are kept as features with no parts. The reader is dropped
/// before returning, so only the decoded features stay in memory.
pub(crate) fn read_features(path: &Path, attrs: &GeometryAttributes) -> Result<Vec<Feature>> {
    if !path.is_file() {
        return Err(Sf1Error::MissingFile(path.to_path_buf()));
    }
    let shapefile_error = |source| Sf1Error::Shapefile { path: path.to_path_buf(), source };

    let mut reader = Reader::from_path(path).map_err(shapefile_error)?;
    let mut features = Vec::with_capacity(reader.shape_count().map_err(shapefile_error)?);
    for (i, item) in reader.iter_shapes_and_records().enumerate() {
        let (shape, record) = item.map_err(shapefile_error)?;
        features.push(shape_to_feature(i, shape, &record, attrs)?);
    }

    debug!("[io::shp] {} features from {}", features.len(), path.display());
    Ok(features)
}

/// Convert one shape + record into a [`Feature`].
fn shape_to_feature(i: usize, shape: Shape, record: &Record, attrs: &GeometryAttributes) -> Result<Feature> {
    /// Flatten rings into one point list plus the start offset of each ring.
    fn flatten<P>(rings: &[PolygonRing<P>], xy: impl Fn(&P) -> Coord<f64>) -> (Vec<Coord<f64>>, Vec<usize>) {
        let mut points = Vec::new();
        let mut parts = Vec::with_capacity(rings.len());
        for ring in rings {
            parts.push(points.len());
            points.extend(ring.points().iter().map(&xy));
        }
        (points, parts)
    }

    let (points, parts) = match &shape {
        Shape::Polygon(p) => flatten(p.rings(), |pt| Coord { x: pt.x, y: pt.y }),
        Shape::PolygonM(p) => flatten(p.rings(), |pt| Coord { x: pt.x, y: pt.y }),
        Shape::PolygonZ(p) => flatten(p.rings(), |pt| Coord { x: pt.x, y: pt.y }),
        other => {
            warn!("[io::shp] shape {} is a {:?} rather than a polygon", i, other.shapetype());
            (Vec::new(), Vec::new())
        }
    };

    Ok(Feature {
        geoid: character_field(i, record, &attrs.geoid)?,
        land_area: numeric_field(i, record, &attrs.land_area)?,
        points,
        parts,
    })
}

/// Get the value of a character field from a Record, without trailing padding.
fn character_field(i: usize, record: &Record, field: &str) -> Result<String> {
    match record.get(field) {
        Some(FieldValue::Character(Some(s))) => Ok(s.trim_end().to_string()),
        _ => Err(Sf1Error::MissingAttribute { shape: i, field: field.to_string() }),
    }
}

/// Get the value of a numeric field from a Record.
fn numeric_field(i: usize, record: &Record, field: &str) -> Result<f64> {
    match record.get(field) {
        Some(FieldValue::Numeric(Some(n))) => Ok(*n),
        Some(FieldValue::Float(Some(n))) => Ok(*n as f64),
        Some(FieldValue::Double(n)) | Some(FieldValue::Currency(n)) => Ok(*n),
        Some(FieldValue::Integer(n)) => Ok(*n as f64),
        _ => Err(Sf1Error::MissingAttribute { shape: i, field: field.to_string() }),
    }
}
