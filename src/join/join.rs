use std::collections::HashMap;

use crate::{
    error::{Result, Sf1Error},
    geometry::PolygonEntry,
    types::GeoId,
};

/// Look up each polygon's value through the geoid → logrecno → value bridge.
///
/// Fails with `UnmappedGeoid` when a polygon's geoid is not in the header, and with
/// `MissingValue` when its logical record has no value in the segment data.
pub fn join_by_geoid<'e, V: Clone>(
    entries: impl IntoIterator<Item = &'e PolygonEntry>,
    geoid_to_logrecno: &HashMap<GeoId, u32>,
    logrecno_to_value: &HashMap<u32, V>,
) -> Result<Vec<V>> {
    entries.into_iter()
        .map(|entry| {
            let &logrecno = geoid_to_logrecno.get(&entry.geoid)
                .ok_or_else(|| Sf1Error::UnmappedGeoid(entry.geoid.to_string()))?;
            logrecno_to_value.get(&logrecno).cloned()
                .ok_or_else(|| Sf1Error::MissingValue { geoid: entry.geoid.to_string(), logrecno })
        })
        .collect()
}

/// Look up each polygon's value directly in a geoid-keyed map.
pub fn join_by_key<'e, V: Clone>(
    entries: impl IntoIterator<Item = &'e PolygonEntry>,
    geoid_to_value: &HashMap<GeoId, V>,
) -> Result<Vec<V>> {
    entries.into_iter()
        .map(|entry| geoid_to_value.get(&entry.geoid).cloned()
            .ok_or_else(|| Sf1Error::UnmappedGeoid(entry.geoid.to_string())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::LineString;

    fn entry(geoid: &str) -> PolygonEntry {
        PolygonEntry { geoid: GeoId::padded(geoid), ring: LineString::new(vec![]), land_area: 1 }
    }

    #[test]
    fn bridges_geoid_to_value() {
        let entries = [entry("360610001001000"), entry("360610001001001"), entry("360610001001000")];
        let geoid_to_logrecno = HashMap::from([
            (GeoId::new("360610001001000"), 11),
            (GeoId::new("360610001001001"), 12),
        ]);
        let values = HashMap::from([(11, 3.0), (12, 4.5)]);

        assert_eq!(join_by_geoid(&entries, &geoid_to_logrecno, &values).unwrap(), vec![3.0, 4.5, 3.0]);
    }

    #[test]
    fn unmapped_geoid_is_an_error() {
        let entries = [entry("360610001001002")];
        let result = join_by_geoid(&entries, &HashMap::new(), &HashMap::<u32, f64>::new());
        assert!(matches!(result, Err(Sf1Error::UnmappedGeoid(geoid)) if geoid == "360610001001002"));
    }

    #[test]
    fn missing_value_is_an_error() {
        let entries = [entry("360610001001000")];
        let geoid_to_logrecno = HashMap::from([(GeoId::new("360610001001000"), 11)]);
        let result = join_by_geoid(&entries, &geoid_to_logrecno, &HashMap::<u32, f64>::new());
        assert!(matches!(result, Err(Sf1Error::MissingValue { logrecno: 11, .. })));
    }

    #[test]
    fn join_by_key_uses_padded_geoids() {
        let entries = [entry("36061")];
        let values = HashMap::from([(GeoId::padded("36061"), 8.0)]);
        assert_eq!(join_by_key(&entries, &values).unwrap(), vec![8.0]);
        assert!(join_by_key(&entries, &HashMap::<GeoId, f64>::new()).is_err());
    }
}
