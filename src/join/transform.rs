use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::{Result, Sf1Error},
    types::{GeoId, Value},
};

/// Value per unit of land area.
#[inline]
pub fn density(value: f64, land_area: f64) -> f64 {
    value / land_area
}

/// Share of the 100% population count, or 0 when the population is zero.
#[inline]
pub fn percentage(value: f64, population: f64) -> f64 {
    if population == 0.0 { 0.0 } else { value / population }
}

/// What a percentage does for a record with zero population.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroPopulationPolicy {
    /// Substitute 0 and record the geoid.
    #[default]
    Zero,
    /// Fail with `ZeroPopulation`.
    Error,
}

/// Percentages plus the records that had zero population.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Percentages {
    pub values: Vec<f64>,
    pub zero_population: Vec<GeoId>,
}

impl Percentages {
    /// Number of records where a zero population was replaced by 0.
    #[inline] pub fn exceptions(&self) -> usize { self.zero_population.len() }
}

/// Divide each value by its land area.
pub fn densities(values: &[f64], land_areas: &[f64]) -> Vec<f64> {
    values.iter().zip(land_areas)
        .map(|(&value, &land_area)| density(value, land_area))
        .collect()
}

/// Divide each value by its geoid's POP100, looked up in `geoid_to_pop100`.
pub fn percentages(
    values: &[f64],
    geo_ids: &[GeoId],
    geoid_to_pop100: &HashMap<GeoId, Value>,
    policy: ZeroPopulationPolicy,
) -> Result<Percentages> {
    let mut out = Percentages { values: Vec::with_capacity(values.len()), zero_population: Vec::new() };

    for (&value, geo_id) in values.iter().zip(geo_ids) {
        let population = match geoid_to_pop100.get(geo_id) {
            Some(Value::Number(n)) => *n,
            Some(Value::Text(text)) => return Err(Sf1Error::NonNumeric {
                geoid: geo_id.to_string(),
                field: "POP100",
                value: text.clone(),
            }),
            None => return Err(Sf1Error::UnmappedGeoid(geo_id.to_string())),
        };

        if population == 0.0 {
            if policy == ZeroPopulationPolicy::Error {
                return Err(Sf1Error::ZeroPopulation(geo_id.to_string()));
            }
            out.zero_population.push(geo_id.clone());
        }
        out.values.push(percentage(value, population));
    }

    if out.exceptions() > 0 {
        debug!("[join] {} zero-population records set to 0", out.exceptions());
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn density_divides_by_area() {
        assert_eq!(density(10.0, 4.0), 2.5);
        assert_eq!(densities(&[10.0, 3.0], &[4.0, 3.0]), vec![2.5, 1.0]);
    }

    #[test]
    fn percentage_of_zero_population_is_zero() {
        assert_eq!(percentage(5.0, 0.0), 0.0);
        assert_eq!(percentage(5.0, -0.0), 0.0);
        assert_eq!(percentage(5.0, 20.0), 0.25);
    }

    fn pop() -> HashMap<GeoId, Value> {
        HashMap::from([
            (GeoId::new("a"), Value::Number(10.0)),
            (GeoId::new("b"), Value::Number(0.0)),
            (GeoId::new("c"), Value::Text("   ".into())),
        ])
    }

    #[test]
    fn percentages_count_zero_population() {
        let geo_ids = [GeoId::new("a"), GeoId::new("b"), GeoId::new("b")];
        let out = percentages(&[5.0, 3.0, 1.0], &geo_ids, &pop(), ZeroPopulationPolicy::Zero).unwrap();

        assert_eq!(out.values, vec![0.5, 0.0, 0.0]);
        assert_eq!(out.exceptions(), 2);
        assert_eq!(out.zero_population, vec![GeoId::new("b"), GeoId::new("b")]);
    }

    #[test]
    fn percentages_error_policy() {
        let geo_ids = [GeoId::new("a"), GeoId::new("b")];
        assert!(matches!(
            percentages(&[5.0, 3.0], &geo_ids, &pop(), ZeroPopulationPolicy::Error),
            Err(Sf1Error::ZeroPopulation(geoid)) if geoid == "b"
        ));
    }

    #[test]
    fn percentages_reject_blank_or_unknown_population() {
        assert!(matches!(
            percentages(&[1.0], &[GeoId::new("c")], &pop(), ZeroPopulationPolicy::Zero),
            Err(Sf1Error::NonNumeric { field: "POP100", .. })
        ));
        assert!(matches!(
            percentages(&[1.0], &[GeoId::new("d")], &pop(), ZeroPopulationPolicy::Zero),
            Err(Sf1Error::UnmappedGeoid(_))
        ));
    }
}
