use std::{collections::{HashMap, hash_map::Entry}, path::Path};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::layout;
use crate::{
    error::{Result, Sf1Error},
    io::fixed::read_records,
    types::{GeoId, Value},
};

/// How to resolve two header records that produce the same geoid.
///
/// Aggregate summary levels (and geographic components within one level) routinely
/// share a geoid, so the default keeps the last record seen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// Later records replace earlier ones.
    #[default]
    Overwrite,
    /// The first record for a geoid is kept.
    KeepFirst,
    /// Collisions across summary levels overwrite; within one summary level they are an error.
    RejectSameLevel,
}

/// Selected columns of one state's SF1 geographic header, ordered by record, plus the
/// cross-reference maps between geoids and logical record numbers.
#[derive(Debug, Clone)]
pub struct GeoHeader {
    sumlev: Vec<String>,
    logrecno: Vec<u32>,
    block_group: Vec<String>,
    geo_ids: Vec<GeoId>,
    lat: Vec<Value>,
    lon: Vec<Value>,
    area_land: Vec<Value>,
    area_water: Vec<Value>,
    pop100: Vec<Value>,
    housing_units: Vec<Value>,

    geoid_to_logrecno: HashMap<GeoId, u32>,
    geoid_to_pop100: HashMap<GeoId, Value>,
    logrecno_to_geoid: HashMap<u32, GeoId>,
    collisions: usize,
}

impl GeoHeader {
    /// Parse the geographic header file at `path`, overwriting on geoid collisions.
    pub fn from_path(path: &Path) -> Result<Self> {
        Self::from_path_with_policy(path, CollisionPolicy::default())
    }

    /// Parse the geographic header file at `path`.
    pub fn from_path_with_policy(path: &Path, policy: CollisionPolicy) -> Result<Self> {
        let header = Self::from_records(read_records(path)?, policy)?;
        info!("[geo_header] {} records ({} block-level) from {}", header.len(), header.logrecno_to_geoid.len(), path.display());
        Ok(header)
    }

    /// Build from raw fixed-width records. The records are consumed and dropped
    /// once the columns have been extracted.
    pub fn from_records<R: AsRef<[u8]>>(records: Vec<R>, policy: CollisionPolicy) -> Result<Self> {
        let logrecno = layout::LOGRECNO.extract(&records).into_iter().enumerate()
            .map(|(i, value)| match value {
                Value::Number(n) if n >= 0.0 && n.fract() == 0.0 && n <= u32::MAX as f64 => Ok(n as u32),
                other => Err(Sf1Error::InvalidLogrecno { record: i, value: other.to_string() }),
            })
            .collect::<Result<Vec<_>>>()?;

        let geo_ids = {
            let state_county = layout::STATE_COUNTY.extract_text(&records);
            let census_tract = layout::TRACT.extract_text(&records);
            let block = layout::BLOCK.extract_text(&records);
            state_county.iter().zip(&census_tract).zip(&block)
                .map(|((state_county, census_tract), block)| GeoId::from_parts(state_county, census_tract, block))
                .collect::<Vec<_>>()
        };

        let mut header = Self {
            sumlev: layout::SUMLEV.extract_text(&records),
            logrecno,
            block_group: layout::BLKGRP.extract_text(&records),
            geo_ids,
            lat: layout::INTPTLAT.extract(&records),
            lon: layout::INTPTLON.extract(&records),
            area_land: layout::AREALAND.extract(&records),
            area_water: layout::AREAWATR.extract(&records),
            pop100: layout::POP100.extract(&records),
            housing_units: layout::HU100.extract(&records),
            geoid_to_logrecno: HashMap::new(),
            geoid_to_pop100: HashMap::new(),
            logrecno_to_geoid: HashMap::new(),
            collisions: 0,
        };
        drop(records);

        header.index(policy)?;
        Ok(header)
    }

    /// Derive the geoid ↔ logrecno and geoid → pop100 maps.
    fn index(&mut self, policy: CollisionPolicy) -> Result<()> {
        // geoid -> row of the record that owns it
        let mut rows: HashMap<GeoId, usize> = HashMap::with_capacity(self.len());
        for (i, geo_id) in self.geo_ids.iter().enumerate() {
            match rows.entry(geo_id.clone()) {
                Entry::Vacant(entry) => { entry.insert(i); }
                Entry::Occupied(mut entry) => {
                    self.collisions += 1;
                    let first = *entry.get();
                    match policy {
                        CollisionPolicy::KeepFirst => {}
                        CollisionPolicy::RejectSameLevel if self.sumlev[first] == self.sumlev[i] => {
                            return Err(Sf1Error::GeoidCollision {
                                geoid: geo_id.to_string(),
                                sumlev: self.sumlev[i].clone(),
                                first: self.logrecno[first],
                                second: self.logrecno[i],
                            });
                        }
                        _ => { entry.insert(i); }
                    }
                }
            }
        }
        if self.collisions > 0 {
            debug!("[geo_header] {} geoid collisions resolved with {:?}", self.collisions, policy);
        }

        self.geoid_to_pop100 = rows.iter()
            .map(|(geo_id, &i)| (geo_id.clone(), self.pop100[i].clone()))
            .collect();
        self.geoid_to_logrecno = rows.into_iter()
            .map(|(geo_id, i)| (geo_id, self.logrecno[i]))
            .collect();

        self.logrecno_to_geoid = self.logrecno.iter().zip(&self.geo_ids)
            .filter(|(_, geo_id)| geo_id.is_block_level())
            .map(|(&logrecno, geo_id)| (logrecno, geo_id.clone()))
            .collect();

        Ok(())
    }

    /// Get the number of header records.
    #[inline] pub fn len(&self) -> usize { self.logrecno.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.logrecno.is_empty() }

    /// Number of duplicate geoids encountered while indexing.
    #[inline] pub fn collisions(&self) -> usize { self.collisions }

    #[inline] pub fn sumlev(&self) -> &[String] { &self.sumlev }
    #[inline] pub fn logrecno(&self) -> &[u32] { &self.logrecno }
    #[inline] pub fn block_group(&self) -> &[String] { &self.block_group }
    #[inline] pub fn geo_ids(&self) -> &[GeoId] { &self.geo_ids }
    #[inline] pub fn lat(&self) -> &[Value] { &self.lat }
    #[inline] pub fn lon(&self) -> &[Value] { &self.lon }
    #[inline] pub fn area_land(&self) -> &[Value] { &self.area_land }
    #[inline] pub fn area_water(&self) -> &[Value] { &self.area_water }
    #[inline] pub fn pop100(&self) -> &[Value] { &self.pop100 }
    #[inline] pub fn housing_units(&self) -> &[Value] { &self.housing_units }

    /// Map from geoid to logical record number, over all records.
    #[inline] pub fn geoid_to_logrecno(&self) -> &HashMap<GeoId, u32> { &self.geoid_to_logrecno }

    /// Map from geoid to POP100, over all records.
    #[inline] pub fn geoid_to_pop100(&self) -> &HashMap<GeoId, Value> { &self.geoid_to_pop100 }

    /// Map from logical record number to geoid, over block-level records only.
    #[inline] pub fn logrecno_to_geoid(&self) -> &HashMap<u32, GeoId> { &self.logrecno_to_geoid }
}
