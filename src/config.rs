//! Run configuration: descriptor location, geometry attributes, and per-state inputs.

use std::{collections::HashSet, fs, path::{Path, PathBuf}};

use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};

use crate::{geometry::GeometryAttributes, header::CollisionPolicy};

/// Inputs for one state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateConfig {
    /// Two-letter lowercase state abbreviation used in SF1 file names, e.g. "ny".
    pub state: String,
    /// Prefix of the SF1 files, e.g. "census2010/ny/" (kept as text so it may end in a separator).
    pub sf1_path: String,
    /// Path of the tabulation block `.shp` file.
    pub shape_path: PathBuf,
}

impl StateConfig {
    /// Path of the state's geographic header: `{sf1_path}{state}geo2010.sf1`.
    pub fn geo_header_path(&self) -> PathBuf {
        PathBuf::from(format!("{}{}geo2010.sf1", self.sf1_path, self.state))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Path of the SF1 data field descriptor table.
    pub descriptor_path: PathBuf,
    #[serde(default)]
    pub geometry: GeometryAttributes,
    #[serde(default)]
    pub collision_policy: CollisionPolicy,
    pub states: Vec<StateConfig>,
}

impl Config {
    /// Read and validate a JSON config file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("[config] Failed to read config file: {}", path.display()))?;
        let config: Config = serde_json::from_str(&text)
            .with_context(|| format!("[config] Failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that at least one state is given and no state appears twice.
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.states.is_empty(), "[config] No states configured");

        let mut seen = HashSet::new();
        for state in &self.states {
            ensure!(!state.state.is_empty(), "[config] State entry with empty abbreviation");
            ensure!(seen.insert(state.state.as_str()), "[config] State {:?} configured twice", state.state);
        }
        ensure!(!self.geometry.geoid.is_empty() && !self.geometry.land_area.is_empty(),
            "[config] Geometry attribute names must not be empty");
        Ok(())
    }

    /// Look up one state's inputs by abbreviation.
    pub fn state(&self, state: &str) -> Option<&StateConfig> {
        self.states.iter().find(|s| s.state == state)
    }
}
