//! TOML-backed run tuning.
//!
//! Every section is optional; omitted sections fall back to the defaults
//! baked into the core configuration types, so an empty file is a valid
//! tuning.

use std::fs;
use std::path::Path;

use anyhow::Context;
use lastlight_core::{ShrineConfig, SpawnConfig, WeaponTable, WorldConfig, ZoneConfig};
use serde::{Deserialize, Serialize};

/// Complete tuning for one run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunTuning {
    /// Arena, pools, and collision parameters.
    pub world: WorldConfig,
    /// Spawn scheduler parameters.
    pub spawn: SpawnConfig,
    /// Safe-zone parameters.
    pub zone: ZoneConfig,
    /// Shrine blessing magnitudes.
    pub shrine: ShrineConfig,
    /// Weapon stat rows.
    pub weapons: WeaponTable,
}

impl Default for RunTuning {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            spawn: SpawnConfig::default(),
            zone: ZoneConfig::default(),
            shrine: ShrineConfig::default(),
            weapons: WeaponTable::default(),
        }
    }
}

impl RunTuning {
    /// Loads tuning from the provided path, or defaults when no path is
    /// given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading tuning file {}", path.display()))?;
        let tuning = toml::from_str(&text)
            .with_context(|| format!("parsing tuning file {}", path.display()))?;
        Ok(tuning)
    }
}
