//! # World Configuration
//!
//! TOML-backed settings for one world: seed, dimensions, map-name prefix,
//! and the entity catalog. Loaded once at startup; every field has a
//! default, so a partial file is fine.
//!
//! ```toml
//! seed = 42
//! width = 33
//! height = 33
//! name_prefix = "overworld"
//!
//! [[catalog]]
//! code = 101
//! count = 3
//! ```

use serde::Deserialize;

use ridgeline_core::{WorldError, WorldResult, WorldSeed};

use crate::catalog::{CatalogEntry, DEFAULT_CATALOG};

/// Settings for building a [`WorldMap`](crate::WorldMap).
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct WorldConfig {
    /// World seed; drives every random draw of the generation cycle.
    pub seed: u64,
    /// Map width in coarse cells. Must be `2^k + 1` for full coverage.
    pub width: usize,
    /// Map height in coarse cells. Must be `2^k + 1` for full coverage.
    pub height: usize,
    /// Prefix of generated map names; the monotonic cycle counter is
    /// appended.
    pub name_prefix: String,
    /// Entity catalog scattered after generation.
    pub catalog: Vec<CatalogEntry>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: WorldSeed::default().value(),
            width: 33,
            height: 33,
            name_prefix: "overworld".to_owned(),
            catalog: DEFAULT_CATALOG.to_vec(),
        }
    }
}

impl WorldConfig {
    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// `WorldError::InvalidConfig` when the document does not parse or
    /// contains unknown fields.
    pub fn from_toml_str(text: &str) -> WorldResult<Self> {
        toml::from_str(text).map_err(|e| WorldError::InvalidConfig(e.to_string()))
    }
}
