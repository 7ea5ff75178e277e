//! # RIDGELINE
//!
//! Fractal world maps: recursive midpoint displacement over a square
//! height field, a lazy coarse-to-fine tile cache, and entity scatter on
//! the walkable set.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                        RIDGELINE                          │
//! ├───────────────────────────────────────────────────────────┤
//! │  ridgeline_core        ridgeline_terrain       ridgeline  │
//! │  • WorldSeed           • HeightField           • WorldMap │
//! │  • RandomSource        • TerrainGenerator      • Catalog  │
//! │  • jitter helpers      • TileStore             • Config   │
//! │  • WorldError          • carve (gated)         • preview  │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! One [`WorldMap::generate`] call produces a complete map before
//! returning: corners seeded, diamond-square recursion, smoothing,
//! contrast, waterline, walkable set, entity scatter. Everything draws
//! through an injected random source, so a fixed seed reproduces the map
//! bit-for-bit.
//!
//! ## Example
//!
//! ```rust
//! use ridgeline::{WorldConfig, WorldMap};
//!
//! let world = WorldMap::from_config(&WorldConfig::default()).unwrap();
//! assert!(world.walkable_count() > 0);
//! let _ = world.detail_at(10, 10).unwrap(); // lazily materializes a tile
//! ```

pub mod catalog;
pub mod config;
pub mod world;

// Re-export the lower layers
pub use ridgeline_core as core;
pub use ridgeline_terrain as terrain;

// Re-export commonly used types
pub use catalog::{CatalogEntry, EntityCode, DEFAULT_CATALOG};
pub use config::WorldConfig;
pub use ridgeline_core::{
    RandomSource, SeededRandom, SequenceRandom, WorldError, WorldResult, WorldSeed,
};
pub use world::WorldMap;
