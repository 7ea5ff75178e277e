//! # RIDGELINE Terrain
//!
//! Fractal height-field generation paired with a lazy hierarchical tile
//! cache.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: generation draws only through the injected
//!    [`RandomSource`](ridgeline_core::RandomSource) handle
//! 2. **Soft edges**: out-of-range reads during generation return fresh
//!    noise, out-of-range writes wrap - the recursion never fails at the
//!    boundary
//! 3. **Lazy detail**: a coarse cell is expanded into a fine tile only on
//!    its first sub-cell access, and the expansion is one-directional
//!
//! ## Core Components
//!
//! - `HeightField`: square elevation grid with the edge policies above
//! - `TerrainGenerator`: midpoint displacement, smoothing, contrast,
//!   waterline
//! - `TileStore`: named-map registry with scalar-or-tile coarse cells
//! - `carve`: gated cave/route stamping kept out of the default pipeline

pub mod carve;
pub mod field;
pub mod generator;
pub mod tile_store;

pub use carve::{carve, CAVE_FLOOR, NEIGHBOUR_OFFSETS, ROUTE_FLOOR};
pub use field::HeightField;
pub use generator::TerrainGenerator;
pub use tile_store::{MapEntry, TileCell, TileGrid, TileStore, TILE_AREA, TILE_SIZE};
