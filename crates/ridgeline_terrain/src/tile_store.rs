//! # Tile Store
//!
//! A named-map registry over generated height fields that trades memory
//! for on-demand detail. Each coarse cell starts as a bare scalar (a
//! "uniform region") and is expanded - materialized - into a fixed
//! `TILE_SIZE x TILE_SIZE` tile of independent sub-cells on its first
//! fine-grained access. Materialization is monotonic: once expanded, a
//! cell never reverts to scalar form.
//!
//! Detailed coordinates address the fine resolution: `(x, y)` maps to
//! coarse cell `(x / TILE_SIZE, y / TILE_SIZE)` and sub-cell
//! `(x % TILE_SIZE, y % TILE_SIZE)`.
//!
//! Every stored entry sits behind its own `parking_lot::Mutex`, so lazy
//! materialization runs through `&self` and concurrent readers of one map
//! serialize instead of racing the expansion.

use std::collections::HashMap;

use parking_lot::Mutex;

use ridgeline_core::{WorldError, WorldResult};

use crate::field::HeightField;

/// Side length of a materialized detail tile.
pub const TILE_SIZE: usize = 4;

/// Sub-cells per materialized tile.
pub const TILE_AREA: usize = TILE_SIZE * TILE_SIZE;

/// One coarse cell: a uniform scalar, or a materialized detail tile.
#[derive(Clone, Debug, PartialEq)]
pub enum TileCell {
    /// Un-materialized uniform region holding a single elevation.
    Uniform(f64),
    /// Materialized tile of independently addressable sub-cells,
    /// row-major.
    Tile(Box<[f64; TILE_AREA]>),
}

impl TileCell {
    /// Expands a uniform cell in place; a tile stays as it is.
    fn materialize(&mut self) {
        if let Self::Uniform(value) = *self {
            *self = Self::Tile(Box::new([value; TILE_AREA]));
        }
    }

    /// Reads one sub-cell of a materialized tile.
    fn sub(&self, sub_row: usize, sub_col: usize) -> f64 {
        match self {
            // callers materialize first; a uniform cell answers uniformly
            Self::Uniform(value) => *value,
            Self::Tile(cells) => cells[sub_row * TILE_SIZE + sub_col],
        }
    }
}

/// A coarse grid of scalar-or-tile cells, copied from a height field.
///
/// Coarse dimensions equal the source field's dimensions; each coarse cell
/// covers a `TILE_SIZE x TILE_SIZE` patch of the detailed coordinate
/// space.
#[derive(Clone, Debug, PartialEq)]
pub struct TileGrid {
    width: usize,
    height: usize,
    cells: Vec<TileCell>,
}

impl TileGrid {
    fn from_field(field: &HeightField) -> Self {
        Self {
            width: field.width(),
            height: field.height(),
            cells: field.values().iter().map(|&v| TileCell::Uniform(v)).collect(),
        }
    }

    fn uniform(width: usize, height: usize, value: f64) -> Self {
        Self {
            width,
            height,
            cells: vec![TileCell::Uniform(value); width * height],
        }
    }

    /// Count of cells that have been materialized into tiles.
    fn materialized(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| matches!(c, TileCell::Tile(_)))
            .count()
    }
}

/// A registry entry: the normal coarse grid, or a single bare scalar that
/// expands into a uniform `TILE_SIZE x TILE_SIZE` grid on first access.
#[derive(Clone, Debug, PartialEq)]
pub enum MapEntry {
    /// The whole map collapsed to one elevation.
    Scalar(f64),
    /// The addressable coarse grid.
    Grid(TileGrid),
}

impl MapEntry {
    /// Expands a scalar entry into a uniform coarse grid; grids stay as
    /// they are.
    fn materialize(&mut self) {
        if let Self::Scalar(value) = *self {
            *self = Self::Grid(TileGrid::uniform(TILE_SIZE, TILE_SIZE, value));
        }
    }
}

/// Named-map registry with lazy coarse-to-fine expansion.
///
/// # Example
///
/// ```rust
/// use ridgeline_core::{SeededRandom, WorldSeed};
/// use ridgeline_terrain::{HeightField, TerrainGenerator, TileStore};
///
/// let mut field = HeightField::new(9, 9);
/// let mut source = SeededRandom::from_seed(WorldSeed::new(42));
/// TerrainGenerator::new().generate(&mut field, &mut source);
///
/// let mut store = TileStore::new();
/// store.store("overworld1", &field);
/// let detail = store.read_detailed("overworld1", 10, 3).unwrap();
/// assert_eq!(detail, field.get(0, 2).unwrap());
/// ```
#[derive(Debug, Default)]
pub struct TileStore {
    maps: HashMap<String, Mutex<MapEntry>>,
}

impl TileStore {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies `field`'s cells into the registry under `name` as uniform
    /// coarse cells. The copy never aliases the generator's working
    /// buffer; re-storing a name replaces its entry wholesale.
    pub fn store(&mut self, name: &str, field: &HeightField) {
        self.maps.insert(
            name.to_owned(),
            Mutex::new(MapEntry::Grid(TileGrid::from_field(field))),
        );
    }

    /// Registers a bare-scalar entry: a map collapsed to one uniform
    /// elevation, expanded lazily like any other region.
    pub fn store_uniform(&mut self, name: &str, value: f64) {
        self.maps
            .insert(name.to_owned(), Mutex::new(MapEntry::Scalar(value)));
    }

    /// Whether a map is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.maps.contains_key(name)
    }

    /// Coarse dimensions of the entry, materializing a bare-scalar entry
    /// into its uniform grid first.
    pub fn coarse_dims(&self, name: &str) -> WorldResult<(usize, usize)> {
        let entry = self.entry(name)?;
        let mut entry = entry.lock();
        entry.materialize();
        match &*entry {
            MapEntry::Grid(grid) => Ok((grid.width, grid.height)),
            // unreachable after materialize; keep the uniform answer
            MapEntry::Scalar(_) => Ok((TILE_SIZE, TILE_SIZE)),
        }
    }

    /// Reads one detailed sub-cell, materializing the enclosing coarse
    /// cell on first access.
    ///
    /// This is the single point where resolution is lazily increased; a
    /// second read of an un-mutated sub-cell returns the same value.
    ///
    /// # Errors
    ///
    /// `UnknownMap` if `name` is not registered, `OutOfBounds` if the
    /// coarse coordinate falls outside the stored grid.
    pub fn read_detailed(&self, name: &str, x: usize, y: usize) -> WorldResult<f64> {
        self.with_cell(name, x, y, |cell, sub_row, sub_col| cell.sub(sub_row, sub_col))
    }

    /// Overwrites one detailed sub-cell, materializing the enclosing
    /// coarse cell first. Sibling sub-cells are untouched.
    ///
    /// # Errors
    ///
    /// `UnknownMap` if `name` is not registered, `OutOfBounds` if the
    /// coarse coordinate falls outside the stored grid.
    pub fn write_detailed(&self, name: &str, x: usize, y: usize, value: f64) -> WorldResult<()> {
        self.with_cell(name, x, y, |cell, sub_row, sub_col| {
            if let TileCell::Tile(cells) = cell {
                cells[sub_row * TILE_SIZE + sub_col] = value;
            }
        })
    }

    /// Count of coarse cells of `name` that have been materialized.
    ///
    /// # Errors
    ///
    /// `UnknownMap` if `name` is not registered.
    pub fn materialized_cells(&self, name: &str) -> WorldResult<usize> {
        let entry = self.entry(name)?;
        let entry = entry.lock();
        match &*entry {
            MapEntry::Scalar(_) => Ok(0),
            MapEntry::Grid(grid) => Ok(grid.materialized()),
        }
    }

    /// Locks the entry, resolves detailed addressing, materializes the
    /// coarse cell, and hands it to `op`.
    fn with_cell<T>(
        &self,
        name: &str,
        x: usize,
        y: usize,
        op: impl FnOnce(&mut TileCell, usize, usize) -> T,
    ) -> WorldResult<T> {
        let entry = self.entry(name)?;
        let mut entry = entry.lock();
        entry.materialize();
        let MapEntry::Grid(grid) = &mut *entry else {
            return Err(WorldError::UnknownMap(name.to_owned()));
        };

        let coarse_row = y / TILE_SIZE;
        let coarse_col = x / TILE_SIZE;
        if coarse_row >= grid.height || coarse_col >= grid.width {
            return Err(WorldError::OutOfBounds {
                name: name.to_owned(),
                x,
                y,
            });
        }

        let cell = &mut grid.cells[coarse_row * grid.width + coarse_col];
        if matches!(cell, TileCell::Uniform(_)) {
            tracing::debug!(name, coarse_row, coarse_col, "materializing detail tile");
            cell.materialize();
        }
        Ok(op(cell, y % TILE_SIZE, x % TILE_SIZE))
    }

    fn entry(&self, name: &str) -> WorldResult<&Mutex<MapEntry>> {
        self.maps
            .get(name)
            .ok_or_else(|| WorldError::UnknownMap(name.to_owned()))
    }
}
