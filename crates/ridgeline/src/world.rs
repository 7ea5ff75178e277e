//! # World Map
//!
//! The explicit context object for one world: it owns the height field,
//! the tile store, the random-source handle, and the monotonic map-name
//! counter. There is no ambient singleton; everything a generation cycle
//! touches lives here.
//!
//! One cycle is synchronous and complete before it returns - no partial
//! map is ever observable. Regenerating replaces the field wholesale and
//! stores the new map under a fresh name; old names stay addressable in
//! the store.

use std::collections::{HashMap, HashSet};

use ridgeline_core::{RandomSource, SeededRandom, WorldError, WorldResult, WorldSeed};
use ridgeline_terrain::{HeightField, TerrainGenerator, TileStore};

use crate::catalog::{CatalogEntry, EntityCode};
use crate::config::WorldConfig;

/// A generated world: height field, tile store, walkable set, entities.
///
/// # Example
///
/// ```rust
/// use ridgeline::{CatalogEntry, SeededRandom, WorldMap, WorldSeed};
///
/// let source = SeededRandom::from_seed(WorldSeed::new(42));
/// let mut world =
///     WorldMap::generate(source, "overworld", 33, 33, &[CatalogEntry::new(101, 3)]).unwrap();
///
/// assert_eq!(world.name(), "overworld1");
/// assert!(world.entities_snapshot().len() <= 3);
/// let _ = world.elevation_at(4, 4);
/// ```
#[derive(Debug)]
pub struct WorldMap<R: RandomSource = SeededRandom> {
    name_prefix: String,
    counter: u64,
    name: String,
    width: usize,
    height: usize,
    waterline: f64,
    field: HeightField,
    store: TileStore,
    walkable: Vec<(usize, usize)>,
    walkable_set: HashSet<(usize, usize)>,
    entities: HashMap<(usize, usize), EntityCode>,
    source: R,
}

impl WorldMap<SeededRandom> {
    /// Builds and generates a world from a parsed configuration.
    ///
    /// # Errors
    ///
    /// `InvalidDimension` when the configured sides are not `2^k + 1`.
    pub fn from_config(config: &WorldConfig) -> WorldResult<Self> {
        Self::generate(
            SeededRandom::from_seed(WorldSeed::new(config.seed)),
            &config.name_prefix,
            config.width,
            config.height,
            &config.catalog,
        )
    }
}

impl<R: RandomSource> WorldMap<R> {
    /// Runs one full generation cycle and returns the world.
    ///
    /// # Errors
    ///
    /// `InvalidDimension` unless `width - 1` and `height - 1` are positive
    /// powers of two - the recursion only covers the grid exactly for
    /// `2^k + 1` sides.
    pub fn generate(
        source: R,
        name_prefix: &str,
        width: usize,
        height: usize,
        catalog: &[CatalogEntry],
    ) -> WorldResult<Self> {
        Self::validate_dimensions(width, height)?;
        Ok(Self::generate_unchecked(
            source,
            name_prefix,
            width,
            height,
            catalog,
        ))
    }

    /// Like [`WorldMap::generate`] but without the dimension check,
    /// preserving the reference behavior: the recursion still terminates
    /// for arbitrary sides, but coverage of the grid is incomplete and
    /// asymmetric. Callers own that contract.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is below 2.
    pub fn generate_unchecked(
        source: R,
        name_prefix: &str,
        width: usize,
        height: usize,
        catalog: &[CatalogEntry],
    ) -> Self {
        let mut world = Self {
            name_prefix: name_prefix.to_owned(),
            counter: 0,
            name: String::new(),
            width,
            height,
            waterline: 0.0,
            field: HeightField::new(width, height),
            store: TileStore::new(),
            walkable: Vec::new(),
            walkable_set: HashSet::new(),
            entities: HashMap::new(),
            source,
        };
        world.run_cycle(width, height, catalog);
        world
    }

    /// Runs a fresh generation cycle in place.
    ///
    /// The cycle counter advances monotonically, so the new map lands in
    /// the store under a fresh name and earlier maps stay addressable.
    /// The walkable set and entities are recomputed from scratch.
    ///
    /// # Errors
    ///
    /// `InvalidDimension` unless both sides are `2^k + 1`.
    pub fn regenerate(
        &mut self,
        width: usize,
        height: usize,
        catalog: &[CatalogEntry],
    ) -> WorldResult<()> {
        Self::validate_dimensions(width, height)?;
        self.run_cycle(width, height, catalog);
        Ok(())
    }

    /// Elevation at detailed-resolution-independent coarse coordinates
    /// `(x, y)` = `(col, row)`.
    ///
    /// In-bounds reads return the stored value exactly; out-of-bounds
    /// reads return a fresh uniform draw in `[0, 1)` per call - the
    /// field's generation-time read policy.
    pub fn elevation_at(&mut self, x: i64, y: i64) -> f64 {
        self.field.sample(y, x, &mut self.source)
    }

    /// Detailed elevation at fine coordinates `(x, y)`, lazily
    /// materializing the enclosing coarse cell on first access.
    ///
    /// # Errors
    ///
    /// `OutOfBounds` when the coordinates fall outside the current map.
    pub fn detail_at(&self, x: usize, y: usize) -> WorldResult<f64> {
        self.store.read_detailed(&self.name, x, y)
    }

    /// Overwrites one detailed sub-cell of the current map. This is the
    /// only mutation point for stored maps; sibling sub-cells are
    /// untouched.
    ///
    /// # Errors
    ///
    /// `OutOfBounds` when the coordinates fall outside the current map.
    pub fn write_detail(&self, x: usize, y: usize, value: f64) -> WorldResult<()> {
        self.store.write_detailed(&self.name, x, y, value)
    }

    /// Whether the coarse cell `(row, col)` sits strictly above the
    /// waterline.
    #[must_use]
    pub fn is_walkable(&self, row: usize, col: usize) -> bool {
        self.walkable_set.contains(&(row, col))
    }

    /// A snapshot of the scattered entities, keyed by `(col, row)`.
    #[must_use]
    pub fn entities_snapshot(&self) -> HashMap<(usize, usize), EntityCode> {
        self.entities.clone()
    }

    /// The current map name (`prefix` + cycle counter).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The waterline: the 50th-percentile cell value of the current map.
    #[must_use]
    pub const fn waterline(&self) -> f64 {
        self.waterline
    }

    /// Map width in coarse cells.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Map height in coarse cells.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Number of walkable coarse cells.
    #[must_use]
    pub fn walkable_count(&self) -> usize {
        self.walkable.len()
    }

    fn validate_dimensions(width: usize, height: usize) -> WorldResult<()> {
        let side_ok = |side: usize| side >= 3 && (side - 1).is_power_of_two();
        if side_ok(width) && side_ok(height) {
            Ok(())
        } else {
            Err(WorldError::InvalidDimension { width, height })
        }
    }

    /// One generation cycle: fresh name, fresh field, terrain pass, store,
    /// walkable set, entity scatter.
    fn run_cycle(&mut self, width: usize, height: usize, catalog: &[CatalogEntry]) {
        self.counter += 1;
        self.name = format!("{}{}", self.name_prefix, self.counter);
        self.width = width;
        self.height = height;

        let mut field = HeightField::new(width, height);
        self.waterline = TerrainGenerator::new().generate(&mut field, &mut self.source);
        self.store.store(&self.name, &field);
        self.field = field;

        self.pack_walkable();
        self.entities.clear();
        self.scatter(catalog);

        tracing::info!(
            name = %self.name,
            width,
            height,
            waterline = self.waterline,
            walkable = self.walkable.len(),
            entities = self.entities.len(),
            "world map generated"
        );
    }

    /// Gathers the coarse cells strictly above the waterline, row-major.
    fn pack_walkable(&mut self) {
        self.walkable.clear();
        for row in 0..self.height {
            for col in 0..self.width {
                if self.field.get(row, col).is_some_and(|v| v > self.waterline) {
                    self.walkable.push((row, col));
                }
            }
        }
        self.walkable_set = self.walkable.iter().copied().collect();
    }

    /// Scatters the catalog onto the walkable set: independent uniform
    /// draws with replacement, last write winning on collision. An empty
    /// walkable set skips placement - scatter never fails.
    fn scatter(&mut self, catalog: &[CatalogEntry]) {
        if self.walkable.is_empty() {
            tracing::warn!(name = %self.name, "no walkable cells, skipping entity scatter");
            return;
        }
        for entry in catalog {
            for _ in 0..entry.count {
                let idx = self.source.pick_index(self.walkable.len());
                let (row, col) = self.walkable[idx];
                self.entities.insert((col, row), entry.code);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::DEFAULT_CATALOG;

    fn world(seed: u64) -> WorldMap {
        WorldMap::generate(
            SeededRandom::from_seed(WorldSeed::new(seed)),
            "overworld",
            33,
            33,
            &DEFAULT_CATALOG,
        )
        .unwrap()
    }

    #[test]
    fn test_generate_names_maps_monotonically() {
        let mut world = world(42);
        assert_eq!(world.name(), "overworld1");

        world.regenerate(33, 33, &DEFAULT_CATALOG).unwrap();
        assert_eq!(world.name(), "overworld2");

        // the first map stays addressable in the store
        assert!(world.store.contains("overworld1"));
    }

    #[test]
    fn test_walkable_is_exactly_above_waterline() {
        let mut world = world(7);
        let waterline = world.waterline();
        for row in 0..33i64 {
            for col in 0..33i64 {
                let elevation = world.elevation_at(col, row);
                assert_eq!(
                    world.is_walkable(row as usize, col as usize),
                    elevation > waterline,
                    "walkable law violated at ({row}, {col})"
                );
            }
        }
    }

    #[test]
    fn test_invalid_dimensions_are_rejected() {
        let source = SeededRandom::from_seed(WorldSeed::new(1));
        let err = WorldMap::generate(source, "m", 32, 33, &[]).unwrap_err();
        assert_eq!(
            err,
            WorldError::InvalidDimension {
                width: 32,
                height: 33
            }
        );
    }

    #[test]
    fn test_generate_unchecked_accepts_odd_sizes() {
        let source = SeededRandom::from_seed(WorldSeed::new(1));
        let world = WorldMap::generate_unchecked(source, "m", 20, 20, &[]);
        assert_eq!(world.name(), "m1");
        assert!(world.waterline().is_finite());
    }

    #[test]
    fn test_entities_land_on_walkable_cells() {
        let world = world(99);
        let entities = world.entities_snapshot();
        assert!(!entities.is_empty());
        assert!(entities.len() <= 43, "no more entities than catalog draws");

        for (&(col, row), &code) in &entities {
            assert!(world.is_walkable(row, col), "entity {code} on water");
        }
    }

    #[test]
    fn test_scatter_with_empty_walkable_is_a_no_op() {
        let mut world = world(3);
        world.walkable.clear();
        world.walkable_set.clear();
        world.entities.clear();

        world.scatter(&DEFAULT_CATALOG);
        assert!(world.entities.is_empty(), "scatter must not fail or place");
    }

    #[test]
    fn test_same_seed_reproduces_the_world() {
        let mut a = world(1234);
        let mut b = world(1234);

        assert_eq!(a.waterline(), b.waterline());
        assert_eq!(a.entities_snapshot(), b.entities_snapshot());
        for row in 0..33i64 {
            for col in 0..33i64 {
                assert_eq!(a.elevation_at(col, row), b.elevation_at(col, row));
            }
        }
    }

    #[test]
    fn test_out_of_bounds_elevation_draws_fresh_noise() {
        let mut world = world(5);
        for _ in 0..100 {
            let v = world.elevation_at(-1, 50);
            assert!((0.0..1.0).contains(&v), "fallback {v} out of [0, 1)");
        }
    }
}
