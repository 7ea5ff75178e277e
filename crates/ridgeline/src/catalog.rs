//! # Entity Catalog
//!
//! Entity codes and the per-code placement counts scattered onto the
//! walkable set after each generation cycle. Codes group by their hundreds
//! digit: 1xx resources, 2xx landmarks, 3xx flora, 4xx enemies.

use serde::{Deserialize, Serialize};

/// An entity code as recorded on the map.
pub type EntityCode = u16;

/// One catalog line: which code to scatter and how many placements to
/// draw for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// The entity code recorded at each drawn cell.
    pub code: EntityCode,
    /// Placement draws for this code. Draws are independent and with
    /// replacement, so collisions may leave fewer than `count` entities.
    pub count: usize,
}

impl CatalogEntry {
    /// Creates a catalog line.
    #[inline]
    #[must_use]
    pub const fn new(code: EntityCode, count: usize) -> Self {
        Self { code, count }
    }
}

/// The stock catalog scattered by default.
pub const DEFAULT_CATALOG: [CatalogEntry; 10] = [
    CatalogEntry::new(101, 3),
    CatalogEntry::new(102, 1),
    CatalogEntry::new(201, 1),
    CatalogEntry::new(301, 5),
    CatalogEntry::new(302, 7),
    CatalogEntry::new(303, 9),
    CatalogEntry::new(401, 3),
    CatalogEntry::new(402, 6),
    CatalogEntry::new(403, 4),
    CatalogEntry::new(404, 4),
];
