//! # Cave and Route Carving
//!
//! Stamps cave chambers onto a generated field and digs randomized routes
//! between consecutive chambers. This is deliberately **not** part of the
//! default generation pipeline: `TerrainGenerator::generate` never calls
//! it, and callers opt in explicitly.
//!
//! Carved cells are written through the field's wrapping `plot` policy, so
//! chambers near an edge spill onto the opposite side instead of failing.

use ridgeline_core::{clamped_inc1, safe_div, RandomSource};

use crate::field::HeightField;

/// Elevation stamped on cave chambers and their centres.
pub const CAVE_FLOOR: f64 = 200.0;

/// Elevation stamped along dug routes.
pub const ROUTE_FLOOR: f64 = 100.0;

/// The 8-neighbourhood offsets `(row, col)`, clockwise from north.
pub const NEIGHBOUR_OFFSETS: [(i64, i64); 8] = [
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
];

/// Carves `cave_count` chambers and routes between consecutive chambers.
///
/// Chamber centres are drawn uniformly from
/// `[0, height - 1) x [0, width - 1)`. Each chamber stamps its
/// 8-neighbourhood and then its centre with [`CAVE_FLOOR`]; a route is dug
/// from the previous centre first, but only when that centre's column is
/// strictly positive (a reference quirk that is kept as-is).
///
/// Returns the chamber centres in carve order.
pub fn carve<R: RandomSource + ?Sized>(
    field: &mut HeightField,
    cave_count: usize,
    source: &mut R,
) -> Vec<(i64, i64)> {
    let mut centres = Vec::with_capacity(cave_count);
    for _ in 0..cave_count {
        let row = source.int_range(0, field.height() as i64 - 1);
        let col = source.int_range(0, field.width() as i64 - 1);
        centres.push((row, col));
    }

    let mut prev: Option<(i64, i64)> = None;
    for &(row, col) in &centres {
        if let Some((prev_row, prev_col)) = prev {
            if prev_col > 0 {
                dig_route(field, (prev_row, prev_col), (row, col), source);
            }
        }
        dig_chamber(field, row, col);
        field.plot(row, col, CAVE_FLOOR);
        prev = Some((row, col));
    }

    tracing::debug!(chambers = centres.len(), "carving complete");
    centres
}

/// Stamps the 8-neighbourhood of a chamber centre.
fn dig_chamber(field: &mut HeightField, row: i64, col: i64) {
    for (d_row, d_col) in NEIGHBOUR_OFFSETS {
        field.plot(row + d_row, col + d_col, CAVE_FLOOR);
    }
}

/// Digs a randomized staircase route from `start` to `finish`.
///
/// Direction signs come from `safe_div(delta, |delta|)`, so a zero delta
/// pins that axis. Each step randomly advances the column or the row
/// offset, clamped to its absolute delta, and stamps [`ROUTE_FLOOR`] at
/// the current position until both offsets have covered their deltas.
fn dig_route<R: RandomSource + ?Sized>(
    field: &mut HeightField,
    start: (i64, i64),
    finish: (i64, i64),
    source: &mut R,
) {
    let (row1, col1) = start;
    let (row2, col2) = finish;

    let d_row = (row2 - row1) as f64;
    let d_col = (col2 - col1) as f64;
    let abs_d_row = d_row.abs();
    let abs_d_col = d_col.abs();
    let dir_row = safe_div(d_row, abs_d_row);
    let dir_col = safe_div(d_col, abs_d_col);

    let mut col_off = 0.0;
    let mut row_off = 0.0;
    while row_off < abs_d_row || col_off < abs_d_col {
        if source.pick_index(2) == 0 {
            col_off = clamped_inc1(col_off, abs_d_col);
        } else {
            row_off = clamped_inc1(row_off, abs_d_row);
        }
        field.plot(
            (row1 as f64 + row_off * dir_row) as i64,
            (col1 as f64 + col_off * dir_col) as i64,
            ROUTE_FLOOR,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ridgeline_core::{SeededRandom, WorldSeed};

    #[test]
    fn test_carve_stamps_chambers() {
        let mut field = HeightField::new(17, 17);
        let mut source = SeededRandom::from_seed(WorldSeed::new(11));

        let centres = carve(&mut field, 3, &mut source);
        assert_eq!(centres.len(), 3);

        for &(row, col) in &centres {
            assert_eq!(
                field.get(row as usize, col as usize),
                Some(CAVE_FLOOR),
                "chamber centre must carry the cave floor"
            );
        }
        let carved = field.values().iter().filter(|&&v| v == CAVE_FLOOR).count();
        assert!(carved >= 9, "one chamber covers at least 9 cells");
    }

    #[test]
    fn test_carve_draws_centres_in_range() {
        let mut field = HeightField::new(9, 9);
        let mut source = SeededRandom::from_seed(WorldSeed::new(5));
        for (row, col) in carve(&mut field, 16, &mut source) {
            assert!((0..8).contains(&row), "row {row} out of [0, height - 1)");
            assert!((0..8).contains(&col), "col {col} out of [0, width - 1)");
        }
    }

    #[test]
    fn test_route_reaches_finish_on_one_axis() {
        let mut field = HeightField::new(17, 17);
        let mut source = SeededRandom::from_seed(WorldSeed::new(21));

        dig_route(&mut field, (2, 2), (2, 6), &mut source);

        assert_eq!(field.get(2, 6), Some(ROUTE_FLOOR), "route reaches finish");
        for (idx, &v) in field.values().iter().enumerate() {
            if v == ROUTE_FLOOR {
                assert_eq!(idx / 17, 2, "zero row delta pins the route to its row");
            }
        }
    }

    #[test]
    fn test_route_stays_inside_bounding_box() {
        let mut field = HeightField::new(17, 17);
        let mut source = SeededRandom::from_seed(WorldSeed::new(8));

        dig_route(&mut field, (3, 4), (9, 12), &mut source);

        for (idx, &v) in field.values().iter().enumerate() {
            if v == ROUTE_FLOOR {
                let row = idx / 17;
                let col = idx % 17;
                assert!((3..=9).contains(&row), "route row {row} escaped the box");
                assert!((4..=12).contains(&col), "route col {col} escaped the box");
            }
        }
        assert_eq!(field.get(9, 12), Some(ROUTE_FLOOR));
    }
}
