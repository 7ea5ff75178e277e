//! # Height Field
//!
//! A fixed-size square grid of elevations with the edge policies the
//! midpoint-displacement recursion depends on: reads past the boundary
//! return fresh noise, writes past the boundary wrap onto a valid cell.
//! The asymmetry produces soft, noise-like edge artifacts instead of
//! mirrored or clamped borders and is part of the reproduction contract.

use ridgeline_core::RandomSource;

/// A square grid of real-valued elevations.
///
/// For the recursion to terminate exactly at step size 1, callers supply
/// dimensions of the form `2^k + 1`. That is a caller contract, not a
/// checked precondition here; see `WorldMap::generate` for the validated
/// surface.
#[derive(Clone, Debug, PartialEq)]
pub struct HeightField {
    width: usize,
    height: usize,
    cells: Vec<f64>,
}

impl HeightField {
    /// Creates a zero-initialized field.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is below 2 (the wrap modulus would be
    /// zero).
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width >= 2 && height >= 2, "field dimensions must be >= 2");
        Self {
            width,
            height,
            cells: vec![0.0; width * height],
        }
    }

    /// Field width in cells.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Field height in cells.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Bounds-checked read.
    #[inline]
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.height && col < self.width {
            Some(self.cells[row * self.width + col])
        } else {
            None
        }
    }

    /// Bounds-checked write. Out-of-range writes are ignored.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        if row < self.height && col < self.width {
            self.cells[row * self.width + col] = value;
        }
    }

    /// Generation-time read.
    ///
    /// In-range coordinates return the stored cell. Any out-of-range
    /// coordinate returns a fresh uniform draw in `[0, 1)` - never an
    /// error, never a clamped or mirrored neighbour.
    #[inline]
    pub fn sample<R: RandomSource + ?Sized>(&self, row: i64, col: i64, source: &mut R) -> f64 {
        if self.in_range(row, col) {
            self.cells[row as usize * self.width + col as usize]
        } else {
            source.unit()
        }
    }

    /// Generation-time write.
    ///
    /// An out-of-range coordinate is wrapped per axis via
    /// `rem_euclid(dim - 1)` onto a valid cell - writes never fail.
    #[inline]
    pub fn plot(&mut self, row: i64, col: i64, value: f64) {
        let r = if (0..self.height as i64).contains(&row) {
            row as usize
        } else {
            row.rem_euclid(self.height as i64 - 1) as usize
        };
        let c = if (0..self.width as i64).contains(&col) {
            col as usize
        } else {
            col.rem_euclid(self.width as i64 - 1) as usize
        };
        self.cells[r * self.width + c] = value;
    }

    /// All cell values, row-major.
    #[inline]
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.cells
    }

    /// Mutable view of all cell values, row-major.
    #[inline]
    pub fn values_mut(&mut self) -> &mut [f64] {
        &mut self.cells
    }

    #[inline]
    fn in_range(&self, row: i64, col: i64) -> bool {
        (0..self.height as i64).contains(&row) && (0..self.width as i64).contains(&col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ridgeline_core::{SeededRandom, SequenceRandom, WorldSeed};

    #[test]
    fn test_new_field_is_zeroed() {
        let field = HeightField::new(9, 9);
        assert!(field.values().iter().all(|&v| v == 0.0));
        assert_eq!(field.values().len(), 81);
    }

    #[test]
    fn test_get_set_round_trip() {
        let mut field = HeightField::new(5, 5);
        field.set(2, 3, 0.75);
        assert_eq!(field.get(2, 3), Some(0.75));
        assert_eq!(field.get(5, 0), None);
        assert_eq!(field.get(0, 5), None);
    }

    #[test]
    fn test_sample_in_range_is_exact() {
        let mut field = HeightField::new(5, 5);
        field.set(1, 1, 0.5);
        let mut source = SeededRandom::from_seed(WorldSeed::new(1));
        assert_eq!(field.sample(1, 1, &mut source), 0.5);
    }

    #[test]
    fn test_sample_out_of_range_draws_noise() {
        let field = HeightField::new(5, 5);
        let mut source = SequenceRandom::new(vec![0.33], 0.66, 0);
        assert_eq!(field.sample(-1, 0, &mut source), 0.33);
        assert_eq!(field.sample(0, 99, &mut source), 0.66);

        let mut seeded = SeededRandom::from_seed(WorldSeed::new(9));
        for _ in 0..1000 {
            let v = field.sample(100, 100, &mut seeded);
            assert!((0.0..1.0).contains(&v), "fallback {v} out of [0, 1)");
        }
    }

    #[test]
    fn test_plot_wraps_out_of_range() {
        let mut field = HeightField::new(5, 5);
        // 6 % (5 - 1) == 2 on the row axis only
        field.plot(6, 1, 0.9);
        assert_eq!(field.get(2, 1), Some(0.9));
        // both axes out of range wrap independently
        field.plot(-1, 7, 0.4);
        assert_eq!(field.get(3, 3), Some(0.4));
        // in-range writes land directly
        field.plot(4, 4, 0.1);
        assert_eq!(field.get(4, 4), Some(0.1));
    }

    #[test]
    fn test_plot_never_discards() {
        let mut field = HeightField::new(5, 5);
        field.plot(999, -999, 1.5);
        let written = field.values().iter().filter(|&&v| v == 1.5).count();
        assert_eq!(written, 1, "exactly one cell receives the wrapped write");
    }
}
