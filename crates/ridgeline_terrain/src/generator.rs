//! # Terrain Generator
//!
//! Recursive midpoint displacement (diamond-square) over a
//! [`HeightField`], followed by one smoothing pass, a contrast curve, and
//! the waterline computation.
//!
//! ## Reproduction Contract
//!
//! The pipeline reproduces the reference generator bit-for-bit for a given
//! draw sequence. That pins down more than the happy path:
//!
//! - evaluation order is square-then-diamond per iteration, and
//!   left/right/top/bottom within a diamond
//! - the jitter percentage is `a/10 + 10`, so fine detail keeps roughly
//!   10% of randomness at the smallest step
//! - off-grid reads draw fresh noise and off-grid writes wrap (the
//!   [`HeightField`] edge policies)
//! - the corner list carried between iterations tracks the diamond centre
//!   in place of the right midpoint, and shared midpoints are revisited
//!   rather than deduplicated

use ridgeline_core::{jitter, RandomSource};

use crate::field::HeightField;

/// Contrast multiplier applied after smoothing. Squaring before scaling
/// biases the distribution toward lowland.
const CONTRAST_SCALE: f64 = 255.0;

/// Additive floor of the jitter percentage.
const JITTER_FLOOR: f64 = 10.0;

/// Drives one full generation pass over a height field.
///
/// # Example
///
/// ```rust
/// use ridgeline_core::{SeededRandom, WorldSeed};
/// use ridgeline_terrain::{HeightField, TerrainGenerator};
///
/// let mut field = HeightField::new(33, 33);
/// let mut source = SeededRandom::from_seed(WorldSeed::new(42));
/// let waterline = TerrainGenerator::new().generate(&mut field, &mut source);
/// assert!(waterline >= 0.0);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct TerrainGenerator;

impl TerrainGenerator {
    /// Creates a generator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Fills `field` and returns the waterline.
    ///
    /// The four corners are seeded with independent uniform draws, the
    /// square/diamond recursion runs with a working step halving from
    /// `width - 1` down to 1, then smoothing, contrast, and the waterline
    /// (the 50th-percentile cell value) are applied in that order.
    ///
    /// Dimensions that are not `2^k + 1` still terminate (fractional
    /// midpoints truncate toward zero when indexing) but leave coverage
    /// incomplete and asymmetric; validating dimensions is the caller's
    /// contract.
    pub fn generate<R: RandomSource + ?Sized>(
        &self,
        field: &mut HeightField,
        source: &mut R,
    ) -> f64 {
        let last_row = field.height() as i64 - 1;
        let last_col = field.width() as i64 - 1;
        field.plot(0, 0, source.unit());
        field.plot(0, last_col, source.unit());
        field.plot(last_row, 0, source.unit());
        field.plot(last_row, last_col, source.unit());

        let mut squares: Vec<(f64, f64)> = vec![(0.0, 0.0)];
        let mut a = (field.width() - 1) as f64;
        while a > 1.0 {
            a /= 2.0;
            let diamonds = self.square_step(field, &squares, a, source);
            squares = self.diamond_step(field, &diamonds, a, source);
        }

        self.smooth(field);

        for v in field.values_mut() {
            *v = *v * *v * CONTRAST_SCALE;
        }

        let waterline = Self::waterline(field);
        tracing::debug!(
            width = field.width(),
            height = field.height(),
            waterline,
            "terrain pass complete"
        );
        waterline
    }

    /// Square step: writes each quad centre from the average of its four
    /// corners at spacing `2a`, perturbed by `jitter(avg, a/10 + 10)`.
    /// Returns the centres - the next generation of diamonds.
    fn square_step<R: RandomSource + ?Sized>(
        &self,
        field: &mut HeightField,
        squares: &[(f64, f64)],
        a: f64,
        source: &mut R,
    ) -> Vec<(f64, f64)> {
        let mut diamonds = Vec::with_capacity(squares.len());
        for &(y1, x1) in squares {
            let mid = (Self::read(field, y1, x1, source)
                + Self::read(field, y1, x1 + 2.0 * a, source)
                + Self::read(field, y1 + 2.0 * a, x1, source)
                + Self::read(field, y1 + 2.0 * a, x1 + 2.0 * a, source))
                / 4.0;
            let perturbed = jitter(source, mid, a / 10.0 + JITTER_FLOOR);
            Self::write(field, y1 + a, x1 + a, perturbed);
            diamonds.push((y1 + a, x1 + a));
        }
        diamonds
    }

    /// Diamond step: writes the four edge midpoints of each diamond, each
    /// averaged from the centre, the two adjacent diagonal corners, and the
    /// opposite-direction neighbour two steps away. Returns the corner list
    /// for the next square step.
    ///
    /// The right midpoint's tracked corner is the diamond centre `(y, x)`
    /// itself, and shared midpoints of adjacent diamonds appear more than
    /// once; both match the reference output exactly.
    fn diamond_step<R: RandomSource + ?Sized>(
        &self,
        field: &mut HeightField,
        diamonds: &[(f64, f64)],
        a: f64,
        source: &mut R,
    ) -> Vec<(f64, f64)> {
        let percent = a / 10.0 + JITTER_FLOOR;
        let mut squares = Vec::with_capacity(diamonds.len() * 4);
        for &(y, x) in diamonds {
            let left = (Self::read(field, y, x, source)
                + Self::read(field, y - a, x - a, source)
                + Self::read(field, y, x - 2.0 * a, source)
                + Self::read(field, y + a, x - a, source))
                / 4.0;
            let perturbed = jitter(source, left, percent);
            Self::write(field, y, x - a, perturbed);
            squares.push((y, x - a));

            let right = (Self::read(field, y, x, source)
                + Self::read(field, y - a, x + a, source)
                + Self::read(field, y, x + 2.0 * a, source)
                + Self::read(field, y + a, x + a, source))
                / 4.0;
            let perturbed = jitter(source, right, percent);
            Self::write(field, y, x + a, perturbed);
            squares.push((y, x));

            let top = (Self::read(field, y, x, source)
                + Self::read(field, y - a, x - a, source)
                + Self::read(field, y - 2.0 * a, x, source)
                + Self::read(field, y - a, x + a, source))
                / 4.0;
            let perturbed = jitter(source, top, percent);
            Self::write(field, y - a, x, perturbed);
            squares.push((y - a, x));

            let bottom = (Self::read(field, y, x, source)
                + Self::read(field, y + a, x - a, source)
                + Self::read(field, y + 2.0 * a, x, source)
                + Self::read(field, y + a, x + a, source))
                / 4.0;
            let perturbed = jitter(source, bottom, percent);
            Self::write(field, y + a, x, perturbed);
            squares.push((y + a, x));
        }
        squares
    }

    /// One in-place box-blur pass, row-major.
    ///
    /// Each cell becomes the average of itself and its in-range neighbours.
    /// The straight right/down neighbour tests stop one cell short of the
    /// edge while the diagonal tests do not, and earlier cells in the scan
    /// contribute their already-smoothed values.
    fn smooth(&self, field: &mut HeightField) {
        let w = field.width();
        let h = field.height();
        for y in 0..h {
            for x in 0..w {
                let mut average = 0.0;
                let mut times = 0.0;
                let cells = field.values();

                if x >= 1 {
                    average += cells[y * w + x - 1];
                    times += 1.0;
                }
                if x + 1 < w - 1 {
                    average += cells[y * w + x + 1];
                    times += 1.0;
                }
                if y >= 1 {
                    average += cells[(y - 1) * w + x];
                    times += 1.0;
                }
                if y + 1 < h - 1 {
                    average += cells[(y + 1) * w + x];
                    times += 1.0;
                }

                if x >= 1 && y >= 1 {
                    average += cells[(y - 1) * w + x - 1];
                    times += 1.0;
                }
                if x + 1 < w && y >= 1 {
                    average += cells[(y - 1) * w + x + 1];
                    times += 1.0;
                }
                if x >= 1 && y + 1 < h {
                    average += cells[(y + 1) * w + x - 1];
                    times += 1.0;
                }
                if x + 1 < w && y + 1 < h {
                    average += cells[(y + 1) * w + x + 1];
                    times += 1.0;
                }

                average += cells[y * w + x];
                times += 1.0;

                field.set(y, x, average / times);
            }
        }
    }

    /// The waterline: the cell value at index `floor((count - 1) * 0.5)` of
    /// the ascending-sorted flattened field.
    fn waterline(field: &HeightField) -> f64 {
        let mut values = field.values().to_vec();
        values.sort_by(f64::total_cmp);
        values[(values.len() - 1) / 2]
    }

    /// Working coordinates stay real-valued through the recursion; indexing
    /// truncates toward zero.
    #[inline]
    fn read<R: RandomSource + ?Sized>(field: &HeightField, y: f64, x: f64, source: &mut R) -> f64 {
        field.sample(y as i64, x as i64, source)
    }

    #[inline]
    fn write(field: &mut HeightField, y: f64, x: f64, value: f64) {
        field.plot(y as i64, x as i64, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ridgeline_core::{SeededRandom, SequenceRandom, WorldSeed};

    #[test]
    fn test_first_square_step_center_is_exact_average() {
        // 9x9, corners fixed, jitter pinned to 0%: the centre must be the
        // plain average (0.1 + 0.2 + 0.3 + 0.4) / 4.
        let mut field = HeightField::new(9, 9);
        field.set(0, 0, 0.1);
        field.set(0, 8, 0.2);
        field.set(8, 0, 0.3);
        field.set(8, 8, 0.4);

        let mut source = SequenceRandom::constant(0.0);
        let generator = TerrainGenerator::new();
        let diamonds = generator.square_step(&mut field, &[(0.0, 0.0)], 4.0, &mut source);

        assert_eq!(diamonds, vec![(4.0, 4.0)]);
        assert_eq!(field.get(4, 4), Some(0.25));
    }

    #[test]
    fn test_diamond_step_tracks_reference_corners() {
        let mut field = HeightField::new(9, 9);
        let mut source = SequenceRandom::constant(0.0);
        let generator = TerrainGenerator::new();

        let squares = generator.diamond_step(&mut field, &[(4.0, 4.0)], 4.0, &mut source);
        assert_eq!(
            squares,
            vec![(4.0, 0.0), (4.0, 4.0), (0.0, 4.0), (8.0, 4.0)],
            "right midpoint is tracked as the centre itself"
        );
    }

    #[test]
    fn test_generate_fills_every_cell_with_finite_values() {
        let mut field = HeightField::new(33, 33);
        let mut source = SeededRandom::from_seed(WorldSeed::new(42));
        TerrainGenerator::new().generate(&mut field, &mut source);

        for &v in field.values() {
            assert!(v.is_finite(), "cell value {v} is not finite");
            assert!(v >= 0.0, "cell value {v} is negative");
        }
    }

    #[test]
    fn test_generate_is_deterministic() {
        let run = || {
            let mut field = HeightField::new(33, 33);
            let mut source = SeededRandom::from_seed(WorldSeed::new(1337));
            let waterline = TerrainGenerator::new().generate(&mut field, &mut source);
            (field, waterline)
        };
        let (field_a, water_a) = run();
        let (field_b, water_b) = run();

        assert_eq!(field_a, field_b, "same seed must reproduce the field");
        assert_eq!(water_a, water_b);
    }

    #[test]
    fn test_different_seeds_differ() {
        let run = |seed: u64| {
            let mut field = HeightField::new(17, 17);
            let mut source = SeededRandom::from_seed(WorldSeed::new(seed));
            TerrainGenerator::new().generate(&mut field, &mut source);
            field
        };
        assert_ne!(run(1), run(2));
    }

    #[test]
    fn test_waterline_is_median_index_value() {
        let mut field = HeightField::new(9, 9);
        let mut source = SeededRandom::from_seed(WorldSeed::new(7));
        let waterline = TerrainGenerator::new().generate(&mut field, &mut source);

        let mut sorted = field.values().to_vec();
        sorted.sort_by(f64::total_cmp);
        assert_eq!(waterline, sorted[(sorted.len() - 1) / 2]);
    }

    #[test]
    fn test_smoothing_preserves_uniform_fields() {
        let mut field = HeightField::new(9, 9);
        for v in field.values_mut() {
            *v = 0.5;
        }
        TerrainGenerator::new().smooth(&mut field);
        for &v in field.values() {
            assert!((v - 0.5).abs() < 1e-12, "uniform field should stay uniform");
        }
    }

    #[test]
    fn test_non_conforming_dimensions_still_terminate() {
        // 10x10 is not 2^k + 1; coverage is asymmetric but generation must
        // finish and leave only defined values.
        let mut field = HeightField::new(10, 10);
        let mut source = SeededRandom::from_seed(WorldSeed::new(3));
        let waterline = TerrainGenerator::new().generate(&mut field, &mut source);
        assert!(waterline.is_finite());
        assert!(field.values().iter().all(|v| v.is_finite()));
    }
}
