//! # Jitter Arithmetic
//!
//! Small scalar helpers shared by the terrain recursion and route carving.
//! All of them degrade to a defined value instead of failing: division by
//! zero yields zero, increments clamp to their ceiling, and an empty jitter
//! range leaves the value untouched.

use crate::rng::RandomSource;

/// Sign-safe division: `a / b`, or `0.0` when `b` is zero.
///
/// Used to derive unit direction signs from possibly-zero deltas.
#[inline]
#[must_use]
pub fn safe_div(a: f64, b: f64) -> f64 {
    if b == 0.0 {
        0.0
    } else {
        a / b
    }
}

/// Bounded increment: `base + step`, clamped to `ceiling`.
#[inline]
#[must_use]
pub fn clamped_inc(base: f64, ceiling: f64, step: f64) -> f64 {
    let res = base + step;
    if res > ceiling {
        ceiling
    } else {
        res
    }
}

/// Bounded unit increment: `base + 1`, clamped to `ceiling`.
#[inline]
#[must_use]
pub fn clamped_inc1(base: f64, ceiling: f64) -> f64 {
    clamped_inc(base, ceiling, 1.0)
}

/// Percentage-bounded random perturbation.
///
/// Returns `value * (1 + u/100)` where `u` is an integer drawn uniformly
/// from `[-p, p)` and `p` is `percent` truncated to an integer. A
/// non-positive `p` leaves the value unchanged. The integer draw (rather
/// than a continuous one) is part of the generator's reproduction contract.
#[inline]
pub fn jitter<R: RandomSource + ?Sized>(source: &mut R, value: f64, percent: f64) -> f64 {
    let p = percent as i64;
    if p <= 0 {
        return value;
    }
    let u = source.int_range(-p, p);
    value * (1.0 + u as f64 / 100.0)
}
