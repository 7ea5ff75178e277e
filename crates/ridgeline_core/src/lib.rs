//! # RIDGELINE Core
//!
//! Shared primitives for the RIDGELINE terrain engine.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: every random draw flows through an explicit
//!    [`RandomSource`] handle; a fixed [`WorldSeed`] reproduces a map
//!    bit-for-bit
//! 2. **No ambient state**: there is no process-wide random source or
//!    singleton anywhere in the workspace
//! 3. **Defined fallbacks**: arithmetic helpers degrade to a defined value
//!    (e.g. division by zero yields zero) instead of failing
//!
//! ## Core Components
//!
//! - `WorldSeed`: deterministic seed with sub-seed derivation
//! - `RandomSource` / `SeededRandom` / `SequenceRandom`: the injection seam
//! - `safe_div`, `clamped_inc`, `jitter`: jitter arithmetic
//! - `WorldError`: error type shared across the workspace

pub mod error;
pub mod rng;
pub mod scalar;

pub use error::{WorldError, WorldResult};
pub use rng::{RandomSource, SeededRandom, SequenceRandom, WorldSeed};
pub use scalar::{clamped_inc, clamped_inc1, jitter, safe_div};
