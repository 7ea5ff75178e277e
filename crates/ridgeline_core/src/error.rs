//! # World Error Types
//!
//! All errors that can surface from map generation and tile addressing.
//!
//! Normal generation never fails: out-of-range elevation reads fall back to
//! fresh noise and out-of-range writes wrap onto valid cells. Errors exist
//! only at the API boundary - rejected dimensions, unknown map names,
//! detailed coordinates outside a stored grid, and bad config files.

use thiserror::Error;

/// Errors that can occur in the world-map system.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WorldError {
    /// Map dimensions were rejected: the recursion only covers the grid
    /// exactly when each side is a power of two plus one.
    #[error("invalid dimension: {width}x{height} (each side must be 2^k + 1)")]
    InvalidDimension {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },

    /// No map is registered under the given name.
    #[error("unknown map: {0}")]
    UnknownMap(String),

    /// Detailed coordinates fall outside the stored coarse grid.
    #[error("coordinates ({x}, {y}) outside map {name}")]
    OutOfBounds {
        /// The map that was addressed.
        name: String,
        /// Detailed x coordinate.
        x: usize,
        /// Detailed y coordinate.
        y: usize,
    },

    /// Invalid configuration file.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for world-map operations.
pub type WorldResult<T> = Result<T, WorldError>;
