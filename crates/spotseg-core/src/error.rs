//! Error types for spotseg-core
//!
//! Provides a unified error type for the data-model operations in the core
//! crate. Stage crates wrap this error in their own enums via `#[from]`.

use crate::spot::{RasterId, SpotId};
use thiserror::Error;

/// spotseg-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid grid dimensions
    #[error("invalid grid dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Cell coordinate outside the grid
    #[error("cell ({x}, {y}) out of bounds for {width}x{height} grid")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// Grid dimension mismatch
    #[error("dimension mismatch: expected {}x{}, got {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// The same spot id appears in more than one row of a spot table
    #[error("spot {spot_id} placed twice (rasters {first} and {second})")]
    DuplicateSpot {
        spot_id: SpotId,
        first: RasterId,
        second: RasterId,
    },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;
