//! Error types for spotseg-transform

use spotseg_core::{RasterId, SpotId};
use thiserror::Error;

/// Errors that can occur while placing spots on the pixel grid
#[derive(Debug, Error)]
pub enum TransformError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] spotseg_core::Error),

    /// The linear part of a transform cannot be inverted
    #[error("singular transformation matrix (determinant {determinant:e}){}", raster_suffix(.raster))]
    SingularTransform {
        raster: Option<RasterId>,
        determinant: f64,
    },

    /// Two rasters claim the same spot
    #[error("spot {spot_id} is a member of both raster {first} and raster {second}")]
    OverlappingRasters {
        spot_id: SpotId,
        first: RasterId,
        second: RasterId,
    },

    /// Invalid transformation parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

impl TransformError {
    /// Attach the raster a transform belongs to
    pub fn with_raster(self, raster: RasterId) -> Self {
        match self {
            TransformError::SingularTransform { determinant, .. } => {
                TransformError::SingularTransform {
                    raster: Some(raster),
                    determinant,
                }
            }
            other => other,
        }
    }
}

fn raster_suffix(raster: &Option<RasterId>) -> String {
    raster.map(|r| format!(" for raster {r}")).unwrap_or_default()
}

/// Result type for transform operations
pub type TransformResult<T> = Result<T, TransformError>;
