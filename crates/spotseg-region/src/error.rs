//! Error types for spotseg-region

use spotseg_core::SpotId;
use thiserror::Error;

/// Errors that can occur during ROI processing
#[derive(Debug, Error)]
pub enum RegionError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] spotseg_core::Error),

    /// The requested name does not resolve to exactly one region
    #[error("region name '{name}' must match exactly one region, found {}{}", .matches.len(), list_matches(.matches))]
    AmbiguousOrMissingRegion { name: String, matches: Vec<String> },

    /// The region has no member spots
    #[error("region '{name}' has no spots")]
    EmptyRegion { name: String },

    /// A region member has no pixel coordinates
    #[error("spot {spot_id} of region '{region}' has no pixel coordinates")]
    UnplacedSpot { region: String, spot_id: SpotId },

    /// A spot's cell did not receive a component label
    #[error("spot {spot_id} at local cell ({x}, {y}) received no component label")]
    LabelMapping { spot_id: SpotId, x: u32, y: u32 },

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

fn list_matches(matches: &[String]) -> String {
    if matches.is_empty() {
        String::new()
    } else {
        format!(": {}", matches.join(", "))
    }
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;
