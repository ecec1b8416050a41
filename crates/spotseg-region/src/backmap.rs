//! Mapping component labels back onto spots
//!
//! Every ROI member reads the label of the cell it was rasterized into. The
//! result is the sparse [`LabelAssignment`] that gets persisted; spots
//! outside the ROI never appear in it.

use crate::error::{RegionError, RegionResult};
use crate::roi::Roi;
use spotseg_core::{LabelAssignment, LabelGrid};

/// Build the spot-to-label mapping of an ROI
///
/// # Errors
///
/// Returns `Error::DimensionMismatch` (wrapped) if `labels` is not the
/// ROI's frame, and [`RegionError::LabelMapping`] if a member's cell carries
/// no positive label.
pub fn map_labels_to_spots(labels: &LabelGrid, roi: &Roi) -> RegionResult<LabelAssignment> {
    if labels.width() != roi.width() || labels.height() != roi.height() {
        return Err(spotseg_core::Error::DimensionMismatch {
            expected: (roi.width(), roi.height()),
            actual: (labels.width(), labels.height()),
        }
        .into());
    }

    roi.spots()
        .iter()
        .map(|spot| {
            let (x, y) = (spot.local.x, spot.local.y);
            match labels.get(x, y) {
                Some(label) if label > 0 => Ok((spot.spot_id, label)),
                _ => Err(RegionError::LabelMapping {
                    spot_id: spot.spot_id,
                    x,
                    y,
                }),
            }
        })
        .collect()
}
