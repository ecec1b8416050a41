//! Occupancy grid construction
//!
//! Turns the sparse ROI members into a dense mask of the ROI's local
//! bounding box: 1 where at least one spot sits, 0 elsewhere.

use crate::error::RegionResult;
use crate::roi::Roi;
use spotseg_core::OccupancyGrid;

/// Value of an occupied cell
pub const OCCUPIED: u8 = 1;

/// Build the occupancy grid of an ROI
///
/// The grid is `roi.width()` columns by `roi.height()` rows. Several spots
/// on the same cell leave it at [`OCCUPIED`].
///
/// # Errors
///
/// Returns an error if the ROI frame is empty.
pub fn rasterize(roi: &Roi) -> RegionResult<OccupancyGrid> {
    let mut grid = OccupancyGrid::new(roi.width(), roi.height())?;
    for spot in roi.spots() {
        grid.set(spot.local.x, spot.local.y, OCCUPIED)?;
    }
    Ok(grid)
}
