//! Region of interest extraction
//!
//! Resolves a user-supplied region name against the dataset's region list,
//! joins the region's members against the placed-spot table and moves the
//! result into a local frame whose minimum occupied cell is `(0, 0)`.

use crate::error::{RegionError, RegionResult};
use log::debug;
use spotseg_core::{PixelCoord, RasterId, Region, SpotId, SpotTable};

/// A region member in the ROI's local frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoiSpot {
    /// Spot identifier
    pub spot_id: SpotId,
    /// Parent raster
    pub raster: RasterId,
    /// Local pixel coordinate (minimum is 0 on each axis)
    pub local: PixelCoord,
}

/// The members of one region, translated to a zero-based frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roi {
    name: String,
    spots: Vec<RoiSpot>,
    origin: PixelCoord,
    width: u32,
    height: u32,
}

impl Roi {
    /// Full name of the source region
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Members in spot id order
    pub fn spots(&self) -> &[RoiSpot] {
        &self.spots
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.spots.len()
    }

    /// Whether the ROI has no members (never true for an extracted ROI)
    pub fn is_empty(&self) -> bool {
        self.spots.is_empty()
    }

    /// Global pixel coordinate of the local origin
    pub fn origin(&self) -> PixelCoord {
        self.origin
    }

    /// Local frame width (`max x + 1`)
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Local frame height (`max y + 1`)
    pub fn height(&self) -> u32 {
        self.height
    }
}

/// Find the single region named by `name`
///
/// The name is compared with the last path segment of every region (see
/// [`Region::matches`]).
///
/// # Errors
///
/// Returns [`RegionError::AmbiguousOrMissingRegion`] unless exactly one
/// region matches.
pub fn resolve_region<'a>(regions: &'a [Region], name: &str) -> RegionResult<&'a Region> {
    let found: Vec<&Region> = regions.iter().filter(|r| r.matches(name)).collect();
    match found.as_slice() {
        [region] => Ok(*region),
        _ => Err(RegionError::AmbiguousOrMissingRegion {
            name: name.to_string(),
            matches: found.iter().map(|r| r.name.clone()).collect(),
        }),
    }
}

/// Join a region's members with their pixel coordinates in local frame
///
/// Repeated member ids are collapsed.
///
/// # Errors
///
/// Returns [`RegionError::EmptyRegion`] if the region has no members and
/// [`RegionError::UnplacedSpot`] if a member has no row in `table`.
pub fn extract_roi(region: &Region, table: &SpotTable) -> RegionResult<Roi> {
    let mut ids = region.spots.clone();
    ids.sort_unstable();
    ids.dedup();
    if ids.is_empty() {
        return Err(RegionError::EmptyRegion {
            name: region.name.clone(),
        });
    }

    let placed = ids
        .iter()
        .map(|&spot_id| {
            table.get(spot_id).ok_or_else(|| RegionError::UnplacedSpot {
                region: region.name.clone(),
                spot_id,
            })
        })
        .collect::<RegionResult<Vec<_>>>()?;

    let min_x = placed.iter().map(|p| p.pixel.x).min().unwrap_or(0);
    let min_y = placed.iter().map(|p| p.pixel.y).min().unwrap_or(0);

    let spots: Vec<RoiSpot> = placed
        .iter()
        .map(|p| RoiSpot {
            spot_id: p.spot_id,
            raster: p.raster,
            local: PixelCoord::new(p.pixel.x - min_x, p.pixel.y - min_y),
        })
        .collect();

    let width = spots.iter().map(|s| s.local.x).max().unwrap_or(0) + 1;
    let height = spots.iter().map(|s| s.local.y).max().unwrap_or(0) + 1;

    debug!(
        "roi '{}': {} spots in a {}x{} frame at ({}, {})",
        region.name,
        spots.len(),
        width,
        height,
        min_x,
        min_y
    );

    Ok(Roi {
        name: region.name.clone(),
        spots,
        origin: PixelCoord::new(min_x, min_y),
        width,
        height,
    })
}

/// Resolve `name` and extract its ROI in one step
pub fn select_roi(regions: &[Region], name: &str, table: &SpotTable) -> RegionResult<Roi> {
    let region = resolve_region(regions, name)?;
    extract_roi(region, table)
}
