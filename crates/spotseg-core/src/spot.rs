//! Spots and the placed-spot table
//!
//! A [`Spot`] is one measurement location as read from the dataset: an id,
//! world coordinates and the raster it was acquired in. Once pixel
//! coordinates have been derived for it, it becomes a [`PlacedSpot`], and a
//! sorted collection of those is a [`SpotTable`].

use crate::error::{Error, Result};
use std::collections::BTreeMap;

/// Externally assigned spot identifier
pub type SpotId = i64;

/// Identifier of the raster (sub-image) a spot was acquired in
pub type RasterId = i64;

/// Final sparse mapping from spot id to component label
///
/// Only ROI members are present; there is no sentinel for "not labeled".
pub type LabelAssignment = BTreeMap<SpotId, u32>;

/// A measurement spot in world coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spot {
    /// Spot identifier
    pub spot_id: SpotId,
    /// World x coordinate
    pub x: f64,
    /// World y coordinate
    pub y: f64,
    /// World z coordinate (unused by the 2D pipeline)
    pub z: f64,
    /// Parent raster
    pub raster: RasterId,
}

impl Spot {
    /// Create a new spot in the z = 0 plane
    pub fn new(spot_id: SpotId, x: f64, y: f64, raster: RasterId) -> Self {
        Self {
            spot_id,
            x,
            y,
            z: 0.0,
            raster,
        }
    }

    /// World coordinates as an `(x, y)` pair
    #[inline]
    pub fn world_xy(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

/// Integer pixel coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct PixelCoord {
    /// Column
    pub x: u32,
    /// Row
    pub y: u32,
}

impl PixelCoord {
    /// Create a new pixel coordinate
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// A spot with derived pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedSpot {
    /// Spot identifier
    pub spot_id: SpotId,
    /// Raster whose transform produced the pixel coordinates
    pub raster: RasterId,
    /// Pixel coordinates
    pub pixel: PixelCoord,
}

impl PlacedSpot {
    /// Create a new placed spot
    pub fn new(spot_id: SpotId, raster: RasterId, x: u32, y: u32) -> Self {
        Self {
            spot_id,
            raster,
            pixel: PixelCoord::new(x, y),
        }
    }
}

/// Table of placed spots, sorted by `spot_id`, one row per spot
///
/// Lookups by spot id are binary searches over the sorted rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpotTable {
    rows: Vec<PlacedSpot>,
}

impl SpotTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from unordered rows
    ///
    /// Rows are sorted by spot id. Every spot id must appear at most once.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateSpot`] naming the first repeated id.
    pub fn from_rows(mut rows: Vec<PlacedSpot>) -> Result<Self> {
        rows.sort_by_key(|r| r.spot_id);
        if let Some(w) = rows.windows(2).find(|w| w[0].spot_id == w[1].spot_id) {
            return Err(Error::DuplicateSpot {
                spot_id: w[0].spot_id,
                first: w[0].raster,
                second: w[1].raster,
            });
        }
        Ok(Self { rows })
    }

    /// Number of rows
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Look up a spot by id
    pub fn get(&self, spot_id: SpotId) -> Option<&PlacedSpot> {
        self.rows
            .binary_search_by_key(&spot_id, |r| r.spot_id)
            .ok()
            .map(|i| &self.rows[i])
    }

    /// Whether the table has a row for `spot_id`
    pub fn contains(&self, spot_id: SpotId) -> bool {
        self.get(spot_id).is_some()
    }

    /// Iterate rows in spot id order
    pub fn iter(&self) -> std::slice::Iter<'_, PlacedSpot> {
        self.rows.iter()
    }

    /// Rows as a slice
    pub fn rows(&self) -> &[PlacedSpot] {
        &self.rows
    }
}

impl<'a> IntoIterator for &'a SpotTable {
    type Item = &'a PlacedSpot;
    type IntoIter = std::slice::Iter<'a, PlacedSpot>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
