//! spotseg core - Basic data structures for spot segmentation
//!
//! This crate provides the data model shared by every pipeline stage:
//!
//! - [`Spot`] / [`PlacedSpot`] / [`SpotTable`] - Measurement spots before and
//!   after pixel placement
//! - [`Region`] - Named member sets of the dataset's region tree
//! - [`Transform`] - Per-raster pixel-to-world affine matrix
//! - [`Grid`] / [`OccupancyGrid`] / [`LabelGrid`] - Dense cell matrices
//! - [`LabelAssignment`] - The sparse spot-to-label result

pub mod error;
pub mod grid;
pub mod region;
pub mod spot;
pub mod transform;

pub use error::{Error, Result};
pub use grid::{BoundingBox, Grid, LabelGrid, OccupancyGrid};
pub use region::{REGION_PATH_SEPARATOR, ROOT_REGION_NAME, Region, short_name};
pub use spot::{LabelAssignment, PixelCoord, PlacedSpot, RasterId, Spot, SpotId, SpotTable};
pub use transform::{IndexImage, Transform};
