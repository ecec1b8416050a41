//! spotseg-region - Region processing for spot segmentation
//!
//! This crate provides the stages that run on one region of interest:
//!
//! - **ROI extraction** - Resolving a region name and moving its spots into
//!   a local pixel frame
//! - **Rasterization** - Building an occupancy grid from the ROI members
//! - **Connected component analysis** - Finding and labeling connected
//!   groups of occupied cells
//! - **Seed fill operations** - Flood fill labeling
//! - **Back-mapping** - Reading each spot's component label
//!
//! # Examples
//!
//! ## Finding connected components
//!
//! ```
//! use spotseg_core::OccupancyGrid;
//! use spotseg_region::{ConnectivityType, find_connected_components};
//!
//! let mut grid = OccupancyGrid::new(100, 100).unwrap();
//! grid.set(10, 10, 1).unwrap();
//! grid.set(11, 10, 1).unwrap();
//! grid.set(50, 50, 1).unwrap();
//!
//! let components = find_connected_components(&grid, ConnectivityType::FourWay).unwrap();
//! assert_eq!(components.len(), 2);
//! ```
//!
//! ## From region to labels
//!
//! ```
//! use spotseg_core::{PlacedSpot, Region, SpotTable};
//! use spotseg_region::{ConnectivityType, label_connected_components, map_labels_to_spots, rasterize, select_roi};
//!
//! let table = SpotTable::from_rows(vec![
//!     PlacedSpot::new(1, 0, 3, 3),
//!     PlacedSpot::new(2, 0, 4, 4),
//!     PlacedSpot::new(3, 0, 9, 3),
//! ])
//! .unwrap();
//! let regions = vec![Region::new("Regions/tissue", vec![1, 2, 3])];
//!
//! let roi = select_roi(&regions, "tissue", &table).unwrap();
//! let grid = rasterize(&roi).unwrap();
//! let labels = label_connected_components(&grid, ConnectivityType::EightWay).unwrap();
//! let assignment = map_labels_to_spots(&labels, &roi).unwrap();
//! assert_eq!(assignment[&1], assignment[&2]);
//! assert_ne!(assignment[&1], assignment[&3]);
//! ```

pub mod backmap;
pub mod conncomp;
pub mod error;
pub mod label;
pub mod raster;
pub mod roi;
pub mod seedfill;

// Re-export core types
pub use spotseg_core;

// Re-export error types
pub use error::{RegionError, RegionResult};

// Re-export conncomp types and functions
pub use conncomp::{
    ConnectedComponent, ConnectivityType, components_from_labels, find_connected_components,
    label_connected_components,
};

// Re-export label types and functions
pub use label::{
    ComponentStats, count_components, get_component_sizes, get_component_stats,
    is_same_partition,
};

// Re-export ROI and raster functions
pub use backmap::map_labels_to_spots;
pub use raster::{OCCUPIED, rasterize};
pub use roi::{Roi, RoiSpot, extract_roi, resolve_region, select_roi};

// Re-export seedfill functions
pub use seedfill::{floodfill, label_by_floodfill};
