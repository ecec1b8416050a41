//! spotseg - Connected-component segmentation of spatial spot datasets
//!
//! Imaging datasets record measurements at discrete spots, each with world
//! coordinates and a parent raster. This crate groups the spots of one
//! region of interest into spatially connected segments and writes the
//! grouping back to the dataset as a label.
//!
//! # Overview
//!
//! - Coordinate transformation from world to pixel space
//! - Region of interest extraction and rasterization
//! - 8-connected (or 4-connected) component labeling
//! - Dataset access through JSON files and flexImaging spot lists
//!
//! # Example
//!
//! ```
//! use spotseg::io::{DatasetSource, JsonDataset, DatasetDocument};
//! use spotseg::pipeline::{PipelineOptions, segment_region};
//!
//! let doc = br#"{
//!     "regions": [
//!         { "name": "Regions", "spots": [1, 2, 3] },
//!         { "name": "Regions/cell", "spots": [1, 2, 3] }
//!     ],
//!     "spots": [
//!         { "spot_id": 1, "x": 0.0, "y": 0.0, "raster": 0 },
//!         { "spot_id": 2, "x": 10.0, "y": 0.0, "raster": 0 },
//!         { "spot_id": 3, "x": 50.0, "y": 0.0, "raster": 0 }
//!     ],
//!     "index_images": [
//!         { "raster": 0, "transformation": [[10,0,0,0],[0,10,0,0],[0,0,1,0],[0,0,0,1]], "spot_ids": [1, 2, 3] }
//!     ]
//! }"#;
//! let dataset = JsonDataset::from_document(DatasetDocument::read_from_bytes(doc).unwrap()).unwrap();
//! let report = segment_region(&dataset, "cell", &PipelineOptions::default(), None).unwrap();
//! assert_eq!(report.segment_count(), 2);
//! ```

pub mod pipeline;

// Re-export core types (primary data structures used everywhere)
pub use spotseg_core::*;

// Re-export stage crates as modules to avoid name conflicts
pub use spotseg_io as io;
pub use spotseg_region as region;
pub use spotseg_transform as transform;

pub use pipeline::{
    PipelineError, PipelineOptions, PipelineResult, SegmentationReport, run, segment_region,
};
