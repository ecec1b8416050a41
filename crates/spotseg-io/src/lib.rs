//! spotseg-io - Dataset access for spot segmentation
//!
//! This crate connects the pipeline to its inputs and outputs:
//!
//! - **Collaborator traits** - [`DatasetSource`] for regions, spots and
//!   index images; [`LabelSink`] for persisting label assignments
//! - **JSON datasets** - [`JsonDataset`] and the run-scoped
//!   [`DatasetSession`]
//! - **flexImaging spot lists** - [`SpotList`], an alternative source of
//!   pixel coordinates
//!
//! # Examples
//!
//! ```
//! use spotseg_io::{DatasetDocument, DatasetSource, JsonDataset};
//!
//! let doc = br#"{ "regions": [ { "name": "Regions/slide/cell", "spots": [] } ] }"#;
//! let dataset = JsonDataset::from_document(DatasetDocument::read_from_bytes(doc).unwrap()).unwrap();
//! assert_eq!(dataset.regions().unwrap()[0].short_name(), "cell");
//! ```

pub mod dataset;
pub mod error;
pub mod fleximaging;
pub mod json;

pub use spotseg_core;

pub use dataset::{DatasetSource, LabelId, LabelSink};
pub use error::{IoError, IoResult};
pub use fleximaging::{HEADER_LINES, SpotList, SpotListEntry, parse_spot_name};
pub use json::{
    DatasetDocument, DatasetSession, IndexImageRecord, JsonDataset, LabelRecord, RegionRecord,
    SpotRecord,
};
