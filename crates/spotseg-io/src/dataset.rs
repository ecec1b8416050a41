//! Dataset collaborator interfaces
//!
//! The pipeline reads regions, spots and index images through
//! [`DatasetSource`] and persists its result through [`LabelSink`]. Both are
//! implemented by [`JsonDataset`](crate::JsonDataset); tests provide their
//! own in-memory implementations.

use crate::error::IoResult;
use spotseg_core::{IndexImage, LabelAssignment, Region, Spot};

/// Identifier the sink assigns to a written label
pub type LabelId = u32;

/// Read access to a spatial dataset
pub trait DatasetSource {
    /// All regions of the region tree, with their full names
    fn regions(&self) -> IoResult<Vec<Region>>;

    /// Spots of the named region, with world coordinates
    fn region_spots(&self, region_name: &str) -> IoResult<Vec<Spot>>;

    /// Index images whose spots belong to the named region
    fn index_images(&self, region_name: &str) -> IoResult<Vec<IndexImage>>;
}

/// Write access for segmentation results
pub trait LabelSink {
    /// Persist `assignment` as a new label called `name`
    fn write_label(&mut self, name: &str, assignment: &LabelAssignment) -> IoResult<LabelId>;
}

impl<T: DatasetSource + ?Sized> DatasetSource for &T {
    fn regions(&self) -> IoResult<Vec<Region>> {
        (**self).regions()
    }

    fn region_spots(&self, region_name: &str) -> IoResult<Vec<Spot>> {
        (**self).region_spots(region_name)
    }

    fn index_images(&self, region_name: &str) -> IoResult<Vec<IndexImage>> {
        (**self).index_images(region_name)
    }
}

impl<T: LabelSink + ?Sized> LabelSink for &mut T {
    fn write_label(&mut self, name: &str, assignment: &LabelAssignment) -> IoResult<LabelId> {
        (**self).write_label(name, assignment)
    }
}
