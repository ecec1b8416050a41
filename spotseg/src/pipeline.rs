//! End-to-end segmentation of one region
//!
//! The stages run in order on data read from a [`DatasetSource`]:
//!
//! 1. place every spot of the parent region on its raster's pixel grid
//!    (or take the pixel coordinates from a flexImaging spot list)
//! 2. extract the requested ROI into a local frame
//! 3. rasterize it into an occupancy grid
//! 4. label the connected components
//! 5. map the labels back onto the ROI's spots
//!
//! [`run`] hands the result to a [`LabelSink`] only after every stage has
//! succeeded.

use log::{debug, info};
use spotseg_core::{LabelAssignment, ROOT_REGION_NAME, Region, SpotTable};
use spotseg_io::{DatasetSource, IoError, LabelId, LabelSink, SpotList};
use spotseg_region::{
    ComponentStats, ConnectivityType, RegionError, get_component_stats,
    label_connected_components, map_labels_to_spots, rasterize, select_roi,
};
use spotseg_transform::{TransformError, assemble_spot_table};
use thiserror::Error;

/// Errors that can occur while running the pipeline
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Placing spots on the pixel grid failed
    #[error(transparent)]
    Transform(#[from] TransformError),

    /// ROI processing failed
    #[error(transparent)]
    Region(#[from] RegionError),

    /// Reading the dataset or writing the label failed
    #[error(transparent)]
    Io(#[from] IoError),

    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] spotseg_core::Error),
}

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Run configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Region whose spots form the population the transforms run over
    pub parent_region: String,
    /// Neighborhood used for component labeling
    pub connectivity: ConnectivityType,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            parent_region: ROOT_REGION_NAME.to_string(),
            connectivity: ConnectivityType::EightWay,
        }
    }
}

/// Outcome of segmenting one region
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentationReport {
    /// Full name of the segmented region
    pub region: String,
    /// Component label of every ROI spot
    pub assignment: LabelAssignment,
    /// Per-component statistics, ordered by label
    pub components: Vec<ComponentStats>,
    /// Width of the ROI frame
    pub width: u32,
    /// Height of the ROI frame
    pub height: u32,
}

impl SegmentationReport {
    /// Number of segments found
    pub fn segment_count(&self) -> usize {
        self.components.len()
    }

    /// Number of labeled spots
    pub fn spot_count(&self) -> usize {
        self.assignment.len()
    }

    /// Smallest and largest segment, in occupied cells
    pub fn size_range(&self) -> Option<(u32, u32)> {
        let sizes = self.components.iter().map(|c| c.pixel_count);
        Some((sizes.clone().min()?, sizes.max()?))
    }
}

/// Place the parent region's spots by transforming world coordinates
pub fn place_spots<S: DatasetSource>(
    source: &S,
    options: &PipelineOptions,
) -> PipelineResult<SpotTable> {
    let spots = source.region_spots(&options.parent_region)?;
    let images = source.index_images(&options.parent_region)?;
    debug!(
        "placing {} spots of '{}' from {} index images",
        spots.len(),
        options.parent_region,
        images.len()
    );
    Ok(assemble_spot_table(&spots, &images)?)
}

/// Place the parent region's spots using a flexImaging spot list
pub fn place_spots_from_list<S: DatasetSource>(
    source: &S,
    options: &PipelineOptions,
    list: &SpotList,
) -> PipelineResult<SpotTable> {
    let ids: Vec<_> = source
        .region_spots(&options.parent_region)?
        .iter()
        .map(|s| s.spot_id)
        .collect();
    debug!(
        "placing {} spots of '{}' from a spot list",
        ids.len(),
        options.parent_region
    );
    Ok(list.to_spot_table(&ids)?)
}

/// Segment the region named `roi_name` given already placed spots
pub fn segment_table(
    regions: &[Region],
    roi_name: &str,
    table: &SpotTable,
    connectivity: ConnectivityType,
) -> PipelineResult<SegmentationReport> {
    let roi = select_roi(regions, roi_name, table)?;
    let grid = rasterize(&roi)?;
    let labels = label_connected_components(&grid, connectivity)?;
    let assignment = map_labels_to_spots(&labels, &roi)?;
    let components = get_component_stats(&labels);

    let report = SegmentationReport {
        region: roi.name().to_string(),
        assignment,
        components,
        width: roi.width(),
        height: roi.height(),
    };
    match report.size_range() {
        Some((min, max)) => info!(
            "'{}': {} segments over {} spots (sizes {}..={})",
            report.region,
            report.segment_count(),
            report.spot_count(),
            min,
            max
        ),
        None => info!("'{}': no segments", report.region),
    }
    Ok(report)
}

/// Segment one region of a dataset
///
/// With `spot_list`, pixel coordinates come from the list instead of the
/// dataset's transforms.
pub fn segment_region<S: DatasetSource>(
    source: &S,
    roi_name: &str,
    options: &PipelineOptions,
    spot_list: Option<&SpotList>,
) -> PipelineResult<SegmentationReport> {
    let table = match spot_list {
        Some(list) => place_spots_from_list(source, options, list)?,
        None => place_spots(source, options)?,
    };
    let regions = source.regions()?;
    segment_table(&regions, roi_name, &table, options.connectivity)
}

/// Segment one region and persist the result as a new label
///
/// Nothing is written unless segmentation succeeds.
pub fn run<D: DatasetSource + LabelSink>(
    dataset: &mut D,
    roi_name: &str,
    label_name: &str,
    options: &PipelineOptions,
    spot_list: Option<&SpotList>,
) -> PipelineResult<(LabelId, SegmentationReport)> {
    let report = segment_region(&*dataset, roi_name, options, spot_list)?;
    let id = dataset.write_label(label_name, &report.assignment)?;
    Ok((id, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use spotseg_core::{IndexImage, Spot, Transform};
    use spotseg_io::IoResult;

    /// In-memory dataset recording written labels
    #[derive(Default)]
    struct MemoryDataset {
        regions: Vec<Region>,
        spots: Vec<Spot>,
        images: Vec<IndexImage>,
        written: Vec<(String, LabelAssignment)>,
    }

    impl DatasetSource for MemoryDataset {
        fn regions(&self) -> IoResult<Vec<Region>> {
            Ok(self.regions.clone())
        }

        fn region_spots(&self, region_name: &str) -> IoResult<Vec<Spot>> {
            let region = self
                .regions
                .iter()
                .find(|r| r.name == region_name)
                .ok_or_else(|| IoError::RegionNotFound(region_name.to_string()))?;
            Ok(self
                .spots
                .iter()
                .filter(|s| region.spots.contains(&s.spot_id))
                .copied()
                .collect())
        }

        fn index_images(&self, _region_name: &str) -> IoResult<Vec<IndexImage>> {
            Ok(self.images.clone())
        }
    }

    impl LabelSink for MemoryDataset {
        fn write_label(&mut self, name: &str, assignment: &LabelAssignment) -> IoResult<LabelId> {
            self.written.push((name.to_string(), assignment.clone()));
            Ok(self.written.len() as LabelId)
        }
    }

    fn dataset(transform: Transform) -> MemoryDataset {
        // Two touching spots and one isolated spot, 20 world units apart
        let spots = vec![
            Spot::new(1, 0.0, 0.0, 0),
            Spot::new(2, 20.0, 20.0, 0),
            Spot::new(3, 100.0, 0.0, 0),
            Spot::new(4, 200.0, 200.0, 0),
        ];
        MemoryDataset {
            regions: vec![
                Region::new("Regions", vec![1, 2, 3, 4]),
                Region::new("Regions/slide/cell", vec![1, 2, 3]),
            ],
            spots,
            images: vec![IndexImage::new(0, transform, vec![1, 2, 3, 4])],
            written: Vec::new(),
        }
    }

    #[test]
    fn test_run_writes_label() {
        let mut ds = dataset(Transform::scale(20.0));
        let (id, report) = run(&mut ds, "cell", "segments", &PipelineOptions::default(), None)
            .unwrap();

        assert_eq!(id, 1);
        assert_eq!(report.region, "Regions/slide/cell");
        assert_eq!(report.segment_count(), 2);
        assert_eq!((report.width, report.height), (6, 2));
        assert_eq!(report.assignment[&1], report.assignment[&2]);
        assert_ne!(report.assignment[&1], report.assignment[&3]);
        assert!(!report.assignment.contains_key(&4));
        assert_eq!(report.size_range(), Some((1, 2)));

        assert_eq!(ds.written.len(), 1);
        assert_eq!(ds.written[0].0, "segments");
        assert_eq!(ds.written[0].1, report.assignment);
    }

    #[test]
    fn test_four_way_splits_diagonal() {
        let ds = dataset(Transform::scale(20.0));
        let options = PipelineOptions {
            connectivity: ConnectivityType::FourWay,
            ..PipelineOptions::default()
        };
        let report = segment_region(&ds, "cell", &options, None).unwrap();
        assert_eq!(report.segment_count(), 3);
    }

    #[test]
    fn test_singular_transform_writes_nothing() {
        let mut ds = dataset(Transform::from_linear(1.0, 2.0, 2.0, 4.0, 0.0, 0.0));
        let err = run(&mut ds, "cell", "segments", &PipelineOptions::default(), None)
            .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Transform(TransformError::SingularTransform { .. })
        ));
        assert!(ds.written.is_empty());
    }

    #[test]
    fn test_missing_roi_writes_nothing() {
        let mut ds = dataset(Transform::scale(20.0));
        let err = run(&mut ds, "nucleus", "segments", &PipelineOptions::default(), None)
            .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Region(RegionError::AmbiguousOrMissingRegion { .. })
        ));
        assert!(ds.written.is_empty());
    }

    #[test]
    fn test_spot_list_replaces_transform() {
        // The transform is singular but never used
        let ds = dataset(Transform::from_linear(0.0, 0.0, 0.0, 0.0, 0.0, 0.0));
        let list = SpotList::read_from_str(
            "h\nh\n0 0 R0X10Y10 0\n0 0 R0X12Y10 0\n0 0 R0X13Y10 0\n0 0 R0X40Y40 0\n",
        )
        .unwrap();
        let report =
            segment_region(&ds, "cell", &PipelineOptions::default(), Some(&list)).unwrap();
        assert_eq!(report.segment_count(), 2);
        assert_eq!(report.assignment[&2], report.assignment[&3]);
        assert_ne!(report.assignment[&1], report.assignment[&2]);
    }
}
