//! Component labeling summaries
//!
//! This module provides high-level functions for analyzing label grids:
//! component counts, sizes, bounding boxes and centroids, and a check that
//! two label grids describe the same partition of cells.

use crate::conncomp::{ConnectivityType, label_connected_components};
use crate::error::RegionResult;
use spotseg_core::{BoundingBox, LabelGrid, OccupancyGrid};
use std::collections::HashMap;

/// Count the number of connected components
pub fn count_components(grid: &OccupancyGrid, connectivity: ConnectivityType) -> RegionResult<u32> {
    let labeled = label_connected_components(grid, connectivity)?;
    Ok(labeled.max_label())
}

/// Get cell count for each component
///
/// The index corresponds to (label - 1).
pub fn get_component_sizes(labeled: &LabelGrid) -> Vec<u32> {
    let mut counts = vec![0u32; labeled.max_label() as usize];
    for &label in labeled.data() {
        if label > 0 {
            counts[(label - 1) as usize] += 1;
        }
    }
    counts
}

/// Component statistics
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentStats {
    /// Component label
    pub label: u32,
    /// Bounding box
    pub bounds: BoundingBox,
    /// Number of cells
    pub pixel_count: u32,
    /// Centroid X coordinate
    pub centroid_x: f64,
    /// Centroid Y coordinate
    pub centroid_y: f64,
}

/// Get detailed statistics for all components, ordered by label
pub fn get_component_stats(labeled: &LabelGrid) -> Vec<ComponentStats> {
    struct Accum {
        count: u32,
        sum_x: u64,
        sum_y: u64,
        bounds: BoundingBox,
    }

    let mut stats: Vec<Option<Accum>> = (0..labeled.max_label()).map(|_| None).collect();

    for (x, y, label) in labeled.cells() {
        if label == 0 {
            continue;
        }
        let acc = stats[(label - 1) as usize].get_or_insert_with(|| Accum {
            count: 0,
            sum_x: 0,
            sum_y: 0,
            bounds: BoundingBox::new(x, y, 1, 1),
        });
        acc.count += 1;
        acc.sum_x += u64::from(x);
        acc.sum_y += u64::from(y);
        acc.bounds.expand_to(x, y);
    }

    stats
        .into_iter()
        .enumerate()
        .filter_map(|(i, acc)| {
            let acc = acc?;
            Some(ComponentStats {
                label: i as u32 + 1,
                bounds: acc.bounds,
                pixel_count: acc.count,
                centroid_x: acc.sum_x as f64 / acc.count as f64,
                centroid_y: acc.sum_y as f64 / acc.count as f64,
            })
        })
        .collect()
}

/// Whether two label grids group the same cells together
///
/// Label values may differ; background must coincide.
pub fn is_same_partition(a: &LabelGrid, b: &LabelGrid) -> bool {
    if a.check_same_size(b).is_err() {
        return false;
    }

    let mut forward: HashMap<u32, u32> = HashMap::new();
    let mut backward: HashMap<u32, u32> = HashMap::new();
    for (&la, &lb) in a.data().iter().zip(b.data()) {
        if (la == 0) != (lb == 0) {
            return false;
        }
        if la == 0 {
            continue;
        }
        if *forward.entry(la).or_insert(lb) != lb || *backward.entry(lb).or_insert(la) != la {
            return false;
        }
    }
    true
}
