//! Connected component analysis
//!
//! This module labels connected components of occupied cells in an
//! occupancy grid. It uses a two-pass scanline algorithm with a Union-Find
//! (disjoint set) structure for label equivalences.
//!
//! Labels are numbered `1..=n` in row-major order of each component's first
//! cell, so identical input always yields identical labels. Background
//! cells keep label 0.

use crate::error::RegionResult;
use spotseg_core::{BoundingBox, LabelGrid, OccupancyGrid};

/// Connectivity type for component analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectivityType {
    /// 4-way connectivity (up, down, left, right)
    FourWay,
    /// 8-way connectivity (includes diagonals)
    #[default]
    EightWay,
}

impl ConnectivityType {
    /// Neighbor offsets `(dx, dy)` for this connectivity
    pub fn offsets(self) -> &'static [(i32, i32)] {
        const FOUR: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
        const EIGHT: [(i32, i32); 8] = [
            (-1, -1),
            (0, -1),
            (1, -1),
            (-1, 0),
            (1, 0),
            (-1, 1),
            (0, 1),
            (1, 1),
        ];
        match self {
            ConnectivityType::FourWay => &FOUR,
            ConnectivityType::EightWay => &EIGHT,
        }
    }

    /// Offsets of the neighbors already visited in a row-major scan
    fn scanned_offsets(self) -> &'static [(i32, i32)] {
        const FOUR: [(i32, i32); 2] = [(-1, 0), (0, -1)];
        const EIGHT: [(i32, i32); 4] = [(-1, 0), (-1, -1), (0, -1), (1, -1)];
        match self {
            ConnectivityType::FourWay => &FOUR,
            ConnectivityType::EightWay => &EIGHT,
        }
    }
}

/// A connected component in a label grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectedComponent {
    /// Unique label for this component
    pub label: u32,
    /// Number of cells in this component
    pub pixel_count: u32,
    /// Bounding box of this component
    pub bounds: BoundingBox,
}

impl ConnectedComponent {
    /// Create a new connected component
    pub fn new(label: u32, pixel_count: u32, bounds: BoundingBox) -> Self {
        Self {
            label,
            pixel_count,
            bounds,
        }
    }
}

/// Disjoint set over provisional labels; the root of a set is its smallest
/// member
struct UnionFind {
    parent: Vec<u32>,
}

impl UnionFind {
    fn new() -> Self {
        // index 0 is the background and never joins a set
        Self { parent: vec![0] }
    }

    fn make_set(&mut self) -> u32 {
        let label = self.parent.len() as u32;
        self.parent.push(label);
        label
    }

    fn find(&mut self, mut x: u32) -> u32 {
        while self.parent[x as usize] != x {
            let grandparent = self.parent[self.parent[x as usize] as usize];
            self.parent[x as usize] = grandparent;
            x = grandparent;
        }
        x
    }

    fn union(&mut self, a: u32, b: u32) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra < rb {
            self.parent[rb as usize] = ra;
        } else if rb < ra {
            self.parent[ra as usize] = rb;
        }
    }

    fn len(&self) -> usize {
        self.parent.len()
    }
}

#[inline]
fn neighbor(x: u32, y: u32, dx: i32, dy: i32, width: u32, height: u32) -> Option<(u32, u32)> {
    let nx = x.checked_add_signed(dx)?;
    let ny = y.checked_add_signed(dy)?;
    (nx < width && ny < height).then_some((nx, ny))
}

/// Label all connected components of occupied cells
///
/// Returns a label grid of the same shape: 0 for empty cells, and for each
/// maximal connected set of occupied cells a distinct positive label.
///
/// # Examples
///
/// ```
/// use spotseg_core::OccupancyGrid;
/// use spotseg_region::{ConnectivityType, label_connected_components};
///
/// let grid = OccupancyGrid::from_data(3, 2, vec![1, 0, 1, 0, 1, 0]).unwrap();
/// let labels = label_connected_components(&grid, ConnectivityType::EightWay).unwrap();
/// assert_eq!(labels.data(), &[1, 0, 1, 0, 1, 0]);
///
/// let labels = label_connected_components(&grid, ConnectivityType::FourWay).unwrap();
/// assert_eq!(labels.data(), &[1, 0, 2, 0, 3, 0]);
/// ```
pub fn label_connected_components(
    grid: &OccupancyGrid,
    connectivity: ConnectivityType,
) -> RegionResult<LabelGrid> {
    let width = grid.width();
    let height = grid.height();
    let mut provisional = LabelGrid::new(width, height)?;
    let mut sets = UnionFind::new();

    // First pass: provisional labels and equivalences
    for y in 0..height {
        for x in 0..width {
            if grid.get(x, y).unwrap_or(0) == 0 {
                continue;
            }

            let mut current = 0u32;
            for &(dx, dy) in connectivity.scanned_offsets() {
                let Some((nx, ny)) = neighbor(x, y, dx, dy, width, height) else {
                    continue;
                };
                let label = provisional.get(nx, ny).unwrap_or(0);
                if label == 0 {
                    continue;
                }
                if current == 0 {
                    current = label;
                } else if label != current {
                    sets.union(current, label);
                }
            }

            if current == 0 {
                current = sets.make_set();
            }
            provisional.set(x, y, current)?;
        }
    }

    // Final labels in order of each set's root, which is the label of the
    // set's first cell in scan order
    let mut final_label = vec![0u32; sets.len()];
    let mut next = 0u32;
    for label in 1..sets.len() as u32 {
        let root = sets.find(label);
        if root == label {
            next += 1;
            final_label[label as usize] = next;
        }
    }

    // Second pass: resolve equivalences
    let mut labels = LabelGrid::new(width, height)?;
    for (x, y, label) in provisional.cells() {
        if label != 0 {
            let root = sets.find(label);
            labels.set(x, y, final_label[root as usize])?;
        }
    }

    Ok(labels)
}

/// Find all connected components of occupied cells
///
/// Returns one entry per component, ordered by label, each with its cell
/// count and bounding box.
pub fn find_connected_components(
    grid: &OccupancyGrid,
    connectivity: ConnectivityType,
) -> RegionResult<Vec<ConnectedComponent>> {
    let labels = label_connected_components(grid, connectivity)?;
    Ok(components_from_labels(&labels))
}

/// Summarize the components of an existing label grid
pub fn components_from_labels(labels: &LabelGrid) -> Vec<ConnectedComponent> {
    let mut components: Vec<Option<ConnectedComponent>> = vec![None; labels.max_label() as usize];
    for (x, y, label) in labels.cells() {
        if label == 0 {
            continue;
        }
        let idx = (label - 1) as usize;
        if let Some(comp) = components[idx].as_mut() {
            comp.pixel_count += 1;
            comp.bounds.expand_to(x, y);
        } else {
            components[idx] = Some(ConnectedComponent::new(
                label,
                1,
                BoundingBox::new(x, y, 1, 1),
            ));
        }
    }
    components.into_iter().flatten().collect()
}
