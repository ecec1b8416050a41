//! Seed fill operations
//!
//! Flood-fill based labeling of occupancy grids. Each unlabeled occupied
//! cell met in a row-major scan seeds a breadth-first fill of its whole
//! component, so labels come out in the same order as
//! [`label_connected_components`](crate::conncomp::label_connected_components).

use crate::conncomp::ConnectivityType;
use crate::error::{RegionError, RegionResult};
use spotseg_core::{LabelGrid, OccupancyGrid};
use std::collections::VecDeque;

/// Fill the component containing `(seed_x, seed_y)` with `label`
///
/// Only occupied cells that are still unlabeled in `labels` are filled.
/// Returns the number of cells filled.
///
/// # Errors
///
/// Returns an error if the seed is outside the grid or the grids differ in
/// shape.
pub fn floodfill(
    grid: &OccupancyGrid,
    labels: &mut LabelGrid,
    seed_x: u32,
    seed_y: u32,
    label: u32,
    connectivity: ConnectivityType,
) -> RegionResult<u32> {
    grid.check_same_size(labels)?;

    let width = grid.width();
    let height = grid.height();
    if seed_x >= width || seed_y >= height {
        return Err(RegionError::InvalidParameters(format!(
            "seed ({seed_x}, {seed_y}) outside {width}x{height} grid"
        )));
    }
    if label == 0 {
        return Err(RegionError::InvalidParameters(
            "fill label must be positive".to_string(),
        ));
    }

    let mut filled_count = 0u32;
    let mut queue = VecDeque::new();
    queue.push_back((seed_x, seed_y));

    while let Some((x, y)) = queue.pop_front() {
        if grid.get(x, y).unwrap_or(0) == 0 || labels.get(x, y).unwrap_or(0) != 0 {
            continue;
        }

        labels.set(x, y, label)?;
        filled_count += 1;

        for &(dx, dy) in connectivity.offsets() {
            let (Some(nx), Some(ny)) = (x.checked_add_signed(dx), y.checked_add_signed(dy))
            else {
                continue;
            };
            if nx < width && ny < height {
                queue.push_back((nx, ny));
            }
        }
    }

    Ok(filled_count)
}

/// Label every component of an occupancy grid by repeated flood fill
pub fn label_by_floodfill(
    grid: &OccupancyGrid,
    connectivity: ConnectivityType,
) -> RegionResult<LabelGrid> {
    let mut labels = LabelGrid::new(grid.width(), grid.height())?;
    let mut next = 0u32;

    for y in 0..grid.height() {
        for x in 0..grid.width() {
            if grid.get(x, y).unwrap_or(0) == 0 || labels.get(x, y).unwrap_or(0) != 0 {
                continue;
            }
            next += 1;
            floodfill(grid, &mut labels, x, y, next, connectivity)?;
        }
    }

    Ok(labels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conncomp::label_connected_components;

    #[test]
    fn test_floodfill_counts_component() {
        let grid = OccupancyGrid::from_data(4, 2, vec![1, 1, 0, 1, 0, 1, 0, 1]).unwrap();
        let mut labels = LabelGrid::new(4, 2).unwrap();

        let n = floodfill(&grid, &mut labels, 0, 0, 5, ConnectivityType::EightWay).unwrap();
        assert_eq!(n, 3);
        assert_eq!(labels.data(), &[5, 5, 0, 0, 0, 5, 0, 0]);
    }

    #[test]
    fn test_floodfill_on_background_fills_nothing() {
        let grid = OccupancyGrid::from_data(2, 1, vec![0, 1]).unwrap();
        let mut labels = LabelGrid::new(2, 1).unwrap();
        let n = floodfill(&grid, &mut labels, 0, 0, 1, ConnectivityType::EightWay).unwrap();
        assert_eq!(n, 0);
    }

    #[test]
    fn test_floodfill_invalid_seed() {
        let grid = OccupancyGrid::new(2, 2).unwrap();
        let mut labels = LabelGrid::new(2, 2).unwrap();
        assert!(floodfill(&grid, &mut labels, 2, 0, 1, ConnectivityType::FourWay).is_err());
        assert!(floodfill(&grid, &mut labels, 0, 0, 0, ConnectivityType::FourWay).is_err());
    }

    #[test]
    fn test_matches_union_find_labels() {
        let data = vec![
            1, 0, 0, 1, 1, 0, //
            0, 1, 0, 0, 1, 0, //
            0, 0, 0, 0, 0, 0, //
            1, 1, 0, 1, 0, 1, //
            0, 1, 1, 0, 1, 0, //
        ];
        let grid = OccupancyGrid::from_data(6, 5, data).unwrap();
        for conn in [ConnectivityType::FourWay, ConnectivityType::EightWay] {
            let a = label_by_floodfill(&grid, conn).unwrap();
            let b = label_connected_components(&grid, conn).unwrap();
            assert_eq!(a, b, "{conn:?}");
        }
    }
}
