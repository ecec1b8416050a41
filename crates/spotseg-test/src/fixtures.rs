//! Synthetic inputs for tests
//!
//! Occupancy grids are built from ASCII art or drawn at random from a seeded
//! generator. [`SyntheticDataset`] lays region members out on a regular
//! world grid so that the expected pixel coordinates are known exactly.

use crate::error::{TestError, TestResult};
use rand::SeedableRng;
use rand::distr::{Bernoulli, Distribution};
use rand::rngs::StdRng;
use spotseg_core::{OccupancyGrid, RasterId, ROOT_REGION_NAME, SpotId, Transform};
use spotseg_io::{DatasetDocument, IndexImageRecord, RegionRecord, SpotRecord};
use std::collections::BTreeMap;

/// Build an occupancy grid from rows of `#` (occupied) and `.` (empty)
pub fn grid_from_ascii(rows: &[&str]) -> TestResult<OccupancyGrid> {
    let height = rows.len() as u32;
    let width = rows.first().map_or(0, |r| r.chars().count()) as u32;
    let mut data = Vec::with_capacity((width * height) as usize);
    for (y, row) in rows.iter().enumerate() {
        if row.chars().count() as u32 != width {
            return Err(TestError::InvalidFixture(format!(
                "row {y} has {} cells, expected {width}",
                row.chars().count()
            )));
        }
        for c in row.chars() {
            data.push(match c {
                '#' => 1,
                '.' => 0,
                other => {
                    return Err(TestError::InvalidFixture(format!(
                        "unexpected cell '{other}' in row {y}"
                    )));
                }
            });
        }
    }
    Ok(OccupancyGrid::from_data(width, height, data)?)
}

/// Random occupancy grid with each cell occupied with probability `density`
///
/// The same seed always yields the same grid.
pub fn random_occupancy_grid(
    width: u32,
    height: u32,
    density: f64,
    seed: u64,
) -> TestResult<OccupancyGrid> {
    let dist = Bernoulli::new(density)
        .map_err(|e| TestError::InvalidFixture(format!("density {density}: {e}")))?;
    let mut rng = StdRng::seed_from_u64(seed);
    let data = (0..width as usize * height as usize)
        .map(|_| u8::from(dist.sample(&mut rng)))
        .collect();
    Ok(OccupancyGrid::from_data(width, height, data)?)
}

/// Builder for small, fully predictable datasets
///
/// Every spot of raster `r` at cell `(x, y)` sits at world coordinate
/// `(x * pitch, y * pitch)`, and each raster's index image scales by
/// `pitch`. All spots belong to the root region.
#[derive(Debug, Clone)]
pub struct SyntheticDataset {
    pitch: f64,
    next_id: SpotId,
    spots: Vec<SpotRecord>,
    regions: Vec<RegionRecord>,
    rasters: BTreeMap<RasterId, Vec<SpotId>>,
}

impl SyntheticDataset {
    /// Create an empty dataset with the given spot pitch
    pub fn new(pitch: f64) -> Self {
        Self {
            pitch,
            next_id: 1,
            spots: Vec::new(),
            regions: Vec::new(),
            rasters: BTreeMap::new(),
        }
    }

    /// Add spots on `cells` of `raster` without a named region
    pub fn add_spots(&mut self, raster: RasterId, cells: &[(u32, u32)]) -> Vec<SpotId> {
        cells
            .iter()
            .map(|&(x, y)| {
                let spot_id = self.next_id;
                self.next_id += 1;
                self.spots.push(SpotRecord {
                    spot_id,
                    x: f64::from(x) * self.pitch,
                    y: f64::from(y) * self.pitch,
                    z: 0.0,
                    raster,
                });
                self.rasters.entry(raster).or_default().push(spot_id);
                spot_id
            })
            .collect()
    }

    /// Add spots on `cells` of `raster` and a region named `name` holding them
    pub fn add_region(&mut self, name: &str, raster: RasterId, cells: &[(u32, u32)]) -> Vec<SpotId> {
        let ids = self.add_spots(raster, cells);
        self.regions.push(RegionRecord {
            name: name.to_string(),
            spots: ids.clone(),
        });
        ids
    }

    /// Add a region over spots that already exist
    pub fn add_region_of(&mut self, name: &str, spots: &[SpotId]) {
        self.regions.push(RegionRecord {
            name: name.to_string(),
            spots: spots.to_vec(),
        });
    }

    /// Assemble the dataset document
    pub fn build(&self) -> DatasetDocument {
        let transform = Transform::scale(self.pitch);
        let mut regions = vec![RegionRecord {
            name: ROOT_REGION_NAME.to_string(),
            spots: self.spots.iter().map(|s| s.spot_id).collect(),
        }];
        regions.extend(self.regions.iter().cloned());

        DatasetDocument {
            regions,
            spots: self.spots.clone(),
            index_images: self
                .rasters
                .iter()
                .map(|(&raster, ids)| IndexImageRecord {
                    raster,
                    transformation: *transform.rows(),
                    spot_ids: ids.clone(),
                })
                .collect(),
            labels: Vec::new(),
        }
    }
}
