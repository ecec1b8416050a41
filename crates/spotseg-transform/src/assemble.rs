//! Spot table assembly across rasters
//!
//! A dataset region can span several rasters, each with its own transform.
//! Every raster converts the whole spot population with its own transform
//! (so the bias correction and origin shift are taken over the same batch
//! for every raster), then keeps only the rows of its own member spots.
//! The per-raster rows are merged into one [`SpotTable`] sorted by spot id.

use crate::pixel::PixelMapping;
use crate::{TransformError, TransformResult};
use log::{debug, warn};
use spotseg_core::{IndexImage, PlacedSpot, RasterId, Spot, SpotId, SpotTable};
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// Assemble the placed-spot table for a region
///
/// # Arguments
///
/// * `spots` - Every spot of the parent region
/// * `images` - The region's rasters with their transforms and members
///
/// Member ids that name no spot in `spots` are skipped.
///
/// # Errors
///
/// Returns [`TransformError::SingularTransform`] (tagged with the raster)
/// if a raster transform is not invertible, and
/// [`TransformError::OverlappingRasters`] if two rasters list the same spot.
pub fn assemble_spot_table(spots: &[Spot], images: &[IndexImage]) -> TransformResult<SpotTable> {
    let world: Vec<(f64, f64)> = spots.iter().map(Spot::world_xy).collect();
    let position: HashMap<SpotId, usize> = spots
        .iter()
        .enumerate()
        .map(|(i, s)| (s.spot_id, i))
        .collect();

    let mut owner: HashMap<SpotId, RasterId> = HashMap::with_capacity(spots.len());
    let mut rows = Vec::with_capacity(spots.len());

    for image in images {
        let mapping =
            PixelMapping::new(&image.transform).map_err(|e| e.with_raster(image.raster))?;
        let pixels = mapping.map_batch(&world)?;

        let mut kept = 0usize;
        let mut unknown = 0usize;
        for &spot_id in &image.spot_ids {
            let Some(&i) = position.get(&spot_id) else {
                unknown += 1;
                continue;
            };
            match owner.entry(spot_id) {
                Entry::Occupied(e) if *e.get() == image.raster => continue,
                Entry::Occupied(e) => {
                    return Err(TransformError::OverlappingRasters {
                        spot_id,
                        first: *e.get(),
                        second: image.raster,
                    });
                }
                Entry::Vacant(e) => {
                    e.insert(image.raster);
                }
            }
            let p = pixels[i];
            rows.push(PlacedSpot::new(spot_id, image.raster, p.x, p.y));
            kept += 1;
        }

        if unknown > 0 {
            warn!(
                "raster {}: skipped {} member ids with no matching spot",
                image.raster, unknown
            );
        }
        debug!(
            "raster {}: placed {} of {} spots",
            image.raster,
            kept,
            spots.len()
        );
    }

    let table = SpotTable::from_rows(rows)?;
    debug!(
        "assembled {} placed spots from {} rasters",
        table.len(),
        images.len()
    );
    Ok(table)
}
