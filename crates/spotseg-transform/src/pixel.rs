//! World-to-pixel coordinate conversion
//!
//! Spot world coordinates are mapped back to integer pixel indices through
//! the inverse of the raster's linear block. The continuous estimates carry
//! a systematic sub-pixel bias, so the conversion works on a whole batch at
//! once:
//!
//! 1. `raw = inv(A) * (x, y)` for every point
//! 2. per axis, `bias = mean(round(raw) - raw)` over the batch
//! 3. `pixel = round(raw + bias)`
//! 4. per axis, shift so the batch minimum is exactly 1
//!
//! Rounding is half-to-even so that results are bit-for-bit reproducible.
//! Coordinate 0 is never produced; it stays free as a sentinel.

use crate::affine::Matrix2;
use crate::{TransformError, TransformResult};
use spotseg_core::{PixelCoord, Transform};

/// Smallest pixel index produced on each axis
pub const PIXEL_ORIGIN: u32 = 1;

/// Inverse mapping from world coordinates to pixel indices for one raster
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelMapping {
    inverse: Matrix2,
}

impl PixelMapping {
    /// Build the mapping for a raster transform
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::SingularTransform`] if the transform's 2x2
    /// block is not invertible.
    pub fn new(transform: &Transform) -> TransformResult<Self> {
        let inverse = Matrix2::from_transform(transform).inverse()?;
        Ok(Self { inverse })
    }

    /// The world-to-pixel matrix
    pub fn inverse(&self) -> &Matrix2 {
        &self.inverse
    }

    /// Continuous pixel-index estimates, before rounding
    pub fn raw_indices(&self, world: &[(f64, f64)]) -> Vec<(f64, f64)> {
        world
            .iter()
            .map(|&(x, y)| self.inverse.apply(x, y))
            .collect()
    }

    /// Convert a batch of world coordinates to pixel coordinates
    ///
    /// The result has one entry per input point, in input order. An empty
    /// batch yields an empty result.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::InvalidParameters`] if a coordinate is not
    /// finite or the batch spans more pixels than fit in a `u32`.
    pub fn map_batch(&self, world: &[(f64, f64)]) -> TransformResult<Vec<PixelCoord>> {
        if world.is_empty() {
            return Ok(Vec::new());
        }

        let raw = self.raw_indices(world);
        if let Some(i) = raw
            .iter()
            .position(|(x, y)| !x.is_finite() || !y.is_finite())
        {
            return Err(TransformError::InvalidParameters(format!(
                "non-finite pixel estimate for point {i}: world ({}, {})",
                world[i].0, world[i].1
            )));
        }

        let xs = round_axis(raw.iter().map(|p| p.0));
        let ys = round_axis(raw.iter().map(|p| p.1));
        let xs = shift_to_origin(&xs)?;
        let ys = shift_to_origin(&ys)?;

        Ok(xs
            .into_iter()
            .zip(ys)
            .map(|(x, y)| PixelCoord::new(x, y))
            .collect())
    }
}

/// Convert a batch of world coordinates with a raster transform
///
/// Convenience wrapper around [`PixelMapping::new`] and
/// [`PixelMapping::map_batch`].
///
/// # Examples
///
/// ```
/// use spotseg_core::{PixelCoord, Transform};
/// use spotseg_transform::world_to_pixel;
///
/// let transform = Transform::scale(20.0);
/// let pixels = world_to_pixel(&transform, &[(100.0, 40.0), (140.0, 60.0)]).unwrap();
/// assert_eq!(pixels, vec![PixelCoord::new(1, 1), PixelCoord::new(3, 2)]);
/// ```
pub fn world_to_pixel(
    transform: &Transform,
    world: &[(f64, f64)],
) -> TransformResult<Vec<PixelCoord>> {
    PixelMapping::new(transform)?.map_batch(world)
}

/// Bias-corrected rounding of one axis
fn round_axis(values: impl Iterator<Item = f64> + Clone) -> Vec<f64> {
    let n = values.clone().count();
    let bias = values
        .clone()
        .map(|v| v.round_ties_even() - v)
        .sum::<f64>()
        / n as f64;
    values.map(|v| (v + bias).round_ties_even()).collect()
}

/// Shift rounded indices so their minimum is [`PIXEL_ORIGIN`]
fn shift_to_origin(values: &[f64]) -> TransformResult<Vec<u32>> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    values
        .iter()
        .map(|&v| {
            let shifted = v - min + f64::from(PIXEL_ORIGIN);
            if shifted > f64::from(u32::MAX) {
                return Err(TransformError::InvalidParameters(format!(
                    "pixel index {shifted} exceeds the addressable range"
                )));
            }
            Ok(shifted as u32)
        })
        .collect()
}
