//! Inverse of the linear part of a raster transform
//!
//! A raster transform maps pixel indices to world coordinates. Going the
//! other way only needs the inverse of its 2x2 linear block:
//!
//! ```text
//! | a  b |^-1      1      |  d  -b |
//! | c  d |     = ------- * | -c   a |
//!                ad - bc
//! ```

use crate::{TransformError, TransformResult};
use spotseg_core::Transform;

/// Determinants at or below this fraction of the block's squared scale are
/// treated as zero
const SINGULAR_TOLERANCE: f64 = 1e-12;

/// A 2x2 matrix `[[a, b], [c, d]]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix2 {
    /// Entries in row-major order
    m: [[f64; 2]; 2],
}

impl Matrix2 {
    /// Create from row-major entries
    pub fn new(m: [[f64; 2]; 2]) -> Self {
        Self { m }
    }

    /// The linear block of a raster transform
    pub fn from_transform(transform: &Transform) -> Self {
        Self::new(transform.linear_part())
    }

    /// Row-major entries
    pub fn entries(&self) -> &[[f64; 2]; 2] {
        &self.m
    }

    /// Determinant `ad - bc`
    pub fn determinant(&self) -> f64 {
        self.m[0][0] * self.m[1][1] - self.m[0][1] * self.m[1][0]
    }

    /// Compute the inverse matrix
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::SingularTransform`] when the determinant is
    /// zero, not finite, or negligible relative to the entries.
    pub fn inverse(&self) -> TransformResult<Self> {
        let det = self.determinant();
        let scale = self
            .m
            .iter()
            .flatten()
            .fold(0.0f64, |acc, v| acc.max(v.abs()));
        if !det.is_finite() || det == 0.0 || det.abs() <= SINGULAR_TOLERANCE * scale * scale {
            return Err(TransformError::SingularTransform {
                raster: None,
                determinant: det,
            });
        }

        let [[a, b], [c, d]] = self.m;
        Ok(Self::new([[d / det, -b / det], [-c / det, a / det]]))
    }

    /// Multiply the column vector `(x, y)`
    #[inline]
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.m[0][0] * x + self.m[0][1] * y,
            self.m[1][0] * x + self.m[1][1] * y,
        )
    }
}
