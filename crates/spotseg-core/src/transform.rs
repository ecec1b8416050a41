//! Per-raster affine transforms
//!
//! Each raster of a dataset carries a 4x4 homogeneous matrix mapping pixel
//! indices to world coordinates:
//!
//! ```text
//! | a  b  0  tx |
//! | c  d  0  ty |
//! | 0  0  1  tz |
//! | 0  0  0  1  |
//! ```
//!
//! Only the linear 2x2 block `[[a, b], [c, d]]` is used to recover pixel
//! indices; translation is removed later by normalizing the batch minimum.

use crate::spot::{RasterId, SpotId};

/// A 4x4 pixel-to-world transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    rows: [[f64; 4]; 4],
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// The identity transform
    pub fn identity() -> Self {
        let mut rows = [[0.0; 4]; 4];
        for (i, row) in rows.iter_mut().enumerate() {
            row[i] = 1.0;
        }
        Self { rows }
    }

    /// Create from row-major matrix entries
    pub fn from_rows(rows: [[f64; 4]; 4]) -> Self {
        Self { rows }
    }

    /// Create a transform with the given linear block and translation
    pub fn from_linear(a: f64, b: f64, c: f64, d: f64, tx: f64, ty: f64) -> Self {
        let mut t = Self::identity();
        t.rows[0][0] = a;
        t.rows[0][1] = b;
        t.rows[0][3] = tx;
        t.rows[1][0] = c;
        t.rows[1][1] = d;
        t.rows[1][3] = ty;
        t
    }

    /// Uniform scaling by `pitch` world units per pixel
    pub fn scale(pitch: f64) -> Self {
        Self::from_linear(pitch, 0.0, 0.0, pitch, 0.0, 0.0)
    }

    /// Row-major matrix entries
    pub fn rows(&self) -> &[[f64; 4]; 4] {
        &self.rows
    }

    /// The top-left 2x2 block as `[[a, b], [c, d]]`
    pub fn linear_part(&self) -> [[f64; 2]; 2] {
        [
            [self.rows[0][0], self.rows[0][1]],
            [self.rows[1][0], self.rows[1][1]],
        ]
    }

    /// Map a pixel index to world coordinates
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        let r = &self.rows;
        (
            r[0][0] * x + r[0][1] * y + r[0][3],
            r[1][0] * x + r[1][1] * y + r[1][3],
        )
    }
}

/// A raster's transform together with the spots acquired in it
#[derive(Debug, Clone, PartialEq)]
pub struct IndexImage {
    /// Raster identifier
    pub raster: RasterId,
    /// Pixel-to-world transform of the raster
    pub transform: Transform,
    /// Spots belonging to the raster
    pub spot_ids: Vec<SpotId>,
}

impl IndexImage {
    /// Create a new index image
    pub fn new(raster: RasterId, transform: Transform, spot_ids: Vec<SpotId>) -> Self {
        Self {
            raster,
            transform,
            spot_ids,
        }
    }
}
