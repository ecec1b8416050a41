//! spotseg-transform - Placing spots on the pixel grid
//!
//! This crate turns world-space spot coordinates into integer pixel
//! coordinates:
//!
//! - **Coordinate transformation** - Inverse of a raster's 2x2 affine block
//!   with batch bias correction and origin normalization
//! - **Spot table assembly** - Per-raster conversion merged into a single
//!   table keyed by spot id
//!
//! # Examples
//!
//! ```
//! use spotseg_core::{IndexImage, Spot, Transform};
//! use spotseg_transform::assemble_spot_table;
//!
//! let spots = vec![Spot::new(1, 0.0, 0.0, 0), Spot::new(2, 20.0, 20.0, 0)];
//! let images = vec![IndexImage::new(0, Transform::scale(20.0), vec![1, 2])];
//! let table = assemble_spot_table(&spots, &images).unwrap();
//! assert_eq!(table.get(2).unwrap().pixel.x, 2);
//! ```

pub mod affine;
pub mod assemble;
pub mod error;
pub mod pixel;

pub use spotseg_core;

pub use affine::Matrix2;
pub use assemble::assemble_spot_table;
pub use error::{TransformError, TransformResult};
pub use pixel::{PIXEL_ORIGIN, PixelMapping, world_to_pixel};
