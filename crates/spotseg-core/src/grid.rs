//! Grid - dense 2D cell matrix
//!
//! `Grid<T>` is a row-major 2D array used for occupancy masks and label
//! images. The cell at `(x, y)` is stored at index `y * width + x`; the
//! grid's shape in `(rows, cols)` terms is `(height, width)`.
//!
//! # Examples
//!
//! ```
//! use spotseg_core::OccupancyGrid;
//!
//! let mut grid = OccupancyGrid::new(4, 3).unwrap();
//! grid.set(1, 2, 1).unwrap();
//! assert_eq!(grid.get(1, 2), Some(1));
//! assert_eq!(grid.count_nonzero(), 1);
//! ```

use crate::error::{Error, Result};

/// Occupancy mask: 0 = absent, 1 = ROI member
pub type OccupancyGrid = Grid<u8>;

/// Component label image: 0 = background, positive = component label
pub type LabelGrid = Grid<u32>;

/// Dense row-major 2D grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    /// Number of columns
    width: u32,
    /// Number of rows
    height: u32,
    /// Cell data (row-major, no padding)
    data: Vec<T>,
}

impl<T: Copy + Default + PartialEq> Grid<T> {
    /// Create a new grid with all cells set to `T::default()`
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let size = (width as usize) * (height as usize);
        Ok(Self {
            width,
            height,
            data: vec![T::default(); size],
        })
    }

    /// Create a grid from row-major data
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions are zero or `data` has the wrong
    /// length.
    pub fn from_data(width: u32, height: u32, data: Vec<T>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let expected = (width as usize) * (height as usize);
        if data.len() != expected {
            return Err(Error::InvalidParameter(format!(
                "data length {} does not match {}x{} grid",
                data.len(),
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Number of columns
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Shape as `(rows, cols)`
    #[inline]
    pub fn shape(&self) -> (u32, u32) {
        (self.height, self.width)
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some((y as usize) * (self.width as usize) + x as usize)
        } else {
            None
        }
    }

    /// Cell value at `(x, y)`, or `None` if out of bounds
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<T> {
        self.index(x, y).map(|i| self.data[i])
    }

    /// Set the cell at `(x, y)`
    ///
    /// # Errors
    ///
    /// Returns `Error::OutOfBounds` if the coordinate is outside the grid.
    pub fn set(&mut self, x: u32, y: u32, value: T) -> Result<()> {
        let i = self.index(x, y).ok_or(Error::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        })?;
        self.data[i] = value;
        Ok(())
    }

    /// Row-major cell data
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// One row of cells
    pub fn row(&self, y: u32) -> Option<&[T]> {
        if y >= self.height {
            return None;
        }
        let w = self.width as usize;
        let start = y as usize * w;
        Some(&self.data[start..start + w])
    }

    /// Iterate `(x, y, value)` in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32, T)> + '_ {
        let w = self.width;
        self.data
            .iter()
            .enumerate()
            .map(move |(i, &v)| ((i as u32) % w, (i as u32) / w, v))
    }

    /// Number of cells that differ from `T::default()`
    pub fn count_nonzero(&self) -> usize {
        let zero = T::default();
        self.data.iter().filter(|&&v| v != zero).count()
    }

    /// Map every cell into a new grid of the same shape
    pub fn map<U, F>(&self, f: F) -> Grid<U>
    where
        F: Fn(T) -> U,
    {
        Grid {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Check that `other` has the same shape
    ///
    /// # Errors
    ///
    /// Returns `Error::DimensionMismatch` if the shapes differ.
    pub fn check_same_size<U>(&self, other: &Grid<U>) -> Result<()> {
        if self.width != other.width || self.height != other.height {
            return Err(Error::DimensionMismatch {
                expected: (self.width, self.height),
                actual: (other.width, other.height),
            });
        }
        Ok(())
    }
}

impl LabelGrid {
    /// Occupancy mask of a label image: 1 wherever the label is positive
    pub fn occupancy_mask(&self) -> OccupancyGrid {
        self.map(|label| u8::from(label > 0))
    }

    /// Largest label present, 0 for an all-background grid
    pub fn max_label(&self) -> u32 {
        self.data.iter().copied().max().unwrap_or(0)
    }
}

/// An axis-aligned rectangle of cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BoundingBox {
    /// Left x coordinate
    pub x: u32,
    /// Top y coordinate
    pub y: u32,
    /// Width
    pub w: u32,
    /// Height
    pub h: u32,
}

impl BoundingBox {
    /// Create a new box
    pub const fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Create a box spanning two inclusive corner cells
    pub fn from_corners(x1: u32, y1: u32, x2: u32, y2: u32) -> Self {
        let (x, x_max) = (x1.min(x2), x1.max(x2));
        let (y, y_max) = (y1.min(y2), y1.max(y2));
        Self {
            x,
            y,
            w: x_max - x + 1,
            h: y_max - y + 1,
        }
    }

    /// Grow the box to contain the cell `(x, y)`
    pub fn expand_to(&mut self, x: u32, y: u32) {
        let right = (self.x + self.w - 1).max(x);
        let bottom = (self.y + self.h - 1).max(y);
        self.x = self.x.min(x);
        self.y = self.y.min(y);
        self.w = right - self.x + 1;
        self.h = bottom - self.y + 1;
    }

    /// Number of cells covered
    pub fn area(&self) -> u64 {
        u64::from(self.w) * u64::from(self.h)
    }
}
