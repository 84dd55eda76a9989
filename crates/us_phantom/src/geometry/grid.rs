//! Dense rectangular storage for per-cell phantom values.
//!
//! [`Grid`] stores `rows × cols` values row-major and is addressed by `(x, y)` where `x` is the
//! column and `y` the row. Signed accessors return `None` outside the grid so that region
//! scans can probe cells without pre-clipping.
use std::ops::{Index, IndexMut};

use crate::error::{Error, Result};

/// A dense `rows × cols` grid addressed by `(x, y)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T> {
    cols: usize,
    rows: usize,
    data: Vec<T>,
}

impl<T: Clone> Grid<T> {
    /// Create a grid with every cell set to `value`.
    pub fn filled(cols: usize, rows: usize, value: T) -> Self {
        Self {
            cols,
            rows,
            data: vec![value; cols * rows],
        }
    }
}

impl<T: Clone + Default> Grid<T> {
    /// Create a grid with every cell set to `T::default()`.
    pub fn new(cols: usize, rows: usize) -> Self {
        Self::filled(cols, rows, T::default())
    }
}

impl<T> Grid<T> {
    /// Wrap row-major `data` (`data[y * cols + x]`) as a grid.
    pub fn from_vec(cols: usize, rows: usize, data: Vec<T>) -> Result<Self> {
        if data.len() != cols * rows {
            return Err(Error::Other(format!(
                "grid data has {} values but {cols}x{rows} requires {}",
                data.len(),
                cols * rows
            )));
        }
        Ok(Self { cols, rows, data })
    }

    /// Number of columns (extent along `x`).
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of rows (extent along `y`).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Size as `(cols, rows)`.
    pub fn size(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Row-major cell values.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    #[inline]
    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.cols || y as usize >= self.rows {
            return None;
        }
        Some(y as usize * self.cols + x as usize)
    }

    /// Get the value at `(x, y)`, or `None` outside the grid.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<&T> {
        self.offset(x, y).map(|i| &self.data[i])
    }

    /// Get a mutable reference to the value at `(x, y)`, or `None` outside the grid.
    #[inline]
    pub fn get_mut(&mut self, x: i32, y: i32) -> Option<&mut T> {
        self.offset(x, y).map(move |i| &mut self.data[i])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Apply `f` to every cell, producing a grid of the same shape.
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            cols: self.cols,
            rows: self.rows,
            data: self.data.iter().map(f).collect(),
        }
    }

    /// Normalize `magnitude(cell)` to 8-bit gray levels.
    ///
    /// The minimum magnitude maps to 0 and the maximum to 255. A constant grid maps to all zeros.
    pub fn to_gray8(&self, magnitude: impl Fn(&T) -> f64) -> Grid<u8> {
        let mags: Vec<f64> = self.data.iter().map(&magnitude).collect();
        let min = mags.iter().copied().fold(f64::INFINITY, f64::min);
        let max = mags.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let span = max - min;

        let data = mags
            .into_iter()
            .map(|m| {
                if span > 0.0 && span.is_finite() {
                    ((m - min) * 255.0 / span) as u8
                } else {
                    0
                }
            })
            .collect();

        Grid {
            cols: self.cols,
            rows: self.rows,
            data,
        }
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    fn index(&self, (x, y): (usize, usize)) -> &T {
        assert!(x < self.cols && y < self.rows, "({x}, {y}) outside grid");
        &self.data[y * self.cols + x]
    }
}

impl<T> IndexMut<(usize, usize)> for Grid<T> {
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut T {
        assert!(x < self.cols && y < self.rows, "({x}, {y}) outside grid");
        &mut self.data[y * self.cols + x]
    }
}
