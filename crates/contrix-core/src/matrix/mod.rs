//! Dense row-major matrix of `f64`.
//!
//! [`Matrix`] is the only container the contrast machinery needs: weight
//! vectors are rows, encodings are columns, and everything is small (a factor
//! rarely has more than a handful of levels).

mod create;
mod display;
mod ops;

use serde::Serialize;

use crate::error::{CoreError, Result};

/// A dense 2-D matrix stored contiguously in row-major order.
///
/// The matrix owns its data and cloning performs a deep copy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Matrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl Matrix {
    // ------------------------------------------------------------------
    // Construction from raw parts
    // ------------------------------------------------------------------

    /// Create a matrix from a flat row-major vector.
    ///
    /// Returns an error if `rows * cols` does not equal `data.len()`.
    pub fn from_vec(data: Vec<f64>, rows: usize, cols: usize) -> Result<Self> {
        if rows * cols != data.len() {
            return Err(CoreError::InvalidShape {
                rows,
                cols,
                reason: "shape product does not match data length",
            });
        }
        Ok(Self { data, rows, cols })
    }

    /// Create a matrix from a sequence of equally long rows.
    ///
    /// ```
    /// # use contrix_core::Matrix;
    /// let m = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
    /// assert_eq!(m.shape(), (2, 2));
    /// assert_eq!(m.row(1), &[3.0, 4.0]);
    /// ```
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(CoreError::InvalidShape {
                    rows: rows.len(),
                    cols: row.len(),
                    reason: "rows have differing lengths",
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            data,
            rows: rows.len(),
            cols,
        })
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// A flat slice of all elements in row-major order.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    // ------------------------------------------------------------------
    // Element access
    // ------------------------------------------------------------------

    fn flat_index(&self, row: usize, col: usize) -> Result<usize> {
        if row >= self.rows || col >= self.cols {
            return Err(CoreError::IndexOutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(row * self.cols + col)
    }

    pub fn get(&self, row: usize, col: usize) -> Result<f64> {
        let flat = self.flat_index(row, col)?;
        Ok(self.data[flat])
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        let flat = self.flat_index(row, col)?;
        self.data[flat] = value;
        Ok(())
    }

    /// Borrow row `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= rows`.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Copy column `j` out into a new vector.
    ///
    /// # Panics
    ///
    /// Panics if `j >= cols`.
    pub fn column(&self, j: usize) -> Vec<f64> {
        assert!(j < self.cols, "column {j} out of bounds ({})", self.cols);
        (0..self.rows).map(|i| self.data[i * self.cols + j]).collect()
    }

    /// Iterate over the rows.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks_exact(0) panics, and a 0-column matrix has no data anyway
        self.data.chunks_exact(self.cols.max(1)).take(self.rows)
    }

    /// Whether every element of `self` is within `tol` of `other`.
    pub fn approx_eq(&self, other: &Matrix, tol: f64) -> bool {
        self.shape() == other.shape()
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(a, b)| (a - b).abs() <= tol)
    }
}
