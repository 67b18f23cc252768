//! Shape manipulation and reductions: transpose, row stacking, column
//! removal, row/column sums.

use crate::error::{CoreError, Result};

use super::Matrix;

impl Matrix {
    /// Transpose. Returns a new matrix with copied data.
    pub fn transpose(&self) -> Matrix {
        let (rows, cols) = self.shape();
        let mut data = vec![0.0; self.data.len()];
        for r in 0..rows {
            for c in 0..cols {
                data[c * rows + r] = self.data[r * cols + c];
            }
        }
        Matrix {
            data,
            rows: cols,
            cols: rows,
        }
    }

    /// Stack `top` above the rows of `rest`, producing a `(1 + rest.rows) x cols`
    /// matrix.
    ///
    /// ```
    /// # use contrix_core::Matrix;
    /// let rest = Matrix::from_rows(&[[-1.0, 0.5, 0.5], [0.0, -1.0, 1.0]]).unwrap();
    /// let m = Matrix::vstack_row(&[1.0, 1.0, 1.0], &rest).unwrap();
    /// assert_eq!(m.shape(), (3, 3));
    /// assert_eq!(m.row(0), &[1.0, 1.0, 1.0]);
    /// ```
    pub fn vstack_row(top: &[f64], rest: &Matrix) -> Result<Matrix> {
        if top.len() != rest.cols {
            return Err(CoreError::DimensionMismatch {
                expected: (1, rest.cols),
                got: (1, top.len()),
            });
        }
        let mut data = Vec::with_capacity(top.len() + rest.data.len());
        data.extend_from_slice(top);
        data.extend_from_slice(&rest.data);
        Ok(Matrix {
            data,
            rows: rest.rows + 1,
            cols: rest.cols,
        })
    }

    /// Return a copy with column `j` removed.
    pub fn drop_column(&self, j: usize) -> Result<Matrix> {
        if j >= self.cols {
            return Err(CoreError::IndexOutOfBounds {
                row: 0,
                col: j,
                rows: self.rows,
                cols: self.cols,
            });
        }
        let cols = self.cols - 1;
        let mut data = Vec::with_capacity(self.rows * cols);
        for row in self.iter_rows() {
            data.extend(
                row.iter()
                    .enumerate()
                    .filter(|&(c, _)| c != j)
                    .map(|(_, &v)| v),
            );
        }
        Ok(Matrix {
            data,
            rows: self.rows,
            cols,
        })
    }

    /// Sum of each column.
    pub fn column_sums(&self) -> Vec<f64> {
        let mut sums = vec![0.0; self.cols];
        for row in self.iter_rows() {
            for (s, &v) in sums.iter_mut().zip(row) {
                *s += v;
            }
        }
        sums
    }

    /// Largest absolute element, or `0.0` for an empty matrix.
    pub fn max_abs(&self) -> f64 {
        self.data.iter().fold(0.0_f64, |acc, &x| acc.max(x.abs()))
    }
}
