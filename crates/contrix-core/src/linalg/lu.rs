//! LU decomposition with partial pivoting.
//!
//! Decomposes a square matrix `A` into `PA = LU` where:
//! - `P` is a permutation matrix (stored as a pivot vector)
//! - `L` is lower triangular with unit diagonal
//! - `U` is upper triangular

use tracing::trace;

use crate::error::{CoreError, Result};
use crate::matrix::Matrix;

/// Relative pivot threshold. A pivot smaller than this times the largest
/// absolute entry of the input is treated as zero.
const PIVOT_TOLERANCE: f64 = 1e3 * f64::EPSILON;

/// Result of an LU decomposition with partial pivoting.
///
/// `L` and `U` are packed into a single matrix (the unit diagonal of `L` is
/// implicit) and the permutation is stored as a pivot index vector.
#[derive(Debug, Clone)]
pub struct LuDecomposition {
    /// Packed LU matrix: lower triangle holds L (without diagonal),
    /// upper triangle (including diagonal) holds U.
    lu: Vec<f64>,
    /// Row `i` of `PA` is row `pivots[i]` of `A`.
    pivots: Vec<usize>,
    n: usize,
}

impl LuDecomposition {
    /// Perform LU decomposition with partial pivoting on a square matrix.
    ///
    /// Returns [`CoreError::SingularMatrix`] when a column has no usable
    /// pivot.
    ///
    /// ```
    /// # use contrix_core::{Matrix, linalg::LuDecomposition};
    /// let a = Matrix::from_rows(&[[2.0, 1.0], [1.0, 4.0]]).unwrap();
    /// let lu = LuDecomposition::decompose(&a).unwrap();
    /// let x = lu.solve(&[3.0, 5.0]).unwrap();
    /// assert!((x[0] - 1.0).abs() < 1e-12 && (x[1] - 1.0).abs() < 1e-12);
    /// ```
    pub fn decompose(a: &Matrix) -> Result<Self> {
        if !a.is_square() {
            return Err(CoreError::InvalidArgument {
                reason: "LU decomposition requires a square matrix",
            });
        }
        let n = a.rows();
        let threshold = PIVOT_TOLERANCE * a.max_abs().max(1.0);

        let mut lu = a.as_slice().to_vec();
        let mut pivots: Vec<usize> = (0..n).collect();

        for k in 0..n {
            // Pivot: row with largest |lu[i, k]| for i >= k
            let mut max_val = lu[k * n + k].abs();
            let mut max_row = k;
            for i in (k + 1)..n {
                let val = lu[i * n + k].abs();
                if val > max_val {
                    max_val = val;
                    max_row = i;
                }
            }

            if max_row != k {
                for j in 0..n {
                    lu.swap(k * n + j, max_row * n + j);
                }
                pivots.swap(k, max_row);
            }

            let pivot = lu[k * n + k];
            if pivot.abs() <= threshold {
                trace!(column = k, pivot, threshold, "no usable pivot");
                return Err(CoreError::SingularMatrix { column: k });
            }

            for i in (k + 1)..n {
                let factor = lu[i * n + k] / pivot;
                lu[i * n + k] = factor;
                for j in (k + 1)..n {
                    let ukj = lu[k * n + j];
                    lu[i * n + j] -= factor * ukj;
                }
            }
        }

        Ok(Self {
            lu,
            pivots,
            n,
        })
    }

    /// Solve `Ax = b` using the factorization.
    pub fn solve(&self, b: &[f64]) -> Result<Vec<f64>> {
        let n = self.n;
        if b.len() != n {
            return Err(CoreError::DimensionMismatch {
                expected: (n, 1),
                got: (b.len(), 1),
            });
        }

        let mut x: Vec<f64> = self.pivots.iter().map(|&pi| b[pi]).collect();

        // Forward substitution: Ly = Pb
        #[allow(clippy::needless_range_loop)]
        for i in 1..n {
            for j in 0..i {
                let lij_xj = self.lu[i * n + j] * x[j];
                x[i] -= lij_xj;
            }
        }

        // Back substitution: Ux = y
        #[allow(clippy::needless_range_loop)]
        for i in (0..n).rev() {
            for j in (i + 1)..n {
                let uij_xj = self.lu[i * n + j] * x[j];
                x[i] -= uij_xj;
            }
            x[i] /= self.lu[i * n + i];
        }

        Ok(x)
    }

    /// Inverse via column-by-column solves of `AX = I`.
    pub fn inverse(&self) -> Result<Matrix> {
        let n = self.n;
        let mut inv = Matrix::zeros(n, n);
        let mut e = vec![0.0; n];

        for col in 0..n {
            e.iter_mut().for_each(|v| *v = 0.0);
            e[col] = 1.0;
            let x = self.solve(&e)?;
            for (row, &v) in x.iter().enumerate() {
                inv.set(row, col, v)?;
            }
        }

        Ok(inv)
    }
}
