//! BLAS-style kernels on slices and [`Matrix`].
//!
//! All functions validate shapes, returning [`Result`] on dimension
//! mismatches.

use crate::error::{CoreError, Result};
use crate::matrix::Matrix;

// ======================================================================
// Level 1: vector operations, O(n)
// ======================================================================

/// Inner (dot) product: `sum(x_i * y_i)`.
///
/// ```
/// # use contrix_core::linalg::dot;
/// let d = dot(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]).unwrap();
/// assert!((d - 32.0).abs() < 1e-10);
/// ```
pub fn dot(x: &[f64], y: &[f64]) -> Result<f64> {
    if x.len() != y.len() {
        return Err(CoreError::DimensionMismatch {
            expected: (1, x.len()),
            got: (1, y.len()),
        });
    }
    Ok(x.iter().zip(y).fold(0.0, |acc, (&a, &b)| acc + a * b))
}

/// Euclidean norm: `sqrt(sum(x_i^2))`.
pub fn nrm2(x: &[f64]) -> f64 {
    x.iter().map(|v| v * v).sum::<f64>().sqrt()
}

/// `y = alpha * x + y` (in-place update of `y`).
pub fn axpy(alpha: f64, x: &[f64], y: &mut [f64]) -> Result<()> {
    if x.len() != y.len() {
        return Err(CoreError::DimensionMismatch {
            expected: (1, y.len()),
            got: (1, x.len()),
        });
    }
    for (yi, &xi) in y.iter_mut().zip(x) {
        *yi += alpha * xi;
    }
    Ok(())
}

// ======================================================================
// Level 2: matrix-vector, O(n^2)
// ======================================================================

/// General matrix-vector multiply: `y = alpha * A * x + beta * y`.
///
/// `a` is `[m, n]`, `x` has length `n`, `y` has length `m`.
#[allow(clippy::many_single_char_names)]
pub fn gemv(alpha: f64, a: &Matrix, x: &[f64], beta: f64, y: &mut [f64]) -> Result<()> {
    let (m, n) = a.shape();
    if x.len() != n {
        return Err(CoreError::DimensionMismatch {
            expected: (n, 1),
            got: (x.len(), 1),
        });
    }
    if y.len() != m {
        return Err(CoreError::DimensionMismatch {
            expected: (m, 1),
            got: (y.len(), 1),
        });
    }

    for (yi, row) in y.iter_mut().zip(a.iter_rows()) {
        let sum: f64 = row.iter().zip(x).map(|(&aij, &xj)| aij * xj).sum();
        *yi = alpha * sum + beta * *yi;
    }
    Ok(())
}

// ======================================================================
// Level 3: matrix-matrix, O(n^3)
// ======================================================================

/// General matrix-matrix multiply: `C = alpha * A * B + beta * C`.
///
/// - `a` is `[m, k]`, `b` is `[k, n]`, `c` is `[m, n]`.
///
/// ```
/// # use contrix_core::{Matrix, linalg::gemm};
/// let a = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
/// let b = Matrix::from_rows(&[[5.0, 6.0], [7.0, 8.0]]).unwrap();
/// let mut c = Matrix::zeros(2, 2);
/// gemm(1.0, &a, &b, 0.0, &mut c).unwrap();
/// assert_eq!(c.as_slice(), &[19.0, 22.0, 43.0, 50.0]);
/// ```
#[allow(clippy::many_single_char_names)]
pub fn gemm(alpha: f64, a: &Matrix, b: &Matrix, beta: f64, c: &mut Matrix) -> Result<()> {
    let (m, k) = a.shape();
    let n = b.cols();

    if b.rows() != k {
        return Err(CoreError::DimensionMismatch {
            expected: (k, n),
            got: b.shape(),
        });
    }
    if c.shape() != (m, n) {
        return Err(CoreError::DimensionMismatch {
            expected: (m, n),
            got: c.shape(),
        });
    }

    let a_data = a.as_slice();
    let b_data = b.as_slice();
    let c_data = c.as_mut_slice();

    // ijk loop order (row-major friendly for A and C)
    for i in 0..m {
        for j in 0..n {
            let mut sum = 0.0;
            let a_row = i * k;
            for p in 0..k {
                sum += a_data[a_row + p] * b_data[p * n + j];
            }
            let c_idx = i * n + j;
            c_data[c_idx] = alpha * sum + beta * c_data[c_idx];
        }
    }

    Ok(())
}

// ======================================================================
// Convenience methods on Matrix
// ======================================================================

impl Matrix {
    /// Matrix-vector multiply: returns `self @ x`.
    pub fn matvec(&self, x: &[f64]) -> Result<Vec<f64>> {
        let mut y = vec![0.0; self.rows()];
        gemv(1.0, self, x, 0.0, &mut y)?;
        Ok(y)
    }

    /// Matrix-matrix multiply: returns `self @ other`.
    pub fn matmul(&self, other: &Matrix) -> Result<Matrix> {
        let mut c = Matrix::zeros(self.rows(), other.cols());
        gemm(1.0, self, other, 0.0, &mut c)?;
        Ok(c)
    }

    /// Solve `self * x = b` for a square matrix.
    pub fn solve(&self, b: &[f64]) -> Result<Vec<f64>> {
        crate::linalg::solve(self, b)
    }

    /// Inverse of a square matrix.
    pub fn inv(&self) -> Result<Matrix> {
        crate::linalg::inv(self)
    }
}
