//! Linear algebra on [`Matrix`].
//!
//! All routines are implemented from scratch. The API covers:
//!
//! | Group | Operations |
//! |-------|-----------|
//! | Vector kernels | [`dot`], [`axpy`], [`nrm2`] |
//! | Matrix products | [`gemv`], [`gemm`] |
//! | Decomposition | [`LuDecomposition`] (`PA = LU`) |
//! | Orthogonalisation | [`gram_schmidt`], [`orthogonal_complement`] |

pub mod blas;
pub mod lu;
pub mod orthogonal;

pub use blas::{axpy, dot, gemm, gemv, nrm2};
pub use lu::LuDecomposition;
pub use orthogonal::{gram_schmidt, orthogonal_complement};

use crate::error::Result;
use crate::matrix::Matrix;

/// Solve the linear system `Ax = b` for a square matrix `A`.
///
/// ```
/// # use contrix_core::{Matrix, linalg};
/// let a = Matrix::from_rows(&[[2.0, 1.0], [1.0, 4.0]]).unwrap();
/// let x = linalg::solve(&a, &[5.0, 6.0]).unwrap();
/// assert!((x[0] - 2.0).abs() < 1e-10);
/// assert!((x[1] - 1.0).abs() < 1e-10);
/// ```
pub fn solve(a: &Matrix, b: &[f64]) -> Result<Vec<f64>> {
    LuDecomposition::decompose(a)?.solve(b)
}

/// Compute the inverse of a square matrix.
///
/// Returns [`CoreError::SingularMatrix`](crate::CoreError::SingularMatrix) if
/// the matrix is singular.
///
/// ```
/// # use contrix_core::{Matrix, linalg};
/// let a = Matrix::from_rows(&[[2.0, 1.0], [1.0, 4.0]]).unwrap();
/// let inv = linalg::inv(&a).unwrap();
/// assert!(a.matmul(&inv).unwrap().approx_eq(&Matrix::eye(2), 1e-10));
/// ```
pub fn inv(a: &Matrix) -> Result<Matrix> {
    LuDecomposition::decompose(a)?.inverse()
}
