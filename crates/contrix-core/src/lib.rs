//! `contrix-core`: numeric foundation for the contrix crates.
//!
//! Provides a dense row-major [`Matrix`] of `f64` and the handful of linear
//! algebra routines the contrast machinery relies on: products, LU
//! decomposition (inverse, solve) and Gram–Schmidt
//! orthonormalisation.
//!
//! # Design
//!
//! - Everything is implemented from scratch; no BLAS/LAPACK bindings.
//! - Matrices are small (one row or column per factor level), so routines
//!   favour clarity and exact pivoting over blocking or SIMD.

pub mod error;
pub mod linalg;
pub mod matrix;

pub use error::{CoreError, Result};
pub use matrix::Matrix;

/// Items intended for glob-import: `use contrix_core::prelude::*;`
pub mod prelude {
    pub use crate::error::{CoreError, Result};
    pub use crate::linalg::{self, LuDecomposition};
    pub use crate::matrix::Matrix;
}
