//! Modified Gram–Schmidt orthonormalisation.
//!
//! Used to complete a partial set of contrast rows to a full basis and to
//! build orthogonal polynomial scores.

use crate::error::{CoreError, Result};
use crate::linalg::blas::{axpy, dot, nrm2};

/// Orthonormalise `vectors` in order, dropping any that are (numerically)
/// linearly dependent on those already accepted.
///
/// All vectors must share the same length. `tol` is compared against the
/// norm of each residual relative to the norm of the input vector.
///
/// ```
/// # use contrix_core::linalg::gram_schmidt;
/// let q = gram_schmidt(&[vec![1.0, 1.0], vec![2.0, 2.0], vec![1.0, 0.0]], 1e-10).unwrap();
/// assert_eq!(q.len(), 2);
/// ```
pub fn gram_schmidt(vectors: &[Vec<f64>], tol: f64) -> Result<Vec<Vec<f64>>> {
    let dim = vectors.first().map_or(0, Vec::len);
    let mut basis: Vec<Vec<f64>> = Vec::with_capacity(vectors.len().min(dim));

    for v in vectors {
        if v.len() != dim {
            return Err(CoreError::DimensionMismatch {
                expected: (1, dim),
                got: (1, v.len()),
            });
        }
        let scale = nrm2(v);
        if scale == 0.0 {
            continue;
        }
        let mut w = v.clone();
        // Two passes keep the residual orthogonal in finite precision.
        for _ in 0..2 {
            for q in &basis {
                let proj = dot(q, &w)?;
                axpy(-proj, q, &mut w)?;
            }
        }
        let norm = nrm2(&w);
        if norm > tol * scale {
            w.iter_mut().for_each(|x| *x /= norm);
            basis.push(w);
        }
    }

    Ok(basis)
}

/// Return orthonormal vectors spanning the orthogonal complement of the span
/// of `rows` in `R^dim`.
///
/// The result has `dim - rank(rows)` vectors. Candidates are the standard
/// basis vectors `e_0, e_1, ...` in order, so the output is deterministic.
pub fn orthogonal_complement(rows: &[Vec<f64>], dim: usize, tol: f64) -> Result<Vec<Vec<f64>>> {
    if let Some(bad) = rows.iter().find(|r| r.len() != dim) {
        return Err(CoreError::DimensionMismatch {
            expected: (1, dim),
            got: (1, bad.len()),
        });
    }
    let span = gram_schmidt(rows, tol)?;
    let rank = span.len();

    let mut candidates = span;
    for i in 0..dim {
        let mut e = vec![0.0; dim];
        e[i] = 1.0;
        candidates.push(e);
    }
    let full = gram_schmidt(&candidates, tol)?;
    Ok(full.into_iter().skip(rank).collect())
}
