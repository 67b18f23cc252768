//! Encoding matrices derived from contrast sets.
//!
//! Stacking a row of ones above the `k - 1` contrast rows gives a square
//! matrix `C`. Its inverse `C^-1 = [1/k | B]` has a constant first column
//! (every contrast sums to zero), and `B`, the remaining `k x (k-1)` block, is
//! the encoding. Fitting a model with `B` as the factor's coding makes each
//! coefficient equal the corresponding contrast applied to the level means.

use contrix_core::linalg::{self, orthogonal_complement};
use contrix_core::{CoreError, Matrix};
use serde::Serialize;
use tracing::debug;

use crate::error::{ContrastError, Result};
use crate::estimate::ContrastEstimate;
use crate::validate::ValidationResult;

/// The `k x (k-1)` encoding handed to a model fitter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrthogonalBasis {
    levels: Vec<String>,
    names: Vec<String>,
    matrix: Matrix,
}

/// Intercept and per-contrast coefficients recovered from level means.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BasisCoefficients {
    /// Unweighted mean of the level means.
    pub intercept: f64,
    pub contrasts: Vec<ContrastEstimate>,
}

impl OrthogonalBasis {
    pub fn levels(&self) -> &[String] {
        &self.levels
    }

    /// Column names: the contrast names, then any padding columns.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    pub fn into_matrix(self) -> Matrix {
        self.matrix
    }

    /// The full `k x k` design `[1 | B]` for a one-way cell-means layout.
    pub fn design_matrix(&self) -> Matrix {
        let k = self.levels.len();
        let mut design = Matrix::ones(k, k);
        let data = design.as_mut_slice();
        for (i, row) in self.matrix.iter_rows().enumerate() {
            data[i * k + 1..(i + 1) * k].copy_from_slice(row);
        }
        design
    }

    /// Solve `[1 | B] x = means` for the intercept and contrast coefficients.
    pub fn coefficients(&self, means: &[f64]) -> Result<BasisCoefficients> {
        let x = linalg::solve(&self.design_matrix(), means)?;
        let contrasts = self
            .names
            .iter()
            .zip(&x[1..])
            .map(|(name, &estimate)| ContrastEstimate {
                label: name.clone(),
                estimate,
            })
            .collect();
        Ok(BasisCoefficients {
            intercept: x[0],
            contrasts,
        })
    }

    /// Level means implied by an intercept and contrast coefficients.
    pub fn means_from(&self, intercept: f64, coefficients: &[f64]) -> Result<Vec<f64>> {
        let mut x = Vec::with_capacity(coefficients.len() + 1);
        x.push(intercept);
        x.extend_from_slice(coefficients);
        Ok(self.design_matrix().matvec(&x)?)
    }
}

pub(crate) fn build_from_inverse(
    validated: &ValidationResult,
    pad_underdetermined: bool,
) -> Result<OrthogonalBasis> {
    let levels = validated.levels().to_vec();
    let k = levels.len();
    let needed = k - 1;

    let mut rows: Vec<Vec<f64>> = validated
        .contrasts()
        .iter()
        .map(|c| c.weights.clone())
        .collect();
    let mut names: Vec<String> = validated
        .contrasts()
        .iter()
        .map(|c| c.name.clone())
        .collect();

    if rows.len() < needed {
        if !pad_underdetermined {
            return Err(ContrastError::SingularMatrix {
                reason: format!(
                    "{} contrasts supplied but a {k}-level factor needs {needed}",
                    rows.len()
                ),
            });
        }
        let mut spanning = vec![vec![1.0; k]];
        spanning.extend(rows.iter().cloned());
        let missing = needed - rows.len();
        let padding = orthogonal_complement(&spanning, k, validated.tolerance())?;
        debug!(
            supplied = rows.len(),
            missing,
            available = padding.len(),
            "padding contrast set"
        );
        let mut suffix = 0;
        for row in padding.into_iter().take(missing) {
            let name = loop {
                suffix += 1;
                let candidate = format!("pad{suffix}");
                if !names.contains(&candidate) {
                    break candidate;
                }
            };
            rows.push(row);
            names.push(name);
        }
    }

    let stacked = Matrix::vstack_row(&vec![1.0; k], &Matrix::from_rows(&rows)?)?;
    let inverse = linalg::inv(&stacked).map_err(|e| match e {
        CoreError::SingularMatrix { column } => ContrastError::SingularMatrix {
            reason: format!("contrasts are linearly dependent (no pivot in column {column})"),
        },
        other => other.into(),
    })?;
    let matrix = inverse.drop_column(0)?;

    debug!(levels = k, columns = matrix.cols(), "built basis from inverse");

    Ok(OrthogonalBasis {
        levels,
        names,
        matrix,
    })
}
