//! An ordinary least-squares fitter for exercising the workflow.

use contrix_contrast::{Coefficient, ContrastError, Factor, ModelFit, ModelFitter, Observation, Result};
use contrix_core::{linalg, Matrix};

pub const INTERCEPT: &str = "(Intercept)";

/// Least squares on the design `[1 | B]` of the attached encoding.
///
/// Standard errors are `sqrt(sigma^2 * diag((X'X)^-1))` with
/// `sigma^2 = RSS / (n - k)`, or `NaN` for a saturated fit.
pub struct LeastSquares;

impl ModelFitter for LeastSquares {
    fn fit(&self, factor: &Factor, observations: &[Observation]) -> Result<ModelFit> {
        let basis = factor
            .encoding()
            .ok_or_else(|| ContrastError::Fit("no encoding attached".into()))?;
        let design = basis.design_matrix();
        let (n, p) = (observations.len(), design.cols());

        let mut x = Vec::with_capacity(n * p);
        let mut y = Vec::with_capacity(n);
        for obs in observations {
            x.extend_from_slice(design.row(factor.position(&obs.level)?));
            y.push(obs.response);
        }
        let x = Matrix::from_vec(x, n, p)?;
        let xt = x.transpose();
        let xtx_inv = linalg::inv(&xt.matmul(&x)?)?;
        let beta = xtx_inv.matvec(&xt.matvec(&y)?)?;

        let fitted_values = x.matvec(&beta)?;
        let residuals: Vec<f64> = y.iter().zip(&fitted_values).map(|(a, b)| a - b).collect();
        let rss: f64 = residuals.iter().map(|r| r * r).sum();
        let sigma2 = if n > p { rss / (n - p) as f64 } else { f64::NAN };

        let names = std::iter::once(INTERCEPT).chain(basis.names().iter().map(String::as_str));
        let mut coefficients = Vec::with_capacity(p);
        for (j, (name, &estimate)) in names.zip(&beta).enumerate() {
            coefficients.push(Coefficient {
                name: name.to_string(),
                estimate,
                std_error: (sigma2 * xtx_inv.get(j, j)?).sqrt(),
            });
        }

        let level_means = basis.means_from(beta[0], &beta[1..])?;
        Ok(ModelFit {
            coefficients,
            residuals,
            fitted_values,
            marginal_means: factor.levels().iter().cloned().zip(level_means).collect(),
        })
    }
}
