//! Standard contrast families.
//!
//! Each function returns rows ready for [`ContrastBuilder`](crate::ContrastBuilder):
//!
//! | Family | Contrast `i` compares | Orthogonal |
//! |--------|----------------------|------------|
//! | [`helmert`] | level `i` vs mean of later levels | yes |
//! | [`reverse_helmert`] | level `i` vs mean of earlier levels | yes |
//! | [`polynomial`] | degree `i + 1` trend over equally spaced levels | yes |
//! | [`versus_reference`] | each level vs the reference level | no |

use contrix_core::linalg::gram_schmidt;

use crate::error::Result;
use crate::factor::Factor;
use crate::spec::{ContrastSet, ContrastSpec};

const TREND_NAMES: [&str; 4] = ["linear", "quadratic", "cubic", "quartic"];

/// Each level against the mean of all later levels (unit scaled).
///
/// For `["None", "2 Pints", "4 Pints"]` this gives `[-1, 0.5, 0.5]` and
/// `[0, -1, 1]`.
pub fn helmert(factor: &Factor) -> ContrastSet {
    let k = factor.len();
    (0..k - 1)
        .map(|i| {
            let later = (k - i - 1) as f64;
            let weights = (0..k)
                .map(|j| match j.cmp(&i) {
                    std::cmp::Ordering::Less => 0.0,
                    std::cmp::Ordering::Equal => -1.0,
                    std::cmp::Ordering::Greater => 1.0 / later,
                })
                .collect::<Vec<_>>();
            ContrastSpec::new(format!("{} vs later", factor.levels()[i]), weights)
        })
        .collect()
}

/// Each level against the mean of all earlier levels (unit scaled).
///
/// The rows are orthogonal, but from the third contrast on they merge levels
/// that earlier contrasts isolated, so the chunk-reuse rule fires.
pub fn reverse_helmert(factor: &Factor) -> ContrastSet {
    let k = factor.len();
    (1..k)
        .map(|i| {
            let earlier = i as f64;
            let weights = (0..k)
                .map(|j| match j.cmp(&i) {
                    std::cmp::Ordering::Less => -1.0 / earlier,
                    std::cmp::Ordering::Equal => 1.0,
                    std::cmp::Ordering::Greater => 0.0,
                })
                .collect::<Vec<_>>();
            ContrastSpec::new(format!("{} vs earlier", factor.levels()[i]), weights)
        })
        .collect()
}

/// Orthonormal polynomial trend contrasts over equally spaced level scores.
///
/// Weights have unit length rather than unit chunk sums, so estimates are
/// trend components, not mean differences.
pub fn polynomial(factor: &Factor) -> Result<ContrastSet> {
    let k = factor.len();
    let centre = (k - 1) as f64 / 2.0;
    let scores: Vec<f64> = (0..k).map(|i| i as f64 - centre).collect();
    let powers: Vec<Vec<f64>> = (0..k)
        .map(|d| scores.iter().map(|x| x.powi(d as i32)).collect())
        .collect();

    let basis = gram_schmidt(&powers, 1e-10)?;
    Ok(basis
        .into_iter()
        .skip(1)
        .enumerate()
        .map(|(d, row)| {
            let name = TREND_NAMES
                .get(d)
                .map_or_else(|| format!("degree {}", d + 1), |n| (*n).to_string());
            let weights: Vec<f64> = row
                .into_iter()
                .map(|w| if w.abs() < 1e-12 { 0.0 } else { w })
                .collect();
            ContrastSpec::new(name, weights)
        })
        .collect())
}

/// Each non-reference level against the factor's reference level.
///
/// These are the comparisons implied by dummy (treatment) coding. They share
/// the reference level, so they are neither orthogonal nor free of chunk
/// reuse.
pub fn versus_reference(factor: &Factor) -> ContrastSet {
    let k = factor.len();
    let reference = factor.reference();
    (0..k)
        .filter(|&i| i != reference)
        .map(|i| {
            let mut weights = vec![0.0; k];
            weights[i] = 1.0;
            weights[reference] = -1.0;
            ContrastSpec::new(
                format!("{} vs {}", factor.levels()[i], factor.reference_level()),
                weights,
            )
        })
        .collect()
}
