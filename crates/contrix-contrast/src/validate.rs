//! Rule checking for contrast sets.
//!
//! Hard rules (at most `k - 1` contrasts, unique names, length, finiteness,
//! zero sum, one positive and one negative chunk) always abort. The advisory
//! rules (unit scaling, chunk reuse, pairwise orthogonality) follow their
//! [`RulePolicy`](crate::config::RulePolicy).

use core::fmt;

use contrix_core::Matrix;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::{ContrastConfig, RulePolicy};
use crate::error::{ContrastError, Result};
use crate::factor::check_levels;
use crate::spec::ContrastSet;

/// A contrast that passed the hard rules, tagged with its chunks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckedContrast {
    pub name: String,
    /// Weights with values inside the tolerance snapped to exactly 0.
    pub weights: Vec<f64>,
    /// Level positions carrying positive weight.
    pub positive: Vec<usize>,
    /// Level positions carrying negative weight.
    pub negative: Vec<usize>,
    pub positive_sum: f64,
    pub negative_sum: f64,
}

impl CheckedContrast {
    /// Positive chunk sums to +1 and negative chunk to -1 within `tol`.
    pub fn is_unit_scaled(&self, tol: f64) -> bool {
        (self.positive_sum - 1.0).abs() <= tol && (self.negative_sum + 1.0).abs() <= tol
    }

    /// Level positions with non-zero weight, in level order.
    pub fn participants(&self) -> Vec<usize> {
        let mut all: Vec<usize> = self.positive.iter().chain(&self.negative).copied().collect();
        all.sort_unstable();
        all
    }

    /// Dot product with a vector of group means in level order.
    pub fn apply(&self, means: &[f64]) -> Result<f64> {
        Ok(contrix_core::linalg::dot(&self.weights, means)?)
    }
}

/// A violation of an advisory rule that was recorded instead of raised.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum RuleWarning {
    ChunkReuse {
        index: usize,
        name: String,
        level: String,
        isolated_by: usize,
    },
    NonUnitScaled {
        index: usize,
        name: String,
        positive_sum: f64,
        negative_sum: f64,
    },
    NotOrthogonal {
        first: usize,
        second: usize,
        product: f64,
    },
}

impl RuleWarning {
    /// The error this warning becomes under [`RulePolicy::Deny`].
    pub fn into_error(self) -> ContrastError {
        match self {
            Self::ChunkReuse {
                index,
                name,
                level,
                isolated_by,
            } => ContrastError::ChunkReuse {
                index,
                name,
                level,
                isolated_by,
            },
            Self::NonUnitScaled {
                index,
                name,
                positive_sum,
                negative_sum,
            } => ContrastError::NonUnitScaled {
                index,
                name,
                positive_sum,
                negative_sum,
            },
            Self::NotOrthogonal {
                first,
                second,
                product,
            } => ContrastError::NotOrthogonal {
                first,
                second,
                product,
            },
        }
    }
}

impl fmt::Display for RuleWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.clone().into_error())
    }
}

/// The outcome of a successful validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    levels: Vec<String>,
    contrasts: Vec<CheckedContrast>,
    warnings: Vec<RuleWarning>,
    tolerance: f64,
}

impl ValidationResult {
    pub fn levels(&self) -> &[String] {
        &self.levels
    }

    pub fn contrasts(&self) -> &[CheckedContrast] {
        &self.contrasts
    }

    pub fn warnings(&self) -> &[RuleWarning] {
        &self.warnings
    }

    /// No advisory rule fired.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Exactly `k - 1` contrasts were supplied.
    pub fn is_complete(&self) -> bool {
        self.contrasts.len() + 1 == self.levels.len()
    }

    /// Every contrast is unit scaled, so estimates are mean differences.
    pub fn is_unit_scaled(&self) -> bool {
        self.contrasts
            .iter()
            .all(|c| c.is_unit_scaled(self.tolerance))
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Contrast weights as rows of an `m x k` matrix.
    pub fn weight_matrix(&self) -> Result<Matrix> {
        let rows: Vec<&[f64]> = self.contrasts.iter().map(|c| c.weights.as_slice()).collect();
        if rows.is_empty() {
            return Ok(Matrix::zeros(0, self.levels.len()));
        }
        Ok(Matrix::from_rows(&rows)?)
    }
}

/// Record or raise an advisory violation according to `policy`.
fn report(policy: RulePolicy, warning: RuleWarning, warnings: &mut Vec<RuleWarning>) -> Result<()> {
    match policy {
        RulePolicy::Allow => Ok(()),
        RulePolicy::Warn => {
            warn!("{}", warning);
            warnings.push(warning);
            Ok(())
        }
        RulePolicy::Deny => Err(warning.into_error()),
    }
}

pub(crate) fn validate<S: AsRef<str>>(
    levels: &[S],
    contrasts: &ContrastSet,
    config: &ContrastConfig,
) -> Result<ValidationResult> {
    let levels: Vec<String> = levels.iter().map(|l| l.as_ref().to_string()).collect();
    check_levels(&levels)?;
    let k = levels.len();
    let tol = config.tolerance;

    if contrasts.len() > k - 1 {
        return Err(ContrastError::TooManyContrasts {
            given: contrasts.len(),
            levels: k,
            max: k - 1,
        });
    }

    for (index, spec) in contrasts.iter().enumerate() {
        if let Some(first) = contrasts.iter().position(|s| s.name() == spec.name()) {
            if first < index {
                return Err(ContrastError::DuplicateName {
                    index,
                    name: spec.name().to_string(),
                    first,
                });
            }
        }
    }

    let checked = contrasts
        .iter()
        .enumerate()
        .map(|(index, spec)| check_one(index, spec.name(), spec.weights(), k, tol))
        .collect::<Result<Vec<_>>>()?;

    let mut warnings = Vec::new();

    if config.unit_scaling != RulePolicy::Allow {
        for (index, c) in checked.iter().enumerate() {
            if !c.is_unit_scaled(tol) {
                let warning = RuleWarning::NonUnitScaled {
                    index,
                    name: c.name.clone(),
                    positive_sum: c.positive_sum,
                    negative_sum: c.negative_sum,
                };
                report(config.unit_scaling, warning, &mut warnings)?;
            }
        }
    }

    if config.chunk_reuse != RulePolicy::Allow {
        // isolated[level] = contrast that made the level a singleton chunk
        let mut isolated: Vec<Option<usize>> = vec![None; k];
        for (index, c) in checked.iter().enumerate() {
            for level in c.participants() {
                if let Some(isolated_by) = isolated[level] {
                    let warning = RuleWarning::ChunkReuse {
                        index,
                        name: c.name.clone(),
                        level: levels[level].clone(),
                        isolated_by,
                    };
                    report(config.chunk_reuse, warning, &mut warnings)?;
                }
            }
            for chunk in [&c.positive, &c.negative] {
                if let [only] = chunk.as_slice() {
                    isolated[*only].get_or_insert(index);
                }
            }
        }
    }

    if config.orthogonality != RulePolicy::Allow {
        for (i, a) in checked.iter().enumerate() {
            for (j, b) in checked.iter().enumerate().skip(i + 1) {
                let product = contrix_core::linalg::dot(&a.weights, &b.weights)?;
                if product.abs() > tol {
                    let warning = RuleWarning::NotOrthogonal {
                        first: i,
                        second: j,
                        product,
                    };
                    report(config.orthogonality, warning, &mut warnings)?;
                }
            }
        }
    }

    debug!(
        levels = k,
        contrasts = checked.len(),
        warnings = warnings.len(),
        "validated contrast set"
    );

    Ok(ValidationResult {
        levels,
        contrasts: checked,
        warnings,
        tolerance: tol,
    })
}

fn check_one(index: usize, name: &str, weights: &[f64], k: usize, tol: f64) -> Result<CheckedContrast> {
    if weights.len() != k {
        return Err(ContrastError::LengthMismatch {
            index,
            name: name.to_string(),
            expected: k,
            got: weights.len(),
        });
    }
    if let Some(position) = weights.iter().position(|w| !w.is_finite()) {
        return Err(ContrastError::NonFiniteWeight {
            index,
            name: name.to_string(),
            position,
        });
    }

    // The sum is taken after snapping: the snapped row is what gets stacked.
    let snapped: Vec<f64> = weights
        .iter()
        .map(|&w| if w.abs() <= tol { 0.0 } else { w })
        .collect();
    let sum: f64 = snapped.iter().sum();
    if sum.abs() > tol {
        return Err(ContrastError::SumNotZero {
            index,
            name: name.to_string(),
            sum,
        });
    }

    let positive: Vec<usize> = (0..k).filter(|&i| snapped[i] > 0.0).collect();
    let negative: Vec<usize> = (0..k).filter(|&i| snapped[i] < 0.0).collect();

    let reason = match (positive.is_empty(), negative.is_empty()) {
        (true, true) => Some("all weights are zero"),
        (true, false) => Some("no positive chunk"),
        (false, true) => Some("no negative chunk"),
        (false, false) => None,
    };
    if let Some(reason) = reason {
        return Err(ContrastError::Sign {
            index,
            name: name.to_string(),
            reason,
        });
    }

    let positive_sum = positive.iter().map(|&i| snapped[i]).sum();
    let negative_sum = negative.iter().map(|&i| snapped[i]).sum();

    Ok(CheckedContrast {
        name: name.to_string(),
        weights: snapped,
        positive,
        negative,
        positive_sum,
        negative_sum,
    })
}
