//! The seam between contrast encodings and model fitting.
//!
//! Fitting itself happens outside this crate. A [`ModelFitter`] takes a
//! [`Factor`] with an attached encoding and the observed responses, and
//! returns a typed [`ModelFit`]. Coefficients are looked up by name, never by
//! dynamic field access.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::Result;
use crate::factor::Factor;

/// One response measured at one factor level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    pub level: String,
    pub response: f64,
}

impl Observation {
    pub fn new(level: impl Into<String>, response: f64) -> Self {
        Self {
            level: level.into(),
            response,
        }
    }
}

/// A named model coefficient.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Coefficient {
    pub name: String,
    pub estimate: f64,
    pub std_error: f64,
}

/// Everything a fitter reports back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelFit {
    pub coefficients: Vec<Coefficient>,
    pub residuals: Vec<f64>,
    pub fitted_values: Vec<f64>,
    /// Estimated mean response per level name.
    pub marginal_means: HashMap<String, f64>,
}

impl ModelFit {
    pub fn coefficient(&self, name: &str) -> Option<&Coefficient> {
        self.coefficients.iter().find(|c| c.name == name)
    }

    /// Residual sum of squares.
    pub fn rss(&self) -> f64 {
        self.residuals.iter().map(|r| r * r).sum()
    }
}

/// Fits a linear model for a single encoded factor.
///
/// Implementations read the coding from [`Factor::encoding`] and should name
/// each contrast coefficient after the matching encoding column, so
/// [`PlannedComparison`](crate::PlannedComparison) can pair them up.
pub trait ModelFitter {
    fn fit(&self, factor: &Factor, observations: &[Observation]) -> Result<ModelFit>;
}

impl<F: ModelFitter + ?Sized> ModelFitter for &F {
    fn fit(&self, factor: &Factor, observations: &[Observation]) -> Result<ModelFit> {
        (**self).fit(factor, observations)
    }
}
