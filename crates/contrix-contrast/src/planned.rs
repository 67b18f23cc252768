//! End-to-end planned comparisons.
//!
//! [`PlannedComparison::run`] validates the contrasts, encodes the factor,
//! fits the model and reports each contrast next to the fitted coefficient
//! of the same name. Nothing reaches the fitter until validation passes.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::builder::ContrastBuilder;
use crate::error::Result;
use crate::factor::Factor;
use crate::model::{ModelFit, ModelFitter, Observation};
use crate::spec::ContrastSet;
use crate::validate::RuleWarning;

/// One row of a planned-comparison report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContrastReport {
    pub label: String,
    /// The contrast applied to the fit's marginal means.
    pub estimate: f64,
    /// The fitter's coefficient for this contrast, if exactly one carries
    /// its name.
    pub coefficient: Option<f64>,
    pub std_error: Option<f64>,
}

/// The result of [`PlannedComparison::run`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonOutcome {
    pub rows: Vec<ContrastReport>,
    /// Advisory rule violations that were tolerated.
    pub warnings: Vec<RuleWarning>,
    pub fit: ModelFit,
}

impl ComparisonOutcome {
    pub fn row(&self, label: &str) -> Option<&ContrastReport> {
        self.rows.iter().find(|r| r.label == label)
    }
}

/// Runs a contrast set through validation, encoding and a model fitter.
#[derive(Debug, Clone, Default)]
pub struct PlannedComparison<F> {
    builder: ContrastBuilder,
    fitter: F,
}

impl<F: ModelFitter> PlannedComparison<F> {
    pub fn new(builder: ContrastBuilder, fitter: F) -> Self {
        Self { builder, fitter }
    }

    pub fn builder(&self) -> &ContrastBuilder {
        &self.builder
    }

    /// Validate `contrasts`, attach the derived encoding to `factor`, fit
    /// `observations` and report every contrast.
    ///
    /// On success `factor` keeps the new encoding. On any error before the
    /// fit, `factor` is left untouched.
    pub fn run(
        &self,
        factor: &mut Factor,
        contrasts: &ContrastSet,
        observations: &[Observation],
    ) -> Result<ComparisonOutcome> {
        let validated = self.builder.validate(factor.levels(), contrasts)?;

        let basis = self.builder.basis_for(&validated)?;
        factor.attach(basis)?;
        debug!(factor = factor.name(), "attached encoding");

        let fit = self.fitter.fit(factor, observations)?;
        let estimates = self.builder.apply_to_means(&validated, &fit.marginal_means)?;

        let rows: Vec<ContrastReport> = estimates
            .into_iter()
            .map(|e| {
                let mut matching = fit.coefficients.iter().filter(|c| c.name == e.label);
                let coef = match (matching.next(), matching.next()) {
                    (Some(c), None) => Some(c),
                    (None, _) => {
                        debug!(contrast = %e.label, "fitter reported no matching coefficient");
                        None
                    }
                    (Some(_), Some(_)) => {
                        warn!(contrast = %e.label, "fitter reported several coefficients with this name");
                        None
                    }
                };
                ContrastReport {
                    coefficient: coef.map(|c| c.estimate),
                    std_error: coef.map(|c| c.std_error),
                    label: e.label,
                    estimate: e.estimate,
                }
            })
            .collect();

        info!(
            factor = factor.name(),
            contrasts = rows.len(),
            warnings = validated.warnings().len(),
            "planned comparison complete"
        );

        Ok(ComparisonOutcome {
            rows,
            warnings: validated.warnings().to_vec(),
            fit,
        })
    }
}
