//! Contrast estimates from group means.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::{ContrastError, Result};
use crate::validate::ValidationResult;

/// One contrast's point estimate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContrastEstimate {
    pub label: String,
    pub estimate: f64,
}

/// Arrange a level → mean mapping in level order.
pub fn ordered_means(levels: &[String], means: &HashMap<String, f64>) -> Result<Vec<f64>> {
    levels
        .iter()
        .map(|level| {
            means
                .get(level)
                .copied()
                .ok_or_else(|| ContrastError::MissingMean(level.clone()))
        })
        .collect()
}

/// Apply every validated contrast to the group means, in contrast order.
pub(crate) fn apply_to_means(
    validated: &ValidationResult,
    means: &HashMap<String, f64>,
) -> Result<Vec<ContrastEstimate>> {
    let ordered = ordered_means(validated.levels(), means)?;
    validated
        .contrasts()
        .iter()
        .map(|c| {
            Ok(ContrastEstimate {
                label: c.name.clone(),
                estimate: c.apply(&ordered)?,
            })
        })
        .collect()
}
