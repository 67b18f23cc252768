//! The [`ContrastBuilder`] entry point.

use std::collections::HashMap;

use crate::basis::{self, OrthogonalBasis};
use crate::config::ContrastConfig;
use crate::error::Result;
use crate::estimate::{self, ContrastEstimate};
use crate::spec::ContrastSet;
use crate::validate::{self, ValidationResult};

/// Validates contrast sets, derives encodings and applies contrasts to means.
///
/// The builder holds only its configuration; every call is independent.
///
/// ```
/// # use contrix_contrast::{ContrastBuilder, ContrastSet, ContrastSpec};
/// let levels = ["None", "2 Pints", "4 Pints"];
/// let set = ContrastSet::new()
///     .with(ContrastSpec::new("alcohol vs none", vec![-1.0, 0.5, 0.5]))
///     .with(ContrastSpec::new("4 vs 2 pints", vec![0.0, -1.0, 1.0]));
///
/// let builder = ContrastBuilder::default();
/// let basis = builder.build_from_inverse(&levels, &set).unwrap();
/// assert_eq!(basis.matrix().shape(), (3, 2));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ContrastBuilder {
    config: ContrastConfig,
}

impl ContrastBuilder {
    pub fn new(config: ContrastConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ContrastConfig {
        &self.config
    }

    /// Check `contrasts` against the level sequence.
    ///
    /// Hard-rule violations are returned as errors; advisory rules follow the
    /// configured policies.
    pub fn validate<S: AsRef<str>>(
        &self,
        levels: &[S],
        contrasts: &ContrastSet,
    ) -> Result<ValidationResult> {
        validate::validate(levels, contrasts, &self.config)
    }

    /// Validate, then derive the `k x (k-1)` encoding by inverting the
    /// contrast matrix stacked under a row of ones.
    pub fn build_from_inverse<S: AsRef<str>>(
        &self,
        levels: &[S],
        contrasts: &ContrastSet,
    ) -> Result<OrthogonalBasis> {
        let validated = self.validate(levels, contrasts)?;
        self.basis_for(&validated)
    }

    /// Derive the encoding for an already validated set.
    pub fn basis_for(&self, validated: &ValidationResult) -> Result<OrthogonalBasis> {
        basis::build_from_inverse(validated, self.config.pad_underdetermined)
    }

    /// Dot each validated contrast with the group means.
    pub fn apply_to_means(
        &self,
        validated: &ValidationResult,
        means: &HashMap<String, f64>,
    ) -> Result<Vec<ContrastEstimate>> {
        estimate::apply_to_means(validated, means)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RulePolicy;
    use crate::error::ContrastError;
    use crate::spec::ContrastSpec;

    #[test]
    fn test_build_refuses_invalid_set() {
        let set = ContrastSet::new().with(ContrastSpec::new("bad", vec![1.0, 1.0, 0.0]));
        let err = ContrastBuilder::default()
            .build_from_inverse(&["a", "b", "c"], &set)
            .unwrap_err();
        assert!(matches!(err, ContrastError::SumNotZero { .. }));
    }

    #[test]
    fn test_padding_follows_config() {
        let set = ContrastSet::new().with(ContrastSpec::new("b vs a", vec![-1.0, 1.0, 0.0]));
        let strict = ContrastBuilder::default();
        assert!(strict.build_from_inverse(&["a", "b", "c"], &set).is_err());

        let padded = ContrastBuilder::new(ContrastConfig {
            pad_underdetermined: true,
            ..ContrastConfig::default()
        });
        let basis = padded.build_from_inverse(&["a", "b", "c"], &set).unwrap();
        assert_eq!(basis.names(), &["b vs a", "pad1"]);
    }

    #[test]
    fn test_config_is_applied() {
        let builder = ContrastBuilder::new(ContrastConfig {
            unit_scaling: RulePolicy::Deny,
            ..ContrastConfig::default()
        });
        assert_eq!(builder.config().unit_scaling, RulePolicy::Deny);
        let set = ContrastSet::new().with(ContrastSpec::new("c", vec![-2.0, 1.0, 1.0]));
        assert!(builder.validate(&["a", "b", "c"], &set).is_err());
    }
}
