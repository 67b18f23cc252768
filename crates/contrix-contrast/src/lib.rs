//! `contrix-contrast`: planned contrasts for categorical factors.
//!
//! A planned contrast is a weight vector over the levels of a factor that
//! compares one group of levels (the positive chunk) against another (the
//! negative chunk). This crate
//!
//! - checks contrast sets against the usual construction rules
//!   ([`ContrastBuilder::validate`]),
//! - derives the encoding matrix that makes a linear model's coefficients
//!   equal the contrasts ([`ContrastBuilder::build_from_inverse`]),
//! - applies contrasts directly to level means
//!   ([`ContrastBuilder::apply_to_means`]),
//! - and runs the whole pipeline against a [`ModelFitter`]
//!   ([`PlannedComparison`]).
//!
//! # Rules
//!
//! | Rule | Kind | Error |
//! |------|------|-------|
//! | Weights sum to zero | hard | [`ContrastError::SumNotZero`] |
//! | One positive and one negative chunk | hard | [`ContrastError::Sign`] |
//! | At most `k - 1` contrasts | hard | [`ContrastError::TooManyContrasts`] |
//! | Contrast names are unique | hard | [`ContrastError::DuplicateName`] |
//! | A singled-out level is not reused | advisory | [`ContrastError::ChunkReuse`] |
//! | Chunk sums are `+1` and `-1` | advisory | [`ContrastError::NonUnitScaled`] |
//! | Contrasts are pairwise orthogonal | advisory | [`ContrastError::NotOrthogonal`] |
//!
//! Advisory rules follow a [`RulePolicy`] from [`ContrastConfig`].
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use contrix_contrast::{ContrastBuilder, ContrastSet, ContrastSpec, Factor};
//!
//! let alcohol = Factor::new("alcohol", ["None", "2 Pints", "4 Pints"]).unwrap();
//! let set = ContrastSet::new()
//!     .with(ContrastSpec::from_chunks("any vs none", &alcohol, &["2 Pints", "4 Pints"], &["None"]).unwrap())
//!     .with(ContrastSpec::from_chunks("4 vs 2", &alcohol, &["4 Pints"], &["2 Pints"]).unwrap());
//!
//! let builder = ContrastBuilder::default();
//! let checked = builder.validate(alcohol.levels(), &set).unwrap();
//! assert!(checked.is_clean());
//!
//! let means = HashMap::from([
//!     ("None".to_string(), 63.75),
//!     ("2 Pints".to_string(), 64.6875),
//!     ("4 Pints".to_string(), 46.25),
//! ]);
//! let estimates = builder.apply_to_means(&checked, &means).unwrap();
//! assert_eq!(estimates[1].estimate, -18.4375);
//! ```

pub mod basis;
pub mod builder;
pub mod config;
pub mod error;
pub mod estimate;
pub mod factor;
pub mod families;
pub mod model;
pub mod planned;
pub mod spec;
pub mod validate;

pub use basis::{BasisCoefficients, OrthogonalBasis};
pub use builder::ContrastBuilder;
pub use config::{load_config, ContrastConfig, RulePolicy, CONFIG_FILE_NAME};
pub use error::{ContrastError, Result};
pub use estimate::{ordered_means, ContrastEstimate};
pub use factor::Factor;
pub use model::{Coefficient, ModelFit, ModelFitter, Observation};
pub use planned::{ComparisonOutcome, ContrastReport, PlannedComparison};
pub use spec::{ContrastSet, ContrastSpec};
pub use validate::{CheckedContrast, RuleWarning, ValidationResult};

/// Items intended for glob-import: `use contrix_contrast::prelude::*;`
pub mod prelude {
    pub use crate::builder::ContrastBuilder;
    pub use crate::config::{ContrastConfig, RulePolicy};
    pub use crate::error::ContrastError;
    pub use crate::factor::Factor;
    pub use crate::families;
    pub use crate::model::{ModelFit, ModelFitter, Observation};
    pub use crate::planned::PlannedComparison;
    pub use crate::spec::{ContrastSet, ContrastSpec};
}
