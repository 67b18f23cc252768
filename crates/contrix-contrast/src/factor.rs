//! Categorical factors.

use std::collections::HashSet;

use serde::Serialize;

use crate::basis::OrthogonalBasis;
use crate::error::{ContrastError, Result};

/// A categorical variable with ordered, unique level names.
///
/// Level order matters: contrast weights are matched to levels by position.
/// The reference level defaults to the first one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Factor {
    name: String,
    levels: Vec<String>,
    reference: usize,
    encoding: Option<OrthogonalBasis>,
}

impl Factor {
    /// Create a factor from its name and ordered level names.
    ///
    /// Fails if there are fewer than two levels or a level is repeated.
    ///
    /// ```
    /// # use contrix_contrast::Factor;
    /// let f = Factor::new("alcohol", ["None", "2 Pints", "4 Pints"]).unwrap();
    /// assert_eq!(f.len(), 3);
    /// assert_eq!(f.reference_level(), "None");
    /// ```
    pub fn new<I, S>(name: impl Into<String>, levels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let levels: Vec<String> = levels.into_iter().map(Into::into).collect();
        check_levels(&levels)?;
        Ok(Self {
            name,
            levels,
            reference: 0,
            encoding: None,
        })
    }

    /// Designate `level` as the reference (baseline) level.
    pub fn with_reference(mut self, level: &str) -> Result<Self> {
        self.reference = self.position(level)?;
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn levels(&self) -> &[String] {
        &self.levels
    }

    /// Number of levels (`k`).
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Whether the level list is empty. [`Factor::new`] rejects fewer than
    /// two levels, so this never holds for a constructed factor.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Degrees of freedom, `k - 1`: the maximum number of orthogonal contrasts.
    pub fn max_contrasts(&self) -> usize {
        self.levels.len() - 1
    }

    pub fn reference(&self) -> usize {
        self.reference
    }

    pub fn reference_level(&self) -> &str {
        &self.levels[self.reference]
    }

    /// Position of `level` in the level order.
    pub fn position(&self, level: &str) -> Result<usize> {
        self.levels
            .iter()
            .position(|l| l == level)
            .ok_or_else(|| ContrastError::UnknownLevel(level.to_string()))
    }

    /// Attach an encoding for the model fitter to use.
    ///
    /// The basis must have been built for exactly this level sequence.
    pub fn attach(&mut self, basis: OrthogonalBasis) -> Result<()> {
        if basis.levels() != self.levels.as_slice() {
            return Err(ContrastError::EncodingMismatch {
                factor: self.levels.clone(),
                encoding: basis.levels().to_vec(),
            });
        }
        self.encoding = Some(basis);
        Ok(())
    }

    /// The attached encoding, if any.
    pub fn encoding(&self) -> Option<&OrthogonalBasis> {
        self.encoding.as_ref()
    }

    /// Remove and return the attached encoding.
    pub fn detach(&mut self) -> Option<OrthogonalBasis> {
        self.encoding.take()
    }
}

pub(crate) fn check_levels(levels: &[String]) -> Result<()> {
    if levels.len() < 2 {
        return Err(ContrastError::InvalidFactor(format!(
            "a factor needs at least 2 levels, got {}",
            levels.len()
        )));
    }
    let mut seen = HashSet::with_capacity(levels.len());
    for level in levels {
        if !seen.insert(level.as_str()) {
            return Err(ContrastError::InvalidFactor(format!(
                "duplicate level '{level}'"
            )));
        }
    }
    Ok(())
}
