//! Contrast weight vectors and ordered sets of them.

use serde::Serialize;

use crate::error::{ContrastError, Result};
use crate::factor::Factor;

/// A named weight vector, one weight per factor level (in level order).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContrastSpec {
    name: String,
    weights: Vec<f64>,
}

impl ContrastSpec {
    pub fn new(name: impl Into<String>, weights: impl Into<Vec<f64>>) -> Self {
        Self {
            name: name.into(),
            weights: weights.into(),
        }
    }

    /// Build a unit-scaled contrast comparing two chunks of levels.
    ///
    /// Each level in `positive` gets `1 / |positive|`, each level in
    /// `negative` gets `-1 / |negative|`, every other level 0. The estimate
    /// is then the mean of the positive chunk minus the mean of the negative
    /// chunk.
    ///
    /// ```
    /// # use contrix_contrast::{ContrastSpec, Factor};
    /// let f = Factor::new("alcohol", ["None", "2 Pints", "4 Pints"]).unwrap();
    /// let c = ContrastSpec::from_chunks("alcohol vs none", &f, &["2 Pints", "4 Pints"], &["None"]).unwrap();
    /// assert_eq!(c.weights(), &[-1.0, 0.5, 0.5]);
    /// ```
    pub fn from_chunks(
        name: impl Into<String>,
        factor: &Factor,
        positive: &[&str],
        negative: &[&str],
    ) -> Result<Self> {
        if positive.is_empty() || negative.is_empty() {
            return Err(ContrastError::InvalidChunk(
                "both chunks of a contrast need at least one level".to_string(),
            ));
        }
        let mut weights = vec![0.0; factor.len()];
        let pos_w = 1.0 / positive.len() as f64;
        let neg_w = -1.0 / negative.len() as f64;
        for (chunk, w) in [(positive, pos_w), (negative, neg_w)] {
            for level in chunk {
                let i = factor.position(level)?;
                if weights[i] != 0.0 {
                    return Err(ContrastError::InvalidChunk(format!(
                        "level '{level}' appears in a chunk twice"
                    )));
                }
                weights[i] = w;
            }
        }
        Ok(Self::new(name, weights))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Sum of the strictly positive weights.
    pub fn positive_sum(&self) -> f64 {
        self.weights.iter().filter(|&&w| w > 0.0).sum()
    }

    /// Sum of the strictly negative weights.
    pub fn negative_sum(&self) -> f64 {
        self.weights.iter().filter(|&&w| w < 0.0).sum()
    }

    /// Rescale so the positive chunk sums to +1 and the negative chunk to -1.
    ///
    /// A contrast lacking one of the chunks is returned unchanged; validation
    /// reports it.
    ///
    /// ```
    /// # use contrix_contrast::ContrastSpec;
    /// let c = ContrastSpec::new("c1", vec![-2.0, 1.0, 1.0]).unit_scaled();
    /// assert_eq!(c.weights(), &[-1.0, 0.5, 0.5]);
    /// ```
    pub fn unit_scaled(&self) -> Self {
        let pos = self.positive_sum();
        let neg = -self.negative_sum();
        if pos == 0.0 || neg == 0.0 {
            return self.clone();
        }
        let weights = self
            .weights
            .iter()
            .map(|&w| if w > 0.0 { w / pos } else if w < 0.0 { w / neg } else { 0.0 })
            .collect();
        Self {
            name: self.name.clone(),
            weights,
        }
    }
}

/// An ordered collection of contrasts for one factor.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContrastSet {
    contrasts: Vec<ContrastSpec>,
}

impl ContrastSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a contrast, builder style.
    pub fn with(mut self, contrast: ContrastSpec) -> Self {
        self.contrasts.push(contrast);
        self
    }

    pub fn push(&mut self, contrast: ContrastSpec) {
        self.contrasts.push(contrast);
    }

    pub fn len(&self) -> usize {
        self.contrasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contrasts.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ContrastSpec> {
        self.contrasts.iter()
    }

    pub fn as_slice(&self) -> &[ContrastSpec] {
        &self.contrasts
    }

    /// Unit-scale every contrast.
    pub fn unit_scaled(&self) -> Self {
        self.iter().map(ContrastSpec::unit_scaled).collect()
    }
}

impl FromIterator<ContrastSpec> for ContrastSet {
    fn from_iter<I: IntoIterator<Item = ContrastSpec>>(iter: I) -> Self {
        Self {
            contrasts: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<ContrastSpec>> for ContrastSet {
    fn from(contrasts: Vec<ContrastSpec>) -> Self {
        Self { contrasts }
    }
}

impl<'a> IntoIterator for &'a ContrastSet {
    type Item = &'a ContrastSpec;
    type IntoIter = std::slice::Iter<'a, ContrastSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.contrasts.iter()
    }
}
