//! Builder configuration.
//!
//! Loaded from `contrix.toml` in an analysis directory, or constructed in
//! code. Every field has a default, so an empty file is valid.
//!
//! ```toml
//! # contrix.toml
//! tolerance = 1e-9
//! unit_scaling = "deny"      # allow | warn | deny
//! chunk_reuse = "warn"
//! orthogonality = "warn"
//! pad_underdetermined = false
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ContrastError, Result};

/// File name looked up by [`load_config`].
pub const CONFIG_FILE_NAME: &str = "contrix.toml";

/// Default numerical tolerance for "equals zero" checks.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// How an advisory rule is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RulePolicy {
    /// Not checked.
    Allow,
    /// Checked; violations are recorded as warnings on the result.
    #[default]
    Warn,
    /// Checked; violations are hard errors.
    Deny,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContrastConfig {
    /// Absolute tolerance for zero sums, zero weights and unit chunk sums.
    pub tolerance: f64,
    /// Positive chunk sums to +1 and negative chunk to -1.
    pub unit_scaling: RulePolicy,
    /// A singleton chunk may not participate in later contrasts.
    pub chunk_reuse: RulePolicy,
    /// Pairwise weight cross products are zero.
    pub orthogonality: RulePolicy,
    /// Complete fewer than k-1 contrasts with orthogonal padding rows
    /// instead of reporting a singular matrix.
    pub pad_underdetermined: bool,
}

impl Default for ContrastConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            unit_scaling: RulePolicy::Allow,
            chunk_reuse: RulePolicy::Warn,
            orthogonality: RulePolicy::Warn,
            pad_underdetermined: false,
        }
    }
}

impl ContrastConfig {
    /// Every advisory rule set to [`RulePolicy::Deny`].
    pub fn strict() -> Self {
        Self {
            unit_scaling: RulePolicy::Deny,
            chunk_reuse: RulePolicy::Deny,
            orthogonality: RulePolicy::Deny,
            ..Self::default()
        }
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.check()
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ContrastError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    fn check(self) -> Result<Self> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(ContrastError::InvalidSetting(format!(
                "tolerance must be a finite non-negative number, got {}",
                self.tolerance
            )));
        }
        Ok(self)
    }
}

/// Load `contrix.toml` from `dir`, falling back to defaults when the file is
/// absent or unreadable.
pub fn load_config(dir: &Path) -> ContrastConfig {
    let path = dir.join(CONFIG_FILE_NAME);
    if !path.exists() {
        debug!("No {} in {}, using defaults", CONFIG_FILE_NAME, dir.display());
        return ContrastConfig::default();
    }
    match ContrastConfig::from_file(&path) {
        Ok(config) => {
            debug!("Loaded contrast config from {}", path.display());
            config
        }
        Err(e) => {
            warn!("Failed to load {}: {}", path.display(), e);
            ContrastConfig::default()
        }
    }
}
