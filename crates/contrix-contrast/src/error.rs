use std::path::PathBuf;

use contrix_core::CoreError;
use thiserror::Error;

/// Errors raised while building, validating or applying contrasts.
///
/// Every per-contrast variant carries the contrast's position in the set and
/// its name so the caller can point at the offending hypothesis.
#[derive(Debug, Error)]
pub enum ContrastError {
    /// Weights do not sum to zero.
    #[error("contrast {index} ({name}): weights sum to {sum}, expected 0")]
    SumNotZero { index: usize, name: String, sum: f64 },

    /// Non-zero weights are not split into one positive and one negative chunk.
    #[error("contrast {index} ({name}): {reason}")]
    Sign {
        index: usize,
        name: String,
        reason: &'static str,
    },

    /// A level isolated as a singleton chunk earlier is used again.
    #[error(
        "contrast {index} ({name}): level '{level}' was already isolated by contrast {isolated_by}"
    )]
    ChunkReuse {
        index: usize,
        name: String,
        level: String,
        isolated_by: usize,
    },

    /// More contrasts than the factor has degrees of freedom.
    #[error("{given} contrasts supplied but a {levels}-level factor allows at most {max}")]
    TooManyContrasts {
        given: usize,
        levels: usize,
        max: usize,
    },

    /// The stacked contrast matrix cannot be inverted.
    #[error("contrast matrix is singular: {reason}")]
    SingularMatrix { reason: String },

    /// Chunk sums are not +1 / -1 and unit scaling is enforced.
    #[error(
        "contrast {index} ({name}): chunks sum to {positive_sum} / {negative_sum}, expected 1 / -1"
    )]
    NonUnitScaled {
        index: usize,
        name: String,
        positive_sum: f64,
        negative_sum: f64,
    },

    /// Two contrasts have a non-zero weight cross product and orthogonality
    /// is enforced.
    #[error("contrasts {first} and {second} are not orthogonal (cross product {product})")]
    NotOrthogonal {
        first: usize,
        second: usize,
        product: f64,
    },

    #[error("contrast {index} ({name}): expected {expected} weights, got {got}")]
    LengthMismatch {
        index: usize,
        name: String,
        expected: usize,
        got: usize,
    },

    #[error("contrast {index} ({name}): weight for level {position} is not finite")]
    NonFiniteWeight {
        index: usize,
        name: String,
        position: usize,
    },

    /// Two contrasts in one set share a name.
    #[error("contrast {index} ({name}): name already used by contrast {first}")]
    DuplicateName {
        index: usize,
        name: String,
        first: usize,
    },

    #[error("invalid factor: {0}")]
    InvalidFactor(String),

    #[error("invalid chunk: {0}")]
    InvalidChunk(String),

    #[error("unknown level '{0}'")]
    UnknownLevel(String),

    #[error("no marginal mean supplied for level '{0}'")]
    MissingMean(String),

    /// An encoding was built for a different level sequence than the factor's.
    #[error("encoding levels {encoding:?} do not match factor levels {factor:?}")]
    EncodingMismatch {
        factor: Vec<String>,
        encoding: Vec<String>,
    },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    InvalidSetting(String),

    /// Failure reported by a model-fitting collaborator.
    #[error("model fit failed: {0}")]
    Fit(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ContrastError {
    /// Whether this error is produced by one of the advisory rules that a
    /// policy can downgrade to a warning.
    pub fn is_advisory(&self) -> bool {
        matches!(
            self,
            Self::ChunkReuse { .. } | Self::NonUnitScaled { .. } | Self::NotOrthogonal { .. }
        )
    }
}

/// Convenience alias used throughout `contrix-contrast`.
pub type Result<T> = std::result::Result<T, ContrastError>;
