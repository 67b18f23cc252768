use thiserror::Error;

/// All errors returned by `contrix-core`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Operand shapes do not match the required layout.
    #[error("dimension mismatch: expected {expected:?}, got {got:?}")]
    DimensionMismatch {
        expected: (usize, usize),
        got: (usize, usize),
    },

    /// A shape specification is invalid.
    #[error("invalid shape {rows}x{cols}: {reason}")]
    InvalidShape {
        rows: usize,
        cols: usize,
        reason: &'static str,
    },

    /// A row/column index is out of bounds.
    #[error("index ({row}, {col}) out of bounds for {rows}x{cols} matrix")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// Matrix is singular and cannot be inverted / decomposed.
    ///
    /// `column` is the elimination step at which no usable pivot was found.
    #[error("singular matrix (no usable pivot in column {column})")]
    SingularMatrix { column: usize },

    /// The operation is not supported for the given input.
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: &'static str },
}

/// Convenience alias used throughout `contrix-core`.
pub type Result<T> = std::result::Result<T, CoreError>;
