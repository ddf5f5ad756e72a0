use thiserror::Error;

/// Whether a failure was caused by the caller's input or by the computation itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    Computation,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TpaError {
    #[error("empty matrix provided")]
    EmptyMatrix,
    #[error("ragged matrix: row {row} has {found} columns, expected {expected}")]
    RaggedMatrix {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("non-finite matrix entry at ({row}, {col})")]
    NonFiniteEntry { row: usize, col: usize },
    #[error("negative matrix entry {value} at ({row}, {col})")]
    NegativeEntry { row: usize, col: usize, value: f64 },
    #[error("shape mismatch: {left:?} vs {right:?}")]
    ShapeMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },
    #[error("singular value decomposition did not converge")]
    SvdNonConvergence,
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to read configuration {path}: {reason}")]
    ConfigRead { path: String, reason: String },
}

impl TpaError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TpaError::EmptyMatrix
            | TpaError::RaggedMatrix { .. }
            | TpaError::NonFiniteEntry { .. }
            | TpaError::NegativeEntry { .. }
            | TpaError::InvalidConfig(_)
            | TpaError::ConfigRead { .. } => ErrorKind::InvalidInput,
            TpaError::ShapeMismatch { .. } | TpaError::SvdNonConvergence => {
                ErrorKind::Computation
            }
        }
    }

    pub fn is_input_error(&self) -> bool {
        self.kind() == ErrorKind::InvalidInput
    }
}
