//! Error types for the survey terrain engine.

use thiserror::Error;

/// Result type alias using TerrainError.
pub type TerrainResult<T> = Result<T, TerrainError>;

/// Primary error type for grid construction and engine configuration.
///
/// Sparse data is not an error: absent samples are filtered by the engines.
/// These variants cover malformed grids and out-of-domain parameters only.
#[derive(Debug, Error)]
pub enum TerrainError {
    // === Configuration Errors ===
    #[error("Invalid parameter value for '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    #[error("Contour interval would produce {count} levels (limit {max})")]
    TooManyLevels { count: usize, max: usize },

    // === Grid Errors ===
    #[error("Row {row} has {found} entries, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Grid data has {found} samples, expected {expected}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("Non-finite elevation at row {row}, column {col}")]
    NonFiniteElevation { row: usize, col: usize },

    // === Infrastructure Errors ===
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TerrainError {
    /// Create an InvalidParameter error.
    pub fn invalid_parameter(param: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            param: param.into(),
            message: message.into(),
        }
    }

    /// Whether the error stems from caller-supplied configuration rather than data.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            TerrainError::InvalidParameter { .. } | TerrainError::TooManyLevels { .. }
        )
    }
}
