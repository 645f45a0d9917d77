//! Error types for cortexvis.

use thiserror::Error;

/// The main error type for cortexvis operations.
#[derive(Error, Debug)]
pub enum CortexvisError {
    /// Malformed user input (range bounds, hex colors, value ranges, options).
    #[error("validation error: {0}")]
    Validation(String),

    /// A discrete colormap with the given name is neither registered nor persisted.
    #[error("colormap '{0}' not found")]
    UnknownColorMap(String),

    /// The colormap exists but is not a discrete colormap.
    #[error("colormap '{0}' is not a discrete colormap")]
    NotDiscrete(String),

    /// An operation needs a scalar overlay but none is loaded.
    #[error("no scalar overlay loaded")]
    NoOverlay,

    /// Index outside of an authored range list.
    #[error("range index {index} out of bounds (len {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// Data size mismatch.
    #[error("data size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// Image encoding error.
    #[error("image error: {0}")]
    Image(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for cortexvis operations.
pub type Result<T> = std::result::Result<T, CortexvisError>;

impl CortexvisError {
    /// Shorthand for building a [`CortexvisError::Validation`].
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
