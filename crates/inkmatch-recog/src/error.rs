//! Error types for inkmatch-recog

use thiserror::Error;

/// Errors that can occur during training, model loading and recognition
#[derive(Debug, Error)]
pub enum RecogError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] inkmatch_core::Error),

    /// Missing or invalid training metadata
    #[error("configuration error: {0}")]
    Config(String),

    /// Unsupported value for a named option
    #[error("invalid option: {key} = '{value}'")]
    InvalidOption { key: String, value: String },

    /// Invalid parameter provided
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Missing, truncated, corrupt or incompatible model file
    #[error("model load error: {0}")]
    Load(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for recognition operations
pub type RecogResult<T> = Result<T, RecogError>;
