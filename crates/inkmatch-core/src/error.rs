//! Error types for inkmatch-core
//!
//! Provides a unified error type for the stroke data model, the
//! preprocessing operations and the text serialization of writings.

use thiserror::Error;

/// inkmatch-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// A stroke must hold at least one point
    #[error("stroke must contain at least one point")]
    EmptyStroke,

    /// Index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed serialized writing
    #[error("decode error: {0}")]
    DecodeError(String),
}

/// Result type alias for inkmatch-core operations
pub type Result<T> = std::result::Result<T, Error>;
