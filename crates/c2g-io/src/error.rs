//! Error types for I/O operations.
//!
//! Provides unified error handling for all image format operations.

use std::io;
use thiserror::Error;

/// I/O operation error.
#[derive(Debug, Error)]
pub enum IoError {
    /// File I/O error (missing, unreadable, permission denied).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file exists but holds no bytes.
    #[error("file is empty: {0}")]
    EmptyFile(String),

    /// Unsupported or unrecognized format.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Decoded successfully but unusable (e.g. zero width).
    #[error("invalid file: {0}")]
    InvalidFile(String),

    /// Decoding error.
    #[error("decode error: {0}")]
    DecodeError(String),

    /// Encoding error.
    #[error("encode error: {0}")]
    EncodeError(String),

    /// Unsupported bit depth or color type.
    #[error("unsupported bit depth: {0}")]
    UnsupportedBitDepth(String),

    /// Buffer shape error while assembling decoded samples.
    #[error(transparent)]
    Buffer(#[from] c2g_core::Error),
}

/// Result type for I/O operations.
pub type IoResult<T> = Result<T, IoError>;
