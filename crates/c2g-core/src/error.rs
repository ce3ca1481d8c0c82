//! Error types for pixel buffer operations.
//!
//! Every buffer constructor validates its shape up front, so the only
//! failures this crate reports are shape violations: a sample vector whose
//! length does not match the declared dimensions, planes that disagree on
//! size, or coordinates outside the image.
//!
//! # Usage
//!
//! ```rust
//! use c2g_core::{Error, Plane};
//!
//! let err = Plane::from_data(4, 4, vec![0.0; 3]).unwrap_err();
//! assert!(matches!(err, Error::InvalidDimensions { .. }));
//! ```
//!
//! # Used By
//!
//! - `c2g-io` - decoders build buffers through the checked constructors
//! - `c2g-ops` - converts into `OpsError::Buffer`

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by buffer construction and access.
#[derive(Debug, Error)]
pub enum Error {
    /// Sample count does not match the declared dimensions.
    #[error("invalid dimensions {width}x{height}: {reason}")]
    InvalidDimensions {
        /// Declared width
        width: u32,
        /// Declared height
        height: u32,
        /// Human-readable description of the mismatch
        reason: String,
    },

    /// Two buffers that must share a size do not.
    #[error("dimension mismatch: expected {expected_width}x{expected_height}, got {actual_width}x{actual_height}")]
    DimensionMismatch {
        /// Width of the reference buffer
        expected_width: u32,
        /// Height of the reference buffer
        expected_height: u32,
        /// Width of the offending buffer
        actual_width: u32,
        /// Height of the offending buffer
        actual_height: u32,
    },

    /// Wrong number of channels or planes for the requested layout.
    #[error("channel mismatch: {0}")]
    ChannelMismatch(String),

    /// Pixel coordinates are outside image bounds.
    #[error("pixel ({x}, {y}) out of bounds for image {width}x{height}")]
    OutOfBounds {
        /// X coordinate that was out of bounds
        x: u32,
        /// Y coordinate that was out of bounds
        y: u32,
        /// Image width
        width: u32,
        /// Image height
        height: u32,
    },
}

impl Error {
    /// Creates an [`Error::InvalidDimensions`] with a formatted reason.
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::DimensionMismatch`] from two `(width, height)` pairs.
    pub fn dimension_mismatch(expected: (u32, u32), actual: (u32, u32)) -> Self {
        Self::DimensionMismatch {
            expected_width: expected.0,
            expected_height: expected.1,
            actual_width: actual.0,
            actual_height: actual.1,
        }
    }
}
