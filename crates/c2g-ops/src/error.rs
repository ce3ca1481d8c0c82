//! Error types for grayscale conversion.
//!
//! Every failure is fatal for the run. The variants split into two groups:
//! parameter errors raised before any file is opened (`ArgumentCount`,
//! `Type`, `Range`, `Enum`) and pipeline errors raised while converting
//! (`InputFile`, `Colorspace`, `Output`).

use c2g_io::IoError;
use std::path::PathBuf;
use thiserror::Error;

/// Error type for grayscale conversion.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Wrong number of positional arguments.
    #[error("expected {expected} file arguments (infile outfile), got {actual}")]
    ArgumentCount {
        /// Required count
        expected: usize,
        /// Supplied count
        actual: usize,
    },

    /// A numeric parameter is not a number.
    #[error("{name} must be a number, got '{value}'")]
    Type {
        /// Parameter name
        name: &'static str,
        /// Offending text
        value: String,
    },

    /// A numeric parameter is outside its allowed range.
    #[error("{name} must be between {min} and {max}, got {value}")]
    Range {
        /// Parameter name
        name: &'static str,
        /// Offending value
        value: f32,
        /// Inclusive lower bound
        min: f32,
        /// Inclusive upper bound
        max: f32,
    },

    /// A token is not one of the accepted names.
    #[error("invalid {name} '{value}' (expected one of: {expected})")]
    Enum {
        /// Parameter name
        name: &'static str,
        /// Offending token
        value: String,
        /// Accepted tokens, comma separated
        expected: &'static str,
    },

    /// Input is missing, unreadable, empty or undecodable.
    #[error("cannot read input '{}'", path.display())]
    InputFile {
        /// Input path
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: IoError,
    },

    /// Input image is not RGB or sRGB.
    #[error("input colorspace is {found}; only RGB and sRGB images can be converted")]
    Colorspace {
        /// Colorspace tag the file declared
        found: String,
    },

    /// Output could not be encoded or written.
    #[error("cannot write output '{}'", path.display())]
    Output {
        /// Output path
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: IoError,
    },

    /// Buffers that must share dimensions do not.
    #[error("size mismatch: {0}")]
    SizeMismatch(String),
}

impl From<c2g_core::Error> for OpsError {
    fn from(err: c2g_core::Error) -> Self {
        OpsError::SizeMismatch(err.to_string())
    }
}

/// Result type for grayscale conversion.
pub type OpsResult<T> = Result<T, OpsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_error_keeps_source() {
        let err = OpsError::InputFile {
            path: PathBuf::from("in.png"),
            source: IoError::EmptyFile("in.png".into()),
        };
        assert_eq!(err.to_string(), "cannot read input 'in.png'");
        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("file is empty: in.png"));
    }

    #[test]
    fn core_error_becomes_size_mismatch() {
        let err: OpsError = c2g_core::Error::dimension_mismatch((2, 2), (3, 3)).into();
        assert!(matches!(err, OpsError::SizeMismatch(_)));
    }
}
