//! Error types for the visual analysis engine.
//!
//! Every fatal condition aborts the enclosing operation: a missing or
//! undecodable input, a missing output directory, or a failed encode. There is
//! no degraded return value for these cases. Text recognition failures are the
//! one exception and are handled by [`RecognitionUnavailable`], which never
//! leaves the recognizer contract.

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::config::ConfigError;

/// Enum representing the errors that can abort a visual analysis operation.
#[derive(Error, Debug)]
pub enum VisualError {
    /// The input path does not exist.
    #[error("image not found: {}", path.display())]
    ImageNotFound {
        /// The offending path.
        path: PathBuf,
    },

    /// The input exists but could not be decoded as a supported raster format.
    #[error("failed to decode image {}", path.display())]
    ImageDecode {
        /// The offending path.
        path: PathBuf,
        /// The decoder error.
        #[source]
        source: image::ImageError,
    },

    /// The directory for an output artifact does not exist.
    #[error("output directory does not exist for {}", path.display())]
    OutputPath {
        /// The requested output path.
        path: PathBuf,
    },

    /// Writing an output artifact failed after the path was validated.
    #[error("failed to encode image to {}", path.display())]
    ImageEncode {
        /// The requested output path.
        path: PathBuf,
        /// The encoder error.
        #[source]
        source: image::ImageError,
    },

    /// File metadata for an input could not be read.
    #[error("failed to read metadata for {}", path.display())]
    FileMetadata {
        /// The offending path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Baseline and current captures differ in size and resampling is disabled.
    #[error(
        "dimension mismatch: baseline is {}x{}, current is {}x{}",
        baseline.0, baseline.1, current.0, current.1
    )]
    DimensionMismatch {
        /// Baseline (width, height).
        baseline: (u32, u32),
        /// Current (width, height).
        current: (u32, u32),
    },

    /// Error indicating invalid input.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// A message describing the invalid input.
        message: String,
    },

    /// Configuration failed validation or could not be parsed.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl VisualError {
    /// Creates an `ImageNotFound` error for the given path.
    pub fn image_not_found(path: &Path) -> Self {
        Self::ImageNotFound {
            path: path.to_path_buf(),
        }
    }

    /// Creates an `ImageDecode` error for the given path.
    pub fn image_decode(path: &Path, source: image::ImageError) -> Self {
        Self::ImageDecode {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Creates an `OutputPath` error for the given path.
    pub fn output_path(path: &Path) -> Self {
        Self::OutputPath {
            path: path.to_path_buf(),
        }
    }

    /// Creates an `ImageEncode` error for the given path.
    pub fn image_encode(path: &Path, source: image::ImageError) -> Self {
        Self::ImageEncode {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Creates a `FileMetadata` error for the given path.
    pub fn file_metadata(path: &Path, source: std::io::Error) -> Self {
        Self::FileMetadata {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Creates an `InvalidInput` error with the given message.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}

/// Raised by a text recognition backend that could not produce text.
///
/// This error is consumed by [`crate::core::traits::TextRecognizer::recognize`],
/// which maps it to an empty string. It never reaches the caller of a public
/// analysis operation.
#[derive(Error, Debug)]
#[error("text recognition unavailable: {reason}")]
pub struct RecognitionUnavailable {
    /// Why recognition failed.
    pub reason: String,
}

impl RecognitionUnavailable {
    /// Creates a new error with the given reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Result alias used across the crate.
pub type VisualResult<T> = Result<T, VisualError>;
