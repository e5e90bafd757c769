//! Error types for mosaic composition

use std::fmt;
use std::path::{Path, PathBuf};

use crate::analysis::sampling::ColorBox;

/// Main error type for all composition operations
#[derive(Debug)]
pub enum MosaicError {
    /// Failed to decode an image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image decoding error
        source: image::ImageError,
    },

    /// Failed to encode an image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image encoding error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The source image to compose does not exist
    MissingSource {
        /// Path that was expected to hold the source image
        path: PathBuf,
    },

    /// No candidate images were supplied
    EmptyCandidatePool,

    /// A color cache line could not be parsed
    ///
    /// Loading aborts on the first bad line; no partial recovery is attempted.
    MalformedCacheLine {
        /// Cache file being loaded
        path: PathBuf,
        /// One-based line number of the offending record
        line_number: usize,
        /// Raw text of the offending record
        line: String,
    },

    /// Sampling box has zero rows or zero columns
    EmptySampleRegion {
        /// The degenerate box
        color_box: ColorBox,
    },

    /// Configuration parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// No candidate carries a usable color for the requested cell
    ///
    /// Only happens when every candidate failed to decode.
    NoMatchingCandidate {
        /// Source pixel column
        x: u32,
        /// Source pixel row
        y: u32,
    },

    /// A tiling cell lies outside the resized source
    PixelOutOfBounds {
        /// Requested column
        x: u32,
        /// Requested row
        y: u32,
        /// Width of the resized source
        width: u32,
        /// Height of the resized source
        height: u32,
    },
}

impl fmt::Display for MosaicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::MissingSource { path } => {
                write!(f, "Source image '{}' does not exist", path.display())
            }
            Self::EmptyCandidatePool => {
                write!(f, "No candidate images were supplied")
            }
            Self::MalformedCacheLine {
                path,
                line_number,
                line,
            } => {
                write!(
                    f,
                    "Malformed color cache record at {}:{line_number}: '{line}'",
                    path.display()
                )
            }
            Self::EmptySampleRegion { color_box } => {
                write!(f, "Sampling region {color_box} contains no pixels")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::NoMatchingCandidate { x, y } => {
                write!(
                    f,
                    "No candidate image has a usable color for source pixel ({x}, {y})"
                )
            }
            Self::PixelOutOfBounds {
                x,
                y,
                width,
                height,
            } => {
                write!(
                    f,
                    "Source pixel ({x}, {y}) is outside the {width}x{height} resized source"
                )
            }
        }
    }
}

impl std::error::Error for MosaicError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for composition results
pub type Result<T> = std::result::Result<T, MosaicError>;

impl From<image::ImageError> for MosaicError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for MosaicError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> MosaicError {
    MosaicError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Attach a path and operation name to an I/O error
pub fn file_system(
    path: &Path,
    operation: &'static str,
) -> impl FnOnce(std::io::Error) -> MosaicError + use<> {
    let path = path.to_path_buf();
    move |source| MosaicError::FileSystem {
        path,
        operation,
        source,
    }
}
