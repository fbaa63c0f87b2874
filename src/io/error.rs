//! Error types shared by the layout engine, the encoder and the entry points

use std::fmt;
use std::path::PathBuf;

/// Main error type for all stitching, slicing and encoding operations
#[derive(Debug)]
pub enum SpliceError {
    /// Source file is missing, unreadable or not a decodable image
    Decode {
        /// Path to the source file
        path: PathBuf,
        /// Underlying image decoding error
        source: image::ImageError,
    },

    /// Geometry or count parameter rejected before any I/O
    InvalidGeometry {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Nothing to work on after filtering the inputs
    EmptyInput {
        /// Description of what was empty
        reason: String,
    },

    /// Raster codec failed while serializing a buffer
    Encode {
        /// Path the artifact was destined for
        path: PathBuf,
        /// Underlying image encoding error
        source: image::ImageError,
    },

    /// Document writer failed while assembling a PDF
    Pdf {
        /// Path the document was destined for
        path: PathBuf,
        /// Underlying PDF error
        source: lopdf::Error,
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

    /// Process-wide setting was already initialized
    AlreadyConfigured {
        /// Name of the setting
        setting: &'static str,
    },
}

impl fmt::Display for SpliceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decode { path, source } => {
                write!(f, "Failed to decode image '{}': {source}", path.display())
            }
            Self::InvalidGeometry {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid geometry '{parameter}' = '{value}': {reason}")
            }
            Self::EmptyInput { reason } => write!(f, "Nothing to process: {reason}"),
            Self::Encode { path, source } => {
                write!(f, "Failed to encode '{}': {source}", path.display())
            }
            Self::Pdf { path, source } => {
                write!(f, "Failed to write PDF '{}': {source}", path.display())
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
            Self::AlreadyConfigured { setting } => {
                write!(f, "Setting '{setting}' was already initialized")
            }
        }
    }
}

impl std::error::Error for SpliceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Decode { source, .. } | Self::Encode { source, .. } => Some(source),
            Self::Pdf { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for crate results
pub type Result<T> = std::result::Result<T, SpliceError>;

impl From<image::ImageError> for SpliceError {
    fn from(err: image::ImageError) -> Self {
        Self::Encode {
            path: PathBuf::from("<memory>"),
            source: err,
        }
    }
}

impl From<lopdf::Error> for SpliceError {
    fn from(err: lopdf::Error) -> Self {
        Self::Pdf {
            path: PathBuf::from("<memory>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for SpliceError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid geometry error
pub fn invalid_geometry(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> SpliceError {
    SpliceError::InvalidGeometry {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a file system error bound to a path
pub fn file_system(
    path: impl Into<PathBuf>,
    operation: &'static str,
    source: std::io::Error,
) -> SpliceError {
    SpliceError::FileSystem {
        path: path.into(),
        operation,
        source,
    }
}

/// Attach the destination path to encoder errors raised against in-memory buffers
pub trait AtPath<T> {
    /// Replace the placeholder path of an `Encode` or `Pdf` error
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path applied
    fn at_path(self, path: &std::path::Path) -> Result<T>;
}

impl SpliceError {
    /// Replace the path carried by path-bearing variants
    #[must_use]
    pub fn with_path(mut self, target: &std::path::Path) -> Self {
        match &mut self {
            Self::Encode { path, .. } | Self::Pdf { path, .. } | Self::FileSystem { path, .. } => {
                target.clone_into(path);
            }
            _ => {}
        }
        self
    }
}

impl<T> AtPath<T> for Result<T> {
    fn at_path(self, target: &std::path::Path) -> Self {
        self.map_err(|error| error.with_path(target))
    }
}
