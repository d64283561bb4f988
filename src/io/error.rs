//! Error types for synthesis operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all synthesis operations
#[derive(Debug)]
pub enum SynthesisError {
    /// Failed to load the sample image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save the generated image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
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

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Sample data doesn't meet synthesis requirements
    InvalidSourceData {
        /// Description of what's wrong with the sample
        reason: String,
    },

    /// Every collapse attempt ended in contradiction
    ContradictionLimit {
        /// Number of attempts made
        attempts: usize,
    },
}

impl fmt::Display for SynthesisError {
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
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid sample: {reason}")
            }
            Self::ContradictionLimit { attempts } => {
                write!(
                    f,
                    "All {attempts} collapse attempts ended in contradiction"
                )
            }
        }
    }
}

impl std::error::Error for SynthesisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for synthesis results
pub type Result<T> = std::result::Result<T, SynthesisError>;

impl From<image::ImageError> for SynthesisError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for SynthesisError {
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
) -> SynthesisError {
    SynthesisError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_error_display() {
        let err = invalid_parameter("window", &0, &"must be at least 1");
        assert_eq!(
            err.to_string(),
            "Invalid parameter 'window' = '0': must be at least 1"
        );
    }

    #[test]
    fn test_contradiction_limit_display() {
        let err = SynthesisError::ContradictionLimit { attempts: 3 };
        assert!(err.to_string().contains("3 collapse attempts"));
    }
}
