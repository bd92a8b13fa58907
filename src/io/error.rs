//! Error types for reduction operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all reduction operations
#[derive(Debug)]
pub enum ReductionError {
    /// Failed to load source image from filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Source image doesn't meet algorithm requirements
    ///
    /// Raised for images without a single full block, or channel layouts
    /// that cannot be converted to RGB.
    InvalidSourceData {
        /// Description of what's wrong with the source image
        reason: String,
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

    /// An iteration would scan an empty set of merge targets
    ///
    /// Only reachable under a misconfigured target that slipped past
    /// validation; the engine refuses to compute it silently.
    DegenerateReduction {
        /// Iteration at which the scan degenerated
        iteration: usize,
        /// Active unique-id count at that point
        active_count: usize,
    },

    /// Failed to save the reduced image to disk
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
}

impl fmt::Display for ReductionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid source image: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::DegenerateReduction {
                iteration,
                active_count,
            } => {
                write!(
                    f,
                    "Reduction degenerated at iteration {iteration}: {active_count} active tile(s) leave no merge target"
                )
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
        }
    }
}

impl std::error::Error for ReductionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for reduction results
pub type Result<T> = std::result::Result<T, ReductionError>;

impl From<std::io::Error> for ReductionError {
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
) -> ReductionError {
    ReductionError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a generic I/O error for CLI path handling
pub fn io_error(msg: &str) -> ReductionError {
    ReductionError::InvalidParameter {
        parameter: "path",
        value: String::new(),
        reason: msg.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_display() {
        let err = invalid_parameter("target_tiles", &0, &"must be at least 1");
        let message = err.to_string();
        assert!(message.contains("target_tiles"));
        assert!(message.contains('0'));
        assert!(message.contains("at least 1"));
    }

    #[test]
    fn test_degenerate_reduction_display() {
        let err = ReductionError::DegenerateReduction {
            iteration: 7,
            active_count: 1,
        };
        let message = err.to_string();
        assert!(message.contains("iteration 7"));
        assert!(message.contains("1 active"));
    }
}
