//! Input/output operations and error handling

/// Command-line interface and batch file processing
pub mod cli;
/// Defaults and fixed algorithm constants
pub mod configuration;
/// Error types for reduction operations
pub mod error;
/// PNG decode/encode to and from float pixel arrays
pub mod image;
/// Progress tracking for batch runs
pub mod progress;
