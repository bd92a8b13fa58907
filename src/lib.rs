//! Tile-budget reduction for block-based images
//!
//! The system partitions an image into fixed 8x8 pixel blocks, deduplicates
//! them, and then iteratively merges or flattens the least-necessary unique
//! blocks until the unique count fits a hardware tile budget.

#![deny(unsafe_code)]

/// Input/output operations, CLI, and error handling
pub mod io;
/// Statistical helpers for block scoring and matching
pub mod math;
/// Core reduction loop: candidate selection, merging, retirement
pub mod reduction;
/// Block partitioning, deduplication, and image reconstruction
pub mod spatial;

pub use io::error::{ReductionError, Result};
