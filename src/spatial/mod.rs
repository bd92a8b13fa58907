//! Spatial data structures for block-based images
//!
//! This module contains block-level functionality:
//! - Partitioning an image into fixed-size blocks
//! - Classifying blocks by image region
//! - Deduplicating blocks into a unique-block store
//! - Reconstructing an image from a mapping and store

/// Exact-equality block deduplication
pub mod dedup;
/// Fixed-size block partitioning
pub mod partition;
/// Reconstruction of the output image from the final mapping
pub mod reconstruct;
/// Sacrificial-region classification
pub mod region;

pub use dedup::TileIndex;
pub use partition::Block;
