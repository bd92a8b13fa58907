//! Core tile-budget reduction loop
//!
//! The engine removes one unique block per iteration, either by flattening a
//! sacrificial block to its dominant color or by redirecting a low-variance
//! block to its nearest neighbour, until the unique count meets the target.

/// Reduction engine state and iteration loop
pub mod engine;
/// Content mutation: dominant-color flattening and palette-snapped merging
pub mod merge;
/// Removal-candidate and merge-target selection
pub mod selection;

pub use engine::{MergeMethod, ReductionConfig, ReductionEngine, ReductionOutcome};

use crate::io::error::{ReductionError, Result};
use crate::spatial::dedup::deduplicate_blocks;
use crate::spatial::partition::partition_blocks;
use crate::spatial::reconstruct::reconstruct_image;
use crate::spatial::region::is_sacrificial;
use ndarray::Array3;

/// Run the full reduction pipeline on a decoded image
///
/// Partitions the image into 8x8 blocks, deduplicates them, reduces the
/// unique set to the configured target, and reconstructs the output image.
/// The progress callback receives `(completed, total)` iteration counts and
/// never affects algorithm state.
///
/// # Errors
///
/// Returns an error if:
/// - The configuration fails validation
/// - The image contains no full block (smaller than the block edge)
/// - An iteration degenerates to an empty merge-target scan
pub fn reduce_image<F: FnMut(usize, usize)>(
    image: &Array3<f32>,
    config: &ReductionConfig,
    progress: F,
) -> Result<(Array3<f32>, ReductionOutcome)> {
    let (height, width, _) = image.dim();

    let blocks = partition_blocks(image);
    if blocks.is_empty() {
        return Err(ReductionError::InvalidSourceData {
            reason: format!("image {width}x{height} contains no full block"),
        });
    }

    let block_flags: Vec<bool> = blocks
        .iter()
        .map(|block| is_sacrificial(block.origin.0, height, config.sacrifice_ratio))
        .collect();

    let index = deduplicate_blocks(&blocks, &block_flags);
    let origins: Vec<(usize, usize)> = blocks.iter().map(|block| block.origin).collect();

    let mut engine = ReductionEngine::new(index, config)?;
    let outcome = engine.run(progress)?;
    let (store, mapping) = engine.into_parts();

    let output = reconstruct_image(height, width, &origins, &store, &mapping);
    Ok((output, outcome))
}
