//! Fixed-size block partitioning
//!
//! Splits an image into an ordered grid of 8x8 blocks, scanning in row-major
//! block order. Trailing pixel rows and columns beyond the last full block
//! are excluded from the produced sequence; they are not tiled, and the
//! reconstructor leaves them at the canvas background value.

use crate::io::configuration::BLOCK_EDGE;
use ndarray::{Array3, s};

/// A fixed-size pixel block with its position in the source image
///
/// Blocks are produced once by partitioning and never change identity; their
/// pixel content is read-only after extraction.
#[derive(Debug, Clone)]
pub struct Block {
    /// Pixel offset (row, col) of the block's top-left corner
    pub origin: (usize, usize),
    /// Owned 8x8x3 pixel content in the 0.0-255.0 range
    pub pixels: Array3<f32>,
}

/// Partition an image into full 8x8 blocks in row-major block order
///
/// Scans the top row of blocks first, left to right within each row, with a
/// stride equal to the block edge. Any trailing strip narrower than a full
/// block is skipped entirely; this truncation is deliberate, documented
/// behavior rather than something to pad around.
pub fn partition_blocks(image: &Array3<f32>) -> Vec<Block> {
    let (height, width, _) = image.dim();

    let block_rows = height / BLOCK_EDGE;
    let block_cols = width / BLOCK_EDGE;

    let mut blocks = Vec::with_capacity(block_rows * block_cols);
    for block_row in 0..block_rows {
        for block_col in 0..block_cols {
            let y = block_row * BLOCK_EDGE;
            let x = block_col * BLOCK_EDGE;
            let pixels = image
                .slice(s![y..y + BLOCK_EDGE, x..x + BLOCK_EDGE, ..])
                .to_owned();
            blocks.push(Block {
                origin: (y, x),
                pixels,
            });
        }
    }

    blocks
}
