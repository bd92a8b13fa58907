//! Reconstruction of the output image from the final mapping
//!
//! Writes each original block's final mapped content back at that block's
//! offset on a zero-initialized canvas. Pixels never covered by a full block
//! (trailing partial strips) keep the background value.

use crate::io::configuration::BLOCK_EDGE;
use ndarray::Array3;

/// Rebuild the output image from the final mapping and unique-block store
///
/// Values are clamped to the 0-255 display range and rounded to integer
/// samples as they are written, so averaged colors produced by merging come
/// out display-ready. Mapping entries without a matching store entry are
/// skipped; the engine's invariants keep that from happening in practice.
pub fn reconstruct_image(
    height: usize,
    width: usize,
    origins: &[(usize, usize)],
    store: &[Array3<f32>],
    mapping: &[usize],
) -> Array3<f32> {
    let mut canvas = Array3::zeros((height, width, 3));

    for (&(y, x), &id) in origins.iter().zip(mapping.iter()) {
        let Some(block) = store.get(id) else {
            continue;
        };
        for row in 0..BLOCK_EDGE {
            for col in 0..BLOCK_EDGE {
                for channel in 0..3 {
                    let value = block[(row, col, channel)].clamp(0.0, 255.0).round();
                    if let Some(sample) = canvas.get_mut((y + row, x + col, channel)) {
                        *sample = value;
                    }
                }
            }
        }
    }

    canvas
}
