//! Population statistics and channel-space distances over pixel blocks

use ndarray::Array3;

/// Population standard deviation over every channel value of a block
///
/// Treats the block as a flat sequence of channel samples (64 pixels times 3
/// channels) and computes the population deviation, not the sample estimate.
/// Accumulates in `f64` to keep the result stable for large blocks.
pub fn population_std_dev(block: &Array3<f32>) -> f64 {
    let count = block.len();
    if count == 0 {
        return 0.0;
    }

    let total: f64 = block.iter().map(|&v| f64::from(v)).sum();
    let mean = total / count as f64;

    let squared_deviation: f64 = block
        .iter()
        .map(|&v| {
            let d = f64::from(v) - mean;
            d * d
        })
        .sum();

    (squared_deviation / count as f64).sqrt()
}

/// Squared Euclidean distance between two blocks over all channel values
///
/// Both blocks must have identical shape; mismatched trailing elements are
/// ignored by the pairwise zip, so callers are expected to compare blocks
/// produced by the same partitioner.
pub fn squared_distance(a: &Array3<f32>, b: &Array3<f32>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| {
            let d = f64::from(x) - f64::from(y);
            d * d
        })
        .sum()
}

/// Squared distance between two RGB colors
pub fn color_squared_distance(a: [f32; 3], b: [f32; 3]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| {
            let d = f64::from(x) - f64::from(y);
            d * d
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    #[test]
    fn test_std_dev_of_uniform_block_is_zero() {
        let block = Array3::from_elem((8, 8, 3), 42.0_f32);
        assert!(population_std_dev(&block).abs() < 1e-12);
    }

    #[test]
    fn test_std_dev_matches_hand_computation() {
        // Two-value block: half 0.0, half 2.0 -> mean 1.0, population std 1.0
        let block = Array3::from_shape_fn((2, 1, 3), |(i, _, _)| if i == 0 { 0.0 } else { 2.0 });
        let std = population_std_dev(&block);
        assert!((std - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_squared_distance_identical_blocks() {
        let block = Array3::from_elem((8, 8, 3), 7.0_f32);
        assert!(squared_distance(&block, &block).abs() < 1e-12);
    }

    #[test]
    fn test_squared_distance_unit_offset() {
        let a = Array3::from_elem((8, 8, 3), 1.0_f32);
        let b = Array3::from_elem((8, 8, 3), 2.0_f32);
        // 192 channel values, each off by one
        assert!((squared_distance(&a, &b) - 192.0).abs() < 1e-9);
    }

    #[test]
    fn test_color_squared_distance() {
        let d = color_squared_distance([0.0, 0.0, 0.0], [3.0, 4.0, 0.0]);
        assert!((d - 25.0).abs() < 1e-12);
    }
}
