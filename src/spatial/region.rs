//! Sacrificial-region classification
//!
//! A configurable top fraction of the image is treated as sacrificial (sky,
//! typically): its tiles are preferentially flattened rather than merged
//! during reduction.

/// Whether a block whose top pixel row is `top_row` lies in the sacrificial
/// region
///
/// The comparison is against the block's top row, not its center or bottom:
/// a block straddling the boundary counts as sacrificial only if it starts
/// above it.
pub const fn is_sacrificial(top_row: usize, image_height: usize, ratio: f64) -> bool {
    (top_row as f64) < (image_height as f64) * ratio
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_ratio_marks_nothing() {
        assert!(!is_sacrificial(0, 64, 0.0));
        assert!(!is_sacrificial(56, 64, 0.0));
    }

    #[test]
    fn test_full_ratio_marks_everything() {
        assert!(is_sacrificial(0, 64, 1.0));
        assert!(is_sacrificial(56, 64, 1.0));
    }

    #[test]
    fn test_boundary_uses_top_row() {
        // Boundary at 64 * 0.5 = 32: row 24 is in, row 32 is out
        assert!(is_sacrificial(24, 64, 0.5));
        assert!(!is_sacrificial(32, 64, 0.5));
    }
}
