//! Defaults and fixed algorithm constants

/// Edge length in pixels of the square blocks the image is tiled into
pub const BLOCK_EDGE: usize = 8;

// Default values for configurable parameters, matching common tile-based
// hardware budgets
/// Default target unique-tile count
pub const DEFAULT_TILE_TARGET: usize = 192;

/// Default top fraction of the image treated as sacrificial
pub const DEFAULT_SACRIFICE_RATIO: f64 = 0.35;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_reduced";
