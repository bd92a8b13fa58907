//! Mathematical utilities for block scoring

/// Population statistics and channel-space distances
pub mod statistics;
