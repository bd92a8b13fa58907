//! Content mutation: dominant-color flattening and palette-snapped merging

use crate::math::statistics::color_squared_distance;
use ndarray::Array3;
use std::collections::{HashMap, HashSet};

// Bit-exact color key; block contents are u8-derived so NaN cannot occur.
const fn color_key(color: [f32; 3]) -> [u32; 3] {
    [color[0].to_bits(), color[1].to_bits(), color[2].to_bits()]
}

fn pixel_at(block: &Array3<f32>, row: usize, col: usize) -> [f32; 3] {
    [
        block[(row, col, 0)],
        block[(row, col, 1)],
        block[(row, col, 2)],
    ]
}

/// The most frequently occurring exact RGB tuple among a block's pixels
///
/// Frequencies are counted over exact values, not color distances. Ties are
/// broken by first-encountered order in the row-major pixel scan, so the
/// result is deterministic.
pub fn dominant_color(block: &Array3<f32>) -> [f32; 3] {
    let (rows, cols, _) = block.dim();

    let mut counts: HashMap<[u32; 3], usize> = HashMap::new();
    let mut order: Vec<[f32; 3]> = Vec::new();

    for row in 0..rows {
        for col in 0..cols {
            let color = pixel_at(block, row, col);
            let count = counts.entry(color_key(color)).or_insert(0);
            if *count == 0 {
                order.push(color);
            }
            *count += 1;
        }
    }

    let mut best = [0.0, 0.0, 0.0];
    let mut best_count = 0;
    for color in order {
        let count = counts.get(&color_key(color)).copied().unwrap_or(0);
        if count > best_count {
            best_count = count;
            best = color;
        }
    }

    best
}

/// Replace every pixel of a block with its dominant color in place
pub fn flatten_to_dominant(block: &mut Array3<f32>) {
    let color = dominant_color(block);
    let (rows, cols, _) = block.dim();
    for row in 0..rows {
        for col in 0..cols {
            for (channel, &value) in color.iter().enumerate() {
                block[(row, col, channel)] = value;
            }
        }
    }
}

/// Distinct exact colors of a block, in first-occurrence scan order
pub fn distinct_colors(block: &Array3<f32>) -> Vec<[f32; 3]> {
    let (rows, cols, _) = block.dim();

    let mut seen: HashSet<[u32; 3]> = HashSet::new();
    let mut palette = Vec::new();
    for row in 0..rows {
        for col in 0..cols {
            let color = pixel_at(block, row, col);
            if seen.insert(color_key(color)) {
                palette.push(color);
            }
        }
    }

    palette
}

fn nearest_palette_color(palette: &[[f32; 3]], color: [f32; 3]) -> [f32; 3] {
    let mut best = color;
    let mut best_distance = f64::INFINITY;
    for &entry in palette {
        let distance = color_squared_distance(entry, color);
        if distance < best_distance {
            best_distance = distance;
            best = entry;
        }
    }
    best
}

/// Blend the removal candidate into the keeper's stored content in place
///
/// The keeper becomes the elementwise average of keeper and candidate, then
/// every averaged pixel is snapped to the nearest color of the keeper's
/// pre-merge distinct-color set. The merged keeper therefore never contains
/// a color absent from its original palette.
pub fn merge_into_keeper(keeper: &mut Array3<f32>, candidate: &Array3<f32>) {
    let palette = distinct_colors(keeper);
    let (rows, cols, _) = keeper.dim();

    for row in 0..rows {
        for col in 0..cols {
            let averaged = [
                (keeper[(row, col, 0)] + candidate[(row, col, 0)]) / 2.0,
                (keeper[(row, col, 1)] + candidate[(row, col, 1)]) / 2.0,
                (keeper[(row, col, 2)] + candidate[(row, col, 2)]) / 2.0,
            ];
            let snapped = nearest_palette_color(&palette, averaged);
            for (channel, &value) in snapped.iter().enumerate() {
                keeper[(row, col, channel)] = value;
            }
        }
    }
}
