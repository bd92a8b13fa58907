//! Exact-equality block deduplication
//!
//! Collapses identical blocks into a unique-block store plus a per-block
//! mapping. Equality is exact value equality across all channel samples; no
//! tolerance or color-distance fuzz is applied. Unique ids are assigned in
//! first-occurrence scan order, and the first occurrence is the class
//! representative, so id order is deterministic for a given input.

use crate::spatial::partition::Block;
use ndarray::Array3;
use std::collections::HashMap;

/// Deduplicated tile state produced from an ordered block sequence
///
/// The store holds one entry per distinct block; entries may be rewritten in
/// place during reduction but the store itself is never resized. The mapping
/// holds one unique id per original block, and the sacrificial flags are
/// fixed once here and never recomputed.
#[derive(Debug, Clone)]
pub struct TileIndex {
    /// One pixel array per unique block, in first-occurrence order
    pub store: Vec<Array3<f32>>,
    /// Unique id currently representing each original block
    pub mapping: Vec<usize>,
    /// True for unique ids with at least one block in the sacrificial region
    pub sacrificial: Vec<bool>,
}

impl TileIndex {
    /// Number of unique blocks discovered at dedup time
    pub fn unique_count(&self) -> usize {
        self.store.len()
    }
}

// Bit-exact hash key. Inputs are u8-derived floats, so bit equality is value
// equality and NaN cannot occur.
fn block_key(pixels: &Array3<f32>) -> Vec<u32> {
    pixels.iter().map(|v| v.to_bits()).collect()
}

/// Deduplicate an ordered block sequence into a [`TileIndex`]
///
/// Two blocks map to the same id iff their contents are exactly equal. The
/// sacrificial flag of a unique id is the logical OR of the per-block flags
/// over every block assigned to it, so a tile shared between the sacrificial
/// region and the rest of the image still counts as sacrificial.
pub fn deduplicate_blocks(blocks: &[Block], block_flags: &[bool]) -> TileIndex {
    let mut ids_by_key: HashMap<Vec<u32>, usize> = HashMap::new();
    let mut store: Vec<Array3<f32>> = Vec::new();
    let mut mapping = Vec::with_capacity(blocks.len());
    let mut sacrificial: Vec<bool> = Vec::new();

    for (index, block) in blocks.iter().enumerate() {
        let key = block_key(&block.pixels);
        let id = match ids_by_key.get(&key) {
            Some(&existing) => existing,
            None => {
                let new_id = store.len();
                ids_by_key.insert(key, new_id);
                store.push(block.pixels.clone());
                sacrificial.push(false);
                new_id
            }
        };

        mapping.push(id);
        if block_flags.get(index).copied().unwrap_or(false) {
            if let Some(flag) = sacrificial.get_mut(id) {
                *flag = true;
            }
        }
    }

    TileIndex {
        store,
        mapping,
        sacrificial,
    }
}
