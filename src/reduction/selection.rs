//! Removal-candidate and merge-target selection
//!
//! Selection scans are read-only reductions over the active id list. The
//! list is kept in ascending id order, which is the canonical order: every
//! tie-break below resolves to the first extremum encountered in that order.

use crate::math::statistics::{population_std_dev, squared_distance};
use ndarray::Array3;

/// Position in `active` of the noisiest sacrificial block, if any
///
/// Among active ids flagged sacrificial, picks the one whose block has the
/// highest population standard deviation across all channel values. Returns
/// `None` when no active id is sacrificial, which sends the engine down the
/// non-sacrificial branch.
pub fn select_noisiest_sacrificial(
    store: &[Array3<f32>],
    active: &[usize],
    sacrificial: &[bool],
) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;

    for (position, &id) in active.iter().enumerate() {
        if !sacrificial.get(id).copied().unwrap_or(false) {
            continue;
        }
        let Some(block) = store.get(id) else {
            continue;
        };
        let std = population_std_dev(block);
        let replace = best.is_none_or(|(_, best_std)| std > best_std);
        if replace {
            best = Some((position, std));
        }
    }

    best.map(|(position, _)| position)
}

/// Position in `active` of the flattest block
///
/// Picks the active id whose block has the lowest population standard
/// deviation, the most visually redundant tile. Returns `None` only for an
/// empty active list.
pub fn select_flattest(store: &[Array3<f32>], active: &[usize]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;

    for (position, &id) in active.iter().enumerate() {
        let Some(block) = store.get(id) else {
            continue;
        };
        let std = population_std_dev(block);
        let replace = best.is_none_or(|(_, best_std)| std < best_std);
        if replace {
            best = Some((position, std));
        }
    }

    best.map(|(position, _)| position)
}

/// Position in `active` of the keeper closest to the removal candidate
///
/// Computes the squared Euclidean distance between the candidate's current
/// content and every other active block, and picks the minimum. The
/// candidate's own position is excluded. Returns `None` when the candidate
/// is the only active id left, which the engine surfaces as a degenerate
/// reduction fault.
pub fn select_keeper(
    store: &[Array3<f32>],
    active: &[usize],
    candidate_position: usize,
    candidate: &Array3<f32>,
) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;

    for (position, &id) in active.iter().enumerate() {
        if position == candidate_position {
            continue;
        }
        let Some(block) = store.get(id) else {
            continue;
        };
        let distance = squared_distance(candidate, block);
        let replace = best.is_none_or(|(_, best_distance)| distance < best_distance);
        if replace {
            best = Some((position, distance));
        }
    }

    best.map(|(position, _)| position)
}
