//! Reduction engine state and iteration loop
//!
//! The engine owns the unique-block store, the block mapping, the frozen
//! sacrificial flags, and the active id list. Each iteration retires exactly
//! one unique id: its mapping entries are redirected to a keeper and the id
//! never becomes a mapping target again. State is consistent at every
//! iteration boundary, so a caller wanting to abort does so between
//! iterations.

use crate::io::error::{ReductionError, Result, invalid_parameter};
use crate::reduction::merge::{flatten_to_dominant, merge_into_keeper};
use crate::reduction::selection::{select_flattest, select_keeper, select_noisiest_sacrificial};
use crate::spatial::dedup::TileIndex;
use ndarray::Array3;
use std::str::FromStr;

/// How a removed tile's pixel content is handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeMethod {
    /// Redirect references to the keeper without blending pixel content
    Substitution,
    /// Blend the removed tile into the keeper, snapped to the keeper's
    /// pre-merge palette
    Merging,
}

impl FromStr for MergeMethod {
    type Err = ReductionError;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "substitution" => Ok(Self::Substitution),
            "merging" => Ok(Self::Merging),
            other => Err(invalid_parameter(
                "method",
                &other,
                &"expected 'substitution' or 'merging'",
            )),
        }
    }
}

/// Immutable configuration for one reduction run
///
/// Validated once before the engine mutates anything; the engine never reads
/// live caller state mid-computation.
#[derive(Debug, Clone, Copy)]
pub struct ReductionConfig {
    /// Target unique-tile count the image must fit within
    pub target_tiles: usize,
    /// Whether sacrificial-region tiles are preferentially flattened
    pub sacrifice_enabled: bool,
    /// Top fraction of the image treated as sacrificial, in `[0, 1]`
    pub sacrifice_ratio: f64,
    /// How removed tiles are folded into their keepers
    pub method: MergeMethod,
}

impl ReductionConfig {
    /// Validate the configuration before any engine state exists
    ///
    /// # Errors
    ///
    /// Returns an error if the target is below one or the sacrifice ratio
    /// lies outside `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        if self.target_tiles < 1 {
            return Err(invalid_parameter(
                "target_tiles",
                &self.target_tiles,
                &"target unique-tile count must be at least 1",
            ));
        }
        if !(0.0..=1.0).contains(&self.sacrifice_ratio) {
            return Err(invalid_parameter(
                "sacrifice_ratio",
                &self.sacrifice_ratio,
                &"sacrifice ratio must lie in [0, 1]",
            ));
        }
        Ok(())
    }
}

/// How a reduction run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReductionOutcome {
    /// The unique count already met the budget; nothing was mutated
    AlreadyWithinBudget {
        /// Unique-tile count found at dedup time
        unique_count: usize,
    },
    /// The full iteration count ran and the budget is now met
    Reduced {
        /// Number of retirement iterations executed
        iterations: usize,
        /// Unique-tile count remaining after reduction
        unique_count: usize,
    },
}

/// Stateful reduction engine retiring one unique block per iteration
pub struct ReductionEngine {
    store: Vec<Array3<f32>>,
    mapping: Vec<usize>,
    sacrificial: Vec<bool>,
    // Ascending id order; ids were assigned in first-occurrence scan order,
    // so this is also the canonical tie-break order.
    active: Vec<usize>,
    method: MergeMethod,
    sacrifice_enabled: bool,
    iterations_total: usize,
    iterations_done: usize,
}

impl ReductionEngine {
    /// Create an engine from deduplicated tile state and a configuration
    ///
    /// The iteration count is fixed here as `unique_count - target_tiles`;
    /// a non-positive value means the image is already within budget and
    /// [`ReductionEngine::run`] will report that without mutating anything.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation.
    pub fn new(index: TileIndex, config: &ReductionConfig) -> Result<Self> {
        config.validate()?;

        let unique_count = index.unique_count();
        let iterations_total = unique_count.saturating_sub(config.target_tiles);

        Ok(Self {
            active: (0..unique_count).collect(),
            store: index.store,
            mapping: index.mapping,
            sacrificial: index.sacrificial,
            method: config.method,
            sacrifice_enabled: config.sacrifice_enabled,
            iterations_total,
            iterations_done: 0,
        })
    }

    /// Total iterations this run will execute
    pub const fn iterations_total(&self) -> usize {
        self.iterations_total
    }

    /// Iterations completed so far
    pub const fn iterations_done(&self) -> usize {
        self.iterations_done
    }

    /// Number of unique ids still active
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Execute one retirement iteration
    ///
    /// Returns `true` while further iterations remain. Does nothing once the
    /// fixed iteration count has been reached.
    ///
    /// # Errors
    ///
    /// Returns a degenerate-reduction error if the merge-target scan would
    /// cover an empty set (only one active id left). The guard fires before
    /// any mutation, so store, mapping and active list all stay at the last
    /// consistent iteration boundary.
    pub fn execute_iteration(&mut self) -> Result<bool> {
        if self.iterations_done >= self.iterations_total {
            return Ok(false);
        }

        // Scanning "every other active block" requires at least two ids;
        // anything less is a misconfiguration surfaced as a fault
        if self.active.len() < 2 {
            return Err(ReductionError::DegenerateReduction {
                iteration: self.iterations_done,
                active_count: self.active.len(),
            });
        }

        // Step 1: removal-candidate selection, with sacrificial flattening
        let sacrificial_position = if self.sacrifice_enabled {
            select_noisiest_sacrificial(&self.store, &self.active, &self.sacrificial)
        } else {
            None
        };

        let candidate_position = match sacrificial_position {
            Some(position) => {
                // Flatten before the distance scan so matching sees the
                // post-flatten content
                let id = self.active.get(position).copied().unwrap_or(0);
                if let Some(block) = self.store.get_mut(id) {
                    flatten_to_dominant(block);
                }
                position
            }
            None => select_flattest(&self.store, &self.active).unwrap_or(0),
        };

        let candidate_id = self.active.get(candidate_position).copied().unwrap_or(0);
        let candidate = self
            .store
            .get(candidate_id)
            .cloned()
            .unwrap_or_else(|| Array3::zeros((0, 0, 3)));

        // Step 2: merge-target selection over the other active blocks
        let keeper_position =
            select_keeper(&self.store, &self.active, candidate_position, &candidate).ok_or_else(
                || ReductionError::DegenerateReduction {
                    iteration: self.iterations_done,
                    active_count: self.active.len(),
                },
            )?;
        let keeper_id = self.active.get(keeper_position).copied().unwrap_or(0);

        // Step 3: conditional content merge
        let candidate_is_sacrificial = self.sacrificial.get(candidate_id).copied().unwrap_or(false);
        if self.method == MergeMethod::Merging && !candidate_is_sacrificial {
            if let Some(keeper) = self.store.get_mut(keeper_id) {
                merge_into_keeper(keeper, &candidate);
            }
        }

        // Step 4: batch redirect and retirement
        for entry in &mut self.mapping {
            if *entry == candidate_id {
                *entry = keeper_id;
            }
        }
        if candidate_position < self.active.len() {
            // Order-preserving removal keeps the canonical scan order intact
            self.active.remove(candidate_position);
        }

        self.iterations_done += 1;
        Ok(self.iterations_done < self.iterations_total)
    }

    /// Run every remaining iteration, reporting progress after each
    ///
    /// The callback receives `(completed, total)`; it is purely
    /// informational and never read back.
    ///
    /// # Errors
    ///
    /// Propagates the first iteration failure; state remains consistent at
    /// the boundary of the last completed iteration.
    pub fn run<F: FnMut(usize, usize)>(&mut self, mut progress: F) -> Result<ReductionOutcome> {
        if self.iterations_total == 0 {
            return Ok(ReductionOutcome::AlreadyWithinBudget {
                unique_count: self.active.len(),
            });
        }

        loop {
            let more = self.execute_iteration()?;
            progress(self.iterations_done, self.iterations_total);
            if !more {
                break;
            }
        }

        Ok(ReductionOutcome::Reduced {
            iterations: self.iterations_done,
            unique_count: self.active.len(),
        })
    }

    /// Consume the engine, yielding the final store and mapping
    pub fn into_parts(self) -> (Vec<Array3<f32>>, Vec<usize>) {
        (self.store, self.mapping)
    }
}
