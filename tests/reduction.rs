//! Validates the reduction loop: candidate selection, sacrificial
//! flattening, merge methods, and the fixed iteration count

use ndarray::Array3;
use tilepress::ReductionError;
use tilepress::reduction::merge::{distinct_colors, dominant_color};
use tilepress::reduction::{
    MergeMethod, ReductionConfig, ReductionEngine, ReductionOutcome, reduce_image,
};
use tilepress::spatial::dedup::deduplicate_blocks;
use tilepress::spatial::partition::partition_blocks;

const fn config(target: usize, sacrifice: bool, ratio: f64, method: MergeMethod) -> ReductionConfig {
    ReductionConfig {
        target_tiles: target,
        sacrifice_enabled: sacrifice,
        sacrifice_ratio: ratio,
        method,
    }
}

// A flat block of one color with a single off-color pixel; std rises with
// the outlier's distance from the base value
fn nearly_flat_block(base: f32, outlier: f32) -> Array3<f32> {
    let mut block = Array3::from_elem((8, 8, 3), base);
    block[(0, 0, 0)] = outlier;
    block
}

// Stacks 8x8 blocks vertically into an (8 * n)x8 image
fn stack_blocks(blocks: &[Array3<f32>]) -> Array3<f32> {
    Array3::from_shape_fn((8 * blocks.len(), 8, 3), |(y, x, c)| {
        blocks
            .get(y / 8)
            .map_or(0.0, |block| block[(y % 8, x, c)])
    })
}

// Scenario: single-block image already at target -> returned unchanged
#[test]
fn test_single_block_within_budget_is_identity() {
    let image = Array3::from_shape_fn((8, 8, 3), |(y, x, c)| (y * 24 + x * 3 + c) as f32);

    let cfg = config(1, true, 0.35, MergeMethod::Substitution);
    let Ok((output, outcome)) = reduce_image(&image, &cfg, |_, _| {}) else {
        unreachable!("reduction failed");
    };

    assert_eq!(
        outcome,
        ReductionOutcome::AlreadyWithinBudget { unique_count: 1 }
    );
    assert_eq!(output, image);
}

// Scenario: full-height sacrificial region, substitution, two blocks down
// to one. The noisier block is flattened to its dominant color and every
// reference is redirected to the untouched keeper.
#[test]
fn test_sacrificial_flatten_and_redirect() {
    let noisy = nearly_flat_block(100.0, 0.0);
    let calm = Array3::from_elem((8, 8, 3), 50.0_f32);
    let image = stack_blocks(&[noisy.clone(), calm.clone()]);

    let blocks = partition_blocks(&image);
    let flags = vec![true; blocks.len()];
    let index = deduplicate_blocks(&blocks, &flags);
    assert_eq!(index.unique_count(), 2);

    let cfg = config(1, true, 1.0, MergeMethod::Substitution);
    let Ok(mut engine) = ReductionEngine::new(index, &cfg) else {
        unreachable!("engine construction failed");
    };
    let Ok(outcome) = engine.run(|_, _| {}) else {
        unreachable!("reduction failed");
    };
    assert_eq!(
        outcome,
        ReductionOutcome::Reduced {
            iterations: 1,
            unique_count: 1
        }
    );

    let (store, mapping) = engine.into_parts();

    // The noisy block (id 0) was flattened in place to its dominant color
    let flattened = store.first().cloned().unwrap_or_default();
    let dominant = dominant_color(&noisy);
    for y in 0..8 {
        for x in 0..8 {
            for (c, &expected) in dominant.iter().enumerate() {
                assert!((flattened[(y, x, c)] - expected).abs() < f32::EPSILON);
            }
        }
    }

    // Both original blocks now resolve to the untouched keeper
    assert_eq!(mapping, vec![1, 1]);
    let keeper = store.get(1).cloned().unwrap_or_default();
    assert_eq!(keeper, calm);
}

// Scenario: merging two near-identical non-sacrificial blocks. Every color
// of the surviving block must come from the keeper's pre-merge palette.
#[test]
fn test_merge_palette_closure() {
    let candidate = Array3::from_elem((8, 8, 3), 80.0_f32);
    let keeper = nearly_flat_block(82.0, 60.0);
    let keeper_palette = distinct_colors(&keeper);

    let image = stack_blocks(&[candidate, keeper]);

    let cfg = config(1, false, 0.0, MergeMethod::Merging);
    let Ok((output, outcome)) = reduce_image(&image, &cfg, |_, _| {}) else {
        unreachable!("reduction failed");
    };
    assert!(matches!(outcome, ReductionOutcome::Reduced { .. }));

    let (height, width, _) = output.dim();
    for y in 0..height {
        for x in 0..width {
            let color = [output[(y, x, 0)], output[(y, x, 1)], output[(y, x, 2)]];
            let in_palette = keeper_palette.iter().any(|&entry| {
                entry
                    .iter()
                    .zip(color.iter())
                    .all(|(&a, &b)| (a.round() - b).abs() < f32::EPSILON)
            });
            assert!(in_palette, "color {color:?} not in keeper palette");
        }
    }
}

// Substitution never alters surviving block content when no sacrificial
// flattening is in play
#[test]
fn test_substitution_leaves_survivors_untouched() {
    let blocks: Vec<Array3<f32>> = (0..4)
        .map(|i| nearly_flat_block(40.0 * i as f32, 40.0 * i as f32 + 10.0 * i as f32))
        .collect();
    let image = stack_blocks(&blocks);

    let partitioned = partition_blocks(&image);
    let flags = vec![false; partitioned.len()];
    let index = deduplicate_blocks(&partitioned, &flags);
    let originals = index.store.clone();

    let cfg = config(2, false, 0.0, MergeMethod::Substitution);
    let Ok(mut engine) = ReductionEngine::new(index, &cfg) else {
        unreachable!("engine construction failed");
    };
    let Ok(_) = engine.run(|_, _| {}) else {
        unreachable!("reduction failed");
    };

    let (store, mapping) = engine.into_parts();
    for &id in &mapping {
        let survivor = store.get(id).cloned().unwrap_or_default();
        let original = originals.get(id).cloned().unwrap_or_default();
        assert_eq!(survivor, original);
    }
}

// The active count drops by exactly one per iteration and the loop runs
// exactly initial_unique - target times
#[test]
fn test_active_count_strictly_decreases() {
    let blocks: Vec<Array3<f32>> = (0..6)
        .map(|i| Array3::from_elem((8, 8, 3), 10.0 * i as f32))
        .collect();
    let image = stack_blocks(&blocks);

    let partitioned = partition_blocks(&image);
    let flags = vec![false; partitioned.len()];
    let index = deduplicate_blocks(&partitioned, &flags);

    let cfg = config(2, false, 0.0, MergeMethod::Substitution);
    let Ok(mut engine) = ReductionEngine::new(index, &cfg) else {
        unreachable!("engine construction failed");
    };

    assert_eq!(engine.iterations_total(), 4);
    let mut expected_active = 6;
    loop {
        let Ok(more) = engine.execute_iteration() else {
            unreachable!("iteration failed");
        };
        expected_active -= 1;
        assert_eq!(engine.active_count(), expected_active);
        if !more {
            break;
        }
    }
    assert_eq!(engine.active_count(), 2);
    assert_eq!(engine.iterations_done(), 4);
}

// Progress reports arrive once per iteration with a monotonic completed
// count and a constant total
#[test]
fn test_progress_reports_are_monotonic() {
    let blocks: Vec<Array3<f32>> = (0..5)
        .map(|i| Array3::from_elem((8, 8, 3), 25.0 * i as f32))
        .collect();
    let image = stack_blocks(&blocks);

    let mut reports = Vec::new();
    let cfg = config(1, false, 0.0, MergeMethod::Substitution);
    let Ok(_) = reduce_image(&image, &cfg, |completed, total| {
        reports.push((completed, total));
    }) else {
        unreachable!("reduction failed");
    };

    assert_eq!(reports.len(), 4);
    for (step, &(completed, total)) in reports.iter().enumerate() {
        assert_eq!(completed, step + 1);
        assert_eq!(total, 4);
    }
}

#[test]
fn test_target_zero_is_rejected() {
    let cfg = config(0, false, 0.0, MergeMethod::Substitution);
    assert!(matches!(
        cfg.validate(),
        Err(ReductionError::InvalidParameter { parameter, .. }) if parameter == "target_tiles"
    ));
}

#[test]
fn test_out_of_range_ratio_is_rejected() {
    let cfg = config(16, true, 1.5, MergeMethod::Substitution);
    assert!(matches!(
        cfg.validate(),
        Err(ReductionError::InvalidParameter { parameter, .. }) if parameter == "sacrifice_ratio"
    ));
}

#[test]
fn test_unrecognized_method_is_rejected() {
    let parsed = "blend".parse::<MergeMethod>();
    assert!(matches!(
        parsed,
        Err(ReductionError::InvalidParameter { parameter, .. }) if parameter == "method"
    ));
}

// An image with no full block cannot be tiled at all
#[test]
fn test_undersized_image_is_invalid_source() {
    let image = Array3::zeros((4, 4, 3));
    let cfg = config(1, false, 0.0, MergeMethod::Substitution);
    let result = reduce_image(&image, &cfg, |_, _| {});
    assert!(matches!(
        result,
        Err(ReductionError::InvalidSourceData { .. })
    ));
}
