//! Lane assignment tests for schedview
//!
//! Scenario tests for small columns plus property checks (no collisions,
//! minimal lane count, determinism, offset symmetry) over generated columns.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic,
    clippy::cast_possible_truncation,
    clippy::cast_lossless
)]

mod common;

use common::{column, max_active, Lcg};
use schedview::layout::{assign_lanes, lay_out_column, lay_out_grid};
use schedview::types::{AdjacentStep, Block, Column, Grid};
use schedview::ScheduleError;
use test_case::test_case;

// =============================================================================
// SCENARIOS
// =============================================================================

#[test_case(2, &[(0, 1), (1, 1)], &[0, 0], 0 ; "disjoint neighbours")]
#[test_case(2, &[(0, 2), (1, 1)], &[0, 1], 1 ; "overlap at second row")]
#[test_case(3, &[(2, 1), (0, 3), (1, 2)], &[2, 0, 1], 2 ; "three blocks share row two")]
#[test_case(6, &[(0, 1), (5, 1)], &[0, 0], 0 ; "far apart")]
#[test_case(4, &[(0, 4)], &[0], 0 ; "one block spans everything")]
#[test_case(3, &[(1, 2), (1, 2)], &[0, 1], 1 ; "identical ranges")]
#[test_case(6, &[(0, 3), (0, 1), (1, 1), (3, 3)], &[0, 1, 1, 0], 1 ; "short blocks stack beside a long one")]
fn test_scenario(rows: u32, blocks: &[(u32, u32)], lanes: &[u32], max_lane: u32) {
    let result = assign_lanes(&column(blocks), rows).unwrap();
    assert_eq!(result.lanes(), lanes);
    assert_eq!(result.max_lane(), Some(max_lane));
}

#[test]
fn test_three_mutually_overlapping_in_insertion_order() {
    // All three are active at row 2; A, B and C are offered lanes in list order.
    let grid = Grid::with_row_count(4).with_column(
        Column::new("track")
            .with_block(Block::new(0, 3).with_text("A", ""))
            .with_block(Block::new(1, 2).with_text("B", ""))
            .with_block(Block::new(2, 1).with_text("C", "")),
    );
    let layout = lay_out_grid(&grid, AdjacentStep::default()).unwrap();
    let column = &layout.columns[0];
    let lanes: Vec<u32> = column.blocks.iter().map(|b| b.lane).collect();
    assert_eq!(lanes, vec![0, 1, 2]);
    assert_eq!(column.max_lane, Some(2));
    assert_eq!(column.lane_count(), 3);
}

#[test]
fn test_offsets_with_step_ten() {
    let layout = lay_out_column(
        &column(&[(0, 2), (1, 1)]),
        2,
        AdjacentStep::new(10.0).unwrap(),
    )
    .unwrap();
    let a = layout.block(0).unwrap();
    let b = layout.block(1).unwrap();
    assert_eq!((a.left_offset, a.right_offset), (0.0, 10.0));
    assert_eq!((b.left_offset, b.right_offset), (10.0, 0.0));
}

#[test]
fn test_span_past_last_row_is_rejected() {
    let grid = Grid::with_row_count(6).with_column(column(&[(0, 1), (4, 3)]));
    match lay_out_grid(&grid, AdjacentStep::default()) {
        Err(ScheduleError::InvalidSpan {
            column,
            block,
            row_count,
            ..
        }) => {
            assert_eq!(column, "c");
            assert_eq!(block, 1);
            assert_eq!(row_count, 6);
        }
        other => panic!("expected InvalidSpan, got {other:?}"),
    }
}

#[test]
fn test_negative_step_is_rejected() {
    assert!(matches!(
        AdjacentStep::new(-0.5),
        Err(ScheduleError::InvalidConfiguration(_))
    ));
}

#[test]
fn test_empty_column_has_no_max_lane() {
    let grid = Grid::with_row_count(3).with_column(Column::new("empty"));
    let layout = lay_out_grid(&grid, AdjacentStep::default()).unwrap();
    assert_eq!(layout.columns[0].max_lane, None);
    assert!(layout.columns[0].blocks.is_empty());
}

// =============================================================================
// PROPERTIES
// =============================================================================

#[test]
fn test_no_two_overlapping_blocks_share_a_lane() {
    let mut rng = Lcg::new(7);
    for _ in 0..200 {
        let col = rng.column(24, 12, 6);
        let result = assign_lanes(&col, 24).unwrap();
        for (i, a) in col.blocks.iter().enumerate() {
            for (j, b) in col.blocks.iter().enumerate().skip(i + 1) {
                if a.overlaps(b) {
                    assert_ne!(
                        result.lanes()[i],
                        result.lanes()[j],
                        "blocks {i} and {j} overlap but share a lane in {col:?}"
                    );
                }
            }
        }
    }
}

#[test]
fn test_lane_count_equals_busiest_row() {
    let mut rng = Lcg::new(42);
    for round in 0..200 {
        let rows = 1 + rng.below(30);
        let col = rng.column(rows, 1 + round % 15, 8);
        let result = assign_lanes(&col, rows).unwrap();
        assert_eq!(result.lane_count(), max_active(&col, rows), "column {col:?}");
        let max = result.max_lane().unwrap();
        assert!(result.lanes().iter().all(|&lane| lane <= max));
    }
}

#[test]
fn test_assignment_is_deterministic() {
    let mut rng = Lcg::new(3);
    let col = rng.column(40, 25, 10);
    let first = assign_lanes(&col, 40).unwrap();
    let second = assign_lanes(&col, 40).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_offsets_are_symmetric() {
    let mut rng = Lcg::new(11);
    let step = AdjacentStep::new(7.5).unwrap();
    for _ in 0..50 {
        let col = rng.column(16, 10, 5);
        let layout = lay_out_column(&col, 16, step).unwrap();
        let max_lane = layout.max_lane.unwrap();
        for block in &layout.blocks {
            assert_eq!(block.left_offset, block.lane as f32 * 7.5);
            assert_eq!(
                block.left_offset + block.right_offset,
                max_lane as f32 * 7.5
            );
        }
    }
}

#[test]
fn test_blocks_without_overlap_all_get_lane_zero() {
    let col = column(&[(0, 2), (2, 1), (3, 4), (7, 1)]);
    let result = assign_lanes(&col, 8).unwrap();
    assert!(result.lanes().iter().all(|&lane| lane == 0));
    assert_eq!(result.max_lane(), Some(0));
}
