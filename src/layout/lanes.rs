//! Lane assignment for overlapping blocks.
//!
//! Within a column, blocks whose row ranges intersect must sit side by side.
//! Each block gets a lane (0 = leftmost) and the column reports its highest
//! lane. Rows are scanned top to bottom and every block is coloured at its
//! start row with the lowest lane not held by another block active there.
//! That is greedy interval colouring in start order, so the lane count equals
//! the largest number of blocks active at a single row, which is optimal.
//!
//! Ties at the same start row go to the block that comes first in the
//! column. Callers wanting another tie-break sort the blocks beforehand.

use serde::{Deserialize, Serialize};

use super::occupancy::OccupancyIndex;
use crate::error::{Result, ScheduleError};
use crate::types::{AdjacentStep, Column, Grid};

/// Lanes for one column, in block order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaneAssignment {
    lanes: Vec<u32>,
    max_lane: Option<u32>,
}

impl LaneAssignment {
    /// Lane of each block, indexed like the column's blocks
    pub fn lanes(&self) -> &[u32] {
        &self.lanes
    }

    /// Highest lane used; `None` for an empty column
    pub fn max_lane(&self) -> Option<u32> {
        self.max_lane
    }

    /// Number of lanes the column needs
    pub fn lane_count(&self) -> u32 {
        self.max_lane.map_or(0, |max| max.saturating_add(1))
    }

    /// Indentation for every block: `lane` steps from the left,
    /// `max_lane - lane` steps from the right.
    pub fn offsets(&self, step: AdjacentStep) -> Vec<BlockLayout> {
        let max_lane = self.max_lane.unwrap_or(0);
        self.lanes
            .iter()
            .map(|&lane| BlockLayout {
                lane,
                left_offset: step.times(lane),
                right_offset: step.times(max_lane.saturating_sub(lane)),
            })
            .collect()
    }
}

/// Assign a lane to every block of `column`.
///
/// # Errors
/// Fails with `InvalidSpan` or `InvalidConfiguration` if any block does not
/// fit in `row_count` rows; no lanes are assigned in that case.
pub fn assign_lanes(column: &Column, row_count: u32) -> Result<LaneAssignment> {
    let index = OccupancyIndex::build(column, row_count)?;

    let mut lanes: Vec<Option<u32>> = vec![None; column.blocks.len()];
    let mut max_lane: Option<u32> = None;
    let mut taken: Vec<bool> = Vec::new();

    for (row, active) in index.rows().enumerate() {
        for &block in active {
            if matches!(lanes.get(block), Some(Some(_))) {
                continue;
            }

            // At most `active.len() - 1` other blocks hold a lane here, so a
            // free one always exists below `active.len()`.
            taken.clear();
            taken.resize(active.len(), false);
            for &other in active {
                if let Some(Some(lane)) = lanes.get(other) {
                    if let Some(slot) = taken.get_mut(*lane as usize) {
                        *slot = true;
                    }
                }
            }
            let free = taken.iter().position(|&t| !t).unwrap_or(taken.len());
            let lane = u32::try_from(free).map_err(|_| {
                ScheduleError::InvalidConfiguration(format!(
                    "column '{}' has more overlapping blocks than lanes can index",
                    column.id
                ))
            })?;

            log::trace!(
                "column '{}': block {block} gets lane {lane} at row {row}",
                column.id
            );
            if let Some(slot) = lanes.get_mut(block) {
                *slot = Some(lane);
            }
            max_lane = Some(max_lane.map_or(lane, |max| max.max(lane)));
        }
    }

    let lanes = lanes
        .into_iter()
        .enumerate()
        .map(|(block, lane)| {
            lane.ok_or_else(|| {
                ScheduleError::InvalidConfiguration(format!(
                    "block {block} in column '{}' covers no rows",
                    column.id
                ))
            })
        })
        .collect::<Result<Vec<u32>>>()?;

    Ok(LaneAssignment { lanes, max_lane })
}

/// Layout handed to the renderer for one block
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockLayout {
    pub lane: u32,
    /// Indentation from the column's left edge
    pub left_offset: f32,
    /// Indentation from the column's right edge
    pub right_offset: f32,
}

/// Layout of one column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnLayout {
    pub column_id: String,
    /// Highest lane used; absent for an empty column
    pub max_lane: Option<u32>,
    /// One entry per block, in the column's block order
    pub blocks: Vec<BlockLayout>,
}

impl ColumnLayout {
    pub fn lane_count(&self) -> u32 {
        self.max_lane.map_or(0, |max| max.saturating_add(1))
    }

    pub fn block(&self, index: usize) -> Option<&BlockLayout> {
        self.blocks.get(index)
    }
}

/// Assign lanes and offsets for a single column.
///
/// # Errors
/// See [`assign_lanes`].
pub fn lay_out_column(column: &Column, row_count: u32, step: AdjacentStep) -> Result<ColumnLayout> {
    let assignment = assign_lanes(column, row_count)?;
    log::debug!(
        "column '{}': {} blocks in {} lanes",
        column.id,
        column.blocks.len(),
        assignment.lane_count()
    );
    Ok(ColumnLayout {
        column_id: column.id.clone(),
        max_lane: assignment.max_lane(),
        blocks: assignment.offsets(step),
    })
}

/// Layout of a whole grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridLayout {
    pub row_count: u32,
    pub adjacent_step: f32,
    /// One entry per column, in grid order
    pub columns: Vec<ColumnLayout>,
}

impl GridLayout {
    pub fn column(&self, id: &str) -> Option<&ColumnLayout> {
        self.columns.iter().find(|c| c.column_id == id)
    }
}

/// Validate `grid`, then lay out each column independently.
///
/// Either every column lays out or the first error is returned.
///
/// # Errors
/// Returns the first validation error found in the grid.
pub fn lay_out_grid(grid: &Grid, step: AdjacentStep) -> Result<GridLayout> {
    grid.validate()?;
    let row_count = grid.row_count();
    let columns = grid
        .columns
        .iter()
        .map(|column| lay_out_column(column, row_count, step))
        .collect::<Result<Vec<_>>>()?;
    Ok(GridLayout {
        row_count,
        adjacent_step: step.get(),
        columns,
    })
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::types::Block;

    fn column(blocks: &[(u32, u32)]) -> Column {
        blocks
            .iter()
            .fold(Column::new("c"), |c, &(start, span)| {
                c.with_block(Block::new(start, span))
            })
    }

    #[test]
    fn test_disjoint_blocks_share_lane_zero() {
        let result = assign_lanes(&column(&[(0, 1), (1, 1)]), 2).unwrap();
        assert_eq!(result.lanes(), &[0, 0]);
        assert_eq!(result.max_lane(), Some(0));
        assert_eq!(result.lane_count(), 1);
    }

    #[test]
    fn test_overlap_pushes_later_block_right() {
        let result = assign_lanes(&column(&[(0, 2), (1, 1)]), 2).unwrap();
        assert_eq!(result.lanes(), &[0, 1]);
        assert_eq!(result.max_lane(), Some(1));

        let step = AdjacentStep::new(10.0).unwrap();
        let offsets = result.offsets(step);
        assert_eq!((offsets[0].left_offset, offsets[0].right_offset), (0.0, 10.0));
        assert_eq!((offsets[1].left_offset, offsets[1].right_offset), (10.0, 0.0));
    }

    #[test]
    fn test_identical_ranges() {
        let result = assign_lanes(&column(&[(1, 2), (1, 2)]), 3).unwrap();
        assert_eq!(result.lanes(), &[0, 1]);
        assert_eq!(result.max_lane(), Some(1));
    }

    #[test]
    fn test_freed_lane_is_reused() {
        // Lane 0 frees up at row 2 while lane 1 is still busy.
        let result = assign_lanes(&column(&[(0, 2), (1, 3), (2, 2)]), 5).unwrap();
        assert_eq!(result.lanes(), &[0, 1, 0]);
        assert_eq!(result.max_lane(), Some(1));
    }

    #[test]
    fn test_insertion_order_breaks_ties_not_length() {
        // The short block comes first, so it keeps lane 0.
        let result = assign_lanes(&column(&[(0, 1), (0, 4)]), 4).unwrap();
        assert_eq!(result.lanes(), &[0, 1]);
    }

    #[test]
    fn test_empty_column() {
        let result = assign_lanes(&Column::new("empty"), 5).unwrap();
        assert!(result.lanes().is_empty());
        assert_eq!(result.max_lane(), None);
        assert_eq!(result.lane_count(), 0);
        assert!(result.offsets(AdjacentStep::default()).is_empty());
    }

    #[test]
    fn test_single_block_spanning_all_rows() {
        let layout = lay_out_column(&column(&[(0, 8)]), 8, AdjacentStep::default()).unwrap();
        assert_eq!(layout.max_lane, Some(0));
        assert_eq!(
            layout.blocks,
            vec![BlockLayout {
                lane: 0,
                left_offset: 0.0,
                right_offset: 0.0
            }]
        );
    }

    #[test]
    fn test_zero_step_keeps_lanes() {
        let layout = lay_out_column(&column(&[(0, 3), (1, 1), (2, 1)]), 3, AdjacentStep::ZERO).unwrap();
        let lanes: Vec<u32> = layout.blocks.iter().map(|b| b.lane).collect();
        assert_eq!(lanes, vec![0, 1, 1]);
        assert!(layout
            .blocks
            .iter()
            .all(|b| b.left_offset == 0.0 && b.right_offset == 0.0));
    }

    #[test]
    fn test_out_of_range_assigns_nothing() {
        let err = assign_lanes(&column(&[(0, 1), (4, 3)]), 6).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidSpan { block: 1, .. }));
    }

    #[test]
    fn test_huge_grid_small_column() {
        let assignment = assign_lanes(&column(&[(0, 3), (2, 1)]), u32::MAX).unwrap();
        assert_eq!(assignment.lanes(), &[0, 1]);
        assert_eq!(assignment.max_lane(), Some(1));
    }

    #[test]
    fn test_grid_layout_keeps_columns_independent() {
        let grid = Grid::with_row_count(4)
            .with_column(Column::new("a").with_block(Block::new(0, 4)).with_block(Block::new(0, 4)))
            .with_column(Column::new("b").with_block(Block::new(0, 4)));
        let layout = lay_out_grid(&grid, AdjacentStep::default()).unwrap();
        assert_eq!(layout.row_count, 4);
        assert_eq!(layout.adjacent_step, 10.0);
        assert_eq!(layout.column("a").unwrap().max_lane, Some(1));
        assert_eq!(layout.column("b").unwrap().max_lane, Some(0));
        assert!(layout.column("missing").is_none());
    }

    #[test]
    fn test_grid_layout_fails_as_a_whole() {
        let grid = Grid::with_row_count(2)
            .with_column(Column::new("ok").with_block(Block::new(0, 1)))
            .with_column(Column::new("bad").with_block(Block::new(1, 2)));
        assert!(lay_out_grid(&grid, AdjacentStep::default()).is_err());
    }
}
