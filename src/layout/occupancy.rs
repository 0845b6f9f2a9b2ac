//! Per-row occupancy index for one column.
//!
//! Slot `i` lists the indices of the blocks active at row `i`, in the
//! column's block order. Each column builds its own index; nothing is shared
//! between columns. Slots stop at the last row any block reaches, since no
//! row past it can be active.

use crate::error::Result;
use crate::types::Column;

/// Who is active at each row of a single column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyIndex {
    row_count: u32,
    rows: Vec<Vec<usize>>,
}

impl OccupancyIndex {
    /// Build the index for `column` in a grid of `row_count` rows.
    ///
    /// # Errors
    /// The column is validated first, so a block running past the last row
    /// is reported as `InvalidSpan` instead of growing the index.
    pub fn build(column: &Column, row_count: u32) -> Result<Self> {
        column.validate(row_count)?;

        let reach = column
            .blocks
            .iter()
            .filter_map(|block| block.end_row())
            .max()
            .unwrap_or(0);
        let mut rows: Vec<Vec<usize>> = vec![Vec::new(); reach as usize];
        for (index, block) in column.blocks.iter().enumerate() {
            for row in block.rows() {
                if let Some(slot) = rows.get_mut(row as usize) {
                    slot.push(index);
                }
            }
        }
        Ok(Self { row_count, rows })
    }

    /// Rows in the grid the index was built for
    pub fn row_count(&self) -> u32 {
        self.row_count
    }

    /// Blocks active at `row`, in column order (empty past the last row)
    pub fn active_at(&self, row: usize) -> &[usize] {
        self.rows.get(row).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterate the slots from the first row down to the last occupied one
    pub fn rows(&self) -> impl Iterator<Item = &[usize]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Largest number of blocks active at any one row
    pub fn max_depth(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
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
    use crate::error::ScheduleError;
    use crate::types::Block;

    #[test]
    fn test_slots_follow_block_order() {
        let column = Column::new("a")
            .with_block(Block::new(1, 2))
            .with_block(Block::new(0, 3))
            .with_block(Block::new(2, 1));
        let index = OccupancyIndex::build(&column, 4).unwrap();

        assert_eq!(index.row_count(), 4);
        assert_eq!(index.active_at(0), &[1]);
        assert_eq!(index.active_at(1), &[0, 1]);
        assert_eq!(index.active_at(2), &[0, 1, 2]);
        assert!(index.active_at(3).is_empty());
        assert!(index.active_at(99).is_empty());
        assert_eq!(index.max_depth(), 3);
    }

    #[test]
    fn test_out_of_range_block_is_rejected() {
        let column = Column::new("a").with_block(Block::new(4, 3));
        let err = OccupancyIndex::build(&column, 6).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidSpan { block: 0, .. }));
    }

    #[test]
    fn test_empty_column() {
        let index = OccupancyIndex::build(&Column::new("a"), 3).unwrap();
        assert_eq!(index.row_count(), 3);
        assert_eq!(index.max_depth(), 0);
        assert_eq!(index.rows().count(), 0);
    }

    #[test]
    fn test_slots_stop_at_last_occupied_row() {
        let column = Column::new("a")
            .with_block(Block::new(0, 2))
            .with_block(Block::new(1, 2));
        let index = OccupancyIndex::build(&column, u32::MAX).unwrap();

        assert_eq!(index.row_count(), u32::MAX);
        assert_eq!(index.rows().count(), 3);
        assert_eq!(index.active_at(1), &[0, 1]);
        assert!(index.active_at(1_000_000).is_empty());
    }
}
