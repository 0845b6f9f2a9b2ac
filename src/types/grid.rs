use std::collections::HashSet;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};

pub(crate) fn default_true() -> bool {
    true
}

/// One schedule entry, placed into exactly one column.
///
/// Only `start_row` and `span` matter for lane assignment; the remaining
/// fields are carried through for the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// First row occupied
    pub start_row: u32,
    /// Number of consecutive rows occupied (at least 1)
    pub span: u32,
    /// Heading text, shown only for multi-row blocks
    #[serde(default)]
    pub label: String,
    /// Body text
    #[serde(default)]
    pub main: String,
    /// Navigation target when the block is clicked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Disabled blocks are drawn with the `disabled` class
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Invisible blocks still occupy a lane, they are just not drawn
    #[serde(default = "default_true")]
    pub visible: bool,
}

impl Block {
    /// Create a visible, enabled block with no text
    pub fn new(start_row: u32, span: u32) -> Self {
        Self {
            start_row,
            span,
            label: String::new(),
            main: String::new(),
            link: None,
            enabled: true,
            visible: true,
        }
    }

    pub fn with_text(mut self, label: impl Into<String>, main: impl Into<String>) -> Self {
        self.label = label.into();
        self.main = main.into();
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// One past the last occupied row, or `None` on overflow
    pub fn end_row(&self) -> Option<u32> {
        self.start_row.checked_add(self.span)
    }

    /// Rows occupied, as a half-open range (saturating on overflow)
    pub fn rows(&self) -> Range<u32> {
        self.start_row..self.start_row.saturating_add(self.span)
    }

    /// True if the two blocks share at least one row
    pub fn overlaps(&self, other: &Block) -> bool {
        let a = self.rows();
        let b = other.rows();
        a.start < b.end && b.start < a.end
    }
}

/// A column of the schedule: header data plus its blocks in tie-break order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: String,
    #[serde(default)]
    pub label: String,
    /// Header becomes a hyperlink when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Blocks earlier in this list are offered lower lanes first
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl Column {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            link: None,
            blocks: Vec::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn with_block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Check that every block fits inside `[0, row_count)`.
    ///
    /// # Errors
    /// `InvalidConfiguration` for a zero span, `InvalidSpan` for a block that
    /// runs past the last row. The first offending block is reported.
    pub fn validate(&self, row_count: u32) -> Result<()> {
        for (index, block) in self.blocks.iter().enumerate() {
            if block.span == 0 {
                return Err(ScheduleError::InvalidConfiguration(format!(
                    "block {index} in column '{}' has span 0; spans must be at least 1",
                    self.id
                )));
            }
            match block.end_row() {
                Some(end) if end <= row_count => {}
                _ => {
                    return Err(ScheduleError::InvalidSpan {
                        column: self.id.clone(),
                        block: index,
                        start_row: block.start_row,
                        span: block.span,
                        row_count,
                    })
                }
            }
        }
        Ok(())
    }
}

/// The whole schedule: row labels (which fix the row count) and columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grid {
    pub row_labels: Vec<String>,
    pub columns: Vec<Column>,
}

impl Grid {
    pub fn new(row_labels: Vec<String>) -> Self {
        Self {
            row_labels,
            columns: Vec::new(),
        }
    }

    /// A grid with `rows` unlabeled rows
    pub fn with_row_count(rows: u32) -> Self {
        Self::new(vec![String::new(); rows as usize])
    }

    pub fn with_column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    /// Number of rows, saturating at `u32::MAX`
    pub fn row_count(&self) -> u32 {
        u32::try_from(self.row_labels.len()).unwrap_or(u32::MAX)
    }

    /// Validate every column against the row count.
    ///
    /// # Errors
    /// See [`Column::validate`]; duplicate column ids are `InvalidConfiguration`.
    pub fn validate(&self) -> Result<()> {
        let row_count = self.row_count();
        let mut seen = HashSet::with_capacity(self.columns.len());
        for column in &self.columns {
            if !seen.insert(column.id.as_str()) {
                return Err(ScheduleError::InvalidConfiguration(format!(
                    "duplicate column id '{}'",
                    column.id
                )));
            }
            column.validate(row_count)?;
        }
        Ok(())
    }
}

/// Validate a grid before lane assignment.
///
/// # Errors
/// Returns the first span or configuration problem found.
pub fn validate(grid: &Grid) -> Result<()> {
    grid.validate()
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

    #[test]
    fn test_block_rows_and_overlap() {
        let a = Block::new(0, 2);
        let b = Block::new(1, 1);
        let c = Block::new(2, 3);
        assert_eq!(a.rows(), 0..2);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
        assert!(!b.overlaps(&c));
    }

    #[test]
    fn test_block_end_row_overflow() {
        assert_eq!(Block::new(u32::MAX, 1).end_row(), None);
        assert_eq!(Block::new(3, 2).end_row(), Some(5));
    }

    #[test]
    fn test_block_defaults_from_json() {
        let block: Block = serde_json::from_str(r#"{"startRow": 2, "span": 1}"#).unwrap();
        assert!(block.enabled);
        assert!(block.visible);
        assert!(block.link.is_none());
        assert_eq!(block.label, "");
    }

    #[test]
    fn test_validate_accepts_block_ending_on_last_row() {
        let grid = Grid::with_row_count(6).with_column(Column::new("a").with_block(Block::new(3, 3)));
        assert!(grid.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_block_past_last_row() {
        let grid = Grid::with_row_count(6)
            .with_column(Column::new("a").with_block(Block::new(0, 1)))
            .with_column(
                Column::new("b")
                    .with_block(Block::new(0, 1))
                    .with_block(Block::new(4, 3)),
            );
        match validate(&grid) {
            Err(ScheduleError::InvalidSpan {
                column,
                block,
                start_row,
                span,
                row_count,
            }) => {
                assert_eq!(column, "b");
                assert_eq!(block, 1);
                assert_eq!(start_row, 4);
                assert_eq!(span, 3);
                assert_eq!(row_count, 6);
            }
            other => panic!("expected InvalidSpan, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_zero_span() {
        let grid = Grid::with_row_count(4).with_column(Column::new("a").with_block(Block::new(1, 0)));
        assert!(matches!(
            grid.validate(),
            Err(ScheduleError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_validate_rejects_duplicate_column_ids() {
        let grid = Grid::with_row_count(2)
            .with_column(Column::new("a"))
            .with_column(Column::new("a"));
        let err = grid.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate column id 'a'"));
    }

    #[test]
    fn test_empty_grid_rejects_any_block() {
        let grid = Grid::default().with_column(Column::new("a").with_block(Block::new(0, 1)));
        assert!(matches!(
            grid.validate(),
            Err(ScheduleError::InvalidSpan { row_count: 0, .. })
        ));
    }
}
