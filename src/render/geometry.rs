//! Pixel geometry for the schedule grid.

use serde::{Deserialize, Serialize};

use crate::layout::BlockLayout;
use crate::types::{Block, ScheduleConfig};

/// Rectangle in CSS pixels, relative to its parent strip
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Round the way JavaScript's `Math.round` does (halves go up)
pub fn round_half_up(value: f32) -> f32 {
    (value + 0.5).floor()
}

/// Format a length as a CSS pixel value, e.g. `px(29.6) == "30px"`
pub fn px(value: f32) -> String {
    let rounded = round_half_up(value);
    // Avoid "-0px"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{rounded}px")
}

/// Total widget size: header strips plus the grid
pub fn schedule_size(config: &ScheduleConfig, row_count: u32, column_count: usize) -> (f32, f32) {
    (
        config.left_width + column_count as f32 * config.column_width,
        config.top_height + row_count as f32 * config.row_height,
    )
}

/// Row label cell inside the left strip
pub fn row_header_rect(config: &ScheduleConfig, row: u32) -> Rect {
    Rect {
        x: 0.0,
        y: row as f32 * config.row_height,
        width: config.left_width,
        height: config.row_height,
    }
}

/// Column header cell inside the top strip
pub fn column_header_rect(config: &ScheduleConfig, column: usize) -> Rect {
    Rect {
        x: column as f32 * config.column_width,
        y: 0.0,
        width: config.column_width,
        height: config.top_height,
    }
}

/// Block rectangle inside the grid.
///
/// The block is indented by its offsets within the column and shrunk by the
/// cell margin so neighbours stay visually separate. Width and height never
/// go below zero, even when a column is too crowded for its width.
pub fn block_rect(config: &ScheduleConfig, column: usize, block: &Block, layout: &BlockLayout) -> Rect {
    Rect {
        x: config.column_width * column as f32 + layout.left_offset,
        y: config.row_height * block.start_row as f32,
        width: (config.column_width - config.cell_margin - layout.left_offset - layout.right_offset)
            .max(0.0),
        height: (block.span as f32 * config.row_height - config.cell_margin).max(0.0),
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

    #[test]
    fn test_px_rounds_like_javascript() {
        assert_eq!(px(30.0), "30px");
        assert_eq!(px(29.5), "30px");
        assert_eq!(px(29.4), "29px");
        assert_eq!(px(-2.5), "-2px");
        assert_eq!(px(-0.2), "0px");
    }

    #[test]
    fn test_schedule_size() {
        let config = ScheduleConfig::default();
        assert_eq!(schedule_size(&config, 10, 3), (90.0 + 330.0, 40.0 + 300.0));
        assert_eq!(schedule_size(&config, 0, 0), (90.0, 40.0));
    }

    #[test]
    fn test_header_rects() {
        let config = ScheduleConfig::default();
        let row = row_header_rect(&config, 2);
        assert_eq!((row.y, row.height, row.width), (60.0, 30.0, 90.0));
        let col = column_header_rect(&config, 3);
        assert_eq!((col.x, col.width, col.height), (330.0, 110.0, 40.0));
    }

    #[test]
    fn test_block_rect_uses_offsets_and_margin() {
        let config = ScheduleConfig::default();
        let block = Block::new(2, 3);
        let layout = BlockLayout {
            lane: 1,
            left_offset: 10.0,
            right_offset: 20.0,
        };
        let rect = block_rect(&config, 1, &block, &layout);
        assert_eq!(rect.x, 120.0);
        assert_eq!(rect.y, 60.0);
        assert_eq!(rect.width, 110.0 - 1.0 - 10.0 - 20.0);
        assert_eq!(rect.height, 89.0);
    }

    #[test]
    fn test_block_rect_never_negative() {
        let config = ScheduleConfig::default();
        let layout = BlockLayout {
            lane: 12,
            left_offset: 120.0,
            right_offset: 0.0,
        };
        let rect = block_rect(&config, 0, &Block::new(0, 1), &layout);
        assert_eq!(rect.width, 0.0);
    }
}
