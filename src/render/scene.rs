//! Renderer-ready description of a laid-out schedule.
//!
//! A [`Scene`] holds every element the widget draws, already positioned,
//! classed and filled with text. Building it needs no browser, so the DOM
//! widget only has to copy it into elements.

use serde::{Deserialize, Serialize};

use super::geometry::{block_rect, column_header_rect, row_header_rect, schedule_size, Rect};
use crate::error::{Result, ScheduleError};
use crate::layout::{lay_out_grid, GridLayout};
use crate::types::{Grid, ScheduleConfig};

/// CSS class names used by the widget's stylesheet
pub mod classes {
    pub const HEADER_LEFT: &str = "schedule_headerleft";
    pub const HEADER_TOP: &str = "schedule_headertop";
    pub const TOP_AXIS_LABEL: &str = "schedule_topaxislabel";
    pub const GRID: &str = "schedule_grid";
    pub const LEFT_HEADER_CELL: &str = "schedule_leftheadercell";
    pub const TOP_HEADER_CELL: &str = "schedule_topheadercell";
    pub const GRID_CELL: &str = "schedule_gridcell";
    pub const LABEL: &str = "label";
    pub const MAIN: &str = "main";
    pub const DISABLED: &str = "disabled";
    pub const HOVER: &str = "hover";
}

/// Row label in the left strip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowHeader {
    pub row: u32,
    pub text: String,
    pub rect: Rect,
}

/// Column header in the top strip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnHeader {
    pub id: String,
    pub text: String,
    /// Rendered as an anchor when present
    pub link: Option<String>,
    pub rect: Rect,
}

/// One drawn block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockElement {
    pub column_id: String,
    /// Position of the block within its column
    pub block: usize,
    pub lane: u32,
    pub rect: Rect,
    /// Text of the upper `label` div
    pub label_text: String,
    /// Text of the lower `main` div (empty for single-row blocks)
    pub main_text: String,
    pub link: Option<String>,
    pub disabled: bool,
}

impl BlockElement {
    pub fn class_name(&self) -> String {
        if self.disabled {
            format!("{} {}", classes::GRID_CELL, classes::DISABLED)
        } else {
            classes::GRID_CELL.to_string()
        }
    }
}

/// Everything the widget draws
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub width: f32,
    pub height: f32,
    /// Left strip width; the grid starts at this x
    pub left_width: f32,
    /// Top strip height; the grid starts at this y
    pub top_height: f32,
    pub top_axis_title: String,
    pub row_headers: Vec<RowHeader>,
    pub column_headers: Vec<ColumnHeader>,
    pub blocks: Vec<BlockElement>,
}

/// Combine a grid with its layout into a scene.
///
/// Invisible blocks are left out; they still took part in lane assignment.
///
/// # Errors
/// `InvalidConfiguration` if `config` is invalid or `layout` was not
/// computed for `grid`.
pub fn build_scene(grid: &Grid, layout: &GridLayout, config: &ScheduleConfig) -> Result<Scene> {
    config.validate()?;
    if layout.columns.len() != grid.columns.len() {
        return Err(mismatch(format!(
            "grid has {} columns, layout has {}",
            grid.columns.len(),
            layout.columns.len()
        )));
    }

    let (width, height) = schedule_size(config, grid.row_count(), grid.columns.len());

    let row_headers = (0..grid.row_count())
        .zip(&grid.row_labels)
        .map(|(row, label)| RowHeader {
            row,
            text: label.clone(),
            rect: row_header_rect(config, row),
        })
        .collect();

    let column_headers = grid
        .columns
        .iter()
        .enumerate()
        .map(|(index, column)| ColumnHeader {
            id: column.id.clone(),
            text: column.label.clone(),
            link: column.link.clone(),
            rect: column_header_rect(config, index),
        })
        .collect();

    let mut blocks = Vec::new();
    for (index, (column, column_layout)) in grid.columns.iter().zip(&layout.columns).enumerate() {
        if column.id != column_layout.column_id || column.blocks.len() != column_layout.blocks.len() {
            return Err(mismatch(format!(
                "layout for column '{}' does not match the grid",
                column.id
            )));
        }
        for (position, (block, block_layout)) in
            column.blocks.iter().zip(&column_layout.blocks).enumerate()
        {
            if !block.visible {
                continue;
            }
            let (label_text, main_text) = if block.span > 1 {
                (block.label.clone(), block.main.clone())
            } else {
                (block.main.clone(), String::new())
            };
            blocks.push(BlockElement {
                column_id: column.id.clone(),
                block: position,
                lane: block_layout.lane,
                rect: block_rect(config, index, block, block_layout),
                label_text,
                main_text,
                link: block.link.clone(),
                disabled: !block.enabled,
            });
        }
    }

    Ok(Scene {
        width,
        height,
        left_width: config.left_width,
        top_height: config.top_height,
        top_axis_title: config.top_axis_title.clone(),
        row_headers,
        column_headers,
        blocks,
    })
}

/// Lay out `grid` with the configured step and build its scene.
///
/// # Errors
/// Any configuration or validation error.
pub fn render_scene(grid: &Grid, config: &ScheduleConfig) -> Result<Scene> {
    let layout = lay_out_grid(grid, config.adjacent_step()?)?;
    build_scene(grid, &layout, config)
}

fn mismatch(message: String) -> ScheduleError {
    ScheduleError::InvalidConfiguration(message)
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
    use crate::types::{Block, Column};

    fn grid() -> Grid {
        let mut hidden = Block::new(0, 1).with_text("", "hidden");
        hidden.visible = false;
        let mut off = Block::new(2, 1).with_text("", "off");
        off.enabled = false;
        Grid::new(vec!["9".into(), "10".into(), "11".into()])
            .with_column(
                Column::new("a")
                    .with_label("Track A")
                    .with_link("/a")
                    .with_block(Block::new(0, 2).with_text("Keynote", "Opening").with_link("/k"))
                    .with_block(hidden)
                    .with_block(off),
            )
            .with_column(Column::new("b").with_block(Block::new(1, 1).with_text("ignored", "Lunch")))
    }

    #[test]
    fn test_scene_headers() {
        let scene = render_scene(&grid(), &ScheduleConfig::default()).unwrap();
        assert_eq!(scene.width, 90.0 + 2.0 * 110.0);
        assert_eq!(scene.height, 40.0 + 3.0 * 30.0);
        assert_eq!(scene.top_axis_title, "Tracks");
        assert_eq!(scene.row_headers.len(), 3);
        assert_eq!(scene.row_headers[1].text, "10");
        assert_eq!(scene.row_headers[1].rect.y, 30.0);
        assert_eq!(scene.column_headers[0].text, "Track A");
        assert_eq!(scene.column_headers[0].link.as_deref(), Some("/a"));
        assert_eq!(scene.column_headers[1].rect.x, 110.0);
    }

    #[test]
    fn test_invisible_block_keeps_its_lane_but_is_not_drawn() {
        let scene = render_scene(&grid(), &ScheduleConfig::default()).unwrap();
        let in_a: Vec<&BlockElement> = scene.blocks.iter().filter(|b| b.column_id == "a").collect();
        assert_eq!(in_a.len(), 2);
        assert_eq!(in_a[0].block, 0);
        assert_eq!(in_a[1].block, 2);
        // The hidden block still pushed the keynote's right edge in.
        assert_eq!(in_a[0].rect.width, 110.0 - 1.0 - 10.0);
    }

    #[test]
    fn test_block_text_depends_on_span() {
        let scene = render_scene(&grid(), &ScheduleConfig::default()).unwrap();
        let keynote = &scene.blocks[0];
        assert_eq!(keynote.label_text, "Keynote");
        assert_eq!(keynote.main_text, "Opening");
        assert_eq!(keynote.link.as_deref(), Some("/k"));

        let lunch = scene.blocks.iter().find(|b| b.column_id == "b").unwrap();
        assert_eq!(lunch.label_text, "Lunch");
        assert_eq!(lunch.main_text, "");
        assert_eq!(lunch.rect.x, 110.0);
        assert_eq!(lunch.rect.y, 30.0);
    }

    #[test]
    fn test_disabled_class() {
        let scene = render_scene(&grid(), &ScheduleConfig::default()).unwrap();
        let off = scene.blocks.iter().find(|b| b.label_text == "off").unwrap();
        assert!(off.disabled);
        assert_eq!(off.class_name(), "schedule_gridcell disabled");
        assert_eq!(scene.blocks[0].class_name(), "schedule_gridcell");
    }

    #[test]
    fn test_layout_must_match_grid() {
        let grid = grid();
        let other = Grid::with_row_count(3).with_column(Column::new("a"));
        let layout = lay_out_grid(&other, Default::default()).unwrap();
        assert!(build_scene(&grid, &layout, &ScheduleConfig::default()).is_err());
    }
}
