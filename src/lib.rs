//! schedview - schedule grid widget for the web
//!
//! Lays out calendar/Gantt-style schedules and renders them in the browser
//! via WebAssembly:
//! - Row labels on the left, column headers on top
//! - Blocks spanning one or more rows inside a column
//! - Overlapping blocks placed side by side in the fewest possible lanes
//! - Per-lane indentation so every block stays visible
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { Schedule } from 'schedview';
//! await init();
//! const schedule = new Schedule(document.getElementById('schedule'));
//! schedule.set_config({ adjacentStep: 8 });
//! schedule.load({ rowLabels, columns, blocks });
//! schedule.render();
//! ```
//!
//! # Usage (Rust)
//!
//! ```
//! use schedview::layout::lay_out_grid;
//! use schedview::types::{AdjacentStep, Block, Column, Grid};
//!
//! let grid = Grid::with_row_count(4).with_column(
//!     Column::new("hall")
//!         .with_block(Block::new(0, 2))
//!         .with_block(Block::new(1, 1)),
//! );
//! let layout = lay_out_grid(&grid, AdjacentStep::default()).unwrap();
//! assert_eq!(layout.columns[0].max_lane, Some(1));
//! ```

pub mod error;
pub mod types;

// Layout and rendering
pub mod layout;
pub mod render;
pub mod viewer;

use wasm_bindgen::prelude::*;

// Re-export the main widget struct
pub use viewer::Schedule;

pub use error::{Result, ScheduleError};
pub use layout::{assign_lanes, lay_out_column, lay_out_grid, BlockLayout, ColumnLayout, GridLayout};
pub use types::*;

/// Lay out a schedule document given as JSON and return the layout as JSON
///
/// # Arguments
/// * `document` - The schedule document (row labels, columns, blocks)
/// * `adjacent_step` - Indentation per lane in pixels
///
/// # Errors
/// Returns an error if the document is malformed, a block does not fit the
/// grid, or the step is negative.
#[wasm_bindgen]
pub fn layout_json(document: &str, adjacent_step: f32) -> std::result::Result<String, JsValue> {
    let layout = ScheduleDocument::from_json(document)
        .and_then(|document| layout_document(document, adjacent_step))
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    serde_json::to_string(&layout)
        .map_err(|e| JsValue::from_str(&format!("JSON serialization error: {e}")))
}

/// Lay out a schedule document given as a JS object and return a JS object
///
/// This avoids a JSON round trip when the result is used directly in JavaScript.
///
/// # Errors
/// Returns an error if the document is malformed, a block does not fit the
/// grid, or the step is negative.
#[wasm_bindgen]
pub fn layout_to_js(document: JsValue, adjacent_step: f32) -> std::result::Result<JsValue, JsValue> {
    let document = serde_wasm_bindgen::from_value::<ScheduleDocument>(document)
        .map_err(|e| JsValue::from_str(&format!("Invalid document: {e}")))?;
    let layout = layout_document(document, adjacent_step)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    serde_wasm_bindgen::to_value(&layout)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
}

/// Validate and lay out a document in one step.
///
/// # Errors
/// Any document, validation, or configuration error.
pub fn layout_document(document: ScheduleDocument, adjacent_step: f32) -> Result<GridLayout> {
    let step = AdjacentStep::new(adjacent_step)?;
    let grid = document.into_grid()?;
    lay_out_grid(&grid, step)
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
