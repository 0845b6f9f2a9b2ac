//! Layout engine for placing blocks inside their columns.
//!
//! This module handles:
//! - Building the per-row occupancy index of a column
//! - Assigning lanes so overlapping blocks never collide
//! - Turning lanes into left/right indentation for the renderer

mod lanes;
mod occupancy;

pub use lanes::{
    assign_lanes, lay_out_column, lay_out_grid, BlockLayout, ColumnLayout, GridLayout,
    LaneAssignment,
};
pub use occupancy::OccupancyIndex;
