//! Data types for the schedule widget.

mod config;
mod document;
mod grid;

pub use config::*;
pub use document::*;
pub use grid::*;
