//! Turning lane layouts into drawable geometry.
//!
//! This module provides:
//! - Pixel geometry for headers and blocks
//! - The [`Scene`]: a browser-independent list of positioned elements
//!
//! The DOM widget in `viewer` materialises a scene; everything here is pure.

pub mod geometry;
pub mod scene;

// Re-export commonly used types
pub use geometry::{block_rect, px, schedule_size, Rect};
pub use scene::{build_scene, classes, render_scene, BlockElement, ColumnHeader, RowHeader, Scene};
