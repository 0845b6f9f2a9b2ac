//! Structured error types for schedview.
//!
//! Every failure is local to the input: validation, configuration,
//! document decoding, and (in the browser) DOM construction.

/// All errors that can occur while validating, laying out, or rendering a schedule.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    /// A block's row range falls outside `[0, row_count)`.
    #[error(
        "Invalid span: block {block} in column '{column}' starts at row {start_row} \
         with span {span}, but the grid has {row_count} rows"
    )]
    InvalidSpan {
        column: String,
        block: usize,
        start_row: u32,
        span: u32,
        row_count: u32,
    },

    /// A configuration value or block field was rejected at the boundary.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Malformed schedule document.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// DOM construction failed.
    #[error("Render error: {0}")]
    Render(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ScheduleError>;

#[cfg(target_arch = "wasm32")]
impl From<ScheduleError> for wasm_bindgen::JsValue {
    fn from(e: ScheduleError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
