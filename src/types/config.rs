use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};

/// Default width of one column in pixels
pub const DEFAULT_COLUMN_WIDTH: f32 = 110.0;
/// Default height of one row in pixels
pub const DEFAULT_ROW_HEIGHT: f32 = 30.0;
/// Default width of the row label strip
pub const DEFAULT_LEFT_WIDTH: f32 = 90.0;
/// Default height of the column header strip
pub const DEFAULT_TOP_HEIGHT: f32 = 40.0;
/// Default gap left between neighbouring cells
pub const DEFAULT_CELL_MARGIN: f32 = 1.0;
/// Default indentation per lane
pub const DEFAULT_ADJACENT_STEP: f32 = 10.0;

/// Widget configuration.
///
/// Every field has a default, so a partial JSON object (or `{}`) is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScheduleConfig {
    pub column_width: f32,
    pub row_height: f32,
    /// Width of the row label strip (not user-resizable)
    pub left_width: f32,
    /// Height of the column header strip (not user-resizable)
    pub top_height: f32,
    pub cell_margin: f32,
    /// Horizontal indentation per lane, in pixels
    pub adjacent_step: f32,
    /// Caption shown in the top-left axis label
    pub top_axis_title: String,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            column_width: DEFAULT_COLUMN_WIDTH,
            row_height: DEFAULT_ROW_HEIGHT,
            left_width: DEFAULT_LEFT_WIDTH,
            top_height: DEFAULT_TOP_HEIGHT,
            cell_margin: DEFAULT_CELL_MARGIN,
            adjacent_step: DEFAULT_ADJACENT_STEP,
            top_axis_title: "Tracks".to_string(),
        }
    }
}

impl ScheduleConfig {
    /// Check every numeric field.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        require_positive("columnWidth", self.column_width)?;
        require_positive("rowHeight", self.row_height)?;
        require_non_negative("leftWidth", self.left_width)?;
        require_non_negative("topHeight", self.top_height)?;
        require_non_negative("cellMargin", self.cell_margin)?;
        self.adjacent_step().map(|_| ())
    }

    /// The validated lane step.
    ///
    /// # Errors
    /// Returns `InvalidConfiguration` if `adjacent_step` is negative or not finite.
    pub fn adjacent_step(&self) -> Result<AdjacentStep> {
        AdjacentStep::new(self.adjacent_step)
    }
}

fn require_positive(name: &str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ScheduleError::InvalidConfiguration(format!(
            "{name} must be a positive number, got {value}"
        )))
    }
}

fn require_non_negative(name: &str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ScheduleError::InvalidConfiguration(format!(
            "{name} must be a non-negative number, got {value}"
        )))
    }
}

/// Pixel increment per lane. Always finite and non-negative.
///
/// Zero is allowed: lanes are still computed, every offset becomes 0.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct AdjacentStep(f32);

impl AdjacentStep {
    /// Zero step, for lane-only layouts
    pub const ZERO: AdjacentStep = AdjacentStep(0.0);

    /// # Errors
    /// Returns `InvalidConfiguration` for negative, NaN, or infinite values.
    pub fn new(value: f32) -> Result<Self> {
        require_non_negative("adjacentStep", value)?;
        Ok(Self(value))
    }

    pub fn get(self) -> f32 {
        self.0
    }

    /// Offset for `lanes` lane widths
    pub fn times(self, lanes: u32) -> f32 {
        lanes as f32 * self.0
    }
}

impl Default for AdjacentStep {
    fn default() -> Self {
        Self(DEFAULT_ADJACENT_STEP)
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
    fn test_defaults_match_widget() {
        let config = ScheduleConfig::default();
        assert_eq!(config.column_width, 110.0);
        assert_eq!(config.row_height, 30.0);
        assert_eq!(config.left_width, 90.0);
        assert_eq!(config.top_height, 40.0);
        assert_eq!(config.cell_margin, 1.0);
        assert_eq!(config.adjacent_step, 10.0);
        assert_eq!(config.top_axis_title, "Tracks");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ScheduleConfig =
            serde_json::from_str(r#"{"adjacentStep": 4, "columnWidth": 200}"#).unwrap();
        assert_eq!(config.adjacent_step, 4.0);
        assert_eq!(config.column_width, 200.0);
        assert_eq!(config.row_height, DEFAULT_ROW_HEIGHT);
    }

    #[test]
    fn test_negative_step_rejected() {
        let config = ScheduleConfig {
            adjacent_step: -1.0,
            ..ScheduleConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidConfiguration(_)));
        assert!(err.to_string().contains("adjacentStep"));
    }

    #[test]
    fn test_zero_column_width_rejected() {
        let config = ScheduleConfig {
            column_width: 0.0,
            ..ScheduleConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_step_accepts_zero_rejects_nan() {
        assert_eq!(AdjacentStep::new(0.0).unwrap(), AdjacentStep::ZERO);
        assert!(AdjacentStep::new(f32::NAN).is_err());
        assert!(AdjacentStep::new(f32::INFINITY).is_err());
    }

    #[test]
    fn test_step_times() {
        let step = AdjacentStep::new(2.5).unwrap();
        assert_eq!(step.times(0), 0.0);
        assert_eq!(step.times(4), 10.0);
    }
}
