//! Engine configuration, supplied by the host as JSON.
//!
//! Every field is optional in the JSON form and falls back to the defaults in
//! [`crate::consts`]. Parsed values are validated before use.

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_BRUSH_SIZE, DEFAULT_HISTORY_CAPACITY, HANDLE_SIZE_PX, INSERT_MAX_FRACTION, MAX_BRUSH_SIZE,
    MIN_BRUSH_SIZE, MIN_MEDIA_SIDE_PX,
};
use crate::error::ConfigError;
use crate::raster::Color;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Edge length of corner resize handles.
    pub handle_size: f64,
    /// Smallest side a media item can be resized to.
    pub min_media_side: f64,
    /// Per-axis cap on inserted media, as a fraction of the canvas.
    pub insert_max_fraction: f64,
    /// Maximum undo entries, including the current state.
    pub history_capacity: usize,
    pub min_brush_size: f64,
    pub max_brush_size: f64,
    pub default_brush_size: f64,
    pub default_color: Color,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            handle_size: HANDLE_SIZE_PX,
            min_media_side: MIN_MEDIA_SIDE_PX,
            insert_max_fraction: INSERT_MAX_FRACTION,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            min_brush_size: MIN_BRUSH_SIZE,
            max_brush_size: MAX_BRUSH_SIZE,
            default_brush_size: DEFAULT_BRUSH_SIZE,
            default_color: Color::BLACK,
        }
    }
}

impl CanvasConfig {
    /// Parse and validate a JSON config. An empty string yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or a field-specific
    /// variant when a value is out of range.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_json::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns the first out-of-range field as a [`ConfigError`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.handle_size > 0.0 && self.handle_size.is_finite()) {
            return Err(ConfigError::HandleSize(self.handle_size));
        }
        if !(self.min_media_side > 0.0 && self.min_media_side.is_finite()) {
            return Err(ConfigError::MinMediaSide(self.min_media_side));
        }
        if !(self.insert_max_fraction > 0.0 && self.insert_max_fraction <= 1.0) {
            return Err(ConfigError::InsertFraction(self.insert_max_fraction));
        }
        if self.history_capacity < 2 {
            return Err(ConfigError::HistoryCapacity(self.history_capacity));
        }
        let (min, max) = (self.min_brush_size, self.max_brush_size);
        if !(min > 0.0 && min <= max && max.is_finite()) {
            return Err(ConfigError::BrushRange { min, max });
        }
        Ok(())
    }

    /// Clamp a requested brush size into the configured range. Non-finite
    /// requests fall back to the default size.
    #[must_use]
    pub fn clamp_brush_size(&self, size: f64) -> f64 {
        let size = if size.is_finite() { size } else { self.default_brush_size };
        size.clamp(self.min_brush_size, self.max_brush_size)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
