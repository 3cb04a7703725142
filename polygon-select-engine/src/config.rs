//! Selection tool configuration.
//!
//! Every field has a default from the `constants` crate, so an empty JSON
//! object is a valid configuration.

use crate::engine::viewport::HeadingPitchRange;
use crate::error::{Result, SelectionError};
use crate::geometry::coordinates::ZoneDefinition;
use constants::selection::{
    DEFAULT_SAMPLE_STEP_DEGREES, DOUBLE_CLICK_RADIUS_PX, DOUBLE_CLICK_WINDOW_MS, DRAW_LAYER_NAME,
    FRAMING_HEADING_DEGREES, FRAMING_PITCH_DEGREES, FRAMING_RANGE_METERS, MIN_POLYGON_VERTICES,
    MIN_SAMPLE_STEP_DEGREES,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Grid spacing of the feature sampler in degrees.
    pub sample_step_degrees: f64,
    /// Confirmed vertices required to complete a polygon.
    pub min_vertices: usize,
    pub draw_layer_name: String,
    pub double_click_window_ms: u64,
    pub double_click_radius_px: f64,
    pub framing: FramingConfig,
    /// Zone of incoming projected geometry, e.g. `EPSG:32648`. `None` means
    /// geometry already arrives as lon/lat degrees.
    pub source_projection: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FramingConfig {
    pub heading_degrees: f64,
    pub pitch_degrees: f64,
    pub range_meters: f64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            sample_step_degrees: DEFAULT_SAMPLE_STEP_DEGREES,
            min_vertices: MIN_POLYGON_VERTICES,
            draw_layer_name: DRAW_LAYER_NAME.to_string(),
            double_click_window_ms: DOUBLE_CLICK_WINDOW_MS,
            double_click_radius_px: DOUBLE_CLICK_RADIUS_PX,
            framing: FramingConfig::default(),
            source_projection: None,
        }
    }
}

impl Default for FramingConfig {
    fn default() -> Self {
        Self {
            heading_degrees: FRAMING_HEADING_DEGREES,
            pitch_degrees: FRAMING_PITCH_DEGREES,
            range_meters: FRAMING_RANGE_METERS,
        }
    }
}

impl FramingConfig {
    pub fn offset(&self) -> HeadingPitchRange {
        HeadingPitchRange {
            heading: self.heading_degrees,
            pitch: self.pitch_degrees,
            range: self.range_meters,
        }
    }
}

impl SelectionConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.sample_step_degrees.is_finite() && self.sample_step_degrees >= MIN_SAMPLE_STEP_DEGREES) {
            return Err(SelectionError::InvalidConfig(format!(
                "sample_step_degrees must be at least {MIN_SAMPLE_STEP_DEGREES}, got {}",
                self.sample_step_degrees
            )));
        }
        if self.min_vertices < MIN_POLYGON_VERTICES {
            return Err(SelectionError::InvalidConfig(format!(
                "min_vertices must be at least {MIN_POLYGON_VERTICES}, got {}",
                self.min_vertices
            )));
        }
        if self.draw_layer_name.trim().is_empty() {
            return Err(SelectionError::InvalidConfig(
                "draw_layer_name must not be empty".to_string(),
            ));
        }
        if self.double_click_window_ms == 0 {
            return Err(SelectionError::InvalidConfig(
                "double_click_window_ms must be non-zero".to_string(),
            ));
        }
        if !(self.framing.range_meters.is_finite() && self.framing.range_meters > 0.0) {
            return Err(SelectionError::InvalidConfig(format!(
                "framing.range_meters must be positive, got {}",
                self.framing.range_meters
            )));
        }
        self.projection()?;
        Ok(())
    }

    /// Parsed `source_projection`.
    pub fn projection(&self) -> Result<Option<ZoneDefinition>> {
        self.source_projection
            .as_deref()
            .map(ZoneDefinition::parse)
            .transpose()
    }
}
