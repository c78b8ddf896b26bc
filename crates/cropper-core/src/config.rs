use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_MAX_SCALE, DEFAULT_MIN_SCALE, DEFAULT_PAN_SENSITIVITY, DEFAULT_PINCH_DEADZONE_PX,
    DEFAULT_ZOOM_INCREMENT, INITIAL_SCALE,
};
use crate::error::{CropperError, Result};
use crate::io::ExportFormat;
use crate::raster::Sampling;

/// How the zoom bounds are chosen when a new image is assigned.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundsPolicy {
    /// `viewport.width / image.width` and its reciprocal, ordered.
    Derived,
    /// The configured `min_scale` / `max_scale`.
    #[default]
    Fixed,
}

impl fmt::Display for BoundsPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Derived => write!(f, "Derived from image"),
            Self::Fixed => write!(f, "Fixed"),
        }
    }
}

/// Widget configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CropperConfig {
    #[serde(default)]
    pub bounds_policy: BoundsPolicy,
    /// Lower scale bound, used by [`BoundsPolicy::Fixed`].
    #[serde(default = "default_min_scale")]
    pub min_scale: f64,
    /// Upper scale bound, used by [`BoundsPolicy::Fixed`].
    #[serde(default = "default_max_scale")]
    pub max_scale: f64,
    #[serde(default = "default_zoom_increment")]
    pub zoom_increment: f64,
    #[serde(default = "default_pan_sensitivity")]
    pub pan_sensitivity: f64,
    #[serde(default = "default_pinch_deadzone_px")]
    pub pinch_deadzone_px: f64,
    #[serde(default)]
    pub sampling: Sampling,
    #[serde(default)]
    pub export_format: ExportFormat,
}

fn default_min_scale() -> f64 {
    DEFAULT_MIN_SCALE
}
fn default_max_scale() -> f64 {
    DEFAULT_MAX_SCALE
}
fn default_zoom_increment() -> f64 {
    DEFAULT_ZOOM_INCREMENT
}
fn default_pan_sensitivity() -> f64 {
    DEFAULT_PAN_SENSITIVITY
}
fn default_pinch_deadzone_px() -> f64 {
    DEFAULT_PINCH_DEADZONE_PX
}

impl Default for CropperConfig {
    fn default() -> Self {
        Self {
            bounds_policy: BoundsPolicy::default(),
            min_scale: DEFAULT_MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
            zoom_increment: DEFAULT_ZOOM_INCREMENT,
            pan_sensitivity: DEFAULT_PAN_SENSITIVITY,
            pinch_deadzone_px: DEFAULT_PINCH_DEADZONE_PX,
            sampling: Sampling::default(),
            export_format: ExportFormat::default(),
        }
    }
}

impl CropperConfig {
    /// Check that the numeric options describe a usable widget.
    pub fn validate(&self) -> Result<()> {
        if !(self.zoom_increment.is_finite() && self.zoom_increment > 0.0) {
            return Err(CropperError::InvalidConfig(format!(
                "zoom_increment must be > 0 (got {})",
                self.zoom_increment
            )));
        }
        if !(self.pan_sensitivity.is_finite() && self.pan_sensitivity > 0.0) {
            return Err(CropperError::InvalidConfig(format!(
                "pan_sensitivity must be > 0 (got {})",
                self.pan_sensitivity
            )));
        }
        if !(self.pinch_deadzone_px.is_finite() && self.pinch_deadzone_px >= 0.0) {
            return Err(CropperError::InvalidConfig(format!(
                "pinch_deadzone_px must be >= 0 (got {})",
                self.pinch_deadzone_px
            )));
        }

        if self.bounds_policy == BoundsPolicy::Fixed {
            if !(self.min_scale.is_finite() && self.max_scale.is_finite())
                || self.min_scale <= 0.0
                || self.min_scale > self.max_scale
            {
                return Err(CropperError::InvalidConfig(format!(
                    "fixed scale bounds must satisfy 0 < min <= max (got [{}, {}])",
                    self.min_scale, self.max_scale
                )));
            }
            // Every image starts at the initial scale, so it must be reachable.
            if !(self.min_scale..=self.max_scale).contains(&INITIAL_SCALE) {
                return Err(CropperError::InvalidConfig(format!(
                    "fixed scale bounds [{}, {}] must include {INITIAL_SCALE}",
                    self.min_scale, self.max_scale
                )));
            }
        }

        Ok(())
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Read and validate a TOML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }
}
