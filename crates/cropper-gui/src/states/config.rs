use std::path::Path;

use anyhow::{ensure, Context};
use cropper_core::CropperConfig;
use serde::{Deserialize, Serialize};

const DEFAULT_VIEWPORT: [f64; 2] = [640.0, 480.0];

fn default_viewport() -> [f64; 2] {
    DEFAULT_VIEWPORT
}

/// Everything the host persists: the widget size plus the widget configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Viewport `[width, height]` in pixels.
    #[serde(default = "default_viewport")]
    pub viewport: [f64; 2],
    #[serde(default)]
    pub cropper: CropperConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            viewport: DEFAULT_VIEWPORT,
            cropper: CropperConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        let [w, h] = self.viewport;
        ensure!(
            w.is_finite() && h.is_finite() && w >= 1.0 && h >= 1.0,
            "viewport must be at least 1x1 (got {w}x{h})"
        );
        self.cropper.validate()?;
        Ok(())
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Self =
            toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_sections_use_defaults() {
        let config: AppConfig = toml::from_str("viewport = [320.0, 200.0]\n").unwrap();
        assert_eq!(config.viewport, [320.0, 200.0]);
        assert_eq!(config.cropper, CropperConfig::default());
    }

    #[test]
    fn rejects_empty_viewport() {
        let config = AppConfig {
            viewport: [0.0, 100.0],
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn nested_cropper_table_roundtrips() {
        let text = toml::to_string_pretty(&AppConfig::default()).unwrap();
        assert!(text.contains("[cropper]"), "got: {text}");
        let back: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(back, AppConfig::default());
    }
}
