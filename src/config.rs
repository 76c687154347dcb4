//! Settings for a particle cloud.
//!
//! Settings serialize to JSON so a session's look can be saved and reloaded.
//! Every field has a default, so partial files are fine:
//!
//! ```json
//! { "shape": "ring", "color": "#00ffcc" }
//! ```

use crate::color::Rgb;
use crate::error::ConfigError;
use crate::shape::Shape;
use crate::tracker::TrackerConfig;
use crate::visuals::{VisualConfig, POINT_SIZE_RANGE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Shape scale range offered by the UI.
pub const SCALE_RANGE: (f32, f32) = (0.5, 5.0);

/// Default particle count.
pub const DEFAULT_PARTICLE_COUNT: usize = 50_000;

/// Default base color (violet).
pub const DEFAULT_COLOR: &str = "#d000ff";

/// Complete particle cloud configuration.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub particle_count: usize,
    pub shape: Shape,
    pub scale: f32,
    /// Base color as `#rrggbb`.
    pub color: String,
    pub tracker: TrackerConfig,
    pub visuals: VisualConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            particle_count: DEFAULT_PARTICLE_COUNT,
            shape: Shape::Heart,
            scale: 2.0,
            color: DEFAULT_COLOR.to_string(),
            tracker: TrackerConfig::default(),
            visuals: VisualConfig::default(),
        }
    }
}

impl Settings {
    /// Parse settings from a JSON string and validate them.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load and validate settings from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings as JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let json = self.to_json()?;
        fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("saved settings to {}", path.display());
        Ok(())
    }

    /// Check every field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.particle_count == 0 {
            return Err(ConfigError::ZeroParticles);
        }
        Self::clamp_scale(self.scale)?;
        self.base_color()?;
        self.tracker.validate()?;

        let size = self.visuals.point_size;
        if !(POINT_SIZE_RANGE.0..=POINT_SIZE_RANGE.1).contains(&size) {
            return Err(ConfigError::InvalidPointSize(size));
        }
        Ok(())
    }

    /// Parsed base color.
    pub fn base_color(&self) -> Result<Rgb, ConfigError> {
        Ok(Rgb::from_hex(&self.color)?)
    }

    /// Clamp a scale into [`SCALE_RANGE`]; reject non-positive or
    /// non-finite values.
    pub fn clamp_scale(scale: f32) -> Result<f32, ConfigError> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(ConfigError::InvalidScale(scale));
        }
        Ok(scale.clamp(SCALE_RANGE.0, SCALE_RANGE.1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visuals::BlendMode;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        settings.validate().unwrap();
        assert_eq!(settings.particle_count, 50_000);
        assert_eq!(settings.shape, Shape::Heart);
        assert_eq!(settings.scale, 2.0);
        assert_eq!(settings.visuals.blend_mode, BlendMode::Additive);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r##"{ "shape": "土星", "color": "#00ffcc" }"##).unwrap();
        assert_eq!(settings.shape, Shape::Ring);
        assert_eq!(settings.color, "#00ffcc");
        assert_eq!(settings.particle_count, DEFAULT_PARTICLE_COUNT);
        assert_eq!(settings.tracker, TrackerConfig::default());
    }

    #[test]
    fn test_unknown_shape_defaults() {
        let settings = Settings::from_json(r#"{ "shape": "flower" }"#).unwrap();
        assert_eq!(settings.shape, Shape::Heart);
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            particle_count: 1234,
            shape: Shape::Ring,
            scale: 3.5,
            ..Default::default()
        };
        let back = Settings::from_json(&settings.to_json().unwrap()).unwrap();
        assert_eq!(back, settings);
    }

    #[test]
    fn test_validation_errors() {
        let zero = Settings {
            particle_count: 0,
            ..Default::default()
        };
        assert!(matches!(zero.validate(), Err(ConfigError::ZeroParticles)));

        let bad_scale = Settings {
            scale: -2.0,
            ..Default::default()
        };
        assert!(matches!(bad_scale.validate(), Err(ConfigError::InvalidScale(_))));

        let bad_color = Settings {
            color: "purple".into(),
            ..Default::default()
        };
        assert!(matches!(bad_color.validate(), Err(ConfigError::Color(_))));

        let mut bad_size = Settings::default();
        bad_size.visuals.point_size = 2.0;
        assert!(matches!(bad_size.validate(), Err(ConfigError::InvalidPointSize(_))));

        let mut bad_tracker = Settings::default();
        bad_tracker.tracker.decay = 2.0;
        assert!(matches!(bad_tracker.validate(), Err(ConfigError::InvalidTracker { .. })));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(Settings::from_json("{ nope"), Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_clamp_scale() {
        assert_eq!(Settings::clamp_scale(0.1).unwrap(), 0.5);
        assert_eq!(Settings::clamp_scale(9.0).unwrap(), 5.0);
        assert_eq!(Settings::clamp_scale(2.5).unwrap(), 2.5);
        assert!(Settings::clamp_scale(f32::NAN).is_err());
    }
}
