//! Renderer hints.
//!
//! The particle core never rasterizes anything. These settings travel with
//! the configuration so that whatever renderer consumes the buffers can be
//! set up the way the cloud is meant to look: small additive points with no
//! depth writes, slowly spinning about Y.

use serde::{Deserialize, Serialize};

/// Accepted point size range, in world units.
pub const POINT_SIZE_RANGE: (f32, f32) = (0.01, 0.1);

/// Blend mode for particle rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlendMode {
    /// Standard alpha blending.
    Alpha,

    /// Colors add up; overlapping particles glow. The color buffer is built
    /// for this mode and routinely exceeds 1.0.
    #[default]
    Additive,
}

/// Rendering configuration handed to the external renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualConfig {
    /// Point sprite size.
    pub point_size: f32,
    pub blend_mode: BlendMode,
    /// Whether points write depth. Off, so additive points never occlude
    /// each other.
    pub depth_write: bool,
    /// Model rotation speed about Y, radians per second.
    pub spin_speed: f32,
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            point_size: 0.01,
            blend_mode: BlendMode::Additive,
            depth_write: false,
            spin_speed: 0.05,
        }
    }
}

impl VisualConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn blend_mode(&mut self, mode: BlendMode) -> &mut Self {
        self.blend_mode = mode;
        self
    }

    /// Set the point size, clamped into [`POINT_SIZE_RANGE`].
    pub fn point_size(&mut self, size: f32) -> &mut Self {
        self.point_size = size.clamp(POINT_SIZE_RANGE.0, POINT_SIZE_RANGE.1);
        self
    }

    pub fn spin_speed(&mut self, radians_per_sec: f32) -> &mut Self {
        self.spin_speed = radians_per_sec;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let v = VisualConfig::default();
        assert_eq!(v.blend_mode, BlendMode::Additive);
        assert!(!v.depth_write);
        assert_eq!(v.point_size, 0.01);
    }

    #[test]
    fn test_point_size_clamped() {
        let mut v = VisualConfig::new();
        v.point_size(1.0);
        assert_eq!(v.point_size, POINT_SIZE_RANGE.1);
        v.point_size(0.0);
        assert_eq!(v.point_size, POINT_SIZE_RANGE.0);
    }

    #[test]
    fn test_blend_mode_serde() {
        assert_eq!(serde_json::to_string(&BlendMode::Additive).unwrap(), "\"additive\"");
        let mode: BlendMode = serde_json::from_str("\"alpha\"").unwrap();
        assert_eq!(mode, BlendMode::Alpha);
    }
}
