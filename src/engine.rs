//! The particle state engine.
//!
//! Owns the rest, live and color buffers for one particle set. Every render
//! tick recomputes the whole live buffer from the rest buffer, so live
//! positions never drift:
//!
//! ```text
//! factor = 0.5 + scalar
//! live.x = rest.x * factor + sin(t * 0.5 + i) * 0.01
//! live.y = rest.y * factor + cos(t * 0.5 + i) * 0.01
//! live.z = rest.z * factor
//! ```
//!
//! Shape, scale and color changes regenerate into a scratch buffer that is
//! then swapped in, so a reader only ever sees the old or the new buffer.

use crate::color::{self, Rgb};
use crate::config::Settings;
use crate::error::ConfigError;
use crate::input::SettingsChange;
use crate::shape::{self, Shape};
use crate::spawn::SpawnContext;
use glam::Vec3;
use std::f32::consts::TAU;

/// Dispersion factor at a scalar of 0.
pub const DISPERSION_MIN: f32 = 0.5;
/// Growth of the dispersion factor from scalar 0 to 1.
pub const DISPERSION_SPAN: f32 = 1.0;
/// Amplitude of the idle drift on X and Y.
pub const DRIFT_AMPLITUDE: f32 = 0.01;
/// Angular rate of the idle drift, radians per second.
pub const DRIFT_RATE: f32 = 0.5;

/// Map a control scalar in `[0, 1]` to a dilation factor in `[0.5, 1.5]`.
#[inline]
pub fn dispersion_factor(scalar: f32) -> f32 {
    DISPERSION_MIN + scalar * DISPERSION_SPAN
}

/// Recompute `live` from `rest` for time `t` (seconds) and a dilation factor.
///
/// Both buffers are interleaved `(x, y, z)`; only whole triples present in
/// both are written.
pub fn blend(rest: &[f32], live: &mut [f32], t: f32, factor: f32) {
    let base_phase = t * DRIFT_RATE;
    for (i, (r, l)) in rest
        .chunks_exact(3)
        .zip(live.chunks_exact_mut(3))
        .enumerate()
    {
        // The index offset desynchronizes neighbours; it is cosmetic
        let phase = base_phase + i as f32;
        l[0] = r[0] * factor + phase.sin() * DRIFT_AMPLITUDE;
        l[1] = r[1] * factor + phase.cos() * DRIFT_AMPLITUDE;
        l[2] = r[2] * factor;
    }
}

/// Particle buffers and the state that produces them.
///
/// ```ignore
/// let mut engine = ParticleStateEngine::new(50_000, Shape::Heart, 2.0, Rgb::from_hex("#d000ff")?);
///
/// // Render tick
/// engine.update(time.elapsed(), cell.load());
/// renderer.upload(engine.position_bytes());
///
/// // UI edit
/// engine.apply(SettingsChange::Shape(Shape::Ring));
/// ```
#[derive(Debug, Clone)]
pub struct ParticleStateEngine {
    count: usize,
    shape: Shape,
    scale: f32,
    base_color: Rgb,
    rest: Vec<f32>,
    live: Vec<f32>,
    colors: Vec<f32>,
    /// Regeneration target, swapped with `rest` or `colors`.
    scratch: Vec<f32>,
    spin: f32,
    spin_speed: f32,
}

impl ParticleStateEngine {
    /// Create an engine and populate all buffers.
    pub fn new(count: usize, shape: Shape, scale: f32, base_color: Rgb) -> Self {
        let len = count * 3;
        let mut engine = Self {
            count,
            shape,
            scale,
            base_color,
            rest: vec![0.0; len],
            live: vec![0.0; len],
            colors: vec![0.0; len],
            scratch: vec![0.0; len],
            spin: 0.0,
            spin_speed: 0.0,
        };
        engine.regenerate_positions();
        engine.regenerate_colors();
        engine
    }

    /// Create an engine from validated settings.
    pub fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
        settings.validate()?;
        let mut engine = Self::new(
            settings.particle_count,
            settings.shape,
            Settings::clamp_scale(settings.scale)?,
            settings.base_color()?,
        );
        engine.spin_speed = settings.visuals.spin_speed;
        log::info!(
            "particle engine ready: {} particles, shape={} scale={:.2} color={}",
            engine.count,
            engine.shape,
            engine.scale,
            engine.base_color
        );
        Ok(engine)
    }

    /// Create an engine around an explicit rest buffer.
    ///
    /// A trailing partial triple is dropped. The shape is reported as the
    /// default until the next shape change.
    pub fn from_rest_positions(mut rest: Vec<f32>, base_color: Rgb) -> Self {
        let count = rest.len() / 3;
        rest.truncate(count * 3);
        let mut engine = Self {
            count,
            shape: Shape::default(),
            scale: 1.0,
            base_color,
            live: rest.clone(),
            colors: vec![0.0; count * 3],
            scratch: vec![0.0; count * 3],
            rest,
            spin: 0.0,
            spin_speed: 0.0,
        };
        engine.regenerate_colors();
        engine
    }

    // ========== Per-frame ==========

    /// Recompute every live position for time `t` (seconds) and a control
    /// scalar already clamped into `[0, 1]`.
    pub fn update(&mut self, t: f32, scalar: f32) {
        blend(&self.rest, &mut self.live, t, dispersion_factor(scalar));
    }

    /// Advance the model spin by `delta` seconds.
    pub fn advance_spin(&mut self, delta: f32) {
        self.spin = (self.spin + self.spin_speed * delta).rem_euclid(TAU);
    }

    // ========== Configuration changes ==========

    /// Route a UI edit to the matching setter.
    pub fn apply(&mut self, change: SettingsChange) {
        match change {
            SettingsChange::Shape(shape) => self.set_shape(shape),
            SettingsChange::Color(color) => self.set_color(color),
            SettingsChange::Scale(scale) => self.set_scale(scale),
        }
    }

    /// Switch shape. Always regenerates, even for the current shape.
    pub fn set_shape(&mut self, shape: Shape) {
        log::info!("shape: {} -> {}", self.shape, shape);
        self.shape = shape;
        self.regenerate_positions();
    }

    /// Change the shape scale.
    ///
    /// Non-positive or non-finite scales are ignored. Any other scale is used
    /// as given.
    pub fn set_scale(&mut self, scale: f32) {
        if !(scale.is_finite() && scale > 0.0) {
            log::warn!("ignoring invalid shape scale {}", scale);
            return;
        }
        log::info!("scale: {:.2} -> {:.2}", self.scale, scale);
        self.scale = scale;
        self.regenerate_positions();
    }

    /// Change the base color and reassign every particle color.
    pub fn set_color(&mut self, color: Rgb) {
        log::info!("color: {} -> {}", self.base_color, color);
        self.base_color = color;
        self.regenerate_colors();
    }

    pub fn set_spin_speed(&mut self, radians_per_sec: f32) {
        self.spin_speed = radians_per_sec;
    }

    /// Draw a fresh rest layout and show it immediately, without blending.
    pub fn regenerate_positions(&mut self) {
        let mut ctx = SpawnContext::new();
        shape::generate_with(&mut ctx, self.shape, self.scale, &mut self.scratch);
        std::mem::swap(&mut self.rest, &mut self.scratch);
        self.live.copy_from_slice(&self.rest);
        log::debug!(
            "regenerated {} rest positions (shape={} scale={:.2})",
            self.count,
            self.shape,
            self.scale
        );
    }

    /// Draw fresh per-particle colors from the base color.
    pub fn regenerate_colors(&mut self) {
        let mut ctx = SpawnContext::new();
        color::assign_with(&mut ctx, self.base_color, &mut self.scratch);
        std::mem::swap(&mut self.colors, &mut self.scratch);
        log::debug!("regenerated {} colors from {}", self.count, self.base_color);
    }

    // ========== Read views ==========

    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn shape(&self) -> Shape {
        self.shape
    }

    #[inline]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    #[inline]
    pub fn base_color(&self) -> Rgb {
        self.base_color
    }

    /// Model rotation about Y in radians, in `[0, 2π)`.
    #[inline]
    pub fn spin(&self) -> f32 {
        self.spin
    }

    /// Live positions, interleaved `(x, y, z)`, length `3 * count`.
    #[inline]
    pub fn positions(&self) -> &[f32] {
        &self.live
    }

    /// Rest positions, interleaved `(x, y, z)`, length `3 * count`.
    #[inline]
    pub fn rest_positions(&self) -> &[f32] {
        &self.rest
    }

    /// Particle colors, interleaved `(r, g, b)`, length `3 * count`.
    #[inline]
    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    /// Live positions as raw bytes for GPU upload.
    #[inline]
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.live)
    }

    /// Colors as raw bytes for GPU upload.
    #[inline]
    pub fn color_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.colors)
    }

    /// Live position of particle `i`.
    pub fn position(&self, i: usize) -> Option<Vec3> {
        self.live.get(i * 3..i * 3 + 3).map(Vec3::from_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> ParticleStateEngine {
        ParticleStateEngine::from_rest_positions(
            vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0, -1.0, 0.0, 0.0, 0.0, -1.0, 0.0],
            Rgb::new(1.0, 1.0, 1.0),
        )
    }

    #[test]
    fn test_dispersion_factor() {
        assert_eq!(dispersion_factor(0.0), 0.5);
        assert_eq!(dispersion_factor(0.5), 1.0);
        assert_eq!(dispersion_factor(1.0), 1.5);
    }

    #[test]
    fn test_buffer_lengths() {
        let engine = ParticleStateEngine::new(1000, Shape::Ring, 1.0, Rgb::default());
        assert_eq!(engine.count(), 1000);
        assert_eq!(engine.positions().len(), 3000);
        assert_eq!(engine.rest_positions().len(), 3000);
        assert_eq!(engine.colors().len(), 3000);
        assert_eq!(engine.position_bytes().len(), 3000 * 4);
        assert_eq!(engine.color_bytes().len(), 3000 * 4);
    }

    #[test]
    fn test_update_square() {
        let mut engine = square();
        engine.update(0.0, 1.0);

        let p0 = engine.position(0).unwrap();
        assert_eq!(p0.x, 1.5);
        assert!((p0.y - 0.01).abs() < 1e-7);
        assert_eq!(p0.z, 0.0);

        let p1 = engine.position(1).unwrap();
        assert!((p1.x - 1.0f32.sin() * 0.01).abs() < 1e-7);
        assert!((p1.y - (1.5 + 1.0f32.cos() * 0.01)).abs() < 1e-6);
    }

    #[test]
    fn test_z_has_no_drift() {
        let mut engine = ParticleStateEngine::new(500, Shape::Heart, 2.0, Rgb::default());
        for (t, scalar) in [(0.0, 0.3), (12.5, 1.0), (1000.0, 0.0)] {
            engine.update(t, scalar);
            let factor = dispersion_factor(scalar);
            for (r, l) in engine.rest_positions().chunks_exact(3).zip(engine.positions().chunks_exact(3)) {
                assert_eq!(l[2], r[2] * factor);
            }
        }
    }

    #[test]
    fn test_update_does_not_drift() {
        let mut engine = ParticleStateEngine::new(100, Shape::Heart, 2.0, Rgb::default());
        engine.update(3.0, 0.7);
        let first = engine.positions().to_vec();
        for _ in 0..10 {
            engine.update(8.0, 0.1);
        }
        engine.update(3.0, 0.7);
        assert_eq!(engine.positions(), first.as_slice());
    }

    #[test]
    fn test_shape_change_is_instant() {
        let mut engine = ParticleStateEngine::new(200, Shape::Heart, 2.0, Rgb::default());
        engine.update(5.0, 1.0);
        let before = engine.rest_positions().to_vec();

        engine.set_shape(Shape::Ring);
        assert_eq!(engine.shape(), Shape::Ring);
        assert_ne!(engine.rest_positions(), before.as_slice());
        assert_eq!(engine.positions(), engine.rest_positions());
    }

    #[test]
    fn test_scale_change() {
        let mut engine = ParticleStateEngine::new(200, Shape::Ring, 1.0, Rgb::default());
        engine.update(1.0, 0.0);

        engine.set_scale(3.0);
        assert_eq!(engine.scale(), 3.0);
        assert_eq!(engine.positions(), engine.rest_positions());

        // Outside the settings range but still a valid scale
        engine.set_scale(0.2);
        assert_eq!(engine.scale(), 0.2);
        engine.set_scale(100.0);
        assert_eq!(engine.scale(), 100.0);
        assert_eq!(engine.positions(), engine.rest_positions());
    }

    #[test]
    fn test_invalid_scale_ignored() {
        let mut engine = ParticleStateEngine::new(10, Shape::Heart, 2.0, Rgb::default());
        let rest = engine.rest_positions().to_vec();
        for bad in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            engine.set_scale(bad);
        }
        assert_eq!(engine.scale(), 2.0);
        assert_eq!(engine.rest_positions(), rest.as_slice());
    }

    #[test]
    fn test_color_change_leaves_positions() {
        let mut engine = ParticleStateEngine::new(100, Shape::Heart, 2.0, Rgb::new(1.0, 0.0, 0.0));
        let rest = engine.rest_positions().to_vec();

        engine.apply(SettingsChange::Color(Rgb::new(0.0, 0.0, 1.0)));
        assert_eq!(engine.base_color(), Rgb::new(0.0, 0.0, 1.0));
        assert_eq!(engine.rest_positions(), rest.as_slice());
        for c in engine.colors().chunks_exact(3) {
            // Red channel is jitter only now
            assert!(c[0] <= color::CHANNEL_JITTER * color::INTENSITY_GAIN);
            assert!(c[2] >= 0.6 * color::INTENSITY_GAIN - 1e-6);
        }
    }

    #[test]
    fn test_apply_routes() {
        let mut engine = ParticleStateEngine::new(10, Shape::Heart, 2.0, Rgb::default());
        engine.apply(SettingsChange::Shape(Shape::Ring));
        engine.apply(SettingsChange::Scale(1.5));
        assert_eq!(engine.shape(), Shape::Ring);
        assert_eq!(engine.scale(), 1.5);
    }

    #[test]
    fn test_spin_wraps() {
        let mut engine = square();
        engine.set_spin_speed(1.0);
        engine.advance_spin(1.0);
        assert!((engine.spin() - 1.0).abs() < 1e-6);
        engine.advance_spin(TAU);
        assert!((engine.spin() - 1.0).abs() < 1e-4);
        assert!(engine.spin() < TAU);
    }

    #[test]
    fn test_from_rest_drops_partial_triple() {
        let engine = ParticleStateEngine::from_rest_positions(vec![1.0; 7], Rgb::default());
        assert_eq!(engine.count(), 2);
        assert_eq!(engine.positions().len(), 6);
        assert_eq!(engine.position(2), None);
    }
}
