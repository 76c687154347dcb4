//! Simulation builder and render-tick driver.
//!
//! Wires the engine, the frame clock and the shared control cell together.
//! The render loop calls [`Cloud::frame`] once per display refresh; the
//! capture side owns a [`ControlSignalTracker`] obtained from
//! [`Cloud::tracker`], which publishes into the same cell.
//!
//! ```ignore
//! let mut cloud = Simulation::new()
//!     .with_particle_count(50_000)
//!     .with_shape(Shape::Ring)
//!     .with_color("#00ffcc")
//!     .build()?;
//!
//! let mut tracker = cloud.tracker();
//! std::thread::spawn(move || loop {
//!     tracker.observe_frame(&next_capture_frame());
//! });
//!
//! loop {
//!     let frame = cloud.frame();
//!     renderer.draw(frame.positions, frame.colors, frame.spin);
//! }
//! ```

use crate::config::Settings;
use crate::control::ControlCell;
use crate::engine::{dispersion_factor, ParticleStateEngine};
use crate::error::ConfigError;
use crate::input::SettingsChange;
use crate::shape::Shape;
use crate::time::Time;
use crate::tracker::{ControlSignalTracker, TrackerConfig};
use crate::visuals::VisualConfig;
use std::sync::Arc;

/// Builder for a [`Cloud`].
///
/// Use method chaining to configure, then call `.build()`.
#[derive(Debug, Clone, Default)]
pub struct Simulation {
    settings: Settings,
    manual_clock: bool,
}

impl Simulation {
    /// Create a builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a full settings set.
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Set the number of particles.
    pub fn with_particle_count(mut self, count: usize) -> Self {
        self.settings.particle_count = count;
        self
    }

    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.settings.shape = shape;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.settings.scale = scale;
        self
    }

    /// Base color as a hex string, e.g. `"#d000ff"`.
    pub fn with_color(mut self, hex: &str) -> Self {
        self.settings.color = hex.to_string();
        self
    }

    pub fn with_tracker(mut self, config: TrackerConfig) -> Self {
        self.settings.tracker = config;
        self
    }

    /// Configure renderer hints.
    pub fn with_visuals<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(&mut VisualConfig),
    {
        configure(&mut self.settings.visuals);
        self
    }

    /// Drive time only through [`Cloud::time_mut`] and [`Time::advance`].
    pub fn with_manual_clock(mut self) -> Self {
        self.manual_clock = true;
        self
    }

    /// Validate the settings and populate every buffer.
    pub fn build(self) -> Result<Cloud, ConfigError> {
        let engine = ParticleStateEngine::from_settings(&self.settings)?;
        let time = if self.manual_clock {
            Time::manual()
        } else {
            Time::new()
        };
        Ok(Cloud {
            control: ControlCell::shared(self.settings.tracker.neutral),
            tracker_config: self.settings.tracker,
            engine,
            time,
        })
    }
}

/// What a renderer needs for one frame.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    /// Live positions, interleaved `(x, y, z)`.
    pub positions: &'a [f32],
    /// Colors, interleaved `(r, g, b)`, unclamped.
    pub colors: &'a [f32],
    /// Model rotation about Y, radians.
    pub spin: f32,
    /// Control scalar used for this frame.
    pub scalar: f32,
    /// Dilation applied to the rest positions.
    pub dispersion: f32,
    pub elapsed: f32,
    pub index: u64,
}

/// A running particle cloud.
#[derive(Debug)]
pub struct Cloud {
    engine: ParticleStateEngine,
    time: Time,
    control: Arc<ControlCell>,
    /// Validated in `build`.
    tracker_config: TrackerConfig,
}

impl Cloud {
    /// A tracker publishing into this cloud's control cell.
    ///
    /// Meant to be moved to the capture thread. Creating a second tracker
    /// resets the published value to neutral.
    pub fn tracker(&self) -> ControlSignalTracker {
        ControlSignalTracker::from_valid(self.tracker_config).with_cell(Arc::clone(&self.control))
    }

    /// The shared control cell.
    pub fn control(&self) -> Arc<ControlCell> {
        Arc::clone(&self.control)
    }

    /// Run one render tick: read the latest scalar, advance the clock and
    /// spin, recompute every live position.
    pub fn frame(&mut self) -> Frame<'_> {
        let scalar = self.control.load();
        let (elapsed, delta) = self.time.update();
        self.engine.update(elapsed, scalar);
        self.engine.advance_spin(delta);

        Frame {
            positions: self.engine.positions(),
            colors: self.engine.colors(),
            spin: self.engine.spin(),
            scalar,
            dispersion: dispersion_factor(scalar),
            elapsed,
            index: self.time.frame(),
        }
    }

    /// Apply a UI edit between frames.
    pub fn apply(&mut self, change: SettingsChange) {
        self.engine.apply(change);
    }

    #[inline]
    pub fn engine(&self) -> &ParticleStateEngine {
        &self.engine
    }

    #[inline]
    pub fn engine_mut(&mut self) -> &mut ParticleStateEngine {
        &mut self.engine
    }

    #[inline]
    pub fn time(&self) -> &Time {
        &self.time
    }

    #[inline]
    pub fn time_mut(&mut self) -> &mut Time {
        &mut self.time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use glam::Vec2;

    fn small() -> Cloud {
        Simulation::new()
            .with_particle_count(64)
            .with_manual_clock()
            .build()
            .unwrap()
    }

    #[test]
    fn test_build_rejects_invalid() {
        assert!(Simulation::new().with_particle_count(0).build().is_err());
        assert!(Simulation::new().with_color("nope").build().is_err());
        assert!(Simulation::new().with_scale(0.0).build().is_err());

        let collapsed = TrackerConfig {
            min_dist: 0.3,
            max_dist: 0.3,
            ..Default::default()
        };
        assert!(matches!(
            Simulation::new().with_tracker(collapsed).build(),
            Err(ConfigError::InvalidTracker { .. })
        ));
    }

    #[test]
    fn test_builder_applies_settings() {
        let cloud = Simulation::new()
            .with_particle_count(10)
            .with_shape(Shape::Ring)
            .with_scale(1.0)
            .with_color("#ff0000")
            .with_visuals(|v| {
                v.spin_speed(0.5);
            })
            .build()
            .unwrap();
        let engine = cloud.engine();
        assert_eq!(engine.count(), 10);
        assert_eq!(engine.shape(), Shape::Ring);
        assert_eq!(engine.scale(), 1.0);
        assert_eq!(engine.base_color(), Rgb::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_frame_reads_control() {
        let mut cloud = small();
        let mut tracker = cloud.tracker();

        let frame = cloud.frame();
        assert_eq!(frame.scalar, 0.5);
        assert_eq!(frame.dispersion, 1.0);
        assert_eq!(frame.index, 1);

        tracker.observe_pair(Vec2::ZERO, Vec2::ONE);
        let frame = cloud.frame();
        assert_eq!(frame.scalar, 1.0);
        assert_eq!(frame.dispersion, 1.5);
        assert_eq!(frame.positions.len(), 64 * 3);
    }

    #[test]
    fn test_frame_advances_spin() {
        let mut cloud = small();
        cloud.time_mut().advance(2.0);
        let frame = cloud.frame();
        assert_eq!(frame.elapsed, 2.0);
        assert!((frame.spin - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_apply_then_frame() {
        let mut cloud = small();
        cloud.apply(SettingsChange::Shape(Shape::Ring));
        assert_eq!(cloud.engine().positions(), cloud.engine().rest_positions());

        cloud.frame();
        assert_eq!(cloud.engine().shape(), Shape::Ring);
    }
}
