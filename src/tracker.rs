//! Control signal tracking.
//!
//! Turns hand-tracking frames into the control scalar that drives particle
//! dispersion. Two wrists in view set the scalar directly from their
//! normalized distance; anything less lets it relax toward [`NEUTRAL`].
//!
//! ```ignore
//! let cell = ControlCell::shared(NEUTRAL);
//! let mut tracker = ControlSignalTracker::new().with_cell(Arc::clone(&cell));
//!
//! // capture thread
//! tracker.observe_frame(&frame);
//!
//! // render thread
//! engine.update(time.elapsed(), cell.load());
//! ```

use crate::control::ControlCell;
use crate::error::ConfigError;
use crate::input::HandFrame;
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Resting value of the scalar: halfway between gathered and dispersed.
pub const NEUTRAL: f32 = 0.5;
/// Hand distance that maps to a scalar of 0.
pub const MIN_DIST: f32 = 0.05;
/// Hand distance that maps to a scalar of 1.
pub const MAX_DIST: f32 = 0.6;
/// Fraction of the gap to neutral closed per signal-lost tick.
pub const DECAY: f32 = 0.05;

/// Calibration of the distance → scalar mapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub min_dist: f32,
    pub max_dist: f32,
    pub decay: f32,
    pub neutral: f32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            min_dist: MIN_DIST,
            max_dist: MAX_DIST,
            decay: DECAY,
            neutral: NEUTRAL,
        }
    }
}

impl TrackerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min_dist.is_finite() && self.max_dist.is_finite()) {
            return Err(ConfigError::InvalidTracker {
                reason: "distance bounds must be finite",
            });
        }
        if self.min_dist >= self.max_dist {
            return Err(ConfigError::InvalidTracker {
                reason: "min_dist must be less than max_dist",
            });
        }
        if !(self.decay > 0.0 && self.decay <= 1.0) {
            return Err(ConfigError::InvalidTracker {
                reason: "decay must be in (0, 1]",
            });
        }
        if !(0.0..=1.0).contains(&self.neutral) {
            return Err(ConfigError::InvalidTracker {
                reason: "neutral must be in [0, 1]",
            });
        }
        Ok(())
    }

    /// Map a hand distance onto the unclamped control range.
    #[inline]
    pub fn normalize(&self, distance: f32) -> f32 {
        (distance - self.min_dist) / (self.max_dist - self.min_dist)
    }
}

/// Maintains the control scalar from hand-tracking input.
///
/// The tracker keeps no history: its whole state is the current scalar.
#[derive(Debug)]
pub struct ControlSignalTracker {
    config: TrackerConfig,
    value: f32,
    cell: Option<Arc<ControlCell>>,
}

impl ControlSignalTracker {
    /// Tracker with default calibration, starting at neutral.
    pub fn new() -> Self {
        Self::from_valid(TrackerConfig::default())
    }

    /// Tracker with a custom calibration, starting at its neutral value.
    ///
    /// Rejects calibrations that [`TrackerConfig::validate`] rejects, since a
    /// degenerate distance range would normalize to NaN.
    pub fn with_config(config: TrackerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    /// Caller guarantees `config` has passed validation.
    pub(crate) fn from_valid(config: TrackerConfig) -> Self {
        Self {
            config,
            value: config.neutral,
            cell: None,
        }
    }

    /// Publish every transition to `cell`. The current value is published
    /// immediately.
    pub fn with_cell(mut self, cell: Arc<ControlCell>) -> Self {
        cell.store(self.value);
        self.cell = Some(cell);
        self
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    #[inline]
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Handle one capture frame.
    pub fn observe_frame(&mut self, frame: &HandFrame) -> f32 {
        match frame.wrist_pair() {
            Some((a, b)) => self.observe_pair(a, b),
            None => self.signal_lost(),
        }
    }

    /// Both hands visible: track their wrist distance directly.
    pub fn observe_pair(&mut self, a: Vec2, b: Vec2) -> f32 {
        let distance = a.distance(b);
        if !distance.is_finite() {
            log::trace!("non-finite hand distance, treating as signal lost");
            return self.signal_lost();
        }
        self.apply_raw(self.config.normalize(distance))
    }

    /// Assign an already-normalized value, clamped into `[0, 1]`.
    ///
    /// A non-finite value carries no position and counts as signal lost.
    pub fn apply_raw(&mut self, raw: f32) -> f32 {
        if !raw.is_finite() {
            log::trace!("non-finite control value, treating as signal lost");
            return self.signal_lost();
        }
        let clamped = raw.clamp(0.0, 1.0);
        log::trace!("control observed: raw={:.3} value={:.3}", raw, clamped);
        self.set(clamped)
    }

    /// Fewer than two hands: relax toward neutral by one decay step.
    pub fn signal_lost(&mut self) -> f32 {
        let next = self.value + (self.config.neutral - self.value) * self.config.decay;
        log::trace!("control signal lost: {:.3} -> {:.3}", self.value, next);
        self.set(next)
    }

    /// Snap back to neutral.
    pub fn reset(&mut self) {
        self.set(self.config.neutral);
    }

    fn set(&mut self, value: f32) -> f32 {
        self.value = value;
        if let Some(cell) = &self.cell {
            cell.store(value);
        }
        value
    }
}

impl Default for ControlSignalTracker {
    fn default() -> Self {
        Self::new()
    }
}
