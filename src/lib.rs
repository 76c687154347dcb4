//! # morphcloud
//!
//! Particle state engine for a gesture-driven point cloud.
//!
//! A cloud of tens of thousands of points rests in a parametric shape (a
//! heart, or a ring with a core) and breathes between gathered and dispersed
//! as two tracked hands move apart or together. This crate owns the state:
//! rest positions, per-frame live positions, per-particle colors, and the
//! control scalar derived from hand landmarks. Rendering, camera capture and
//! UI widgets live outside and talk to it through plain buffers and events.
//!
//! ## Quick Start
//!
//! ```ignore
//! use morphcloud::prelude::*;
//!
//! let mut cloud = Simulation::new()
//!     .with_particle_count(50_000)
//!     .with_shape(Shape::Heart)
//!     .with_scale(2.0)
//!     .with_color("#d000ff")
//!     .build()?;
//!
//! // Capture side: one call per camera frame.
//! let mut tracker = cloud.tracker();
//! tracker.observe_frame(&HandFrame::from_wrists(left_wrist, right_wrist));
//!
//! // Render side: one call per display refresh.
//! let frame = cloud.frame();
//! upload(frame.positions, frame.colors);
//! ```
//!
//! ## Core Concepts
//!
//! ### Control scalar
//!
//! A single value in `[0, 1]`. With both hands visible it follows the wrist
//! distance directly; with fewer it relaxes toward 0.5 by 5% per capture
//! frame. It is published through a [`ControlCell`] so the capture and render
//! loops can run on different threads.
//!
//! ### Live positions
//!
//! Recomputed in full each frame from the rest positions:
//!
//! | Axis | Formula |
//! |------|---------|
//! | x | `rest.x * (0.5 + s) + sin(t/2 + i) * 0.01` |
//! | y | `rest.y * (0.5 + s) + cos(t/2 + i) * 0.01` |
//! | z | `rest.z * (0.5 + s)` |
//!
//! ### Settings changes
//!
//! Shape and scale changes regenerate the rest layout and show it at once;
//! color changes only touch the color buffer. See [`SettingsChange`].

pub mod color;
pub mod config;
pub mod control;
pub mod engine;
pub mod error;
pub mod input;
pub mod shape;
mod simulation;
mod spawn;
pub mod time;
pub mod tracker;
pub mod visuals;

pub use bytemuck;
pub use color::Rgb;
pub use config::Settings;
pub use control::ControlCell;
pub use engine::ParticleStateEngine;
pub use error::{ColorError, ConfigError};
pub use glam::{Vec2, Vec3};
pub use input::{Hand, HandFrame, SettingsChange};
pub use shape::Shape;
pub use simulation::{Cloud, Frame, Simulation};
pub use spawn::SpawnContext;
pub use time::Time;
pub use tracker::{ControlSignalTracker, TrackerConfig};
pub use visuals::{BlendMode, VisualConfig};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use morphcloud::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::Rgb;
    pub use crate::config::Settings;
    pub use crate::control::ControlCell;
    pub use crate::engine::ParticleStateEngine;
    pub use crate::input::{Hand, HandFrame, SettingsChange};
    pub use crate::shape::Shape;
    pub use crate::simulation::{Cloud, Frame, Simulation};
    pub use crate::time::Time;
    pub use crate::tracker::{ControlSignalTracker, TrackerConfig};
    pub use crate::visuals::{BlendMode, VisualConfig};
    pub use crate::{Vec2, Vec3};
}
