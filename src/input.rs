//! Inputs from the collaborators around the particle core.
//!
//! Two kinds of events arrive from outside:
//!
//! - [`HandFrame`]: one per capture frame from the hand tracker. Only the
//!   wrist landmark (index [`WRIST`]) of each hand is ever read.
//! - [`SettingsChange`]: discrete UI edits (shape, color, scale).
//!
//! ```ignore
//! let frame = HandFrame::from_wrists(Vec2::new(0.3, 0.5), Vec2::new(0.7, 0.5));
//! tracker.observe_frame(&frame);
//!
//! engine.apply(SettingsChange::Shape(Shape::Ring));
//! ```

use crate::color::Rgb;
use crate::shape::Shape;
use glam::Vec2;

/// Landmark index of the wrist / palm center in a hand landmark set.
pub const WRIST: usize = 0;

/// Landmarks of one detected hand, in normalized screen coordinates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hand {
    pub landmarks: Vec<Vec2>,
}

impl Hand {
    pub fn new(landmarks: Vec<Vec2>) -> Self {
        Self { landmarks }
    }

    /// The wrist landmark, if the set is non-empty.
    #[inline]
    pub fn wrist(&self) -> Option<Vec2> {
        self.landmarks.get(WRIST).copied()
    }
}

/// One capture frame worth of hand-tracking results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HandFrame {
    pub hands: Vec<Hand>,
}

impl HandFrame {
    /// A frame with no hands detected.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(hands: Vec<Hand>) -> Self {
        Self { hands }
    }

    /// A frame with two hands described only by their wrists.
    pub fn from_wrists(a: Vec2, b: Vec2) -> Self {
        Self {
            hands: vec![Hand::new(vec![a]), Hand::new(vec![b])],
        }
    }

    #[inline]
    pub fn hand_count(&self) -> usize {
        self.hands.len()
    }

    /// The two wrist points when exactly two hands, each with a wrist
    /// landmark, are present. Anything else is an insufficient frame.
    pub fn wrist_pair(&self) -> Option<(Vec2, Vec2)> {
        match self.hands.as_slice() {
            [a, b] => Some((a.wrist()?, b.wrist()?)),
            _ => None,
        }
    }
}

/// A configuration edit coming from the UI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettingsChange {
    /// Switch to another shape. Regenerates rest positions.
    Shape(Shape),
    /// New base color. Regenerates the color buffer.
    Color(Rgb),
    /// New shape scale. Regenerates rest positions.
    Scale(f32),
}

impl SettingsChange {
    /// Shape change from a UI identifier; unknown names become the heart.
    pub fn shape_named(name: &str) -> Self {
        SettingsChange::Shape(Shape::from_name(name))
    }
}
