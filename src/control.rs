//! Single-slot publication of the control scalar.
//!
//! The capture side writes, the render side reads. Only the latest value
//! matters, so there is no queue: an `f32` is stored as its bit pattern in an
//! `AtomicU32`, which makes every load and store whole.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// Last-write-wins cell holding a control scalar in `[0, 1]`.
///
/// Clone the `Arc` to hand one end to the capture thread and keep the other
/// on the render thread.
#[derive(Debug)]
pub struct ControlCell {
    bits: AtomicU32,
}

impl ControlCell {
    pub fn new(value: f32) -> Self {
        Self {
            bits: AtomicU32::new(sanitize(value).to_bits()),
        }
    }

    /// Convenience for the common shared case.
    pub fn shared(value: f32) -> Arc<Self> {
        Arc::new(Self::new(value))
    }

    /// Most recently published value.
    #[inline]
    pub fn load(&self) -> f32 {
        f32::from_bits(self.bits.load(Ordering::Acquire))
    }

    /// Publish a new value, clamped into `[0, 1]`.
    #[inline]
    pub fn store(&self, value: f32) {
        self.bits.store(sanitize(value).to_bits(), Ordering::Release);
    }
}

impl Default for ControlCell {
    fn default() -> Self {
        Self::new(crate::tracker::NEUTRAL)
    }
}

// NaN has no meaningful place in [0, 1]; treat it as fully gathered.
fn sanitize(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
