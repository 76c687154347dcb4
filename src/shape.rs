//! Rest-position generation for the selectable parametric shapes.
//!
//! Each shape is a generator function that fills an interleaved `(x, y, z)`
//! buffer. Shapes are looked up through [`GENERATORS`]; a shape without an
//! entry falls back to the heart.
//!
//! ```ignore
//! let positions = morphcloud::shape::generate(Shape::Ring, 2.0, 50_000);
//! assert_eq!(positions.len(), 150_000);
//! ```

use crate::spawn::SpawnContext;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Uniform per-axis jitter giving the heart its volumetric thickness.
pub const HEART_JITTER: f32 = 0.05;
/// Divisor that maps the heart curve (|x| ≤ 16) into roughly unit size.
pub const HEART_NORMALIZE: f32 = 20.0;

/// Probability that a ring particle lands on the annulus rather than the core.
pub const RING_PROBABILITY: f32 = 0.9;
/// Annulus radius range, before scaling.
pub const RING_RADIUS: (f32, f32) = (1.0, 1.8);
/// Thickness jitter of the annulus along Y. Not scaled.
pub const RING_THICKNESS: f32 = 0.05;
/// Half-extent of the core cube, before scaling.
pub const CORE_HALF_EXTENT: f32 = 0.25;

/// Shape identifier.
///
/// Serialized by canonical name. Unknown names resolve to [`Shape::Heart`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Shape {
    /// Parametric heart curve, thickened along Z.
    #[default]
    Heart,
    /// Flat annulus in the XZ plane with a small cubic core.
    Ring,
}

impl Shape {
    /// All shapes, in UI order.
    pub const ALL: [Shape; 2] = [Shape::Heart, Shape::Ring];

    /// Canonical name.
    pub fn name(&self) -> &'static str {
        match self {
            Shape::Heart => "heart",
            Shape::Ring => "ring",
        }
    }

    pub fn variants() -> &'static [&'static str] {
        &["heart", "ring"]
    }

    /// Resolve a shape from a UI identifier.
    ///
    /// Matching is case-insensitive and accepts a few aliases. Anything
    /// unrecognized is the heart.
    pub fn from_name(name: &str) -> Shape {
        match name.trim().to_lowercase().as_str() {
            "heart" | "爱心" => Shape::Heart,
            "ring" | "ring-with-core" | "saturn" | "土星" => Shape::Ring,
            other => {
                log::debug!("unknown shape {:?}, using heart", other);
                Shape::Heart
            }
        }
    }

    /// Generator function for this shape.
    pub fn generator(self) -> GenerateFn {
        GENERATORS
            .iter()
            .find(|(shape, _)| *shape == self)
            .map(|(_, f)| *f)
            .unwrap_or(heart as GenerateFn)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<String> for Shape {
    fn from(name: String) -> Self {
        Shape::from_name(&name)
    }
}

impl From<&str> for Shape {
    fn from(name: &str) -> Self {
        Shape::from_name(name)
    }
}

impl From<Shape> for String {
    fn from(shape: Shape) -> Self {
        shape.name().to_string()
    }
}

/// Fills an interleaved position buffer for `positions.len() / 3` particles.
pub type GenerateFn = fn(&mut SpawnContext, f32, &mut [f32]);

/// Shape → generator lookup table.
pub const GENERATORS: [(Shape, GenerateFn); 2] = [
    (Shape::Heart, heart as GenerateFn),
    (Shape::Ring, ring as GenerateFn),
];

/// Generate `count` rest positions for `shape` at `scale`.
///
/// Returns an interleaved buffer of exactly `3 * count` floats.
pub fn generate(shape: Shape, scale: f32, count: usize) -> Vec<f32> {
    let mut positions = vec![0.0; count * 3];
    generate_into(shape, scale, &mut positions);
    positions
}

/// Generate into a caller-owned buffer, with a fresh random sample.
///
/// A trailing partial triple, if any, is left untouched.
pub fn generate_into(shape: Shape, scale: f32, positions: &mut [f32]) {
    generate_with(&mut SpawnContext::new(), shape, scale, positions);
}

/// Generate into a caller-owned buffer using the given sampler.
pub fn generate_with(ctx: &mut SpawnContext, shape: Shape, scale: f32, positions: &mut [f32]) {
    (shape.generator())(ctx, scale, positions);
}

/// Heart curve: x = 16 sin³t, y = 13 cos t − 5 cos 2t − 2 cos 3t − cos 4t,
/// z = cos φ, all divided by 20 and scaled, plus per-axis jitter.
pub fn heart(ctx: &mut SpawnContext, scale: f32, positions: &mut [f32]) {
    for p in positions.chunks_exact_mut(3) {
        let t = ctx.random_angle();
        let phi = ctx.random_angle();

        let x = 16.0 * t.sin().powi(3);
        let y = 13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos();
        let z = phi.cos();

        p[0] = x / HEART_NORMALIZE * scale + ctx.jitter(HEART_JITTER);
        p[1] = y / HEART_NORMALIZE * scale + ctx.jitter(HEART_JITTER);
        p[2] = z / HEART_NORMALIZE * scale + ctx.jitter(HEART_JITTER);
    }
}

/// Ring with core: 90% on an annulus of radius [1.0, 1.8]·scale in the XZ
/// plane, 10% inside a cube of half-extent 0.25·scale.
pub fn ring(ctx: &mut SpawnContext, scale: f32, positions: &mut [f32]) {
    for p in positions.chunks_exact_mut(3) {
        if ctx.chance(RING_PROBABILITY) {
            let on_ring = ctx.random_on_annulus(RING_RADIUS.0, RING_RADIUS.1);
            p[0] = on_ring.x * scale;
            p[1] = ctx.jitter(RING_THICKNESS);
            p[2] = on_ring.z * scale;
        } else {
            let core = ctx.random_in_cube(CORE_HALF_EXTENT * scale);
            p.copy_from_slice(&core.to_array());
        }
    }
}
