//! Per-particle color assignment.
//!
//! Colors are derived from a single base color with random brightness and a
//! small additive jitter, then boosted by [`INTENSITY_GAIN`]. Values are not
//! clamped: with additive blending, components above 1.0 read as glow.

use crate::error::ColorError;
use crate::spawn::SpawnContext;
use glam::Vec3;
use std::fmt;

/// Per-particle brightness multiplier range.
pub const BRIGHTNESS_RANGE: (f32, f32) = (0.6, 1.0);
/// Upper bound of the per-channel additive jitter (lower bound is 0).
pub const CHANNEL_JITTER: f32 = 0.05;
/// Final gain applied to every channel.
pub const INTENSITY_GAIN: f32 = 1.5;

/// Linear RGB color, components nominally in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb`, `rrggbb`, `#rgb` or `rgb`.
    ///
    /// ```ignore
    /// let violet = Rgb::from_hex("#d000ff")?;
    /// assert_eq!(violet.b, 1.0);
    /// ```
    pub fn from_hex(input: &str) -> Result<Self, ColorError> {
        let digits = input.trim().trim_start_matches('#');
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidDigit {
                input: input.to_string(),
            });
        }

        let channel = |s: &str| -> Result<f32, ColorError> {
            u8::from_str_radix(s, 16)
                .map(|v| v as f32 / 255.0)
                .map_err(|_| ColorError::InvalidDigit {
                    input: input.to_string(),
                })
        };

        match digits.len() {
            6 => Ok(Self::new(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            3 => {
                // #abc == #aabbcc
                let expand = |i: usize| digits[i..i + 1].repeat(2);
                Ok(Self::new(
                    channel(&expand(0))?,
                    channel(&expand(1))?,
                    channel(&expand(2))?,
                ))
            }
            _ => Err(ColorError::InvalidLength {
                input: input.to_string(),
            }),
        }
    }

    /// Format as `#rrggbb`, clamping each channel into `[0, 1]`.
    pub fn to_hex(&self) -> String {
        let byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", byte(self.r), byte(self.g), byte(self.b))
    }

    #[inline]
    pub fn to_vec3(self) -> Vec3 {
        Vec3::new(self.r, self.g, self.b)
    }
}

impl From<Vec3> for Rgb {
    fn from(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Rgb> for Vec3 {
    fn from(c: Rgb) -> Self {
        c.to_vec3()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Assign colors for `count` particles. Returns `3 * count` floats.
pub fn assign(base: Rgb, count: usize) -> Vec<f32> {
    let mut colors = vec![0.0; count * 3];
    assign_into(base, &mut colors);
    colors
}

/// Assign colors into a caller-owned interleaved `(r, g, b)` buffer.
pub fn assign_into(base: Rgb, colors: &mut [f32]) {
    assign_with(&mut SpawnContext::new(), base, colors);
}

/// Assign colors using the given sampler.
pub fn assign_with(ctx: &mut SpawnContext, base: Rgb, colors: &mut [f32]) {
    for c in colors.chunks_exact_mut(3) {
        let brightness = ctx.random_range(BRIGHTNESS_RANGE.0, BRIGHTNESS_RANGE.1);

        let r = base.r * brightness + ctx.random_range(0.0, CHANNEL_JITTER);
        let g = base.g * brightness + ctx.random_range(0.0, CHANNEL_JITTER);
        let b = base.b * brightness + ctx.random_range(0.0, CHANNEL_JITTER);

        c[0] = r * INTENSITY_GAIN;
        c[1] = g * INTENSITY_GAIN;
        c[2] = b * INTENSITY_GAIN;
    }
}
