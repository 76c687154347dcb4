//! Error types for morphcloud.
//!
//! The particle core itself never fails: unknown shapes fall back to the
//! heart, and control scalars are clamped. Errors only surface at the
//! configuration boundary, when settings are parsed, loaded or validated.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while parsing a color string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    /// The string did not have 3 or 6 hex digits after an optional `#`.
    #[error("invalid color length in {input:?}: expected #rgb or #rrggbb")]
    InvalidLength { input: String },
    /// A character outside `[0-9a-fA-F]` was found.
    #[error("invalid hex digit in color {input:?}")]
    InvalidDigit { input: String },
}

/// Errors that can occur when loading, saving or validating [`Settings`](crate::Settings).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read or write a settings file.
    #[error("failed to access settings file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Settings JSON was malformed or could not be produced.
    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// A particle set must contain at least one particle.
    #[error("particle count must be greater than zero")]
    ZeroParticles,
    /// Shape scale must be a positive, finite number.
    #[error("shape scale must be positive and finite, got {0}")]
    InvalidScale(f32),
    /// Point size outside the renderer's accepted range.
    #[error("point size {0} is outside the range [{min}, {max}]", min = crate::visuals::POINT_SIZE_RANGE.0, max = crate::visuals::POINT_SIZE_RANGE.1)]
    InvalidPointSize(f32),
    /// Tracker calibration is inconsistent.
    #[error("invalid tracker calibration: {reason}")]
    InvalidTracker { reason: &'static str },
    /// The base color could not be parsed.
    #[error(transparent)]
    Color(#[from] ColorError),
}
