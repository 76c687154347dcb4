//! Frame timing for the render tick.
//!
//! `Time` supplies the elapsed seconds fed into the per-frame blend, the
//! frame delta that advances the model spin, and an FPS estimate for logs.
//!
//! # Example
//!
//! ```ignore
//! use morphcloud::time::Time;
//!
//! let mut time = Time::new();
//!
//! // In the render loop:
//! let (elapsed, delta) = time.update();
//! engine.update(elapsed, cell.load());
//! engine.advance_spin(delta);
//! ```
//!
//! A [`Time::manual`] clock ignores the wall clock and only moves through
//! [`Time::advance`], which keeps headless runs and tests deterministic.

use std::time::{Duration, Instant};

/// How time advances.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Source {
    /// Wall clock, measured with `Instant`.
    Real,
    /// Advanced explicitly, by the pending step in seconds.
    Manual { pending: f32 },
}

/// Time tracking for the render loop.
#[derive(Debug)]
pub struct Time {
    source: Source,
    start: Instant,
    /// Wall-clock instant of the last unpaused update.
    last_frame: Instant,
    /// Wall-clock time spent paused, excluded from a real clock's elapsed.
    pause_elapsed: Duration,
    elapsed_secs: f32,
    delta_secs: f32,
    frame_count: u64,
    fps: f32,
    /// Frames and seconds accumulated since the last FPS estimate.
    fps_frames: u32,
    fps_window: f32,
    fps_update_interval: f32,
    paused: bool,
}

impl Time {
    /// Create a wall-clock timer starting from now.
    pub fn new() -> Self {
        Self::with_source(Source::Real)
    }

    /// Create a timer that only advances through [`Time::advance`].
    pub fn manual() -> Self {
        Self::with_source(Source::Manual { pending: 0.0 })
    }

    fn with_source(source: Source) -> Self {
        let now = Instant::now();
        Self {
            source,
            start: now,
            last_frame: now,
            pause_elapsed: Duration::ZERO,
            elapsed_secs: 0.0,
            delta_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frames: 0,
            fps_window: 0.0,
            fps_update_interval: 0.5,
            paused: false,
        }
    }

    /// Queue `seconds` for the next [`update`](Self::update) of a manual clock.
    ///
    /// No effect on a wall-clock timer.
    pub fn advance(&mut self, seconds: f32) {
        if let Source::Manual { pending } = &mut self.source {
            *pending += seconds.max(0.0);
        }
    }

    /// Update timing values. Call once per frame.
    ///
    /// Returns `(elapsed_time, delta_time)`.
    pub fn update(&mut self) -> (f32, f32) {
        if self.paused {
            self.delta_secs = 0.0;
            return (self.elapsed_secs, self.delta_secs);
        }

        let now = Instant::now();
        let raw_delta = match &mut self.source {
            Source::Real => {
                // Measured from start so rounding does not build up over long runs
                let raw_elapsed = now
                    .duration_since(self.start)
                    .saturating_sub(self.pause_elapsed);
                self.elapsed_secs = raw_elapsed.as_secs_f32();
                now.duration_since(self.last_frame).as_secs_f32()
            }
            Source::Manual { pending } => {
                let step = std::mem::take(pending);
                self.elapsed_secs += step;
                step
            }
        };
        self.last_frame = now;

        self.delta_secs = raw_delta;
        self.frame_count += 1;

        self.fps_frames += 1;
        self.fps_window += raw_delta;
        if self.fps_window >= self.fps_update_interval {
            self.fps = self.fps_frames as f32 / self.fps_window;
            self.fps_frames = 0;
            self.fps_window = 0.0;
        }

        (self.elapsed_secs, self.delta_secs)
    }

    /// Total unpaused time in seconds.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed_secs
    }

    /// Time since last frame in seconds.
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Frames counted since start, excluding paused updates.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Stop time. While paused, `delta()` is 0 and `elapsed()` holds.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        if self.paused {
            // Time spent paused never reaches the next delta
            let now = Instant::now();
            self.pause_elapsed += now.duration_since(self.last_frame);
            self.last_frame = now;
            if let Source::Manual { pending } = &mut self.source {
                *pending = 0.0;
            }
            self.paused = false;
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Get delta time as a Duration.
    #[inline]
    pub fn delta_duration(&self) -> Duration {
        Duration::from_secs_f32(self.delta_secs)
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}
