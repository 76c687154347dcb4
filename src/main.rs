//! Headless driver.
//!
//! Runs a particle cloud against a synthetic hand tracker so the control
//! path can be watched without a camera or a window.
//!
//! Usage: `morphcloud [settings.json] [frames]`
//!
//! Set `RUST_LOG=debug` for per-regeneration logs, `trace` for every tracker
//! transition.

use morphcloud::prelude::*;
use morphcloud::ConfigError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

const RENDER_INTERVAL: Duration = Duration::from_micros(16_667);
const CAPTURE_INTERVAL: Duration = Duration::from_millis(33);
const DEFAULT_FRAMES: u64 = 600;

/// Fake two-hand capture: wrists drift apart and together, and drop out for
/// one second in every four.
fn synthetic_frame(t: f32) -> HandFrame {
    if t % 4.0 >= 3.0 {
        return HandFrame::empty();
    }
    let half_gap = 0.05 + 0.25 * (1.0 + (t * 1.5).sin());
    let center = Vec2::new(0.5, 0.5);
    HandFrame::from_wrists(
        center - Vec2::new(half_gap / 2.0, 0.0),
        center + Vec2::new(half_gap / 2.0, 0.0),
    )
}

fn main() -> Result<(), ConfigError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let frames = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_FRAMES);

    let mut cloud = Simulation::new().with_settings(settings).build()?;

    let stop = Arc::new(AtomicBool::new(false));
    let capture = {
        let stop = Arc::clone(&stop);
        let mut tracker = cloud.tracker();
        thread::spawn(move || {
            let mut t = 0.0f32;
            while !stop.load(Ordering::Relaxed) {
                tracker.observe_frame(&synthetic_frame(t));
                t += CAPTURE_INTERVAL.as_secs_f32();
                thread::sleep(CAPTURE_INTERVAL);
            }
        })
    };

    log::info!("running {} frames", frames);
    for _ in 0..frames {
        let (index, scalar, dispersion, spin) = {
            let frame = cloud.frame();
            (frame.index, frame.scalar, frame.dispersion, frame.spin)
        };
        if index % 60 == 0 {
            log::info!(
                "frame {:>5}  scalar={:.3}  dispersion={:.3}  spin={:.3}  fps={:.1}",
                index,
                scalar,
                dispersion,
                spin,
                cloud.time().fps()
            );
        }
        if index == frames / 2 {
            let next = match cloud.engine().shape() {
                Shape::Heart => Shape::Ring,
                Shape::Ring => Shape::Heart,
            };
            cloud.apply(SettingsChange::Shape(next));
        }
        thread::sleep(RENDER_INTERVAL);
    }

    stop.store(true, Ordering::Relaxed);
    if capture.join().is_err() {
        log::error!("capture thread panicked");
    }
    Ok(())
}
