//! Headless firefly run.
//!
//! Steps a pool at a fixed 60 Hz, clicks the scene every two seconds and
//! pokes the first visible particle, logging pool stats once per second.
//!
//! Usage: `fireflies [config.json] [seconds]`
//! Log level via `RUST_LOG` (e.g. `RUST_LOG=fireflies=debug`).

use fireflies::prelude::*;
use std::process::ExitCode;

const FRAME_RATE: u32 = 60;

fn main() -> ExitCode {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => match GlowConfig::load(&path) {
            Ok(config) => config,
            Err(err) => {
                tracing::error!(%path, error = %err, "failed to load config");
                return ExitCode::FAILURE;
            }
        },
        None => GlowConfig::default(),
    };
    let seconds: u32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(10);

    let sound = |name: &str| tracing::info!(sound = name, "play");
    let mut sim = match Simulator::seeded(config, 0x5eed, sound) {
        Ok(sim) => sim,
        Err(err) => {
            tracing::error!(error = %err, "invalid config");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(capacity = sim.capacity(), seconds, "running");

    let mut clock = FrameClock::fixed(1.0 / FRAME_RATE as f32);
    let mut view = FrameView::default();
    for frame in 1..=total_frames(seconds) {
        let time = clock.tick();
        sim.step(time.delta, time.elapsed);

        if frame % (2 * FRAME_RATE) == 0 {
            let signal = format!(
                r#"{{"kind":"object-clicked","position":[{:.2},0.5,{:.2}]}}"#,
                time.elapsed.cos(),
                time.elapsed.sin()
            );
            sim.handle_json(&signal);
            if let Some(index) = sim.slots().iter().position(|s| s.active && !s.is_from_click) {
                sim.handle_signal(&SceneSignal::ParticleClicked { index });
            }
        }

        for event in sim.drain_events() {
            tracing::debug!(?event, "pool event");
        }

        if frame % FRAME_RATE == 0 {
            sim.write_view(&mut view);
            let brightest = view.instances.iter().map(|i| i.intensity).fold(0.0, f32::max);
            tracing::info!(
                t = time.elapsed,
                visible = view.len(),
                free = sim.free_count(),
                brightest,
                light = view.light_intensity,
                "frame"
            );
        }
    }

    ExitCode::SUCCESS
}

fn total_frames(seconds: u32) -> u32 {
    seconds.saturating_mul(FRAME_RATE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_frames_saturates() {
        assert_eq!(total_frames(10), 600);
        assert_eq!(total_frames(u32::MAX), u32::MAX);
    }
}
