//! Frame timing for driving the simulator.
//!
//! [`Simulator::step`](crate::Simulator::step) takes `(delta_time,
//! elapsed_time)` from the host. When the host has no clock of its own,
//! [`FrameClock`] produces those values either from wall time or from a
//! fixed step.
//!
//! # Example
//!
//! ```ignore
//! let mut clock = FrameClock::fixed(1.0 / 60.0);
//! loop {
//!     let frame = clock.tick();
//!     sim.step(frame.delta, frame.elapsed);
//! }
//! ```

use std::time::{Duration, Instant};

/// Timing values for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameTime {
    /// Seconds since the clock started, excluding pauses.
    pub elapsed: f32,
    /// Seconds covered by this frame.
    pub delta: f32,
    /// Frames ticked so far, including this one.
    pub frame: u64,
}

/// Produces per-frame `elapsed` / `delta` values.
#[derive(Debug)]
pub struct FrameClock {
    last_tick: Instant,
    elapsed: f32,
    frame: u64,
    /// When set, every tick advances by exactly this much.
    fixed_delta: Option<f32>,
    /// Upper bound on a wall-clock delta, so a stalled frame does not teleport particles.
    max_delta: f32,
    time_scale: f32,
    paused: bool,
}

impl FrameClock {
    /// Wall-clock driven, with deltas clamped to 100 ms.
    pub fn new() -> Self {
        Self {
            last_tick: Instant::now(),
            elapsed: 0.0,
            frame: 0,
            fixed_delta: None,
            max_delta: 0.1,
            time_scale: 1.0,
            paused: false,
        }
    }

    /// Deterministic clock advancing `delta` seconds per tick.
    pub fn fixed(delta: f32) -> Self {
        Self {
            fixed_delta: Some(delta.max(0.0)),
            ..Self::new()
        }
    }

    /// Set the wall-clock delta clamp.
    pub fn with_max_delta(mut self, max_delta: Duration) -> Self {
        self.max_delta = max_delta.as_secs_f32();
        self
    }

    /// Advance one frame.
    ///
    /// While paused the delta is zero and elapsed time does not move.
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let raw = now.duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;

        let delta = if self.paused {
            0.0
        } else {
            self.fixed_delta.unwrap_or_else(|| raw.min(self.max_delta)) * self.time_scale
        };

        self.elapsed += delta;
        self.frame += 1;

        FrameTime {
            elapsed: self.elapsed,
            delta,
            frame: self.frame,
        }
    }

    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
        self.last_tick = Instant::now();
    }

    /// Set the playback speed. Negative values clamp to 0.
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    #[inline]
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_fixed_clock_is_deterministic() {
        let mut clock = FrameClock::fixed(0.5);
        let a = clock.tick();
        let b = clock.tick();

        assert_eq!(a, FrameTime { elapsed: 0.5, delta: 0.5, frame: 1 });
        assert_eq!(b, FrameTime { elapsed: 1.0, delta: 0.5, frame: 2 });
    }

    #[test]
    fn test_wall_clock_delta_clamped() {
        let mut clock = FrameClock::new().with_max_delta(Duration::from_millis(5));
        thread::sleep(Duration::from_millis(20));
        let frame = clock.tick();

        assert!(frame.delta <= 0.005 + 1e-6);
        assert!(frame.delta > 0.0);
    }

    #[test]
    fn test_pause_freezes_elapsed() {
        let mut clock = FrameClock::fixed(0.25);
        clock.tick();
        clock.pause();
        let frame = clock.tick();

        assert!(clock.is_paused());
        assert_eq!(frame.delta, 0.0);
        assert_eq!(frame.elapsed, 0.25);

        clock.resume();
        assert_eq!(clock.tick().elapsed, 0.5);
    }

    #[test]
    fn test_time_scale() {
        let mut clock = FrameClock::fixed(1.0);
        clock.set_time_scale(0.5);
        assert_eq!(clock.tick().delta, 0.5);

        clock.set_time_scale(-3.0);
        assert_eq!(clock.time_scale(), 0.0);
        assert_eq!(clock.tick().delta, 0.0);
    }
}
