//! Particle lifecycle curves.
//!
//! Every active slot moves through the same lifetime, measured as
//! *life progress* (`age / lifespan`):
//!
//! | Progress | Fade | Phase |
//! |----------|------|-------|
//! | 0.0 - 0.1 | ramps 0 → 1 | fade in |
//! | 0.1 - 0.9 | 1 | hold |
//! | 0.9 - 1.0 | ramps 1 → 0 | fade out |
//! | ≥ 1.0 | - | slot released |
//!
//! On top of the fade, each particle pulses sinusoidally with its own
//! speed, phase and amplitude. The renderer receives `fade * pulse`.

/// Fraction of the lifetime spent fading in (and, mirrored, fading out).
pub const FADE_FRACTION: f32 = 0.1;

/// Normalized position within a lifetime, clamped to `[0, 1]`.
#[inline]
pub fn life_progress(age: f32, lifespan: f32) -> f32 {
    if lifespan <= 0.0 {
        return 1.0;
    }
    (age / lifespan).clamp(0.0, 1.0)
}

/// Symmetric fade-in / fade-out envelope.
///
/// ```ignore
/// assert_eq!(fade_envelope(0.0), 0.0);
/// assert_eq!(fade_envelope(0.5), 1.0);
/// assert_eq!(fade_envelope(1.0), 0.0);
/// ```
#[inline]
pub fn fade_envelope(progress: f32) -> f32 {
    if progress < FADE_FRACTION {
        (progress / FADE_FRACTION).max(0.0)
    } else if progress > 1.0 - FADE_FRACTION {
        ((1.0 - progress) / FADE_FRACTION).max(0.0)
    } else {
        1.0
    }
}

/// Pulse brightness: `sin(t * speed + offset) * factor + base`.
#[inline]
pub fn pulse(elapsed: f32, pulse_speed: f32, time_offset: f32, pulse_factor: f32, base_intensity: f32) -> f32 {
    (elapsed * pulse_speed + time_offset).sin() * pulse_factor + base_intensity
}

/// Intensity of the slow-breathing light at the centre of the swarm.
#[inline]
pub fn light_intensity(elapsed: f32, speed: f32, base: f32, gain: f32) -> f32 {
    ((elapsed * speed).sin() + base) * gain
}

/// Velocity multiplier for burst particles: decays linearly to half speed.
#[inline]
pub fn burst_damping(progress: f32) -> f32 {
    1.0 - progress * 0.5
}
