//! Pool slots.
//!
//! A [`ParticleSlot`] is one reusable record in the fixed-size pool. Slots
//! are created once, together with a [`Personality`], and are recycled for
//! the rest of the simulator's life: a spawn request claims an inactive slot
//! and overwrites its per-spawn fields, and the slot releases itself when
//! `age` reaches `lifespan`.

use crate::config::PersonalityConfig;
use crate::spawn::SpawnContext;
use glam::Vec3;
use rand::Rng;

/// Static per-slot parameters rolled when the pool is built.
///
/// Ambient spawns restore the pulse parameters from here, so a slot that was
/// brightened by a burst goes back to its own look on the next ambient life.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Personality {
    pub scale: f32,
    pub time_offset: f32,
    pub lifespan: f32,
    pub base_intensity: f32,
    pub pulse_factor: f32,
    pub pulse_speed: f32,
    pub direction_change_interval: f32,
}

impl Personality {
    pub(crate) fn roll<R: Rng>(ctx: &mut SpawnContext<R>, config: &PersonalityConfig) -> Self {
        Self {
            scale: ctx.sample(&config.scale),
            time_offset: ctx.sample(&config.time_offset),
            lifespan: ctx.sample(&config.lifespan),
            base_intensity: ctx.sample(&config.base_intensity),
            pulse_factor: ctx.sample(&config.pulse_factor),
            pulse_speed: ctx.sample(&config.pulse_speed),
            direction_change_interval: ctx.sample(&config.direction_change_interval),
        }
    }
}

/// One element of the particle pool.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleSlot {
    pub position: Vec3,
    /// Motion per reference frame.
    pub velocity: Vec3,
    /// Current wander destination (ambient particles only).
    pub target_position: Vec3,
    /// Visual size multiplier, fixed at pool creation.
    pub scale: f32,
    pub age: f32,
    pub lifespan: f32,
    pub base_intensity: f32,
    pub pulse_factor: f32,
    pub pulse_speed: f32,
    pub time_offset: f32,
    pub active: bool,
    /// Selects burst motion instead of ambient wander.
    pub is_from_click: bool,
    /// Simulator time of the last wander retarget.
    pub change_direction_time: f32,
    pub direction_change_interval: f32,
    /// Fade envelope computed by the last step.
    pub opacity: f32,
    /// Pulse brightness computed by the last step.
    pub pulse: f32,
    /// Simulator time at which a click flash ends, if one is showing.
    pub flash_until: Option<f32>,
    personality: Personality,
}

impl ParticleSlot {
    /// Create an inactive slot carrying the given personality.
    pub fn new(personality: Personality) -> Self {
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            target_position: Vec3::ZERO,
            scale: personality.scale,
            age: 0.0,
            lifespan: personality.lifespan,
            base_intensity: personality.base_intensity,
            pulse_factor: personality.pulse_factor,
            pulse_speed: personality.pulse_speed,
            time_offset: personality.time_offset,
            active: false,
            is_from_click: false,
            change_direction_time: 0.0,
            direction_change_interval: personality.direction_change_interval,
            opacity: 0.0,
            pulse: 0.0,
            flash_until: None,
            personality,
        }
    }

    /// The parameters rolled for this slot at pool creation.
    pub fn personality(&self) -> &Personality {
        &self.personality
    }

    /// Normalized position within the current lifetime.
    #[inline]
    pub fn life_progress(&self) -> f32 {
        crate::lifecycle::life_progress(self.age, self.lifespan)
    }

    /// Combined brightness handed to the renderer.
    #[inline]
    pub fn intensity(&self) -> f32 {
        self.opacity * self.pulse
    }

    /// Whether a click flash is currently overriding the look.
    #[inline]
    pub fn is_flashing(&self) -> bool {
        self.flash_until.is_some()
    }

    /// Reset the per-spawn fields shared by every spawn kind.
    pub(crate) fn activate(&mut self, position: Vec3, lifespan: f32) {
        self.active = true;
        self.position = position;
        self.age = 0.0;
        self.lifespan = lifespan;
        self.opacity = 0.0;
        self.pulse = 0.0;
        self.flash_until = None;
    }

    /// Put the pulse parameters back to the slot's own personality.
    pub(crate) fn restore_personality(&mut self) {
        self.base_intensity = self.personality.base_intensity;
        self.pulse_factor = self.personality.pulse_factor;
    }

    pub(crate) fn release(&mut self) {
        self.active = false;
        self.opacity = 0.0;
        self.flash_until = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn personality() -> Personality {
        Personality {
            scale: 0.75,
            time_offset: 12.0,
            lifespan: 6.0,
            base_intensity: 0.6,
            pulse_factor: 0.2,
            pulse_speed: 2.0,
            direction_change_interval: 3.0,
        }
    }

    #[test]
    fn test_new_slot_is_inactive() {
        let slot = ParticleSlot::new(personality());
        assert!(!slot.active);
        assert_eq!(slot.scale, 0.75);
        assert_eq!(slot.lifespan, 6.0);
        assert_eq!(slot.intensity(), 0.0);
    }

    #[test]
    fn test_activate_resets_age() {
        let mut slot = ParticleSlot::new(personality());
        slot.age = 4.0;
        slot.flash_until = Some(1.0);
        slot.activate(Vec3::ONE, 2.0);

        assert!(slot.active);
        assert_eq!(slot.age, 0.0);
        assert_eq!(slot.lifespan, 2.0);
        assert_eq!(slot.position, Vec3::ONE);
        assert!(!slot.is_flashing());
    }

    #[test]
    fn test_restore_personality() {
        let mut slot = ParticleSlot::new(personality());
        slot.base_intensity = 1.4;
        slot.pulse_factor = 0.35;
        slot.restore_personality();

        assert_eq!(slot.base_intensity, 0.6);
        assert_eq!(slot.pulse_factor, 0.2);
    }

    #[test]
    fn test_release_clears_flash() {
        let mut slot = ParticleSlot::new(personality());
        slot.activate(Vec3::ZERO, 1.0);
        slot.flash_until = Some(0.3);
        slot.release();

        assert!(!slot.active);
        assert!(!slot.is_flashing());
    }
}
