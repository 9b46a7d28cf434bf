//! The firefly pool simulator.
//!
//! [`Simulator`] owns a fixed number of [`ParticleSlot`]s and advances them
//! once per rendered frame. Slots are never allocated or freed after
//! construction; spawns claim inactive slots and expiry releases them.
//!
//! # Frame order
//!
//! 1. Every active slot is aged, faded, pulsed and moved, in slot order.
//! 2. The ambient spawn roll may add a [`SpawnRequest::Ambient`].
//! 3. Queued requests are applied.
//!
//! Spawning therefore never happens while the update pass is iterating.
//! Event handlers that run between frames ([`Simulator::spawn_burst`],
//! [`Simulator::handle_pointer_click`]) apply their spawns immediately.
//!
//! # Example
//!
//! ```ignore
//! let mut sim = Simulator::seeded(GlowConfig::default(), 7, Silent)?;
//! let mut clock = FrameClock::fixed(1.0 / 60.0);
//!
//! sim.spawn_burst(Vec3::new(0.0, 0.5, 0.0), 8);
//! for _ in 0..600 {
//!     let frame = clock.tick();
//!     sim.step(frame.delta, frame.elapsed);
//!     renderer.upload(sim.view().as_bytes());
//! }
//! ```

use crate::click::ClickTracker;
use crate::config::{AmbientConfig, GlowConfig};
use crate::emitter::{SpawnRequest, SpawnSource};
use crate::error::{ConfigError, SignalError};
use crate::events::PoolEvent;
use crate::lifecycle::{burst_damping, fade_envelope, light_intensity, pulse};
use crate::signal::SceneSignal;
use crate::slot::{ParticleSlot, Personality};
use crate::sound::SoundPlayer;
use crate::spawn::SpawnContext;
use crate::view::{FrameView, ParticleInstance};
use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Summary of one [`Simulator::step`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Active slots after the step.
    pub active: usize,
    /// Slots released because their lifespan ran out.
    pub expired: usize,
    /// Slots claimed by requests applied at the end of the step.
    pub spawned: usize,
}

/// Fixed-capacity firefly particle pool.
pub struct Simulator<S, R = SmallRng> {
    config: GlowConfig,
    slots: Vec<ParticleSlot>,
    active_count: usize,
    spawner: SpawnContext<R>,
    clicks: ClickTracker,
    pending: Vec<SpawnRequest>,
    events: Vec<PoolEvent>,
    sound: S,
    /// Elapsed time passed to the last step.
    now: f32,
    frame: u64,
}

impl<S: SoundPlayer> Simulator<S, SmallRng> {
    /// Build a simulator with a [`SmallRng`] seeded from `seed`.
    pub fn seeded(config: GlowConfig, seed: u64, sound: S) -> Result<Self, ConfigError> {
        Self::new(config, SmallRng::seed_from_u64(seed), sound)
    }
}

impl<S: SoundPlayer, R: Rng> Simulator<S, R> {
    /// Validate `config` and build the pool.
    ///
    /// Every slot starts inactive with its own randomly rolled personality.
    pub fn new(config: GlowConfig, rng: R, sound: S) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut spawner = SpawnContext::new(rng);
        let slots: Vec<ParticleSlot> = (0..config.capacity)
            .map(|_| ParticleSlot::new(Personality::roll(&mut spawner, &config.personality)))
            .collect();

        tracing::debug!(capacity = config.capacity, "particle pool created");

        Ok(Self {
            clicks: ClickTracker::new(config.capacity, config.click.cooldown),
            config,
            slots,
            active_count: 0,
            spawner,
            pending: Vec::new(),
            events: Vec::new(),
            sound,
            now: 0.0,
            frame: 0,
        })
    }

    // =========================================================================
    // FRAME UPDATE
    // =========================================================================

    /// Advance the pool by one frame.
    ///
    /// `delta_time` is in seconds; negative or non-finite values count as 0,
    /// so a zero-length frame leaves every position and age untouched.
    /// `elapsed_time` drives the pulse, the wander retarget cadence, flash
    /// expiry and click debouncing.
    pub fn step(&mut self, delta_time: f32, elapsed_time: f32) -> StepReport {
        let dt = if delta_time.is_finite() { delta_time.max(0.0) } else { 0.0 };
        if elapsed_time.is_finite() {
            self.now = elapsed_time;
        }
        self.frame += 1;

        let now = self.now;
        let frame_scale = dt * self.config.reference_frame_rate;

        // The count is rebuilt from the slots, so edits made through
        // `slot_mut` between frames cannot leave it stale.
        let mut expired = 0;
        let mut survivors = 0;
        for slot in self.slots.iter_mut().filter(|s| s.active) {
            if advance_slot(slot, &mut self.spawner, &self.config.ambient, now, dt, frame_scale) {
                survivors += 1;
            } else {
                expired += 1;
            }
        }
        self.active_count = survivors;

        if dt > 0.0
            && self.active_count < self.slots.len()
            && self.spawner.chance(self.config.ambient.spawn_chance)
        {
            self.pending.push(SpawnRequest::Ambient);
        }

        let mut spawned = 0;
        let mut pending = std::mem::take(&mut self.pending);
        for request in pending.drain(..) {
            spawned += self.apply(request);
        }
        self.pending = pending;

        tracing::trace!(
            frame = self.frame,
            active = self.active_count,
            expired,
            spawned,
            "pool stepped"
        );

        StepReport {
            active: self.active_count,
            expired,
            spawned,
        }
    }

    // =========================================================================
    // SPAWNING
    // =========================================================================

    /// Claim up to `count` free slots for a burst at `position`.
    ///
    /// Returns how many slots were claimed; fewer than `count` (possibly
    /// zero) when the pool is nearly full. A non-finite position is
    /// rejected like a malformed signal and spawns nothing.
    pub fn spawn_burst(&mut self, position: Vec3, count: usize) -> usize {
        if !position.is_finite() {
            self.reject(&SignalError::NonFinitePosition(position.to_array()));
            return 0;
        }
        self.apply(SpawnRequest::Burst { position, count })
    }

    /// Defer a request until the end of the next [`step`](Self::step).
    pub fn queue(&mut self, request: SpawnRequest) {
        self.pending.push(request);
    }

    /// Requests waiting for the next step.
    pub fn pending_requests(&self) -> &[SpawnRequest] {
        &self.pending
    }

    fn apply(&mut self, request: SpawnRequest) -> usize {
        let source = request.source();
        let requested = request.count();

        let spawned = match request {
            SpawnRequest::Ambient => self.spawn_ambient(),
            SpawnRequest::Burst { position, count } => self.spawn_radial(position, count, None, source),
            SpawnRequest::Scatter { origin, count, exclude } => {
                self.spawn_radial(origin, count, exclude, source)
            }
        };
        self.active_count += spawned;

        if source != SpawnSource::Ambient {
            tracing::debug!(?source, requested, spawned, "particles spawned");
            self.events.push(PoolEvent::ParticlesSpawned {
                source,
                requested,
                spawned,
            });
        }
        spawned
    }

    fn spawn_ambient(&mut self) -> usize {
        let Some(index) = self.slots.iter().position(|s| !s.active) else {
            return 0;
        };

        let ambient = &self.config.ambient;
        let position = self.spawner.shell_position(ambient);
        let target = self.spawner.wander_target(position, ambient);
        let velocity = self.spawner.ambient_velocity(ambient).clamp_length_max(ambient.max_speed);
        let lifespan = self.spawner.sample(&self.config.personality.lifespan);

        let slot = &mut self.slots[index];
        slot.activate(position, lifespan);
        slot.target_position = target;
        slot.velocity = velocity;
        slot.change_direction_time = self.now;
        slot.is_from_click = false;
        slot.restore_personality();
        1
    }

    fn spawn_radial(&mut self, origin: Vec3, count: usize, exclude: Option<usize>, source: SpawnSource) -> usize {
        let free: Vec<usize> = self
            .slots
            .iter()
            .enumerate()
            .filter(|(i, s)| !s.active && Some(*i) != exclude)
            .map(|(i, _)| i)
            .take(count)
            .collect();

        let burst = &self.config.burst;
        let click = &self.config.click;
        for (k, &index) in free.iter().enumerate() {
            let (lifespan, velocity) = match source {
                SpawnSource::Scatter => (
                    click.scatter_lifespan,
                    self.spawner.scatter_velocity(k, count, click.scatter_speed),
                ),
                _ => (
                    self.spawner.sample(&burst.lifespan),
                    self.spawner.burst_velocity(burst),
                ),
            };
            let base_intensity = self.spawner.sample(&burst.base_intensity);
            let pulse_factor = self.spawner.sample(&burst.pulse_factor);

            let slot = &mut self.slots[index];
            slot.activate(origin, lifespan);
            slot.target_position = origin;
            slot.velocity = velocity;
            slot.is_from_click = true;
            slot.base_intensity = base_intensity;
            slot.pulse_factor = pulse_factor;
        }
        free.len()
    }

    // =========================================================================
    // INPUT
    // =========================================================================

    /// React to the pointer hitting the particle in slot `index`.
    ///
    /// Ignored (returns `None`) when the index is out of range, the slot is
    /// inactive, or the slot was already clicked within the cooldown.
    /// Otherwise plays the click sound, flashes the particle and throws off a
    /// scatter burst from its position, returning the number of scatter
    /// particles spawned.
    pub fn handle_pointer_click(&mut self, index: usize) -> Option<usize> {
        let origin = match self.slots.get(index) {
            Some(slot) if slot.active => slot.position,
            _ => {
                tracing::trace!(index, "click on inactive or unknown slot ignored");
                return None;
            }
        };
        if !self.clicks.try_accept(index, self.now) {
            return None;
        }

        self.sound.play(&self.config.click.sound);
        self.slots[index].flash_until = Some(self.now + self.config.click.flash_duration);
        self.events.push(PoolEvent::ParticleClicked { index });
        tracing::debug!(index, "particle clicked");

        Some(self.apply(SpawnRequest::Scatter {
            origin,
            count: self.config.click.scatter_count,
            exclude: Some(index),
        }))
    }

    /// Route a decoded scene signal. Returns the number of particles spawned.
    ///
    /// Signals built in code are checked the same way as decoded ones.
    pub fn handle_signal(&mut self, signal: &SceneSignal) -> usize {
        if let Err(err) = signal.validate() {
            self.reject(&err);
            return 0;
        }
        match *signal {
            SceneSignal::ObjectClicked { position, count } => {
                let count = count.unwrap_or(self.config.burst.default_count);
                self.spawn_burst(Vec3::from_array(position), count)
            }
            SceneSignal::ParticleClicked { index } => self.handle_pointer_click(index).unwrap_or(0),
        }
    }

    /// Decode a JSON scene signal and route it.
    ///
    /// Malformed signals are logged, recorded as
    /// [`PoolEvent::SignalRejected`] and otherwise ignored.
    pub fn handle_json(&mut self, json: &str) -> usize {
        match SceneSignal::from_json(json) {
            Ok(signal) => self.handle_signal(&signal),
            Err(err) => {
                self.reject(&err);
                0
            }
        }
    }

    fn reject(&mut self, err: &SignalError) {
        tracing::warn!(error = %err, "ignoring scene signal");
        self.events.push(PoolEvent::SignalRejected {
            reason: err.to_string(),
        });
    }

    // =========================================================================
    // OUTPUT
    // =========================================================================

    /// Render snapshot of every active slot.
    pub fn view(&self) -> FrameView {
        let mut view = FrameView::default();
        self.write_view(&mut view);
        view
    }

    /// Fill `view`, reusing its allocation.
    pub fn write_view(&self, view: &mut FrameView) {
        view.instances.clear();
        view.instances.extend(
            self.slots
                .iter()
                .enumerate()
                .filter(|(_, s)| s.active)
                .map(|(i, s)| self.instance(i, s)),
        );

        let shading = &self.config.shading;
        view.light_intensity = light_intensity(self.now, shading.light_speed, shading.light_base, shading.light_gain);
    }

    fn instance(&self, index: usize, slot: &ParticleSlot) -> ParticleInstance {
        let config = &self.config;
        let radius = config.size * slot.scale;
        let emissive = slot.pulse * config.shading.emissive_scale;

        if slot.is_flashing() {
            ParticleInstance::new(
                index,
                slot.position.to_array(),
                radius * config.click.flash_scale,
                config.click.flash_color,
                1.0,
                emissive,
                slot.intensity(),
            )
        } else {
            ParticleInstance::new(
                index,
                slot.position.to_array(),
                radius,
                config.color,
                slot.intensity() * config.shading.opacity_scale,
                emissive,
                slot.intensity(),
            )
        }
    }

    /// Take every event recorded since the last drain.
    pub fn drain_events(&mut self) -> Vec<PoolEvent> {
        std::mem::take(&mut self.events)
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    pub fn slots(&self) -> &[ParticleSlot] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<&ParticleSlot> {
        self.slots.get(index)
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn active_count(&self) -> usize {
        self.active_count
    }

    pub fn free_count(&self) -> usize {
        self.slots.len().saturating_sub(self.active_count)
    }

    pub fn config(&self) -> &GlowConfig {
        &self.config
    }

    /// Elapsed time of the last step.
    pub fn now(&self) -> f32 {
        self.now
    }

    /// Steps taken so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn sound(&self) -> &S {
        &self.sound
    }

    pub fn sound_mut(&mut self) -> &mut S {
        &mut self.sound
    }

    /// Direct slot access for hosts and tests that need to pose the pool.
    ///
    /// Toggling `active` here bypasses the spawn path; [`active_count`](Self::active_count)
    /// catches up on the next [`step`](Self::step).
    pub fn slot_mut(&mut self, index: usize) -> Option<&mut ParticleSlot> {
        self.slots.get_mut(index)
    }
}

/// Age, shade and move one active slot. Returns `false` if it expired.
fn advance_slot<R: Rng>(
    slot: &mut ParticleSlot,
    ctx: &mut SpawnContext<R>,
    ambient: &AmbientConfig,
    now: f32,
    dt: f32,
    frame_scale: f32,
) -> bool {
    if matches!(slot.flash_until, Some(until) if now >= until) {
        slot.flash_until = None;
    }

    slot.age += dt;
    if slot.age >= slot.lifespan {
        slot.release();
        return false;
    }

    let progress = slot.life_progress();
    slot.opacity = fade_envelope(progress);
    slot.pulse = pulse(now, slot.pulse_speed, slot.time_offset, slot.pulse_factor, slot.base_intensity);

    if slot.is_from_click {
        slot.position += slot.velocity * burst_damping(progress) * frame_scale;
    } else {
        wander(slot, ctx, ambient, now, frame_scale);
    }
    true
}

/// Proportional steering toward a wandering target.
fn wander<R: Rng>(slot: &mut ParticleSlot, ctx: &mut SpawnContext<R>, ambient: &AmbientConfig, now: f32, frame_scale: f32) {
    if now - slot.change_direction_time > slot.direction_change_interval {
        slot.target_position = ctx.wander_target(slot.position, ambient);
        slot.change_direction_time = now;
    }

    let to_target = slot.target_position - slot.position;
    let distance = to_target.length();
    if distance <= ambient.arrival_radius {
        slot.target_position = ctx.wander_target(slot.position, ambient);
        slot.change_direction_time = now;
        return;
    }

    slot.velocity += to_target / distance * ambient.steering * frame_scale;
    slot.velocity += ctx.centered_vec(ambient.jitter) * frame_scale;
    slot.velocity = slot.velocity.clamp_length_max(ambient.max_speed);
    slot.position += slot.velocity * frame_scale;
}
