//! # fireflies
//!
//! A fixed-capacity pool of glowing "firefly" particles for interactive 3D
//! scenes.
//!
//! The crate owns the simulation only. Rendering, camera and pointer
//! picking live in the host; it feeds clicks in, calls [`Simulator::step`]
//! once per frame, and draws the [`FrameView`] that comes out.
//!
//! ## Quick Start
//!
//! ```ignore
//! use fireflies::prelude::*;
//!
//! fn main() -> Result<(), ConfigError> {
//!     let config = GlowConfig::default().with_capacity(500);
//!     let mut sim = Simulator::seeded(config, 42, |name: &str| println!("play {name}"))?;
//!     let mut clock = FrameClock::fixed(1.0 / 60.0);
//!
//!     sim.spawn_burst(Vec3::new(0.0, 0.5, 0.0), 8);
//!     for _ in 0..120 {
//!         let frame = clock.tick();
//!         sim.step(frame.delta, frame.elapsed);
//!     }
//!     println!("{} fireflies visible", sim.view().len());
//!     Ok(())
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Slots
//!
//! The pool is a `Vec` of [`ParticleSlot`]s sized once from
//! [`GlowConfig::capacity`]. A slot is either active (visible, aging,
//! moving) or inactive (free for the next spawn). Expired slots are
//! recycled, never dropped.
//!
//! ### Motion models
//!
//! | Spawned by | Motion |
//! |------------|--------|
//! | ambient roll (per frame) | wander toward a retargeting destination, speed capped |
//! | [`Simulator::spawn_burst`] | outward radial drift that slows with age |
//! | [`Simulator::handle_pointer_click`] | short-lived scatter around the clicked particle |
//!
//! ### Inputs
//!
//! Hosts either call the typed methods directly or pass JSON
//! [`SceneSignal`]s to [`Simulator::handle_json`]; malformed signals are
//! logged and ignored.
//!
//! ### Determinism
//!
//! All randomness comes from the RNG handed to [`Simulator::new`] (or the
//! seed given to [`Simulator::seeded`]). The same seed and the same
//! sequence of calls produce the same pool.

pub mod click;
pub mod config;
mod emitter;
pub mod error;
mod events;
pub mod lifecycle;
pub mod signal;
mod simulator;
pub mod slot;
mod sound;
mod spawn;
pub mod time;
pub mod view;

pub use config::GlowConfig;
pub use emitter::{SpawnRequest, SpawnSource};
pub use error::{ConfigError, SignalError};
pub use events::PoolEvent;
pub use glam::Vec3;
pub use signal::SceneSignal;
pub use simulator::{Simulator, StepReport};
pub use slot::{ParticleSlot, Personality};
pub use sound::{Silent, SoundPlayer};
pub use spawn::SpawnContext;
pub use time::{FrameClock, FrameTime};
pub use view::{FrameView, ParticleInstance};

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use fireflies::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::GlowConfig;
    pub use crate::emitter::{SpawnRequest, SpawnSource};
    pub use crate::error::ConfigError;
    pub use crate::events::PoolEvent;
    pub use crate::signal::SceneSignal;
    pub use crate::simulator::{Simulator, StepReport};
    pub use crate::sound::{Silent, SoundPlayer};
    pub use crate::time::FrameClock;
    pub use crate::view::{FrameView, ParticleInstance};
    pub use crate::Vec3;
}
