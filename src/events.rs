//! Diagnostics emitted by the pool.
//!
//! Events pile up in the simulator until the host drains them with
//! [`Simulator::drain_events`](crate::Simulator::drain_events), usually once
//! per frame. Ambient spawns are too frequent to be interesting and are not
//! reported.

use crate::emitter::SpawnSource;

/// Something observable happened inside the pool.
#[derive(Clone, Debug, PartialEq)]
pub enum PoolEvent {
    /// A burst or scatter claimed slots. `spawned < requested` means the pool
    /// ran out of free slots.
    ParticlesSpawned {
        source: SpawnSource,
        requested: usize,
        spawned: usize,
    },
    /// A click on an active particle passed the cooldown.
    ParticleClicked { index: usize },
    /// An external signal failed to decode and was ignored.
    SignalRejected { reason: String },
}
