//! Spawn requests.
//!
//! Every way a slot can be claimed is described by a [`SpawnRequest`]. The
//! simulator applies them in two places: directly, from event handlers
//! ([`Simulator::spawn_burst`](crate::Simulator::spawn_burst)), or deferred,
//! after the update pass of the next step
//! ([`Simulator::queue`](crate::Simulator::queue)). Deferring keeps the
//! per-slot pass from ever seeing the pool change underneath it.
//!
//! | Request | Slots | Motion |
//! |---------|-------|--------|
//! | [`SpawnRequest::Ambient`] | first free slot | wander |
//! | [`SpawnRequest::Burst`] | up to `count` free slots | decelerating radial |
//! | [`SpawnRequest::Scatter`] | up to `count` free slots, skipping `exclude` | decelerating radial |

use glam::Vec3;

/// A request to claim inactive slots.
#[derive(Clone, Debug, PartialEq)]
pub enum SpawnRequest {
    /// One background firefly somewhere on the spawn shell.
    Ambient,

    /// Explosive dispersal from a clicked point in the scene.
    Burst {
        /// Where every claimed particle starts.
        position: Vec3,
        /// Upper bound on claimed slots.
        count: usize,
    },

    /// Short-lived sparks thrown off a clicked particle.
    Scatter {
        /// Position of the clicked particle.
        origin: Vec3,
        /// Upper bound on claimed slots.
        count: usize,
        /// Slot that must not be reused (the clicked one).
        exclude: Option<usize>,
    },
}

impl SpawnRequest {
    /// Maximum number of slots this request may claim.
    pub fn count(&self) -> usize {
        match self {
            SpawnRequest::Ambient => 1,
            SpawnRequest::Burst { count, .. } => *count,
            SpawnRequest::Scatter { count, .. } => *count,
        }
    }

    /// Which kind of spawn this is, for diagnostics.
    pub fn source(&self) -> SpawnSource {
        match self {
            SpawnRequest::Ambient => SpawnSource::Ambient,
            SpawnRequest::Burst { .. } => SpawnSource::Burst,
            SpawnRequest::Scatter { .. } => SpawnSource::Scatter,
        }
    }
}

/// Origin of a spawn, reported in [`PoolEvent::ParticlesSpawned`](crate::PoolEvent::ParticlesSpawned).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpawnSource {
    Ambient,
    Burst,
    Scatter,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_count_and_source() {
        assert_eq!(SpawnRequest::Ambient.count(), 1);
        assert_eq!(SpawnRequest::Ambient.source(), SpawnSource::Ambient);

        let burst = SpawnRequest::Burst { position: Vec3::ZERO, count: 8 };
        assert_eq!(burst.count(), 8);
        assert_eq!(burst.source(), SpawnSource::Burst);

        let scatter = SpawnRequest::Scatter { origin: Vec3::ONE, count: 3, exclude: Some(2) };
        assert_eq!(scatter.count(), 3);
        assert_eq!(scatter.source(), SpawnSource::Scatter);
    }
}
