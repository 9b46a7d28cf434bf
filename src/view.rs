//! Per-frame render output.
//!
//! After each step the renderer asks for a [`FrameView`]: one
//! [`ParticleInstance`] per active slot plus the central light level. The
//! instance layout is plain `f32`s with no padding, so the whole list can be
//! uploaded as an instance buffer with [`FrameView::as_bytes`].

use bytemuck::{Pod, Zeroable};

/// What the renderer needs to place and shade one particle.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct ParticleInstance {
    pub position: [f32; 3],
    /// Sphere radius: base size × slot scale (× flash scale while flashing).
    pub radius: f32,
    pub color: [f32; 3],
    /// Material opacity: `intensity × opacity_scale`, or 1 while flashing.
    pub opacity: f32,
    /// Emissive strength: `pulse × emissive_scale`.
    pub emissive: f32,
    /// Raw `fade × pulse`.
    pub intensity: f32,
    /// Pool slot this instance came from, for hit-test mapping.
    pub slot: u32,
    _pad: u32,
}

impl ParticleInstance {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        slot: usize,
        position: [f32; 3],
        radius: f32,
        color: [f32; 3],
        opacity: f32,
        emissive: f32,
        intensity: f32,
    ) -> Self {
        Self {
            position,
            radius,
            color,
            opacity,
            emissive,
            intensity,
            slot: slot as u32,
            _pad: 0,
        }
    }
}

/// Snapshot of everything visible this frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameView {
    pub instances: Vec<ParticleInstance>,
    /// Intensity of the light at the centre of the swarm.
    pub light_intensity: f32,
}

impl FrameView {
    /// Raw bytes of the instance list.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_layout() {
        assert_eq!(std::mem::size_of::<ParticleInstance>(), 48);
    }

    #[test]
    fn test_as_bytes_length() {
        let view = FrameView {
            instances: vec![ParticleInstance::new(3, [1.0, 2.0, 3.0], 0.01, [1.0; 3], 0.5, 0.4, 0.7); 2],
            light_intensity: 0.75,
        };
        assert_eq!(view.as_bytes().len(), 96);

        let back: &[ParticleInstance] = bytemuck::cast_slice(view.as_bytes());
        assert_eq!(back[1].slot, 3);
        assert_eq!(back[1].position, [1.0, 2.0, 3.0]);
    }
}
