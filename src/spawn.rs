//! Spawn context for slot initialization.
//!
//! [`SpawnContext`] owns the injected random source and turns it into the
//! shapes the pool needs: shell positions for ambient fireflies, wander
//! targets, and the outward velocities of click bursts. Seeding the RNG makes
//! every spawn, and therefore every step, reproducible.
//!
//! ```ignore
//! let mut ctx = SpawnContext::new(SmallRng::seed_from_u64(7));
//! let position = ctx.shell_position(&config.ambient);
//! let target = ctx.wander_target(position, &config.ambient);
//! ```

use crate::config::{AmbientConfig, BurstConfig};
use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;
use std::ops::Range;

/// Random helpers over an injected generator.
#[derive(Debug)]
pub struct SpawnContext<R> {
    rng: R,
}

impl<R: Rng> SpawnContext<R> {
    /// Wrap a generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Direct access to the generator.
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    // ========== Random primitives ==========

    /// Random f32 in `[0, 1)`.
    #[inline]
    pub fn random(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Uniform sample from a range. `start == end` yields `start`.
    #[inline]
    pub fn sample(&mut self, range: &Range<f32>) -> f32 {
        range.start + self.random() * (range.end - range.start)
    }

    /// Uniform sample in `[-width / 2, width / 2)`.
    #[inline]
    pub fn centered(&mut self, width: f32) -> f32 {
        (self.random() - 0.5) * width
    }

    /// Per-axis centered vector.
    pub fn centered_vec(&mut self, width: f32) -> Vec3 {
        Vec3::new(self.centered(width), self.centered(width), self.centered(width))
    }

    /// Bernoulli trial with probability `p`.
    #[inline]
    pub fn chance(&mut self, p: f32) -> bool {
        self.random() < p
    }

    // ========== Ambient ==========

    /// Point on a shell around the origin, pushed upward and kept above ground.
    pub fn shell_position(&mut self, ambient: &AmbientConfig) -> Vec3 {
        let radius = self.sample(&ambient.shell_radius);
        let theta = self.random() * TAU;
        let phi = self.sample(&ambient.polar_angle);
        let lift = self.sample(&ambient.height_jitter);

        Vec3::new(
            radius * theta.cos() * phi.cos(),
            (radius * phi.sin() + lift).max(0.0),
            radius * theta.sin() * phi.cos(),
        )
    }

    /// New wander destination near `position`, never below `min_height`.
    pub fn wander_target(&mut self, position: Vec3, ambient: &AmbientConfig) -> Vec3 {
        let mut target = position + self.centered_vec(ambient.wander_offset);
        target.y = target.y.max(ambient.min_height);
        target
    }

    /// Small random drift given to fresh ambient particles.
    pub fn ambient_velocity(&mut self, ambient: &AmbientConfig) -> Vec3 {
        self.centered_vec(ambient.initial_speed)
    }

    // ========== Bursts ==========

    /// Outward velocity with a random azimuth and an upward bias.
    pub fn burst_velocity(&mut self, burst: &BurstConfig) -> Vec3 {
        let angle = self.random() * TAU;
        let upward = self.sample(&burst.upward_bias);

        Vec3::new(
            angle.cos() * self.sample(&burst.speed),
            upward * self.sample(&burst.speed),
            angle.sin() * self.sample(&burst.speed),
        )
    }

    /// Velocity of the `index`-th of `count` scatter particles: evenly spaced
    /// around the Z axis with a random depth component.
    pub fn scatter_velocity(&mut self, index: usize, count: usize, speed: f32) -> Vec3 {
        let angle = TAU / count.max(1) as f32 * index as f32;
        Vec3::new(angle.cos() * speed, angle.sin() * speed, self.centered(speed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn ctx() -> SpawnContext<SmallRng> {
        SpawnContext::new(SmallRng::seed_from_u64(42))
    }

    #[test]
    fn test_sample_stays_in_range() {
        let mut ctx = ctx();
        for _ in 0..1000 {
            let v = ctx.sample(&(2.0..5.0));
            assert!((2.0..5.0).contains(&v));
        }
        assert_eq!(ctx.sample(&(3.0..3.0)), 3.0);
    }

    #[test]
    fn test_shell_position_band() {
        let mut ctx = ctx();
        let ambient = AmbientConfig::default();
        for _ in 0..1000 {
            let p = ctx.shell_position(&ambient);
            let horizontal = (p.x * p.x + p.z * p.z).sqrt();
            assert!(horizontal <= 4.5 + 1e-4);
            assert!(p.y >= 0.0);
            assert!(p.y <= 4.5 + 1.0 + 1e-4);
        }
    }

    #[test]
    fn test_wander_target_respects_min_height() {
        let mut ctx = ctx();
        let ambient = AmbientConfig::default();
        for _ in 0..500 {
            let t = ctx.wander_target(Vec3::new(1.0, 0.0, -1.0), &ambient);
            assert!(t.y >= ambient.min_height);
            assert!((t.x - 1.0).abs() <= 0.75);
            assert!((t.z + 1.0).abs() <= 0.75);
        }
    }

    #[test]
    fn test_burst_velocity_points_up() {
        let mut ctx = ctx();
        let burst = BurstConfig::default();
        for _ in 0..500 {
            let v = ctx.burst_velocity(&burst);
            assert!(v.y > 0.0);
            let radial = (v.x * v.x + v.z * v.z).sqrt();
            assert!(radial <= 0.03 * std::f32::consts::SQRT_2 + 1e-5);
        }
    }

    #[test]
    fn test_scatter_velocity_even_spacing() {
        let mut ctx = ctx();
        let a = ctx.scatter_velocity(0, 4, 0.05);
        let b = ctx.scatter_velocity(1, 4, 0.05);

        assert!((a.x - 0.05).abs() < 1e-6 && a.y.abs() < 1e-6);
        assert!(b.x.abs() < 1e-6 && (b.y - 0.05).abs() < 1e-6);
        assert!(a.z.abs() <= 0.025);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = ctx();
        let mut b = ctx();
        let ambient = AmbientConfig::default();
        assert_eq!(a.shell_position(&ambient), b.shell_position(&ambient));
    }
}
