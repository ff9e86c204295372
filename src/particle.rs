//! Particle records and the store that owns them.
//!
//! A [`Particle`] is a fixed-shape struct; there is no dynamic per-particle
//! data. The [`ParticleStore`] owns the live set. Particles have no identity
//! beyond their current array position, which the depth sort reassigns every
//! tick.

use glam::Vec3;

/// One live particle.
///
/// Created by the emitter with randomized fields, mutated by the integrator
/// every tick, removed the first tick `life` reaches zero.
#[derive(Clone, Copy, Debug)]
pub struct Particle {
    /// World position.
    pub position: Vec3,
    /// World velocity (units per second).
    pub velocity: Vec3,
    /// Size drawn at spawn; never changes afterwards.
    pub base_size: f32,
    /// Size after spline and boundary-fade scaling, recomputed each tick.
    pub current_size: f32,
    /// Color, recomputed each tick from the color spline.
    pub color: Vec3,
    /// Opacity in `[0, 1]`, recomputed each tick.
    pub alpha: f32,
    /// Remaining lifetime in seconds, strictly decreasing.
    pub life: f32,
    /// Lifetime at spawn, always positive.
    pub max_life: f32,
    /// Orientation in radians, monotonically increasing.
    pub rotation: f32,
}

impl Particle {
    /// Normalized age: 0 at spawn, approaching 1 near expiry.
    #[inline]
    pub fn age_fraction(&self) -> f32 {
        1.0 - self.life / self.max_life
    }

    /// Whether the particle should be purged this tick.
    #[inline]
    pub fn is_expired(&self) -> bool {
        self.life <= 0.0
    }
}

/// Owns the live particle set. Pure data, no simulation logic.
#[derive(Debug, Default)]
pub struct ParticleStore {
    particles: Vec<Particle>,
}

impl ParticleStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            particles: Vec::with_capacity(capacity),
        }
    }

    /// Add a particle.
    #[inline]
    pub fn push(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    /// Number of live particles.
    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether the store holds no particles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Remove every expired particle, keeping relative order.
    pub fn purge_expired(&mut self) {
        self.particles.retain(|p| !p.is_expired());
    }

    /// Drop all particles.
    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Iterate over live particles.
    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    /// Iterate mutably over live particles.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Particle> {
        self.particles.iter_mut()
    }

    /// The live set as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    /// The live set as a mutable slice (used by the depth sort).
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [Particle] {
        &mut self.particles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dummy(life: f32) -> Particle {
        Particle {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            base_size: 1.0,
            current_size: 1.0,
            color: Vec3::ONE,
            alpha: 1.0,
            life,
            max_life: 2.0,
            rotation: 0.0,
        }
    }

    #[test]
    fn test_age_fraction() {
        let p = dummy(2.0);
        assert_eq!(p.age_fraction(), 0.0);
        let p = dummy(0.5);
        assert!((p.age_fraction() - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_purge_expired() {
        let mut store = ParticleStore::new();
        store.push(dummy(1.0));
        store.push(dummy(0.0));
        store.push(dummy(-0.5));
        store.push(dummy(0.3));
        store.purge_expired();
        assert_eq!(store.len(), 2);
        assert!(store.iter().all(|p| p.life > 0.0));
    }

    #[test]
    fn test_purge_keeps_order() {
        let mut store = ParticleStore::new();
        for life in [3.0, -1.0, 2.0, 1.0] {
            store.push(dummy(life));
        }
        store.purge_expired();
        let lives: Vec<f32> = store.iter().map(|p| p.life).collect();
        assert_eq!(lives, vec![3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_clear() {
        let mut store = ParticleStore::with_capacity(8);
        store.push(dummy(1.0));
        store.clear();
        assert!(store.is_empty());
    }
}
