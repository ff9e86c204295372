//! Continuous particle emission.
//!
//! The [`Emitter`] converts elapsed time into a whole number of spawns using
//! a fractional-carry accumulator: leftover fractions persist across ticks,
//! so the long-run spawn count tracks `rate * time` with no systematic
//! drift regardless of tick duration.
//!
//! Two entry points:
//!
//! | Method | Accumulator | Use |
//! |--------|-------------|-----|
//! | [`Emitter::emit`] | carried across ticks | steady per-frame emission |
//! | [`Emitter::burst`] | ignored | externally triggered one-off bursts |
//!
//! Spawn randomization is configured through [`SpawnParams`]; every field
//! defaults to the reference plume effect.

use std::f32::consts::PI;
use std::ops::Range;

use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::particle::{Particle, ParticleStore};

/// Tolerance added before flooring the accumulator. `f32` quantization of a
/// frame delta can land a hair under a whole particle (0.01 s stores as
/// just under 1/100), and emission must not starve on that.
const EMIT_EPSILON: f32 = 1e-4;

/// Randomization ranges applied to each spawned particle.
///
/// Particles spawn on a plane at `spawn_offset` on the x axis and travel
/// back toward the origin: the x velocity range is predominantly negative
/// while y and z get small side motion. Jitter spreads are symmetric about
/// the spawn offset.
///
/// # Example
///
/// ```ignore
/// let params = SpawnParams {
///     life_range: 0.5..2.0,
///     travel_speed: -6.0..0.0,
///     ..SpawnParams::default()
/// };
/// ```
#[derive(Clone, Debug)]
pub struct SpawnParams {
    /// Spawn-plane offset; the travel axis is x.
    pub spawn_offset: Vec3,
    /// Half-extent of uniform jitter on y.
    pub vertical_spread: f32,
    /// Half-extent of uniform jitter on z.
    pub depth_spread: f32,
    /// Lifetime range in seconds; also becomes `max_life`.
    pub life_range: Range<f32>,
    /// Base size range.
    pub size_range: Range<f32>,
    /// Initial orientation range in radians.
    pub rotation_range: Range<f32>,
    /// Velocity range on the travel (x) axis.
    pub travel_speed: Range<f32>,
    /// Velocity range on each of the two side axes.
    pub side_speed: Range<f32>,
    /// Opacity at spawn.
    pub initial_alpha: f32,
}

impl Default for SpawnParams {
    fn default() -> Self {
        Self {
            spawn_offset: Vec3::new(25.0, 0.0, 0.0),
            vertical_spread: 2.0,
            depth_spread: 20.0,
            life_range: 1.25..6.25,
            size_range: 2.5..3.75,
            rotation_range: 0.0..13.0 * PI,
            travel_speed: -14.0..4.0,
            side_speed: -0.5..4.5,
            initial_alpha: 0.8,
        }
    }
}

impl SpawnParams {
    /// All randomization ranges, paired with names for validation messages.
    pub(crate) fn ranges(&self) -> [(&'static str, &Range<f32>); 5] {
        [
            ("life_range", &self.life_range),
            ("size_range", &self.size_range),
            ("rotation_range", &self.rotation_range),
            ("travel_speed", &self.travel_speed),
            ("side_speed", &self.side_speed),
        ]
    }
}

/// Rate-controlled particle source.
///
/// Owns the fractional-carry accumulator and the RNG. The accumulator is an
/// explicit field here, not ambient state: it is the only emission state
/// that survives across ticks.
#[derive(Debug)]
pub struct Emitter {
    rate: f32,
    accumulator: f32,
    params: SpawnParams,
    rng: SmallRng,
}

impl Emitter {
    /// Create an emitter spawning `rate` particles per second.
    pub fn new(rate: f32, params: SpawnParams) -> Self {
        Self {
            rate,
            accumulator: 0.0,
            params,
            rng: SmallRng::from_entropy(),
        }
    }

    /// Create an emitter with a fixed RNG seed, for reproducible runs.
    pub fn with_seed(rate: f32, params: SpawnParams, seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            ..Self::new(rate, params)
        }
    }

    /// Emission rate in particles per second.
    #[inline]
    pub fn rate(&self) -> f32 {
        self.rate
    }

    /// Current fractional particle debt.
    #[inline]
    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    /// Steady-state emission for one tick of `dt` seconds.
    ///
    /// Adds `dt` to the accumulator, spawns `floor(accumulator * rate)`
    /// particles into `store`, and retains the fractional remainder.
    /// Returns the number spawned.
    pub fn emit(&mut self, dt: f32, store: &mut ParticleStore) -> usize {
        self.accumulator += dt;
        let n = (self.accumulator * self.rate + EMIT_EPSILON).floor().max(0.0);
        self.accumulator -= n / self.rate;
        self.spawn(n as usize, store)
    }

    /// Burst emission from raw elapsed time, bypassing the accumulator.
    ///
    /// Spawns `floor(elapsed * rate)` particles. The steady-state
    /// accumulator is left untouched, so a burst never perturbs the
    /// long-run emission rate. Returns the number spawned.
    pub fn burst(&mut self, elapsed: f32, store: &mut ParticleStore) -> usize {
        let n = (elapsed * self.rate + EMIT_EPSILON).floor().max(0.0);
        self.spawn(n as usize, store)
    }

    fn spawn(&mut self, count: usize, store: &mut ParticleStore) -> usize {
        for _ in 0..count {
            let particle = self.spawn_one();
            store.push(particle);
        }
        count
    }

    fn spawn_one(&mut self) -> Particle {
        let p = &self.params;
        let life = self.rng.gen_range(p.life_range.clone());
        let position = p.spawn_offset
            + Vec3::new(
                0.0,
                jitter(&mut self.rng, p.vertical_spread),
                jitter(&mut self.rng, p.depth_spread),
            );
        let velocity = Vec3::new(
            self.rng.gen_range(p.travel_speed.clone()),
            self.rng.gen_range(p.side_speed.clone()),
            self.rng.gen_range(p.side_speed.clone()),
        );
        let base_size = self.rng.gen_range(p.size_range.clone());

        Particle {
            position,
            velocity,
            base_size,
            current_size: base_size,
            color: Vec3::ONE,
            alpha: p.initial_alpha,
            life,
            max_life: life,
            rotation: self.rng.gen_range(p.rotation_range.clone()),
        }
    }
}

/// Uniform jitter in `[-spread, spread)`; zero spread means no jitter.
#[inline]
fn jitter(rng: &mut SmallRng, spread: f32) -> f32 {
    if spread > 0.0 {
        rng.gen_range(-spread..spread)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emitter(rate: f32) -> Emitter {
        Emitter::with_seed(rate, SpawnParams::default(), 7)
    }

    #[test]
    fn test_emit_whole_particles_only() {
        let mut store = ParticleStore::new();
        let mut e = emitter(100.0);

        // 5ms at 100/s is half a particle: nothing spawns, debt is carried.
        assert_eq!(e.emit(0.005, &mut store), 0);
        assert_eq!(store.len(), 0);
        assert!(e.accumulator() > 0.0);

        // Second 5ms completes the particle.
        assert_eq!(e.emit(0.005, &mut store), 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_emit_total_tracks_rate() {
        let mut store = ParticleStore::new();
        let mut e = emitter(100.0);

        // Irregular tick sizes summing to 1.36s.
        let ticks = [0.016, 0.033, 0.007, 0.250, 0.001, 0.5, 0.333, 0.220];
        let total: f32 = ticks.iter().sum();
        let mut spawned = 0;
        for dt in ticks {
            spawned += e.emit(dt, &mut store);
        }

        let expected = (100.0 * total).floor() as isize;
        assert!((spawned as isize - expected).abs() <= 1);
    }

    #[test]
    fn test_accumulator_keeps_remainder() {
        let mut store = ParticleStore::new();
        let mut e = emitter(100.0);
        e.emit(0.017, &mut store);
        // 1.7 particles worth of time: 1 spawned, 0.7/100 s retained.
        assert_eq!(store.len(), 1);
        assert!((e.accumulator() - 0.007).abs() < 1e-6);
    }

    #[test]
    fn test_spawn_fields_in_range() {
        let mut store = ParticleStore::new();
        let mut e = emitter(100.0);
        e.emit(1.0, &mut store);
        assert_eq!(store.len(), 100);

        for p in store.iter() {
            assert_eq!(p.life, p.max_life);
            assert!(p.max_life >= 1.25 && p.max_life < 6.25);
            assert!(p.base_size >= 2.5 && p.base_size < 3.75);
            assert!(p.rotation >= 0.0 && p.rotation < 13.0 * PI);
            assert_eq!(p.position.x, 25.0);
            assert!(p.position.y.abs() <= 2.0);
            assert!(p.position.z.abs() <= 20.0);
            assert!(p.velocity.x >= -14.0 && p.velocity.x < 4.0);
            assert!(p.velocity.y >= -0.5 && p.velocity.y < 4.5);
            assert!(p.velocity.z >= -0.5 && p.velocity.z < 4.5);
            assert_eq!(p.alpha, 0.8);
        }
    }

    #[test]
    fn test_burst_ignores_accumulator() {
        let mut store = ParticleStore::new();
        let mut e = emitter(100.0);
        e.emit(0.005, &mut store);
        let debt_before = e.accumulator();

        assert_eq!(e.burst(0.25, &mut store), 25);
        assert_eq!(store.len(), 25);
        assert_eq!(e.accumulator(), debt_before);
    }

    #[test]
    fn test_burst_negative_elapsed_spawns_nothing() {
        let mut store = ParticleStore::new();
        let mut e = emitter(100.0);
        assert_eq!(e.burst(-1.0, &mut store), 0);
    }

    #[test]
    fn test_seeded_emitters_are_deterministic() {
        let mut a = ParticleStore::new();
        let mut b = ParticleStore::new();
        Emitter::with_seed(100.0, SpawnParams::default(), 42).emit(0.1, &mut a);
        Emitter::with_seed(100.0, SpawnParams::default(), 42).emit(0.1, &mut b);

        assert_eq!(a.len(), b.len());
        for (pa, pb) in a.iter().zip(b.iter()) {
            assert_eq!(pa.position, pb.position);
            assert_eq!(pa.velocity, pb.velocity);
            assert_eq!(pa.max_life, pb.max_life);
        }
    }
}
