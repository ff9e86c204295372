//! The particle system: builder, per-tick pipeline, export surface.
//!
//! [`ParticleSystem`] owns every simulation component and drives them in a
//! fixed order each tick: emit, integrate, depth-sort, export. Hosts call
//! [`step`](ParticleSystem::step) once per frame, read the attribute
//! buffers, and optionally wire an input event to
//! [`trigger_burst`](ParticleSystem::trigger_burst).
//!
//! # Quick Start
//!
//! ```ignore
//! use plume::prelude::*;
//!
//! let mut system = ParticleSystem::builder()
//!     .with_emission_rate(100.0)
//!     .with_viewpoint(Vec3::new(18.0, 4.0, -20.0))
//!     .build()?;
//!
//! // Per frame:
//! system.step(dt);
//! let buffers = system.buffers();
//! renderer.upload(buffers.positions(), buffers.sizes(), buffers.colors(), buffers.rotations());
//! ```
//!
//! Every knob defaults to the reference plume effect; `build()` only fails
//! on configurations the tick loop could not survive (empty splines, empty
//! spawn ranges, a non-positive rate).

use glam::Vec3;

use crate::buffers::AttributeBuffers;
use crate::depth::sort_back_to_front;
use crate::emitter::{Emitter, SpawnParams};
use crate::error::ConfigError;
use crate::integrator::{Integrator, ScreenBounds};
use crate::particle::{Particle, ParticleStore};
use crate::spline::Spline;

/// Configures and validates a [`ParticleSystem`].
///
/// Consuming `with_*` methods, then [`build`](Self::build).
#[derive(Debug)]
pub struct ParticleSystemBuilder {
    emission_rate: f32,
    spawn: SpawnParams,
    integrator: Integrator,
    viewpoint: Vec3,
    burst_duration: f32,
    seed: Option<u64>,
}

impl Default for ParticleSystemBuilder {
    fn default() -> Self {
        Self {
            emission_rate: 100.0,
            spawn: SpawnParams::default(),
            integrator: Integrator::default(),
            viewpoint: Vec3::new(18.0, 4.0, -20.0),
            burst_duration: 0.25,
            seed: None,
        }
    }
}

impl ParticleSystemBuilder {
    /// Steady emission rate in particles per second.
    pub fn with_emission_rate(mut self, rate: f32) -> Self {
        self.emission_rate = rate;
        self
    }

    /// Spawn randomization ranges.
    pub fn with_spawn_params(mut self, spawn: SpawnParams) -> Self {
        self.spawn = spawn;
        self
    }

    /// Opacity over normalized age.
    pub fn with_alpha_spline(mut self, spline: Spline<f32>) -> Self {
        self.integrator.alpha_spline = spline;
        self
    }

    /// Size multiplier over normalized age.
    pub fn with_size_spline(mut self, spline: Spline<f32>) -> Self {
        self.integrator.size_spline = spline;
        self
    }

    /// Color over normalized age.
    pub fn with_color_spline(mut self, spline: Spline<Vec3>) -> Self {
        self.integrator.color_spline = spline;
        self
    }

    /// Soft-clip fade volume.
    pub fn with_bounds(mut self, bounds: ScreenBounds) -> Self {
        self.integrator.bounds = bounds;
        self
    }

    /// Rotation speed in radians per second.
    pub fn with_angular_rate(mut self, rate: f32) -> Self {
        self.integrator.angular_rate = rate;
        self
    }

    /// Fraction of velocity shed per second.
    pub fn with_drag_coefficient(mut self, coefficient: f32) -> Self {
        self.integrator.drag_coefficient = coefficient;
        self
    }

    /// Distance over which the vertical fade reaches zero.
    pub fn with_vertical_fade_distance(mut self, distance: f32) -> Self {
        self.integrator.vertical_fade_distance = distance;
        self
    }

    /// Depth-sort reference point (typically the camera position).
    pub fn with_viewpoint(mut self, viewpoint: Vec3) -> Self {
        self.viewpoint = viewpoint;
        self
    }

    /// Seconds of emission forced by each [`ParticleSystem::trigger_burst`].
    pub fn with_burst_duration(mut self, seconds: f32) -> Self {
        self.burst_duration = seconds;
        self
    }

    /// Fix the RNG seed for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate the configuration and produce a system.
    ///
    /// Rejections happen here, fail-fast, never mid-tick: an empty spline
    /// or an empty spawn range would otherwise only surface as a panic in
    /// the middle of a frame.
    pub fn build(self) -> Result<ParticleSystem, ConfigError> {
        if !self.emission_rate.is_finite() || self.emission_rate <= 0.0 {
            return Err(ConfigError::NonPositiveRate);
        }
        if self.integrator.alpha_spline.is_empty() {
            return Err(ConfigError::EmptySpline("alpha"));
        }
        if self.integrator.size_spline.is_empty() {
            return Err(ConfigError::EmptySpline("size"));
        }
        if self.integrator.color_spline.is_empty() {
            return Err(ConfigError::EmptySpline("color"));
        }
        for (name, range) in self.spawn.ranges() {
            if !range.start.is_finite() || !range.end.is_finite() || range.start >= range.end {
                return Err(ConfigError::EmptyRange(name));
            }
        }
        for (name, spread) in [
            ("vertical_spread", self.spawn.vertical_spread),
            ("depth_spread", self.spawn.depth_spread),
        ] {
            if !spread.is_finite() || spread < 0.0 {
                return Err(ConfigError::InvalidSpread(name));
            }
        }
        if !self.burst_duration.is_finite() || self.burst_duration <= 0.0 {
            return Err(ConfigError::NonPositiveBurst);
        }

        let emitter = match self.seed {
            Some(seed) => Emitter::with_seed(self.emission_rate, self.spawn, seed),
            None => Emitter::new(self.emission_rate, self.spawn),
        };

        Ok(ParticleSystem {
            emitter,
            integrator: self.integrator,
            store: ParticleStore::new(),
            buffers: AttributeBuffers::new(),
            viewpoint: self.viewpoint,
            burst_duration: self.burst_duration,
        })
    }
}

/// A complete continuous-emission particle simulation.
#[derive(Debug)]
pub struct ParticleSystem {
    emitter: Emitter,
    integrator: Integrator,
    store: ParticleStore,
    buffers: AttributeBuffers,
    viewpoint: Vec3,
    burst_duration: f32,
}

impl ParticleSystem {
    /// Start configuring a system. All knobs default to the reference
    /// plume effect.
    pub fn builder() -> ParticleSystemBuilder {
        ParticleSystemBuilder::default()
    }

    /// Advance the simulation by `dt` seconds.
    ///
    /// Runs emission, integration, depth sorting and attribute export, in
    /// that order. Non-finite or negative `dt` is clamped to zero rather
    /// than propagated into the physics; callers are expected to clamp the
    /// magnitude upstream (see [`FrameClock`](crate::clock::FrameClock)).
    pub fn step(&mut self, dt: f32) {
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };

        self.emitter.emit(dt, &mut self.store);
        self.integrator.update(dt, &mut self.store);
        sort_back_to_front(self.store.as_mut_slice(), self.viewpoint);
        self.buffers.rebuild(&self.store);
    }

    /// Force an emission pass of the configured burst duration,
    /// independent of the steady-rate accumulator. Wire this to an
    /// external event such as a key press. Returns the number spawned.
    ///
    /// Burst particles join the store immediately and are integrated,
    /// sorted and exported by the next [`step`](Self::step).
    pub fn trigger_burst(&mut self) -> usize {
        self.emitter.burst(self.burst_duration, &mut self.store)
    }

    /// The attribute arrays exported by the most recent step.
    #[inline]
    pub fn buffers(&self) -> &AttributeBuffers {
        &self.buffers
    }

    /// Number of live particles.
    #[inline]
    pub fn particle_count(&self) -> usize {
        self.store.len()
    }

    /// The live particles, in last-sorted order.
    #[inline]
    pub fn particles(&self) -> &[Particle] {
        self.store.as_slice()
    }

    /// The emitter, exposed for rate and accumulator introspection.
    #[inline]
    pub fn emitter(&self) -> &Emitter {
        &self.emitter
    }

    /// Current depth-sort reference point.
    #[inline]
    pub fn viewpoint(&self) -> Vec3 {
        self.viewpoint
    }

    /// Move the depth-sort reference point (the host camera moved).
    pub fn set_viewpoint(&mut self, viewpoint: Vec3) {
        self.viewpoint = viewpoint;
    }
}
