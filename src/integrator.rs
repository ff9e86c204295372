//! Per-tick particle integration.
//!
//! The [`Integrator`] advances every live particle through one tick: age it,
//! purge it if expired, evaluate the value splines at its normalized age,
//! attenuate alpha and size near the configured screen bounds, then apply
//! kinematics and drag.
//!
//! The update is deliberately ordered: expired particles are purged before
//! any derived field is recomputed, so a particle never reaches the export
//! buffers on the tick it dies, and boundary fades read the position from
//! before this tick's movement.

use glam::Vec3;

use crate::particle::ParticleStore;
use crate::spline::Spline;

/// Soft-clip volume for boundary fading.
///
/// Horizontal fading measures distance from the `right` edge for particles
/// past either horizontal bound. That asymmetry is a deliberate part of the
/// effect (it produces a single sharp cutoff edge) and is kept as-is.
#[derive(Clone, Copy, Debug)]
pub struct ScreenBounds {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Default for ScreenBounds {
    fn default() -> Self {
        Self {
            left: -30.0,
            right: 25.0,
            top: 2.0,
            bottom: 0.0,
        }
    }
}

/// Reference alpha spline: ease in fast, hold, fade out.
pub fn plume_alpha_spline() -> Spline<f32> {
    Spline::new()
        .with_knot(0.0, 0.0)
        .with_knot(0.1, 0.8)
        .with_knot(0.6, 0.8)
        .with_knot(1.0, 0.0)
}

/// Reference size spline: swell to 5x mid-life, shrink back.
pub fn plume_size_spline() -> Spline<f32> {
    Spline::new()
        .with_knot(0.0, 1.0)
        .with_knot(0.5, 5.0)
        .with_knot(1.0, 1.0)
}

/// Reference color spline: pale blue-white cooling to deep indigo.
pub fn plume_color_spline() -> Spline<Vec3> {
    Spline::new()
        .with_knot(0.0, Vec3::new(237.0, 239.0, 255.0) / 255.0)
        .with_knot(1.0, Vec3::new(55.0, 69.0, 173.0) / 255.0)
}

/// Advances particles through aging, fading, kinematics and drag.
#[derive(Debug)]
pub struct Integrator {
    /// Opacity over normalized age.
    pub alpha_spline: Spline<f32>,
    /// Size multiplier over normalized age.
    pub size_spline: Spline<f32>,
    /// Color over normalized age.
    pub color_spline: Spline<Vec3>,
    /// Soft-clip volume.
    pub bounds: ScreenBounds,
    /// Rotation speed in radians per second.
    pub angular_rate: f32,
    /// Fraction of velocity shed per second.
    pub drag_coefficient: f32,
    /// Distance over which the vertical fade reaches zero.
    pub vertical_fade_distance: f32,
}

impl Default for Integrator {
    fn default() -> Self {
        Self {
            alpha_spline: plume_alpha_spline(),
            size_spline: plume_size_spline(),
            color_spline: plume_color_spline(),
            bounds: ScreenBounds::default(),
            angular_rate: 0.6,
            drag_coefficient: 0.1,
            vertical_fade_distance: 5.0,
        }
    }
}

impl Integrator {
    /// Advance every particle in `store` by `dt` seconds.
    pub fn update(&self, dt: f32, store: &mut ParticleStore) {
        for p in store.iter_mut() {
            p.life -= dt;
        }
        // Purge before recomputing derived fields: dead particles must not
        // appear in the buffers exported for this tick.
        store.purge_expired();

        for p in store.iter_mut() {
            let t = p.age_fraction();

            p.rotation += dt * self.angular_rate;
            p.alpha = self.alpha_spline.get(t);
            p.current_size = p.base_size * self.size_spline.get(t);
            p.color = self.color_spline.get(t);

            // Horizontal fade. The right edge is the distance reference for
            // both crossings; see ScreenBounds.
            if p.position.x < self.bounds.left || p.position.x > self.bounds.right {
                let fade =
                    (1.0 - ((p.position.x - self.bounds.right).abs() * 10.0).powi(8)).max(0.0);
                p.alpha *= fade;
                p.current_size *= fade;
            }

            if p.position.y < self.bounds.bottom || p.position.y > self.bounds.top {
                let fade = (1.0
                    - (p.position.y - self.bounds.top).abs() / self.vertical_fade_distance)
                    .max(0.0);
                p.alpha *= fade;
                p.current_size *= fade;
            }

            p.position += p.velocity * dt;

            let drag = p.velocity * dt * self.drag_coefficient;
            p.velocity -= Vec3::new(
                drag_component(drag.x, p.velocity.x),
                drag_component(drag.y, p.velocity.y),
                drag_component(drag.z, p.velocity.z),
            );
        }
    }
}

/// Clamp one drag component so it can cancel the matching velocity
/// component at most, never reverse it.
#[inline]
fn drag_component(drag: f32, velocity: f32) -> f32 {
    velocity.signum() * drag.abs().min(velocity.abs())
}
