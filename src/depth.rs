//! Back-to-front depth ordering.
//!
//! Translucent particles composite correctly only when drawn farthest
//! first, so the live set is fully resorted against the viewpoint every
//! tick. No stability is required: particles carry no identity between
//! ticks.

use glam::Vec3;

use crate::particle::Particle;

/// Sort `particles` by descending distance from `viewpoint`.
///
/// Uses squared distance (monotone in distance) as the key and
/// `f32::total_cmp`, so non-finite positions order deterministically
/// instead of panicking.
pub fn sort_back_to_front(particles: &mut [Particle], viewpoint: Vec3) {
    particles.sort_unstable_by(|a, b| {
        let da = viewpoint.distance_squared(a.position);
        let db = viewpoint.distance_squared(b.position);
        db.total_cmp(&da)
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(position: Vec3) -> Particle {
        Particle {
            position,
            velocity: Vec3::ZERO,
            base_size: 1.0,
            current_size: 1.0,
            color: Vec3::ONE,
            alpha: 1.0,
            life: 1.0,
            max_life: 1.0,
            rotation: 0.0,
        }
    }

    #[test]
    fn test_sorts_farthest_first() {
        let viewpoint = Vec3::new(18.0, 4.0, -20.0);
        let mut particles = vec![
            at(Vec3::new(18.0, 4.0, -19.0)),
            at(Vec3::new(-10.0, 0.0, 0.0)),
            at(Vec3::new(5.0, 1.0, 3.0)),
            at(Vec3::new(18.0, 4.0, -20.0)),
        ];
        sort_back_to_front(&mut particles, viewpoint);

        for pair in particles.windows(2) {
            let d0 = viewpoint.distance(pair[0].position);
            let d1 = viewpoint.distance(pair[1].position);
            assert!(d0 >= d1, "{d0} before {d1}");
        }
    }

    #[test]
    fn test_empty_and_single_are_fine() {
        let mut none: Vec<Particle> = Vec::new();
        sort_back_to_front(&mut none, Vec3::ZERO);

        let mut one = vec![at(Vec3::ONE)];
        sort_back_to_front(&mut one, Vec3::ZERO);
        assert_eq!(one.len(), 1);
    }
}
