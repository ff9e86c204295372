//! Piecewise-linear value splines.
//!
//! A [`Spline`] maps a normalized age parameter in `[0, 1]` to a value:
//! alpha, size multiplier, color, or anything else implementing [`Blend`].
//! Lookups clamp at the endpoints and interpolate linearly between knots.
//!
//! # Example
//!
//! ```ignore
//! use plume::spline::Spline;
//!
//! let mut alpha = Spline::new();
//! alpha.add_knot(0.0, 0.0);
//! alpha.add_knot(0.1, 0.8);
//! alpha.add_knot(0.6, 0.8);
//! alpha.add_knot(1.0, 0.0);
//!
//! assert_eq!(alpha.get(0.3), 0.8);
//! ```
//!
//! # Knot Ordering
//!
//! `add_knot` appends without sorting. The lookup walks knots in stored
//! order, so knots must be added in non-decreasing `t` order for correct
//! interior interpolation. Out-of-order insertion is not an error, but the
//! result is computed against the as-stored sequence.

use glam::{Vec3, Vec4};

/// Linear interpolation policy for spline values.
///
/// Implemented for `f32` and the glam vector types. Implement it for your
/// own type to drive it from a [`Spline`].
pub trait Blend: Copy {
    /// Combine `a` and `b` at fractional weight `t` in `[0, 1]`.
    fn blend(t: f32, a: Self, b: Self) -> Self;
}

impl Blend for f32 {
    #[inline]
    fn blend(t: f32, a: Self, b: Self) -> Self {
        a + (b - a) * t
    }
}

impl Blend for Vec3 {
    #[inline]
    fn blend(t: f32, a: Self, b: Self) -> Self {
        a.lerp(b, t)
    }
}

impl Blend for Vec4 {
    #[inline]
    fn blend(t: f32, a: Self, b: Self) -> Self {
        a.lerp(b, t)
    }
}

/// A piecewise-linear lookup table over knots `(t, value)`.
///
/// Queries below the first knot return the first value, queries above the
/// last knot return the last value, and queries landing exactly on a knot
/// return that knot's value with no blending error.
///
/// A spline with zero knots has no defined value; configuration layers
/// reject empty splines before any query can happen (see
/// [`ConfigError::EmptySpline`](crate::error::ConfigError)).
#[derive(Clone, Debug, Default)]
pub struct Spline<V: Blend> {
    knots: Vec<(f32, V)>,
}

impl<V: Blend> Spline<V> {
    /// Create an empty spline.
    pub fn new() -> Self {
        Self { knots: Vec::new() }
    }

    /// Append a knot. Knots are not sorted; add them in `t` order.
    pub fn add_knot(&mut self, t: f32, value: V) {
        self.knots.push((t, value));
    }

    /// Chaining variant of [`add_knot`](Self::add_knot).
    pub fn with_knot(mut self, t: f32, value: V) -> Self {
        self.add_knot(t, value);
        self
    }

    /// Number of knots.
    #[inline]
    pub fn len(&self) -> usize {
        self.knots.len()
    }

    /// Whether the spline has no knots.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.knots.is_empty()
    }

    /// Largest knot value, by the given key. Useful for bounds checks.
    pub fn max_value_by(&self, mut key: impl FnMut(&V) -> f32) -> Option<f32> {
        self.knots
            .iter()
            .map(|(_, v)| key(v))
            .fold(None, |acc, x| Some(acc.map_or(x, |m: f32| m.max(x))))
    }

    /// Evaluate the spline at `t`.
    ///
    /// Walks the stored knots remembering the last one still below the
    /// query, then blends toward its successor. Must not be called on an
    /// empty spline.
    pub fn get(&self, t: f32) -> V {
        debug_assert!(!self.knots.is_empty(), "Spline::get on empty spline");

        let mut lower = 0;
        for (i, knot) in self.knots.iter().enumerate() {
            if knot.0 >= t {
                break;
            }
            lower = i;
        }
        let upper = (lower + 1).min(self.knots.len() - 1);
        if lower == upper {
            return self.knots[lower].1;
        }

        let (t0, a) = self.knots[lower];
        let (t1, b) = self.knots[upper];
        let w = (t - t0) / (t1 - t0);
        // Return knot values exactly at segment ends; blending a + (b-a)*1
        // is not guaranteed to round back to b.
        if w <= 0.0 {
            a
        } else if w >= 1.0 {
            b
        } else {
            V::blend(w, a, b)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp() -> Spline<f32> {
        Spline::new()
            .with_knot(0.0, 0.0)
            .with_knot(0.1, 0.8)
            .with_knot(0.6, 0.8)
            .with_knot(1.0, 0.0)
    }

    #[test]
    fn test_get_below_first_knot_clamps() {
        let s = Spline::new().with_knot(0.2, 3.0).with_knot(0.8, 7.0);
        assert_eq!(s.get(0.0), 3.0);
        assert_eq!(s.get(-1.0), 3.0);
    }

    #[test]
    fn test_get_above_last_knot_clamps() {
        let s = Spline::new().with_knot(0.2, 3.0).with_knot(0.8, 7.0);
        assert_eq!(s.get(1.0), 7.0);
        assert_eq!(s.get(100.0), 7.0);
    }

    #[test]
    fn test_get_at_knots_is_exact() {
        let s = ramp();
        assert_eq!(s.get(0.0), 0.0);
        assert_eq!(s.get(0.1), 0.8);
        assert_eq!(s.get(0.6), 0.8);
        assert_eq!(s.get(1.0), 0.0);
    }

    #[test]
    fn test_get_interpolates_linearly() {
        let s = Spline::new().with_knot(0.0, 0.0).with_knot(1.0, 10.0);
        assert!((s.get(0.25) - 2.5).abs() < 1e-6);
        assert!((s.get(0.5) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_get_plateau_is_flat() {
        let s = ramp();
        assert!((s.get(0.3) - 0.8).abs() < 1e-6);
        assert!((s.get(0.55) - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_single_knot_is_constant() {
        let s = Spline::new().with_knot(0.5, 4.0);
        assert_eq!(s.get(0.0), 4.0);
        assert_eq!(s.get(0.5), 4.0);
        assert_eq!(s.get(1.0), 4.0);
    }

    #[test]
    fn test_vec3_blend() {
        let s = Spline::new()
            .with_knot(0.0, Vec3::ZERO)
            .with_knot(1.0, Vec3::ONE);
        let mid = s.get(0.5);
        assert!((mid - Vec3::splat(0.5)).length() < 1e-6);
    }

    #[test]
    fn test_max_value_by() {
        let s = ramp();
        assert_eq!(s.max_value_by(|v| *v), Some(0.8));
        let empty: Spline<f32> = Spline::new();
        assert_eq!(empty.max_value_by(|v| *v), None);
    }
}
