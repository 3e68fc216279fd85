//! Vector math re-exported from [`glam`], plus scalar helpers for pixel
//! coordinates.
//!
//! Pixel-space values are `f32`. An unresolved coordinate is represented by
//! `NaN` so that it propagates through arithmetic and can be tested with
//! [`is_resolved`].
//!
//! ```
//! use ordinate_core::math::{Vec2, lerp, is_resolved};
//!
//! let p = Vec2::new(10.0, 20.0);
//! assert_eq!(lerp(0.0, p.y, 0.5), 10.0);
//! assert!(!is_resolved(f32::NAN));
//! ```
//!
//! [`glam`]: https://docs.rs/glam

pub use glam::{DVec2, Vec2, Vec3, Vec4, vec2};

/// Linear interpolation between `a` and `b`.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Linear interpolation between two points.
#[inline]
pub fn lerp_vec2(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    a.lerp(b, t)
}

/// Returns true if a pixel coordinate has been resolved to a finite value.
#[inline]
pub fn is_resolved(value: f32) -> bool {
    value.is_finite()
}

/// Approximate equality for pixel coordinates.
#[inline]
pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() <= 1e-4 * a.abs().max(b.abs()).max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(0.0, 10.0, 0.0), 0.0);
        assert_eq!(lerp(0.0, 10.0, 1.0), 10.0);
        assert_eq!(lerp(100.0, 40.0, 0.5), 70.0);
        assert_eq!(lerp_vec2(Vec2::ZERO, Vec2::new(4.0, 8.0), 0.25), Vec2::new(1.0, 2.0));
    }

    #[test]
    fn test_is_resolved() {
        assert!(is_resolved(0.0));
        assert!(!is_resolved(f32::NAN));
        assert!(!is_resolved(f32::INFINITY));
    }

    #[test]
    fn test_approx_eq() {
        assert!(approx_eq(1.0, 1.00001));
        assert!(!approx_eq(1.0, 1.1));
    }
}
