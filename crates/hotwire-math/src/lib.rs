#![warn(missing_docs)]

//! Math types for the hotwire profile cutter.
//!
//! Thin wrappers around nalgebra providing the planar types every stage of
//! the cutting pipeline shares: points, vectors, and the vertex matching
//! policy used when segment endpoints and anchors are compared.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// A point in the profile plane.
pub type Point2 = nalgebra::Point2<f64>;

/// A vector in the profile plane.
pub type Vec2 = Vector2<f64>;

/// Midpoint of two points.
pub fn midpoint(a: &Point2, b: &Point2) -> Point2 {
    Point2::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// Linear interpolation from `a` (t = 0) to `b` (t = 1).
pub fn lerp(a: &Point2, b: &Point2, t: f64) -> Point2 {
    a + (b - a) * t
}

/// Rotate a vector counter-clockwise by `angle` radians.
pub fn rotate(v: &Vec2, angle: f64) -> Vec2 {
    let (s, c) = angle.sin_cos();
    Vec2::new(c * v.x - s * v.y, s * v.x + c * v.y)
}

/// Vertex matching policy.
///
/// Shared vertices of an imported profile are expected to carry identical
/// coordinates, so the default policy is exact equality. A positive `linear`
/// distance switches to distance-based matching, which tolerates rounding
/// noise in the source file but can merge vertices that are genuinely
/// distinct.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    /// Maximum distance between two points considered the same vertex.
    /// Zero means exact coordinate equality.
    pub linear: f64,
}

impl Tolerance {
    /// Exact coordinate equality.
    pub const EXACT: Self = Self { linear: 0.0 };

    /// Distance-based matching within `linear` length units.
    pub fn within(linear: f64) -> Self {
        Self {
            linear: linear.max(0.0),
        }
    }

    /// Whether this policy compares coordinates exactly.
    pub fn is_exact(&self) -> bool {
        self.linear <= 0.0
    }

    /// Check if two points are the same vertex under this policy.
    pub fn points_equal(&self, a: &Point2, b: &Point2) -> bool {
        if self.is_exact() {
            a == b
        } else {
            (a - b).norm() <= self.linear
        }
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::EXACT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_midpoint() {
        let m = midpoint(&Point2::new(0.0, 0.0), &Point2::new(2.0, 4.0));
        assert_relative_eq!(m.x, 1.0);
        assert_relative_eq!(m.y, 2.0);
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = Point2::new(1.0, 1.0);
        let b = Point2::new(3.0, -1.0);
        assert_eq!(lerp(&a, &b, 0.0), a);
        let q = lerp(&a, &b, 0.25);
        assert_relative_eq!(q.x, 1.5);
        assert_relative_eq!(q.y, 0.5);
    }

    #[test]
    fn test_rotate_90() {
        let r = rotate(&Vec2::new(1.0, 0.0), PI / 2.0);
        assert!(r.x.abs() < 1e-12);
        assert_relative_eq!(r.y, 1.0);
    }

    #[test]
    fn test_exact_tolerance() {
        let tol = Tolerance::default();
        let a = Point2::new(1.0, 2.0);
        assert!(tol.points_equal(&a, &Point2::new(1.0, 2.0)));
        assert!(!tol.points_equal(&a, &Point2::new(1.0 + 1e-12, 2.0)));
    }

    #[test]
    fn test_linear_tolerance() {
        let tol = Tolerance::within(1e-6);
        let a = Point2::new(1.0, 2.0);
        assert!(tol.points_equal(&a, &Point2::new(1.0 + 1e-7, 2.0)));
        assert!(!tol.points_equal(&a, &Point2::new(1.001, 2.0)));
        assert!(Tolerance::within(-1.0).is_exact());
    }
}
