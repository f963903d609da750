//! Curve primitives of a profile.

use hotwire_math::{rotate, Point2, Vec2};

/// Gauss-Legendre nodes on [-1, 1] (5-point rule).
const GAUSS_NODES: [f64; 5] = [
    0.0,
    -0.538_469_310_105_683_1,
    0.538_469_310_105_683_1,
    -0.906_179_845_938_664,
    0.906_179_845_938_664,
];

/// Gauss-Legendre weights matching [`GAUSS_NODES`].
const GAUSS_WEIGHTS: [f64; 5] = [
    0.568_888_888_888_888_9,
    0.478_628_670_499_366_5,
    0.478_628_670_499_366_5,
    0.236_926_885_056_189_1,
    0.236_926_885_056_189_1,
];

/// Number of sub-intervals for numeric arc length.
const LENGTH_SUBDIVISIONS: usize = 32;

/// An elliptical arc in center parameterization.
///
/// The arc sweeps from `start_angle` by `sweep` radians (positive is
/// counter-clockwise in the ellipse frame). The endpoints are stored so that
/// evaluation at `t = 0` and `t = 1` returns them bit-exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct EllipticalArc {
    /// Start point.
    pub start: Point2,
    /// End point.
    pub end: Point2,
    /// Center of the ellipse.
    pub center: Point2,
    /// Semi-axis lengths along the rotated x and y axes.
    pub radii: Vec2,
    /// Rotation of the ellipse x axis (radians).
    pub x_rotation: f64,
    /// Parametric angle at the start point (radians).
    pub start_angle: f64,
    /// Signed parametric sweep (radians).
    pub sweep: f64,
}

impl EllipticalArc {
    /// Create an arc, computing its endpoints from the parameterization.
    pub fn new(center: Point2, radii: Vec2, x_rotation: f64, start_angle: f64, sweep: f64) -> Self {
        let mut arc = Self {
            start: center,
            end: center,
            center,
            radii,
            x_rotation,
            start_angle,
            sweep,
        };
        arc.start = arc.point_at_angle(start_angle);
        arc.end = arc.point_at_angle(start_angle + sweep);
        arc
    }

    /// Circular arc of `radius` around `center`.
    pub fn circular(center: Point2, radius: f64, start_angle: f64, sweep: f64) -> Self {
        Self::new(center, Vec2::new(radius, radius), 0.0, start_angle, sweep)
    }

    fn point_at_angle(&self, theta: f64) -> Point2 {
        let local = Vec2::new(self.radii.x * theta.cos(), self.radii.y * theta.sin());
        self.center + rotate(&local, self.x_rotation)
    }

    fn is_circular(&self) -> bool {
        self.radii.x == self.radii.y
    }

    fn reversed(&self) -> Self {
        Self {
            start: self.end,
            end: self.start,
            center: self.center,
            radii: self.radii,
            x_rotation: self.x_rotation,
            start_angle: self.start_angle + self.sweep,
            sweep: -self.sweep,
        }
    }
}

/// One primitive of a profile.
#[derive(Debug, Clone, PartialEq)]
pub enum CurveSegment {
    /// A straight line from start to end.
    Line {
        /// Start point.
        start: Point2,
        /// End point.
        end: Point2,
    },
    /// A circular or elliptical arc.
    Arc(EllipticalArc),
    /// A quadratic Bézier curve.
    Quadratic {
        /// Start point.
        start: Point2,
        /// Control point.
        control: Point2,
        /// End point.
        end: Point2,
    },
    /// A cubic Bézier curve.
    Cubic {
        /// Start point.
        start: Point2,
        /// First control point.
        control1: Point2,
        /// Second control point.
        control2: Point2,
        /// End point.
        end: Point2,
    },
}

impl CurveSegment {
    /// Straight line segment.
    pub fn line(start: Point2, end: Point2) -> Self {
        CurveSegment::Line { start, end }
    }

    /// Quadratic Bézier segment.
    pub fn quadratic(start: Point2, control: Point2, end: Point2) -> Self {
        CurveSegment::Quadratic {
            start,
            control,
            end,
        }
    }

    /// Cubic Bézier segment.
    pub fn cubic(start: Point2, control1: Point2, control2: Point2, end: Point2) -> Self {
        CurveSegment::Cubic {
            start,
            control1,
            control2,
            end,
        }
    }

    /// Get the start point of this segment.
    pub fn start(&self) -> Point2 {
        match self {
            CurveSegment::Line { start, .. } => *start,
            CurveSegment::Arc(arc) => arc.start,
            CurveSegment::Quadratic { start, .. } => *start,
            CurveSegment::Cubic { start, .. } => *start,
        }
    }

    /// Get the end point of this segment.
    pub fn end(&self) -> Point2 {
        match self {
            CurveSegment::Line { end, .. } => *end,
            CurveSegment::Arc(arc) => arc.end,
            CurveSegment::Quadratic { end, .. } => *end,
            CurveSegment::Cubic { end, .. } => *end,
        }
    }

    /// Evaluate the segment at parameter `t` in `[0, 1]`.
    ///
    /// The parameter is the curve's own, not arc length. Values outside the
    /// range are clamped to the endpoints.
    pub fn at(&self, t: f64) -> Point2 {
        if t <= 0.0 {
            return self.start();
        }
        if t >= 1.0 {
            return self.end();
        }
        match self {
            CurveSegment::Line { start, end } => start + (end - start) * t,
            CurveSegment::Arc(arc) => arc.point_at_angle(arc.start_angle + arc.sweep * t),
            CurveSegment::Quadratic {
                start,
                control,
                end,
            } => {
                let mt = 1.0 - t;
                Point2::from(
                    start.coords * (mt * mt) + control.coords * (2.0 * mt * t) + end.coords * (t * t),
                )
            }
            CurveSegment::Cubic {
                start,
                control1,
                control2,
                end,
            } => {
                let mt = 1.0 - t;
                Point2::from(
                    start.coords * (mt * mt * mt)
                        + control1.coords * (3.0 * mt * mt * t)
                        + control2.coords * (3.0 * mt * t * t)
                        + end.coords * (t * t * t),
                )
            }
        }
    }

    /// First derivative with respect to the curve parameter.
    pub fn derivative(&self, t: f64) -> Vec2 {
        let t = t.clamp(0.0, 1.0);
        match self {
            CurveSegment::Line { start, end } => end - start,
            CurveSegment::Arc(arc) => {
                let theta = arc.start_angle + arc.sweep * t;
                let local = Vec2::new(-arc.radii.x * theta.sin(), arc.radii.y * theta.cos());
                rotate(&local, arc.x_rotation) * arc.sweep
            }
            CurveSegment::Quadratic {
                start,
                control,
                end,
            } => (control - start) * (2.0 * (1.0 - t)) + (end - control) * (2.0 * t),
            CurveSegment::Cubic {
                start,
                control1,
                control2,
                end,
            } => {
                let mt = 1.0 - t;
                (control1 - start) * (3.0 * mt * mt)
                    + (control2 - control1) * (6.0 * mt * t)
                    + (end - control2) * (3.0 * t * t)
            }
        }
    }

    /// Get the arc length of this segment.
    pub fn length(&self) -> f64 {
        match self {
            CurveSegment::Line { start, end } => (end - start).norm(),
            CurveSegment::Arc(arc) if arc.is_circular() => arc.radii.x.abs() * arc.sweep.abs(),
            _ => self.integrate_speed(),
        }
    }

    fn integrate_speed(&self) -> f64 {
        let h = 1.0 / LENGTH_SUBDIVISIONS as f64;
        let mut total = 0.0;
        for i in 0..LENGTH_SUBDIVISIONS {
            let mid = (i as f64 + 0.5) * h;
            for (node, weight) in GAUSS_NODES.iter().zip(GAUSS_WEIGHTS.iter()) {
                total += weight * self.derivative(mid + node * h / 2.0).norm();
            }
        }
        total * h / 2.0
    }

    /// Check if this segment has zero length.
    pub fn is_degenerate(&self) -> bool {
        match self {
            CurveSegment::Line { start, end } => start == end,
            CurveSegment::Arc(arc) => arc.sweep == 0.0 || (arc.radii.x == 0.0 && arc.radii.y == 0.0),
            CurveSegment::Quadratic {
                start,
                control,
                end,
            } => start == control && control == end,
            CurveSegment::Cubic {
                start,
                control1,
                control2,
                end,
            } => start == control1 && control1 == control2 && control2 == end,
        }
    }

    /// The same curve traversed from end to start.
    pub fn reversed(&self) -> Self {
        match self {
            CurveSegment::Line { start, end } => CurveSegment::Line {
                start: *end,
                end: *start,
            },
            CurveSegment::Arc(arc) => CurveSegment::Arc(arc.reversed()),
            CurveSegment::Quadratic {
                start,
                control,
                end,
            } => CurveSegment::Quadratic {
                start: *end,
                control: *control,
                end: *start,
            },
            CurveSegment::Cubic {
                start,
                control1,
                control2,
                end,
            } => CurveSegment::Cubic {
                start: *end,
                control1: *control2,
                control2: *control1,
                end: *start,
            },
        }
    }
}
