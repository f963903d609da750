//! Closed contours.

use hotwire_math::{Point2, Tolerance};

use crate::{CurveSegment, ProfileError, Result};

/// A closed, traversal-ordered profile.
///
/// Every segment ends where the next one starts, and the last segment ends
/// where the first one starts.
#[derive(Debug, Clone, PartialEq)]
pub struct Contour {
    segments: Vec<CurveSegment>,
}

impl Contour {
    /// Create a contour from already ordered segments.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - there are no segments
    /// - two consecutive segments do not share an endpoint under `tol`
    /// - the last segment does not end where the first one starts
    pub fn new(segments: Vec<CurveSegment>, tol: Tolerance) -> Result<Self> {
        let (first, last) = match (segments.first(), segments.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(ProfileError::EmptyProfile),
        };

        for pair in segments.windows(2) {
            let end = pair[0].end();
            if !tol.points_equal(&end, &pair[1].start()) {
                return Err(ProfileError::OpenContour { x: end.x, y: end.y });
            }
        }

        let last_end = last.end();
        if !tol.points_equal(&last_end, &first.start()) {
            return Err(ProfileError::OpenContour {
                x: last_end.x,
                y: last_end.y,
            });
        }

        Ok(Self { segments })
    }

    /// Closed polygon through `points` (the closing edge is implied).
    pub fn polygon(points: &[Point2]) -> Result<Self> {
        let n = points.len();
        let segments = (0..n)
            .map(|i| CurveSegment::line(points[i], points[(i + 1) % n]))
            .collect();
        Self::new(segments, Tolerance::EXACT)
    }

    /// Axis-aligned rectangle with one corner at `origin`.
    ///
    /// Segments go counter-clockwise starting at `origin`.
    pub fn rectangle(origin: Point2, width: f64, height: f64) -> Self {
        let p0 = origin;
        let p1 = Point2::new(origin.x + width, origin.y);
        let p2 = Point2::new(origin.x + width, origin.y + height);
        let p3 = Point2::new(origin.x, origin.y + height);
        Self {
            segments: vec![
                CurveSegment::line(p0, p1),
                CurveSegment::line(p1, p2),
                CurveSegment::line(p2, p3),
                CurveSegment::line(p3, p0),
            ],
        }
    }

    /// The segments in traversal order.
    pub fn segments(&self) -> &[CurveSegment] {
        &self.segments
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false for a constructed contour.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Arc length of every segment, in traversal order.
    pub fn segment_lengths(&self) -> Vec<f64> {
        self.segments.iter().map(CurveSegment::length).collect()
    }

    /// Total arc length.
    pub fn length(&self) -> f64 {
        self.segments.iter().map(CurveSegment::length).sum()
    }

    /// The same figure traversed in the opposite direction.
    pub fn reversed(&self) -> Self {
        Self {
            segments: self.segments.iter().rev().map(CurveSegment::reversed).collect(),
        }
    }

    /// Start point of every segment, in traversal order.
    pub fn vertices(&self) -> Vec<Point2> {
        self.segments.iter().map(CurveSegment::start).collect()
    }

    /// Signed area of the polygon through the segment endpoints.
    /// Positive for counter-clockwise traversal.
    pub fn signed_area(&self) -> f64 {
        let vertices = self.vertices();
        let n = vertices.len();
        let mut area = 0.0;
        for i in 0..n {
            let j = (i + 1) % n;
            area += vertices[i].x * vertices[j].y;
            area -= vertices[j].x * vertices[i].y;
        }
        area / 2.0
    }

    /// Is the contour traversed counter-clockwise?
    pub fn is_ccw(&self) -> bool {
        self.signed_area() > 0.0
    }
}
