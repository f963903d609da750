//! Point sequences handed between pipeline stages.

use hotwire_math::{lerp, midpoint, Point2, Vec2};
use serde::{Deserialize, Serialize};

use crate::error::{CutError, Result};

/// How a fractional cloud index is resolved to a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interpolation {
    /// Average of the two bracketing cloud points, ignoring the fractional
    /// offset. Matches the output of existing job files.
    #[default]
    Midpoint,
    /// Distance-weighted interpolation between the bracketing points.
    Linear,
}

/// Ordered points sampled along a closed contour.
///
/// Indices wrap: the point after the last one is the first one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointCloud {
    /// Points in traversal order.
    pub points: Vec<Point2>,
}

impl PointCloud {
    /// Create a new cloud from points.
    pub fn new(points: Vec<Point2>) -> Self {
        Self { points }
    }

    /// Check if the cloud is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Point at `index` modulo the cloud length.
    pub fn wrapped(&self, index: usize) -> Point2 {
        self.points[index % self.points.len()]
    }

    /// Resolve a fractional index (wrapping past the end back to index 0).
    pub fn at_fractional(&self, index: f64, interpolation: Interpolation) -> Point2 {
        let lower = index.floor();
        let below = self.wrapped(lower as usize);
        let above = self.wrapped(index.ceil() as usize);
        match interpolation {
            Interpolation::Midpoint => midpoint(&below, &above),
            Interpolation::Linear => lerp(&below, &above, index - lower),
        }
    }

    /// Length of the closed polyline through all points.
    pub fn perimeter(&self) -> f64 {
        let n = self.points.len();
        if n < 2 {
            return 0.0;
        }
        (0..n)
            .map(|i| (self.points[(i + 1) % n] - self.points[i]).norm())
            .sum()
    }

    /// The same cloud shifted by `offset`.
    pub fn translated(&self, offset: Vec2) -> Self {
        Self {
            points: self.points.iter().map(|p| p + offset).collect(),
        }
    }
}

/// Constant offsets added to the synchronized surface points, per axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisOffsets {
    /// Added to every front X coordinate.
    pub x: f64,
    /// Added to every front Y coordinate.
    pub y: f64,
    /// Added to every back U coordinate.
    pub u: f64,
    /// Added to every back V coordinate.
    pub v: f64,
}

/// Two clouds of equal length; index `i` of one is reached at the same
/// time as index `i` of the other.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SynchronizedPair {
    /// Front (XY) profile points.
    pub front: PointCloud,
    /// Back (UV) profile points.
    pub back: PointCloud,
}

impl SynchronizedPair {
    /// Pair two clouds.
    ///
    /// # Errors
    ///
    /// [`CutError::ContractViolation`] if the clouds differ in length.
    pub fn new(front: PointCloud, back: PointCloud) -> Result<Self> {
        let pair = Self { front, back };
        pair.check()?;
        Ok(pair)
    }

    /// Verify the equal-length invariant.
    pub fn check(&self) -> Result<()> {
        if self.front.len() != self.back.len() {
            return Err(CutError::ContractViolation(format!(
                "synchronized clouds differ in length: front {} vs back {}",
                self.front.len(),
                self.back.len()
            )));
        }
        Ok(())
    }

    /// Number of synchronized indices.
    pub fn len(&self) -> usize {
        self.front.len()
    }

    /// Check if the pair is empty.
    pub fn is_empty(&self) -> bool {
        self.front.is_empty()
    }

    /// Iterate over `(front, back)` point pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&Point2, &Point2)> {
        self.front.points.iter().zip(self.back.points.iter())
    }

    /// Apply per-axis offsets: X/Y to the front, U/V to the back.
    pub fn offset(&self, offsets: &AxisOffsets) -> Self {
        Self {
            front: self.front.translated(Vec2::new(offsets.x, offsets.y)),
            back: self.back.translated(Vec2::new(offsets.u, offsets.v)),
        }
    }
}

/// A synchronized pair projected onto the two tool-axis planes.
///
/// `front` holds the X/Y axis coordinates, `back` the U/V axis coordinates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolPointCloud {
    /// X/Y tool plane coordinates.
    pub front: PointCloud,
    /// U/V tool plane coordinates.
    pub back: PointCloud,
}

impl ToolPointCloud {
    /// Number of tool positions.
    pub fn len(&self) -> usize {
        self.front.len()
    }

    /// Check if there are no tool positions.
    pub fn is_empty(&self) -> bool {
        self.front.is_empty()
    }

    /// Iterate over `(xy, uv)` tool coordinate pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&Point2, &Point2)> {
        self.front.points.iter().zip(self.back.points.iter())
    }
}
