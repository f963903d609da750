//! Anchor synchronization - resample two profiles in lock-step.
//!
//! The user pairs anchors on the front and back profiles. Between each pair
//! of consecutive waypoints (including the wrap from the last back to the
//! first) the longer of the two arcs is walked at the requested step, and the
//! shorter arc is walked with the same number of proportionally shorter
//! steps. Both outputs therefore always have the same length, and index `i`
//! names positions the wire reaches at the same time.

use hotwire_math::{Point2, Tolerance};
use hotwire_profile::Contour;
use rayon::prelude::*;

use crate::error::{CutError, Result, Side};
use crate::path::{Interpolation, PointCloud, SynchronizedPair};
use crate::slice::{slice_contour, ProfileSlice};
use crate::CutSettings;

/// Ordered anchor correspondence: `front[i]` pairs with `back[i]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnchorSelection {
    /// Anchors on the front profile.
    pub front: Vec<Point2>,
    /// Anchors on the back profile.
    pub back: Vec<Point2>,
}

impl AnchorSelection {
    /// Create a selection.
    pub fn new(front: Vec<Point2>, back: Vec<Point2>) -> Self {
        Self { front, back }
    }

    /// Number of waypoints, after checking both sides have the same number
    /// and at least two.
    pub fn validate(&self) -> Result<usize> {
        let (front, back) = (self.front.len(), self.back.len());
        if front != back || front < 2 {
            return Err(CutError::SelectionMismatch { front, back });
        }
        Ok(front)
    }
}

/// Output of [`synchronize`].
#[derive(Debug, Clone)]
pub struct Synchronized {
    /// Index-paired surface points.
    pub pair: SynchronizedPair,
    /// Output index at which the arc leaving each waypoint starts.
    pub waypoint_indices: Vec<usize>,
}

/// Resample `front` and `back` into an index-paired point sequence.
///
/// # Errors
///
/// - [`CutError::SelectionMismatch`] for unequal or too small selections.
/// - [`CutError::AnchorNotFound`] when a selected anchor is not a segment
///   boundary of its profile.
/// - [`CutError::GeometryConfig`] for invalid step sizes or a profile of zero
///   length.
pub fn synchronize(
    front: &Contour,
    back: &Contour,
    selection: &AnchorSelection,
    settings: &CutSettings,
) -> Result<Synchronized> {
    let waypoints = selection.validate()?;
    settings.validate()?;
    let tol = settings.tolerance();

    let front = SideProfile::new(Side::Front, front, settings.fine_step, tol)?;
    let back = SideProfile::new(Side::Back, back, settings.fine_step, tol)?;

    // Waypoint pairs are independent; collect keeps them in order.
    let arcs: Vec<(Vec<Point2>, Vec<Point2>)> = (0..waypoints)
        .into_par_iter()
        .map(|i| {
            let next = (i + 1) % waypoints;
            let front_span = front.span(&selection.front[i], &selection.front[next], tol)?;
            let back_span = back.span(&selection.back[i], &selection.back[next], tol)?;
            Ok(walk_pair(
                (&front, front_span),
                (&back, back_span),
                settings.step,
                settings.interpolation,
            ))
        })
        .collect::<Result<Vec<_>>>()?;

    let total: usize = arcs.iter().map(|(f, _)| f.len()).sum();
    let mut front_points = Vec::with_capacity(total);
    let mut back_points = Vec::with_capacity(total);
    let mut waypoint_indices = Vec::with_capacity(waypoints);
    for (i, (f, b)) in arcs.into_iter().enumerate() {
        log::debug!("waypoint {} -> {}: {} points", i, (i + 1) % waypoints, f.len());
        waypoint_indices.push(front_points.len());
        front_points.extend(f);
        back_points.extend(b);
    }

    let pair = SynchronizedPair::new(PointCloud::new(front_points), PointCloud::new(back_points))?;
    log::debug!(
        "synchronized {} waypoints into {} point pairs",
        waypoints,
        pair.len()
    );

    Ok(Synchronized {
        pair,
        waypoint_indices,
    })
}

/// Index of the anchor closest to `point`, with its distance.
pub fn nearest_anchor(point: &Point2, anchors: &[Point2]) -> Option<(usize, f64)> {
    anchors
        .iter()
        .enumerate()
        .map(|(i, a)| (i, (a - point).norm()))
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
}

/// One profile prepared for synchronization.
struct SideProfile<'a> {
    side: Side,
    contour: &'a Contour,
    lengths: Vec<f64>,
    fine: ProfileSlice,
}

/// An arc between two anchors, in length units and fine-cloud indices.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Span {
    length: f64,
    cloud_start: usize,
    cloud_span: usize,
}

impl Span {
    /// Fractional fine-cloud index `position` length units into the arc.
    fn index_at(&self, position: f64) -> f64 {
        if self.length > 0.0 {
            self.cloud_start as f64 + position * self.cloud_span as f64 / self.length
        } else {
            self.cloud_start as f64
        }
    }
}

impl<'a> SideProfile<'a> {
    fn new(side: Side, contour: &'a Contour, fine_step: f64, tol: Tolerance) -> Result<Self> {
        let fine = slice_contour(contour, fine_step, tol)?;
        if fine.cloud.is_empty() {
            return Err(CutError::GeometryConfig(format!(
                "the {} profile has zero length",
                side
            )));
        }
        Ok(Self {
            side,
            contour,
            lengths: contour.segment_lengths(),
            fine,
        })
    }

    /// Locate the arc from anchor `from` to anchor `to`.
    ///
    /// The arc runs from the segment starting at `from` through the segment
    /// ending at `to`, wrapping past the end of the contour when needed.
    fn span(&self, from: &Point2, to: &Point2, tol: Tolerance) -> Result<Span> {
        let segments = self.contour.segments();
        let n = segments.len();

        let start = segments
            .iter()
            .rposition(|s| tol.points_equal(&s.start(), from))
            .ok_or_else(|| self.not_found(from))?;
        let stop = segments
            .iter()
            .rposition(|s| tol.points_equal(&s.end(), to))
            .ok_or_else(|| self.not_found(to))?;

        let length = if start > stop {
            self.lengths[start..].iter().sum::<f64>() + self.lengths[..=stop].iter().sum::<f64>()
        } else {
            self.lengths[start..=stop].iter().sum()
        };

        let m = self.fine.cloud.len();
        let cloud_start = self.fine.segment_offsets[start];
        let cloud_end = self.fine.segment_offsets[(stop + 1) % n];
        let cloud_span = match (cloud_end + m - cloud_start % m) % m {
            0 => m,
            span => span,
        };

        Ok(Span {
            length,
            cloud_start,
            cloud_span,
        })
    }

    fn point_at(&self, span: &Span, position: f64, interpolation: Interpolation) -> Point2 {
        self.fine.cloud.at_fractional(span.index_at(position), interpolation)
    }

    fn not_found(&self, p: &Point2) -> CutError {
        CutError::AnchorNotFound {
            side: self.side,
            x: p.x,
            y: p.y,
        }
    }
}

/// Walk one waypoint pair on both profiles with a shared point count.
fn walk_pair(
    front: (&SideProfile, Span),
    back: (&SideProfile, Span),
    step: f64,
    interpolation: Interpolation,
) -> (Vec<Point2>, Vec<Point2>) {
    let (front_profile, front_span) = front;
    let (back_profile, back_span) = back;

    let front_is_long = front_span.length > back_span.length;
    let (long_length, short_length) = if front_is_long {
        (front_span.length, back_span.length)
    } else {
        (back_span.length, front_span.length)
    };
    if long_length <= 0.0 {
        return (Vec::new(), Vec::new());
    }

    let count = (long_length / step).ceil() as usize;
    let ratio = short_length / long_length;

    let mut front_points = Vec::with_capacity(count);
    let mut back_points = Vec::with_capacity(count);
    for i in 0..count {
        let long_position = i as f64 * step;
        let short_position = long_position * ratio;
        let (front_position, back_position) = if front_is_long {
            (long_position, short_position)
        } else {
            (short_position, long_position)
        };
        front_points.push(front_profile.point_at(&front_span, front_position, interpolation));
        back_points.push(back_profile.point_at(&back_span, back_position, interpolation));
    }
    (front_points, back_points)
}
