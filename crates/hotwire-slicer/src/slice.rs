//! Contour resampling - sample each segment at a fixed arc-length step.

use hotwire_math::{Point2, Tolerance};
use hotwire_profile::{Contour, CurveSegment};
use rayon::prelude::*;

use crate::error::{CutError, Result};
use crate::path::PointCloud;

/// A contour sampled into a point cloud.
#[derive(Debug, Clone)]
pub struct ProfileSlice {
    /// Samples in contour order.
    pub cloud: PointCloud,
    /// Distinct segment boundary points in first-occurrence order.
    pub anchors: Vec<Point2>,
    /// Index of each segment's first sample in `cloud`. A segment that
    /// produced no samples shares the offset of the segment after it.
    pub segment_offsets: Vec<usize>,
}

/// Sample `contour` every `step` length units.
///
/// Each segment of length `L` contributes samples at parameters
/// `i * step / L` for `i in 0..floor(L / step)`, plus one more at
/// `floor(L / step) * step / L` when that leaves a remainder. The parameter
/// is the segment's own, so samples on curves are only approximately evenly
/// spaced.
pub fn slice_contour(contour: &Contour, step: f64, tol: Tolerance) -> Result<ProfileSlice> {
    check_step(step)?;

    // Sample segments in parallel
    let per_segment: Vec<Vec<Point2>> = contour
        .segments()
        .par_iter()
        .map(|seg| sample_segment(seg, step))
        .collect();

    let total: usize = per_segment.iter().map(Vec::len).sum();
    let mut points = Vec::with_capacity(total);
    let mut segment_offsets = Vec::with_capacity(per_segment.len());
    for samples in per_segment {
        segment_offsets.push(points.len());
        points.extend(samples);
    }

    log::debug!(
        "sliced {} segments at step {} into {} points",
        contour.len(),
        step,
        points.len()
    );

    Ok(ProfileSlice {
        cloud: PointCloud::new(points),
        anchors: anchor_points(contour, tol),
        segment_offsets,
    })
}

/// Distinct segment boundary points of `contour` in first-occurrence order.
pub fn anchor_points(contour: &Contour, tol: Tolerance) -> Vec<Point2> {
    let mut anchors: Vec<Point2> = Vec::new();
    for seg in contour.segments() {
        for p in [seg.start(), seg.end()] {
            if !anchors.iter().any(|a| tol.points_equal(a, &p)) {
                anchors.push(p);
            }
        }
    }
    anchors
}

fn sample_segment(seg: &CurveSegment, step: f64) -> Vec<Point2> {
    let length = seg.length();
    if length <= 0.0 {
        return Vec::new();
    }

    let full_steps = (length / step).floor() as usize;
    let mut samples: Vec<Point2> = (0..full_steps)
        .map(|i| seg.at(i as f64 * step / length))
        .collect();

    let covered = full_steps as f64 * step;
    if covered < length {
        samples.push(seg.at(covered / length));
    }
    samples
}

pub(crate) fn check_step(step: f64) -> Result<()> {
    if !step.is_finite() || step <= 0.0 {
        return Err(CutError::GeometryConfig(format!(
            "step must be a positive length, got {}",
            step
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotwire_profile::EllipticalArc;
    use std::f64::consts::PI;

    fn line(x0: f64, y0: f64, x1: f64, y1: f64) -> CurveSegment {
        CurveSegment::line(Point2::new(x0, y0), Point2::new(x1, y1))
    }

    #[test]
    fn test_line_sample_counts() {
        // Exact multiple: no boundary sample.
        assert_eq!(sample_segment(&line(0.0, 0.0, 100.0, 0.0), 10.0).len(), 10);
        // Remainder: one extra boundary sample.
        let samples = sample_segment(&line(0.0, 0.0, 105.0, 0.0), 10.0);
        assert_eq!(samples.len(), 11);
        assert!((samples[10] - Point2::new(100.0, 0.0)).norm() < 1e-9);
        // Shorter than the step: the start point only.
        let samples = sample_segment(&line(1.0, 1.0, 1.5, 1.0), 10.0);
        assert_eq!(samples, vec![Point2::new(1.0, 1.0)]);
    }

    #[test]
    fn test_sample_count_property() {
        for &(length, step) in &[(7.3, 0.5), (1.0, 0.1), (0.3, 0.1), (12.0, 3.0), (9.99, 1.0)] {
            let samples = sample_segment(&line(0.0, 0.0, length, 0.0), step);
            let n = (length / step).floor() as usize;
            let extra = if (n as f64) * step < length { 1 } else { 0 };
            assert_eq!(samples.len(), n + extra, "length {} step {}", length, step);
        }
    }

    #[test]
    fn test_slice_square() {
        let square = Contour::rectangle(Point2::origin(), 100.0, 100.0);
        let slice = slice_contour(&square, 10.0, Tolerance::EXACT).unwrap();
        assert_eq!(slice.cloud.len(), 40);
        assert_eq!(slice.segment_offsets, vec![0, 10, 20, 30]);
        assert_eq!(slice.cloud.points[10], Point2::new(100.0, 0.0));
        assert_eq!(
            slice.anchors,
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(100.0, 0.0),
                Point2::new(100.0, 100.0),
                Point2::new(0.0, 100.0),
            ]
        );
    }

    #[test]
    fn test_anchors_in_traversal_order() {
        // Start at a vertex that is not the smallest coordinate.
        let tri = Contour::polygon(&[
            Point2::new(5.0, 5.0),
            Point2::new(-1.0, 0.0),
            Point2::new(3.0, -2.0),
        ])
        .unwrap();
        let anchors = anchor_points(&tri, Tolerance::EXACT);
        assert_eq!(anchors, tri.vertices());
    }

    #[test]
    fn test_curved_segments_start_at_their_offsets() {
        let arc = EllipticalArc::circular(Point2::origin(), 10.0, 0.0, PI);
        let contour = Contour::new(
            vec![
                CurveSegment::Arc(arc.clone()),
                CurveSegment::line(arc.end, arc.start),
            ],
            Tolerance::EXACT,
        )
        .unwrap();
        let slice = slice_contour(&contour, 1.0, Tolerance::EXACT).unwrap();
        // Half circle of length 10π → 31 full steps plus a boundary sample.
        assert_eq!(slice.segment_offsets, vec![0, 32]);
        assert_eq!(slice.cloud.points[32], arc.end);
        assert_eq!(slice.cloud.len(), 32 + 20);
        assert_eq!(slice.anchors.len(), 2);
    }

    #[test]
    fn test_invalid_step() {
        let square = Contour::rectangle(Point2::origin(), 1.0, 1.0);
        for step in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                slice_contour(&square, step, Tolerance::EXACT),
                Err(CutError::GeometryConfig(_))
            ));
        }
    }
}
