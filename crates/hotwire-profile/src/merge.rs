//! Chain an unordered bag of segments into one closed contour.

use hotwire_math::Tolerance;

use crate::{Contour, CurveSegment, ProfileError, Result};

/// Order `segments` into a closed, traversal-ordered contour.
///
/// The first segment seeds the chain. Each step takes the first remaining
/// segment that starts at the chain's current end (appended as is) or ends
/// there (appended reversed). Quadratic in the number of segments.
///
/// # Errors
///
/// - [`ProfileError::EmptyProfile`] if `segments` is empty.
/// - [`ProfileError::OpenContour`] if no remaining segment continues the
///   chain, or the finished chain does not return to its start.
pub fn merge_segments(segments: Vec<CurveSegment>, tol: Tolerance) -> Result<Contour> {
    let mut pool = segments;
    if pool.is_empty() {
        return Err(ProfileError::EmptyProfile);
    }

    let mut chain = Vec::with_capacity(pool.len());
    chain.push(pool.remove(0));

    while let Some(end) = chain.last().map(CurveSegment::end) {
        if pool.is_empty() {
            break;
        }

        let idx = pool
            .iter()
            .position(|s| tol.points_equal(&s.start(), &end) || tol.points_equal(&s.end(), &end))
            .ok_or(ProfileError::OpenContour { x: end.x, y: end.y })?;

        let next = pool.remove(idx);
        if tol.points_equal(&next.start(), &end) {
            chain.push(next);
        } else {
            chain.push(next.reversed());
        }
    }

    log::debug!("merged {} segments into a closed contour", chain.len());
    Contour::new(chain, tol)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EllipticalArc;
    use hotwire_math::Point2;
    use std::f64::consts::PI;

    /// A closed cycle: square with one rounded corner.
    fn cycle() -> Vec<CurveSegment> {
        let arc = EllipticalArc::circular(Point2::new(8.0, 8.0), 2.0, 0.0, PI / 2.0);
        let arc_start = arc.start;
        let arc_end = arc.end;
        vec![
            CurveSegment::line(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0)),
            CurveSegment::line(Point2::new(10.0, 0.0), arc_start),
            CurveSegment::Arc(arc),
            CurveSegment::cubic(
                arc_end,
                Point2::new(5.0, 12.0),
                Point2::new(2.0, 11.0),
                Point2::new(0.0, 10.0),
            ),
            CurveSegment::line(Point2::new(0.0, 10.0), Point2::new(0.0, 0.0)),
        ]
    }

    fn assert_closed(contour: &Contour) {
        let segs = contour.segments();
        for i in 0..segs.len() {
            assert_eq!(segs[i].end(), segs[(i + 1) % segs.len()].start());
        }
    }

    #[test]
    fn test_ordered_input() {
        let contour = merge_segments(cycle(), Tolerance::EXACT).unwrap();
        assert_eq!(contour.segments(), cycle().as_slice());
    }

    #[test]
    fn test_any_permutation_and_reversal() {
        let base = cycle();
        let n = base.len();
        let expected_length: f64 = base.iter().map(CurveSegment::length).sum();

        // Rotations of the input combined with every reversal mask.
        for shift in 0..n {
            for mask in 0..(1u32 << n) {
                let mut bag: Vec<CurveSegment> = (0..n)
                    .map(|i| {
                        let seg = &base[(i * 3 + shift) % n];
                        if mask & (1 << i) != 0 {
                            seg.reversed()
                        } else {
                            seg.clone()
                        }
                    })
                    .collect();
                bag.swap(0, n - 1);

                let contour = merge_segments(bag, Tolerance::EXACT).unwrap();
                assert_eq!(contour.len(), n);
                assert_closed(&contour);
                assert!((contour.length() - expected_length).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_open_figure() {
        let mut bag = cycle();
        bag.remove(2);
        assert!(matches!(
            merge_segments(bag, Tolerance::EXACT),
            Err(ProfileError::OpenContour { .. })
        ));
    }

    #[test]
    fn test_open_chain_without_leftovers() {
        let bag = vec![
            CurveSegment::line(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)),
            CurveSegment::line(Point2::new(1.0, 0.0), Point2::new(1.0, 1.0)),
        ];
        assert!(matches!(
            merge_segments(bag, Tolerance::EXACT),
            Err(ProfileError::OpenContour { .. })
        ));
    }

    #[test]
    fn test_empty_bag() {
        assert!(matches!(
            merge_segments(vec![], Tolerance::EXACT),
            Err(ProfileError::EmptyProfile)
        ));
    }

    #[test]
    fn test_tolerance_closes_noisy_vertices() {
        let bag = vec![
            CurveSegment::line(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)),
            CurveSegment::line(Point2::new(0.0, 1.0), Point2::new(1.0, 1e-10)),
            CurveSegment::line(Point2::new(0.0, 1.0), Point2::new(1e-10, 0.0)),
        ];
        assert!(merge_segments(bag.clone(), Tolerance::EXACT).is_err());
        let contour = merge_segments(bag, Tolerance::within(1e-6)).unwrap();
        assert_eq!(contour.len(), 3);
    }
}
