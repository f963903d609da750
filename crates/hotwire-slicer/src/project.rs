//! Gantry projection - map foam-surface points onto the tool axis planes.
//!
//! The wire is a straight line through the front point (on the near foam
//! face) and the back point (on the far face). The XY carriage sits
//! `distance_to_xy_axis` in front of the near face and the UV carriage
//! `gantry_length` further along, so both tool positions follow by similar
//! triangles.

use hotwire_math::Point2;
use serde::{Deserialize, Serialize};

use crate::error::{CutError, Result};
use crate::path::{PointCloud, SynchronizedPair, ToolPointCloud};

/// Cutter geometry constants (all in mm).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineGeometry {
    /// Distance between the XY and UV axis planes.
    pub gantry_length: f64,
    /// Foam block thickness between the two profile faces.
    pub foam_width: f64,
    /// Distance from the XY axis plane to the front foam face.
    pub distance_to_xy_axis: f64,
}

impl Default for MachineGeometry {
    fn default() -> Self {
        Self {
            gantry_length: 1000.0,
            foam_width: 500.0,
            distance_to_xy_axis: 25.0,
        }
    }
}

impl MachineGeometry {
    /// Validate the constants.
    pub fn validate(&self) -> Result<()> {
        let values = [
            ("gantry_length", self.gantry_length),
            ("foam_width", self.foam_width),
            ("distance_to_xy_axis", self.distance_to_xy_axis),
        ];
        if let Some((name, value)) = values.iter().find(|(_, v)| !v.is_finite()) {
            return Err(CutError::GeometryConfig(format!(
                "{} must be finite, got {}",
                name, value
            )));
        }
        if self.foam_width <= 0.0 {
            return Err(CutError::GeometryConfig(format!(
                "foam_width must be positive, got {}",
                self.foam_width
            )));
        }
        if self.gantry_length <= 0.0 {
            return Err(CutError::GeometryConfig(format!(
                "gantry_length must be positive, got {}",
                self.gantry_length
            )));
        }
        if self.distance_to_xy_axis < 0.0 {
            return Err(CutError::GeometryConfig(format!(
                "distance_to_xy_axis must not be negative, got {}",
                self.distance_to_xy_axis
            )));
        }
        Ok(())
    }

    /// Tool positions `(xy, uv)` for one front/back surface point pair.
    pub fn project(&self, front: &Point2, back: &Point2) -> (Point2, Point2) {
        let near = self.distance_to_xy_axis / self.foam_width;
        let far = self.gantry_length / self.foam_width;
        let delta = back - front;

        let xy = front - delta * near;
        let uv = xy + delta * far;
        (xy, uv)
    }
}

/// Project every synchronized pair onto the XY and UV axis planes.
///
/// # Errors
///
/// [`CutError::GeometryConfig`] when `machine` fails validation, and
/// [`CutError::ContractViolation`] when the pair has unequal lengths.
pub fn project_to_tool_planes(
    pair: &SynchronizedPair,
    machine: &MachineGeometry,
) -> Result<ToolPointCloud> {
    machine.validate()?;
    pair.check()?;

    let (xy, uv): (Vec<Point2>, Vec<Point2>) =
        pair.iter().map(|(f, b)| machine.project(f, b)).unzip();

    log::debug!("projected {} point pairs onto the tool planes", xy.len());

    Ok(ToolPointCloud {
        front: PointCloud::new(xy),
        back: PointCloud::new(uv),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn pair(front: Vec<Point2>, back: Vec<Point2>) -> SynchronizedPair {
        SynchronizedPair::new(PointCloud::new(front), PointCloud::new(back)).unwrap()
    }

    #[test]
    fn test_identical_faces_project_straight() {
        let p = Point2::new(12.0, -3.0);
        let tool = project_to_tool_planes(&pair(vec![p], vec![p]), &MachineGeometry::default())
            .unwrap();
        assert_eq!(tool.front.points[0], p);
        assert_eq!(tool.back.points[0], p);
    }

    #[test]
    fn test_default_geometry() {
        let tool = project_to_tool_planes(
            &pair(vec![Point2::new(10.0, 0.0)], vec![Point2::new(20.0, 5.0)]),
            &MachineGeometry::default(),
        )
        .unwrap();
        // near = 25 / 500 = 0.05, far = 1000 / 500 = 2
        let xy = tool.front.points[0];
        let uv = tool.back.points[0];
        assert_relative_eq!(xy.x, 9.5);
        assert_relative_eq!(xy.y, -0.25);
        assert_relative_eq!(uv.x, 29.5);
        assert_relative_eq!(uv.y, 9.75);
    }

    #[test]
    fn test_zero_distance_keeps_front_coordinates() {
        let machine = MachineGeometry {
            gantry_length: 800.0,
            foam_width: 200.0,
            distance_to_xy_axis: 0.0,
        };
        let front = vec![Point2::new(1.0, 2.0), Point2::new(-4.0, 7.5)];
        let back = vec![Point2::new(3.0, 1.0), Point2::new(0.0, 0.0)];
        let tool = project_to_tool_planes(&pair(front.clone(), back.clone()), &machine).unwrap();
        for i in 0..front.len() {
            assert_eq!(tool.front.points[i], front[i]);
            let expected_u = front[i].x + (back[i].x - front[i].x) * 4.0;
            let expected_v = front[i].y + (back[i].y - front[i].y) * 4.0;
            assert_relative_eq!(tool.back.points[i].x, expected_u);
            assert_relative_eq!(tool.back.points[i].y, expected_v);
        }
    }

    #[test]
    fn test_invalid_geometry() {
        let p = pair(vec![Point2::origin()], vec![Point2::origin()]);
        let bad = [
            MachineGeometry {
                foam_width: 0.0,
                ..Default::default()
            },
            MachineGeometry {
                foam_width: -10.0,
                ..Default::default()
            },
            MachineGeometry {
                gantry_length: 0.0,
                ..Default::default()
            },
            MachineGeometry {
                distance_to_xy_axis: -1.0,
                ..Default::default()
            },
            MachineGeometry {
                gantry_length: f64::NAN,
                ..Default::default()
            },
        ];
        for machine in bad {
            assert!(matches!(
                project_to_tool_planes(&p, &machine),
                Err(CutError::GeometryConfig(_))
            ));
        }
    }

    #[test]
    fn test_preserves_length_on_empty_pair() {
        let tool =
            project_to_tool_planes(&SynchronizedPair::default(), &MachineGeometry::default())
                .unwrap();
        assert!(tool.is_empty());
    }

    #[test]
    fn test_geometry_json_defaults() {
        let machine: MachineGeometry = serde_json::from_str(r#"{"foam_width": 300.0}"#).unwrap();
        assert_eq!(machine.foam_width, 300.0);
        assert_eq!(machine.gantry_length, 1000.0);
    }
}
