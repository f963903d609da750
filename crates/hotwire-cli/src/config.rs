//! Job files.
//!
//! A job is a TOML document naming the two profile SVGs, the anchors to pair
//! on each of them, and the machine and cut parameters. Every section is
//! optional and falls back to the library defaults.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use hotwire_gcode::GcodeSettings;
use hotwire_math::{Point2, Tolerance};
use hotwire_profile::{svg, Contour};
use hotwire_slicer::{
    anchor_points, nearest_anchor, plan_cut, AnchorSelection, AxisOffsets, CutJob, CutPlan,
    CutSettings, MachineGeometry, Side,
};
use serde::{Deserialize, Serialize};

/// An anchor given either by its index in the profile's anchor list or by
/// approximate coordinates, snapped to the nearest anchor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnchorRef {
    /// Index into the anchor list printed by `hotwire anchors`.
    Index(usize),
    /// `[x, y]` coordinates.
    Point([f64; 2]),
}

/// One profile of a job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    /// SVG file, relative to the job file.
    pub svg: PathBuf,
    /// Traverse the profile in the opposite direction.
    pub reverse: bool,
    /// Offset added to every surface point of this profile.
    pub offset: [f64; 2],
    /// Ordered anchors on the (possibly reversed) profile.
    pub anchors: Vec<AnchorRef>,
}

/// A complete cutting job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobConfig {
    /// Front (XY) profile.
    pub front: ProfileConfig,
    /// Back (UV) profile.
    pub back: ProfileConfig,
    /// Cutter geometry.
    pub machine: MachineGeometry,
    /// Resampling parameters.
    pub cut: CutSettings,
    /// G-code output parameters.
    pub gcode: GcodeSettings,
}

impl JobConfig {
    /// A starter job pairing the four corners of two rectangular profiles.
    pub fn example() -> Self {
        let corners = (0..4).map(AnchorRef::Index).collect::<Vec<_>>();
        Self {
            front: ProfileConfig {
                svg: PathBuf::from("front.svg"),
                anchors: corners.clone(),
                ..Default::default()
            },
            back: ProfileConfig {
                svg: PathBuf::from("back.svg"),
                anchors: corners,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Parse a job from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        let job: Self = toml::from_str(text).context("invalid job file")?;
        Ok(job)
    }

    /// Load a job file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read job file {}", path.display()))?;
        let job = Self::from_toml(&text).with_context(|| format!("in {}", path.display()))?;
        log::info!("Job loaded from: {}", path.display());
        Ok(job)
    }

    /// Write the job as TOML.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("cannot write job file {}", path.display()))?;
        log::info!("Job written to: {}", path.display());
        Ok(())
    }

    /// Load both profile SVGs, resolving paths against `base_dir`.
    pub fn load_profiles(&self, base_dir: &Path) -> Result<(Contour, Contour)> {
        let tol = self.cut.tolerance();
        let front = load_profile(&base_dir.join(&self.front.svg), tol)?;
        let back = load_profile(&base_dir.join(&self.back.svg), tol)?;
        Ok((front, back))
    }

    /// Build the cut job for already loaded profiles.
    pub fn build_job(&self, front: Contour, back: Contour) -> Result<CutJob> {
        let tol = self.cut.tolerance();
        let front_anchors = oriented_anchors(&front, self.front.reverse, tol);
        let back_anchors = oriented_anchors(&back, self.back.reverse, tol);

        let selection = AnchorSelection::new(
            resolve_anchors(&self.front.anchors, &front_anchors, tol, Side::Front)?,
            resolve_anchors(&self.back.anchors, &back_anchors, tol, Side::Back)?,
        );

        Ok(CutJob::new(front, back, selection)
            .reversed(self.front.reverse, self.back.reverse)
            .with_offsets(AxisOffsets {
                x: self.front.offset[0],
                y: self.front.offset[1],
                u: self.back.offset[0],
                v: self.back.offset[1],
            })
            .with_machine(self.machine)
            .with_settings(self.cut))
    }

    /// Build the cut job for already loaded profiles and plan it.
    pub fn plan(&self, front: Contour, back: Contour) -> Result<CutPlan> {
        let cut = self.build_job(front, back)?;
        plan_cut(&cut).context("cannot plan the cut")
    }
}

/// Read an SVG file and merge it into one closed contour.
pub fn load_profile(path: &Path, tol: Tolerance) -> Result<Contour> {
    let document = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read profile {}", path.display()))?;
    let contour = svg::load_contour(&document, tol)
        .with_context(|| format!("cannot build a closed profile from {}", path.display()))?;
    log::info!(
        "Profile {}: {} segments, length {:.3}, {}",
        path.display(),
        contour.len(),
        contour.length(),
        if contour.is_ccw() {
            "counter-clockwise"
        } else {
            "clockwise"
        }
    );
    Ok(contour)
}

/// Anchor list of `contour` as traversed after the reverse flag.
pub fn oriented_anchors(contour: &Contour, reverse: bool, tol: Tolerance) -> Vec<Point2> {
    if reverse {
        anchor_points(&contour.reversed(), tol)
    } else {
        anchor_points(contour, tol)
    }
}

/// Turn anchor references into anchor coordinates.
pub fn resolve_anchors(
    refs: &[AnchorRef],
    anchors: &[Point2],
    tol: Tolerance,
    side: Side,
) -> Result<Vec<Point2>> {
    refs.iter()
        .map(|r| match *r {
            AnchorRef::Index(i) => match anchors.get(i) {
                Some(p) => Ok(*p),
                None => bail!(
                    "{} anchor index {} is out of range (the profile has {} anchors)",
                    side,
                    i,
                    anchors.len()
                ),
            },
            AnchorRef::Point([x, y]) => {
                let target = Point2::new(x, y);
                let Some((i, distance)) = nearest_anchor(&target, anchors) else {
                    bail!("the {} profile has no anchors", side);
                };
                if distance > tol.linear {
                    log::warn!(
                        "{} anchor ({}, {}) snapped to anchor {} at ({:.4}, {:.4}), {:.4} away",
                        side,
                        x,
                        y,
                        i,
                        anchors[i].x,
                        anchors[i].y,
                        distance
                    );
                }
                Ok(anchors[i])
            }
        })
        .collect()
}
