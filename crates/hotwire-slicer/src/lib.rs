#![warn(missing_docs)]

//! Cutting pipeline for a 4-axis hot-wire foam cutter.
//!
//! This crate turns two closed profiles into one index-synchronized pair of
//! tool paths: it resamples each contour, walks the arcs between paired
//! anchors in lock-step, and projects the resulting foam-surface points onto
//! the XY and UV axis planes of the gantry.
//!
//! # Example
//!
//! ```
//! use hotwire_math::Point2;
//! use hotwire_profile::Contour;
//! use hotwire_slicer::{plan_cut, AnchorSelection, CutJob, CutSettings};
//!
//! let front = Contour::rectangle(Point2::origin(), 100.0, 100.0);
//! let back = Contour::rectangle(Point2::new(25.0, 25.0), 50.0, 50.0);
//! let selection = AnchorSelection::new(front.vertices(), back.vertices());
//!
//! let job = CutJob::new(front, back, selection).with_settings(CutSettings {
//!     step: 10.0,
//!     ..Default::default()
//! });
//! let plan = plan_cut(&job).unwrap();
//! assert_eq!(plan.tool.len(), 40);
//! ```

pub mod error;
pub mod path;
pub mod project;
pub mod slice;
pub mod sync;

pub use error::{CutError, Result, Side};
pub use path::{AxisOffsets, Interpolation, PointCloud, SynchronizedPair, ToolPointCloud};
pub use project::{project_to_tool_planes, MachineGeometry};
pub use slice::{anchor_points, slice_contour, ProfileSlice};
pub use sync::{nearest_anchor, synchronize, AnchorSelection, Synchronized};

use std::borrow::Cow;

use hotwire_math::Tolerance;
use hotwire_profile::Contour;
use serde::{Deserialize, Serialize};

use crate::slice::check_step;

/// Resampling parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CutSettings {
    /// Distance between output points along the longer profile (mm).
    pub step: f64,
    /// Step of the fine clouds used to locate arcs (mm).
    pub fine_step: f64,
    /// How fractional fine-cloud indices are resolved.
    pub interpolation: Interpolation,
    /// Vertex matching distance; zero compares coordinates exactly.
    pub vertex_tolerance: f64,
}

impl Default for CutSettings {
    fn default() -> Self {
        Self {
            step: 0.5,
            fine_step: 0.05,
            interpolation: Interpolation::Midpoint,
            vertex_tolerance: 0.0,
        }
    }
}

impl CutSettings {
    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        check_step(self.step)?;
        check_step(self.fine_step)?;
        if !self.vertex_tolerance.is_finite() || self.vertex_tolerance < 0.0 {
            return Err(CutError::GeometryConfig(format!(
                "vertex_tolerance must be zero or positive, got {}",
                self.vertex_tolerance
            )));
        }
        Ok(())
    }

    /// Vertex matching policy for these settings.
    pub fn tolerance(&self) -> Tolerance {
        Tolerance::within(self.vertex_tolerance)
    }
}

/// Everything needed to plan one cut.
#[derive(Debug, Clone)]
pub struct CutJob {
    /// Front (XY) profile.
    pub front: Contour,
    /// Back (UV) profile.
    pub back: Contour,
    /// Anchor correspondence, given on the profiles as oriented by the
    /// reverse flags.
    pub selection: AnchorSelection,
    /// Traverse the front profile in the opposite direction.
    pub reverse_front: bool,
    /// Traverse the back profile in the opposite direction.
    pub reverse_back: bool,
    /// Per-axis offsets applied to the surface points.
    pub offsets: AxisOffsets,
    /// Cutter geometry.
    pub machine: MachineGeometry,
    /// Resampling parameters.
    pub settings: CutSettings,
}

impl CutJob {
    /// A job with default offsets, machine and settings.
    pub fn new(front: Contour, back: Contour, selection: AnchorSelection) -> Self {
        Self {
            front,
            back,
            selection,
            reverse_front: false,
            reverse_back: false,
            offsets: AxisOffsets::default(),
            machine: MachineGeometry::default(),
            settings: CutSettings::default(),
        }
    }

    /// Replace the resampling parameters.
    pub fn with_settings(mut self, settings: CutSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Replace the cutter geometry.
    pub fn with_machine(mut self, machine: MachineGeometry) -> Self {
        self.machine = machine;
        self
    }

    /// Replace the per-axis offsets.
    pub fn with_offsets(mut self, offsets: AxisOffsets) -> Self {
        self.offsets = offsets;
        self
    }

    /// Set the reverse flags of both profiles.
    pub fn reversed(mut self, front: bool, back: bool) -> Self {
        self.reverse_front = front;
        self.reverse_back = back;
        self
    }
}

/// Statistics about a planned cut.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CutStats {
    /// Number of synchronized positions.
    pub point_count: usize,
    /// Number of anchor waypoints per profile.
    pub waypoint_count: usize,
    /// Closed path length through the front surface points (mm).
    pub front_surface_length: f64,
    /// Closed path length through the back surface points (mm).
    pub back_surface_length: f64,
    /// Closed path length travelled by the XY carriage (mm).
    pub xy_travel: f64,
    /// Closed path length travelled by the UV carriage (mm).
    pub uv_travel: f64,
}

impl CutStats {
    fn compute(surface: &SynchronizedPair, tool: &ToolPointCloud, waypoint_count: usize) -> Self {
        Self {
            point_count: surface.len(),
            waypoint_count,
            front_surface_length: surface.front.perimeter(),
            back_surface_length: surface.back.perimeter(),
            xy_travel: tool.front.perimeter(),
            uv_travel: tool.back.perimeter(),
        }
    }

    /// Cut duration at `feedrate` (mm per time unit), limited by the carriage
    /// that travels furthest. Zero for a non-positive feedrate.
    pub fn estimated_duration(&self, feedrate: f64) -> f64 {
        if feedrate <= 0.0 {
            return 0.0;
        }
        self.xy_travel.max(self.uv_travel) / feedrate
    }
}

/// Result of planning a cut.
#[derive(Debug, Clone)]
pub struct CutPlan {
    /// Synchronized surface points after the axis offsets.
    pub surface: SynchronizedPair,
    /// Tool axis coordinates, ready for G-code emission.
    pub tool: ToolPointCloud,
    /// Output index at which the arc leaving each waypoint starts.
    pub waypoint_indices: Vec<usize>,
    /// Cut statistics.
    pub stats: CutStats,
}

/// Plan a cut.
///
/// This is the main entry point of the pipeline. It:
/// 1. Orients both profiles according to the reverse flags
/// 2. Synchronizes them between the selected anchors
/// 3. Applies the per-axis offsets
/// 4. Projects the surface points onto the tool planes
/// 5. Computes cut statistics
pub fn plan_cut(job: &CutJob) -> Result<CutPlan> {
    job.settings.validate()?;
    job.machine.validate()?;

    let front = oriented(&job.front, job.reverse_front);
    let back = oriented(&job.back, job.reverse_back);

    let synced = synchronize(&front, &back, &job.selection, &job.settings)?;
    let surface = synced.pair.offset(&job.offsets);
    let tool = project_to_tool_planes(&surface, &job.machine)?;
    let stats = CutStats::compute(&surface, &tool, synced.waypoint_indices.len());

    log::debug!(
        "planned cut: {} points, XY travel {:.1}, UV travel {:.1}",
        stats.point_count,
        stats.xy_travel,
        stats.uv_travel
    );

    Ok(CutPlan {
        surface,
        tool,
        waypoint_indices: synced.waypoint_indices,
        stats,
    })
}

fn oriented(contour: &Contour, reverse: bool) -> Cow<'_, Contour> {
    if reverse {
        Cow::Owned(contour.reversed())
    } else {
        Cow::Borrowed(contour)
    }
}
