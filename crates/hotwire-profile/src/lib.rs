#![warn(missing_docs)]

//! Planar profiles for the hotwire cutter.
//!
//! A profile is a closed [`Contour`] of [`CurveSegment`]s. Profiles usually
//! arrive as an unordered bag of segments (several sub-paths of one SVG
//! file); [`merge_segments`] chains them into one closed, traversal-ordered
//! contour.
//!
//! # Example
//!
//! ```
//! use hotwire_math::{Point2, Tolerance};
//! use hotwire_profile::{merge_segments, CurveSegment};
//!
//! let a = Point2::new(0.0, 0.0);
//! let b = Point2::new(10.0, 0.0);
//! let c = Point2::new(10.0, 10.0);
//!
//! // Fragments out of order, one of them drawn backwards.
//! let contour = merge_segments(
//!     vec![
//!         CurveSegment::line(c, a),
//!         CurveSegment::line(a, b),
//!         CurveSegment::line(c, b),
//!     ],
//!     Tolerance::EXACT,
//! )
//! .unwrap();
//!
//! assert_eq!(contour.len(), 3);
//! assert_eq!(contour.segments()[1].start(), b);
//! ```

mod contour;
mod merge;
mod segment;
pub mod svg;

pub use contour::Contour;
pub use merge::merge_segments;
pub use segment::{CurveSegment, EllipticalArc};

use thiserror::Error;

/// Errors from profile construction and import.
#[derive(Debug, Clone, Error)]
pub enum ProfileError {
    /// The segments cannot be chained into one closed figure.
    #[error("open contour: no segment continues from ({x:.4}, {y:.4})")]
    OpenContour {
        /// X coordinate of the dangling endpoint.
        x: f64,
        /// Y coordinate of the dangling endpoint.
        y: f64,
    },

    /// The profile has no segments.
    #[error("profile has no segments")]
    EmptyProfile,

    /// The SVG document or its path data could not be read.
    #[error("invalid SVG: {0}")]
    Svg(String),
}

/// Result type for profile operations.
pub type Result<T> = std::result::Result<T, ProfileError>;
