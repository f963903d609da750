//! Error types for the cutting pipeline.

use std::fmt;

use hotwire_profile::ProfileError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which of the two profiles a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// The XY (front) profile.
    Front,
    /// The UV (back) profile.
    Back,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Front => f.write_str("front"),
            Side::Back => f.write_str("back"),
        }
    }
}

/// Errors that can occur while planning a cut.
#[derive(Error, Debug)]
pub enum CutError {
    /// A profile could not be built.
    #[error(transparent)]
    Profile(#[from] ProfileError),

    /// A selected anchor is not a segment boundary of its profile.
    #[error("anchor ({x:.4}, {y:.4}) is not a segment boundary of the {side} profile")]
    AnchorNotFound {
        /// Profile the anchor was looked up on.
        side: Side,
        /// X coordinate of the anchor.
        x: f64,
        /// Y coordinate of the anchor.
        y: f64,
    },

    /// Anchor selections differ in size or have fewer than two entries.
    #[error(
        "unequal anchor counts or too few anchors: front has {front}, back has {back} \
         (an equal number of at least 2 is required)"
    )]
    SelectionMismatch {
        /// Number of front anchors.
        front: usize,
        /// Number of back anchors.
        back: usize,
    },

    /// Step sizes or machine constants that make the geometry undefined.
    #[error("invalid geometry configuration: {0}")]
    GeometryConfig(String),

    /// An internal invariant was broken.
    #[error("contract violation: {0}")]
    ContractViolation(String),
}

/// Result type for cutting operations.
pub type Result<T> = std::result::Result<T, CutError>;
