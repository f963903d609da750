#![warn(missing_docs)]

//! G-code generation for the hotwire cutter.
//!
//! This crate serializes a projected [`ToolPointCloud`] into a motion program
//! for a 4-axis (XYUV) foam cutter: home, wire heat on, one linear move per
//! synchronized position, retract, wire heat off.
//!
//! # Example
//!
//! ```
//! use hotwire_math::Point2;
//! use hotwire_slicer::{PointCloud, ToolPointCloud};
//! use hotwire_gcode::{generate_gcode, GcodeSettings};
//!
//! let square = PointCloud::new(vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(10.0, 0.0),
//!     Point2::new(10.0, 10.0),
//!     Point2::new(0.0, 10.0),
//! ]);
//! let tool = ToolPointCloud {
//!     front: square.clone(),
//!     back: square,
//! };
//!
//! let gcode = generate_gcode(&tool, &GcodeSettings::default()).unwrap();
//! assert!(gcode.starts_with("G28\nM3\n"));
//! ```
//!
//! [`ToolPointCloud`]: hotwire_slicer::ToolPointCloud

pub mod gcode;

pub use gcode::{format_coord, generate_gcode, GcodeError, GcodeGenerator, GcodeSettings, Result};
