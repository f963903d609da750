//! XYUV motion program generation.

use hotwire_math::Point2;
use hotwire_slicer::ToolPointCloud;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from G-code generation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GcodeError {
    /// The tool path cannot be emitted as given.
    #[error("contract violation: {0}")]
    ContractViolation(String),

    /// Generation settings are out of range.
    #[error("invalid G-code settings: {0}")]
    InvalidSettings(String),
}

/// Result type for G-code generation.
pub type Result<T> = std::result::Result<T, GcodeError>;

/// G-code generation settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GcodeSettings {
    /// Feedrate of every linear move.
    pub feedrate: f64,
    /// Dwell after switching the wire on, before the first move (s).
    pub heat_up_dwell: f64,
    /// Dwell after the last move, before switching the wire off (s).
    pub cool_down_dwell: f64,
}

impl Default for GcodeSettings {
    fn default() -> Self {
        Self {
            feedrate: 5.0,
            heat_up_dwell: 2.0,
            cool_down_dwell: 5.0,
        }
    }
}

impl GcodeSettings {
    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        if !self.feedrate.is_finite() || self.feedrate <= 0.0 {
            return Err(GcodeError::InvalidSettings(format!(
                "feedrate must be positive, got {}",
                self.feedrate
            )));
        }
        for (name, value) in [
            ("heat_up_dwell", self.heat_up_dwell),
            ("cool_down_dwell", self.cool_down_dwell),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(GcodeError::InvalidSettings(format!(
                    "{} must be zero or positive, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// Format a coordinate with four decimals. Values that round to zero are
/// printed without a sign.
pub fn format_coord(value: f64) -> String {
    let text = format!("{:.4}", value);
    match text.strip_prefix('-') {
        Some(magnitude) if magnitude.bytes().all(|b| b == b'0' || b == b'.') => {
            magnitude.to_string()
        }
        _ => text,
    }
}

/// Incremental G-code writer.
pub struct GcodeGenerator {
    settings: GcodeSettings,
    output: String,
    moves: usize,
}

impl GcodeGenerator {
    /// Create a generator.
    pub fn new(settings: GcodeSettings) -> Self {
        Self {
            settings,
            output: String::new(),
            moves: 0,
        }
    }

    /// Home all axes, switch the wire on, wait for it to heat up and select
    /// absolute positioning.
    pub fn header(&mut self) {
        self.line("G28");
        self.line("M3");
        self.line(&format!("G04 P{}", self.settings.heat_up_dwell));
        self.line("G90");
    }

    /// Linear move of both carriages.
    pub fn linear_move(&mut self, xy: &Point2, uv: &Point2) {
        let command = format!(
            "G01 X{} Y{} U{} V{} F{}",
            format_coord(xy.x),
            format_coord(xy.y),
            format_coord(uv.x),
            format_coord(uv.y),
            self.settings.feedrate
        );
        self.line(&command);
        self.moves += 1;
    }

    /// Move both horizontal axes to zero, keeping the heights of `xy`/`uv`.
    pub fn retract(&mut self, xy: &Point2, uv: &Point2) {
        self.linear_move(&Point2::new(0.0, xy.y), &Point2::new(0.0, uv.y));
    }

    /// Let the wire cool down and switch it off.
    pub fn footer(&mut self) {
        self.line(&format!("G04 P{}", self.settings.cool_down_dwell));
        self.line("M5");
    }

    /// Number of linear moves written so far.
    pub fn move_count(&self) -> usize {
        self.moves
    }

    /// Consume the generator and return the program text.
    pub fn finish(self) -> String {
        self.output
    }

    fn line(&mut self, text: &str) {
        self.output.push_str(text);
        self.output.push('\n');
    }
}

/// Generate the complete motion program for `tool`.
///
/// The wire enters from X/U zero at the height of the first position, visits
/// every position in order, closes the loop back to the first one and leaves
/// the same way it came in.
///
/// # Errors
///
/// - [`GcodeError::ContractViolation`] for an empty path, unequal XY/UV
///   lengths or non-finite coordinates.
/// - [`GcodeError::InvalidSettings`] when `settings` fail validation.
pub fn generate_gcode(tool: &ToolPointCloud, settings: &GcodeSettings) -> Result<String> {
    settings.validate()?;
    check_tool_path(tool)?;

    let xy0 = tool.front.points[0];
    let uv0 = tool.back.points[0];

    let mut generator = GcodeGenerator::new(*settings);
    generator.header();
    generator.retract(&xy0, &uv0);
    for (xy, uv) in tool.iter() {
        generator.linear_move(xy, uv);
    }
    generator.linear_move(&xy0, &uv0);
    generator.retract(&xy0, &uv0);
    generator.footer();

    log::debug!(
        "generated {} linear moves for {} tool positions",
        generator.move_count(),
        tool.len()
    );
    Ok(generator.finish())
}

fn check_tool_path(tool: &ToolPointCloud) -> Result<()> {
    if tool.front.len() != tool.back.len() {
        return Err(GcodeError::ContractViolation(format!(
            "XY and UV paths differ in length: {} vs {}",
            tool.front.len(),
            tool.back.len()
        )));
    }
    if tool.is_empty() {
        return Err(GcodeError::ContractViolation("empty tool path".into()));
    }
    let finite = |p: &Point2| p.x.is_finite() && p.y.is_finite();
    if let Some(i) = tool.iter().position(|(xy, uv)| !(finite(xy) && finite(uv))) {
        return Err(GcodeError::ContractViolation(format!(
            "non-finite coordinate at index {}",
            i
        )));
    }
    Ok(())
}
