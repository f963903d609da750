//! Profile import from SVG documents.
//!
//! Every `<path>`, `<polygon>`, `<polyline>`, `<line>`, `<rect>`, `<circle>`
//! and `<ellipse>` element of the document contributes its segments to one
//! unordered bag, which [`load_contour`] hands to the merger. Element
//! transforms are not applied. Elliptical arc commands and the round shapes
//! become [`CurveSegment::Arc`] segments whose endpoints are the exact
//! coordinates written in the document.

use std::f64::consts::{FRAC_PI_2, PI};

use hotwire_math::{Point2, Tolerance, Vec2};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::{merge_segments, Contour, CurveSegment, EllipticalArc, ProfileError, Result};

/// Parse an SVG document and merge all of its shapes into one closed contour.
pub fn load_contour(document: &str, tol: Tolerance) -> Result<Contour> {
    let segments = segments_from_svg(document)?;
    merge_segments(segments, tol)
}

/// Collect the segments of every supported shape element in `document`.
pub fn segments_from_svg(document: &str) -> Result<Vec<CurveSegment>> {
    let mut reader = Reader::from_str(document);
    reader.config_mut().trim_text(true);

    let mut buffer = Vec::new();
    let mut segments = Vec::new();
    let mut elements = 0usize;

    loop {
        match reader.read_event_into(&mut buffer) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                let before = segments.len();
                match e.local_name().as_ref() {
                    b"path" => {
                        if let Some(d) = attribute(e, b"d")? {
                            segments.extend(segments_from_path_data(&d)?);
                        }
                    }
                    b"polygon" => {
                        let points = parse_points(&attribute(e, b"points")?.unwrap_or_default())?;
                        segments.extend(polyline_segments(&points, true));
                    }
                    b"polyline" => {
                        let points = parse_points(&attribute(e, b"points")?.unwrap_or_default())?;
                        segments.extend(polyline_segments(&points, false));
                    }
                    b"line" => {
                        let start = Point2::new(number(e, b"x1")?, number(e, b"y1")?);
                        let end = Point2::new(number(e, b"x2")?, number(e, b"y2")?);
                        segments.extend(polyline_segments(&[start, end], false));
                    }
                    b"rect" => segments.extend(rect_segments(e)?),
                    b"circle" => {
                        let r = number(e, b"r")?;
                        let center = Point2::new(number(e, b"cx")?, number(e, b"cy")?);
                        segments.extend(ellipse_segments(center, Vec2::new(r, r)));
                    }
                    b"ellipse" => {
                        let radii = Vec2::new(number(e, b"rx")?, number(e, b"ry")?);
                        let center = Point2::new(number(e, b"cx")?, number(e, b"cy")?);
                        segments.extend(ellipse_segments(center, radii));
                    }
                    _ => {}
                }
                if segments.len() > before {
                    elements += 1;
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(ProfileError::Svg(format!(
                    "XML error at position {}: {}",
                    reader.buffer_position(),
                    e
                )))
            }
        }
        buffer.clear();
    }

    log::debug!(
        "read {} segments from {} SVG shape elements",
        segments.len(),
        elements
    );
    Ok(segments)
}

/// Convert SVG path data (the `d` attribute) into segments.
///
/// All commands of the SVG path grammar are understood, absolute and
/// relative. `ClosePath` adds a closing line when the current point differs
/// from the start of the sub-path. Zero-length segments are dropped.
pub fn segments_from_path_data(data: &str) -> Result<Vec<CurveSegment>> {
    let mut input = PathData::new(data);
    let mut path = PathBuilder::default();

    while let Some(letter) = input.command()? {
        let relative = letter.is_ascii_lowercase();
        let mut command = letter.to_ascii_uppercase();
        loop {
            path.apply(command, relative, &mut input)?;
            // Coordinate pairs following a move-to are implicit line-tos.
            if command == b'M' {
                command = b'L';
            }
            if command == b'Z' || !input.at_number() {
                break;
            }
        }
    }

    Ok(path.segments)
}

/// Cursor over the text of a path `d` attribute.
struct PathData<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> PathData<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    fn skip_separators(&mut self) {
        let rest = &self.text[self.pos..];
        let trimmed = rest.trim_start_matches(|c: char| c.is_ascii_whitespace() || c == ',');
        self.pos += rest.len() - trimmed.len();
    }

    fn peek(&mut self) -> Option<u8> {
        self.skip_separators();
        self.text.as_bytes().get(self.pos).copied()
    }

    /// Next command letter, `None` at the end of the data.
    fn command(&mut self) -> Result<Option<u8>> {
        match self.peek() {
            None => Ok(None),
            Some(c) if b"MmLlHhVvCcSsQqTtAaZz".contains(&c) => {
                self.pos += 1;
                Ok(Some(c))
            }
            Some(c) => Err(self.error(format!("unexpected {:?}", c as char))),
        }
    }

    fn at_number(&mut self) -> bool {
        matches!(self.peek(), Some(b'0'..=b'9' | b'.' | b'-' | b'+'))
    }

    fn number(&mut self) -> Result<f64> {
        self.skip_separators();
        let bytes = self.text.as_bytes();
        let digits = |mut i: usize| {
            while matches!(bytes.get(i), Some(b'0'..=b'9')) {
                i += 1;
            }
            i
        };

        let mut end = self.pos;
        if matches!(bytes.get(end), Some(b'-' | b'+')) {
            end += 1;
        }
        end = digits(end);
        if bytes.get(end) == Some(&b'.') {
            end = digits(end + 1);
        }
        if matches!(bytes.get(end), Some(b'e' | b'E')) {
            let mut exponent = end + 1;
            if matches!(bytes.get(exponent), Some(b'-' | b'+')) {
                exponent += 1;
            }
            let exponent_end = digits(exponent);
            if exponent_end > exponent {
                end = exponent_end;
            }
        }

        let value = self.text[self.pos..end]
            .parse::<f64>()
            .map_err(|_| self.error("expected a number"))?;
        self.pos = end;
        Ok(value)
    }

    /// Coordinate pair, offset by `origin`.
    fn point(&mut self, origin: Point2) -> Result<Point2> {
        let x = self.number()?;
        let y = self.number()?;
        Ok(origin + Vec2::new(x, y))
    }

    /// Arc flags are a single `0` or `1` and need no separator.
    fn flag(&mut self) -> Result<bool> {
        match self.peek() {
            Some(b'0') => {
                self.pos += 1;
                Ok(false)
            }
            Some(b'1') => {
                self.pos += 1;
                Ok(true)
            }
            _ => Err(self.error("expected an arc flag")),
        }
    }

    fn error(&self, message: impl std::fmt::Display) -> ProfileError {
        ProfileError::Svg(format!(
            "invalid path data {:?} at offset {}: {}",
            self.text, self.pos, message
        ))
    }
}

/// Segments and pen state accumulated while reading path data.
#[derive(Default)]
struct PathBuilder {
    segments: Vec<CurveSegment>,
    current: Option<Point2>,
    subpath_start: Option<Point2>,
    /// Second control point of the previous `C`/`S`, reflected by `S`.
    last_cubic: Option<Point2>,
    /// Control point of the previous `Q`/`T`, reflected by `T`.
    last_quad: Option<Point2>,
}

impl PathBuilder {
    /// Read the operands of one `command` (upper case) and extend the path.
    fn apply(&mut self, command: u8, relative: bool, input: &mut PathData) -> Result<()> {
        // A relative move-to opening the data is absolute.
        let origin = match self.current {
            Some(p) if relative => p,
            _ => Point2::origin(),
        };
        let last_cubic = self.last_cubic.take();
        let last_quad = self.last_quad.take();

        match command {
            b'M' => {
                let p = input.point(origin)?;
                self.current = Some(p);
                self.subpath_start = Some(p);
            }
            b'L' => {
                let to = input.point(origin)?;
                self.line_to(to)?;
            }
            b'H' => {
                let x = input.number()? + if relative { origin.x } else { 0.0 };
                let from = require_current(self.current)?;
                self.line_to(Point2::new(x, from.y))?;
            }
            b'V' => {
                let y = input.number()? + if relative { origin.y } else { 0.0 };
                let from = require_current(self.current)?;
                self.line_to(Point2::new(from.x, y))?;
            }
            b'C' => {
                let c1 = input.point(origin)?;
                let c2 = input.point(origin)?;
                let to = input.point(origin)?;
                self.curve_to(c1, c2, to)?;
            }
            b'S' => {
                let from = require_current(self.current)?;
                let c1 = last_cubic.map_or(from, |c| reflect(c, from));
                let c2 = input.point(origin)?;
                let to = input.point(origin)?;
                self.curve_to(c1, c2, to)?;
            }
            b'Q' => {
                let c = input.point(origin)?;
                let to = input.point(origin)?;
                self.quad_to(c, to)?;
            }
            b'T' => {
                let from = require_current(self.current)?;
                let c = last_quad.map_or(from, |c| reflect(c, from));
                let to = input.point(origin)?;
                self.quad_to(c, to)?;
            }
            b'A' => {
                let radii = Vec2::new(input.number()?, input.number()?);
                let x_rotation = input.number()?.to_radians();
                let large_arc = input.flag()?;
                let sweep = input.flag()?;
                let to = input.point(origin)?;
                let from = require_current(self.current)?;
                push_segment(
                    &mut self.segments,
                    arc_segment(from, to, radii, x_rotation, large_arc, sweep),
                );
                self.current = Some(to);
            }
            b'Z' => {
                if let (Some(from), Some(start)) = (self.current, self.subpath_start) {
                    push_segment(&mut self.segments, CurveSegment::line(from, start));
                }
                self.current = self.subpath_start;
            }
            other => return Err(input.error(format!("unknown command {:?}", other as char))),
        }
        Ok(())
    }

    fn line_to(&mut self, to: Point2) -> Result<()> {
        let from = require_current(self.current)?;
        push_segment(&mut self.segments, CurveSegment::line(from, to));
        self.current = Some(to);
        Ok(())
    }

    fn quad_to(&mut self, control: Point2, to: Point2) -> Result<()> {
        let from = require_current(self.current)?;
        push_segment(&mut self.segments, CurveSegment::quadratic(from, control, to));
        self.current = Some(to);
        self.last_quad = Some(control);
        Ok(())
    }

    fn curve_to(&mut self, control1: Point2, control2: Point2, to: Point2) -> Result<()> {
        let from = require_current(self.current)?;
        push_segment(
            &mut self.segments,
            CurveSegment::cubic(from, control1, control2, to),
        );
        self.current = Some(to);
        self.last_cubic = Some(control2);
        Ok(())
    }
}

fn reflect(control: Point2, about: Point2) -> Point2 {
    about + (about - control)
}

/// Endpoint-parameterized SVG arc as a center-parameterized segment.
///
/// Radii too small to span the endpoints are scaled up. An arc with a zero
/// radius is a straight line.
fn arc_segment(
    from: Point2,
    to: Point2,
    radii: Vec2,
    x_rotation: f64,
    large_arc: bool,
    sweep: bool,
) -> CurveSegment {
    let svg_arc = kurbo::SvgArc {
        from: kurbo::Point::new(from.x, from.y),
        to: kurbo::Point::new(to.x, to.y),
        radii: kurbo::Vec2::new(radii.x, radii.y),
        x_rotation,
        large_arc,
        sweep,
    };
    match kurbo::Arc::from_svg_arc(&svg_arc) {
        Some(arc) => exact_arc(
            EllipticalArc::new(
                to_point(arc.center),
                Vec2::new(arc.radii.x, arc.radii.y),
                arc.x_rotation,
                arc.start_angle,
                arc.sweep_angle,
            ),
            from,
            to,
        ),
        None => CurveSegment::line(from, to),
    }
}

/// Pin the endpoints of `arc` to the given points.
fn exact_arc(mut arc: EllipticalArc, start: Point2, end: Point2) -> CurveSegment {
    arc.start = start;
    arc.end = end;
    CurveSegment::Arc(arc)
}

/// Two half arcs starting and ending at the rightmost point. Shapes with a
/// non-positive radius are not rendered and yield nothing.
fn ellipse_segments(center: Point2, radii: Vec2) -> Vec<CurveSegment> {
    if radii.x <= 0.0 || radii.y <= 0.0 {
        return Vec::new();
    }
    let right = Point2::new(center.x + radii.x, center.y);
    let left = Point2::new(center.x - radii.x, center.y);
    vec![
        exact_arc(EllipticalArc::new(center, radii, 0.0, 0.0, PI), right, left),
        exact_arc(EllipticalArc::new(center, radii, 0.0, PI, PI), left, right),
    ]
}

/// Outline of a `<rect>`, with quarter arcs for rounded corners.
fn rect_segments(e: &BytesStart) -> Result<Vec<CurveSegment>> {
    let (x, y) = (number(e, b"x")?, number(e, b"y")?);
    let (width, height) = (number(e, b"width")?, number(e, b"height")?);
    if width <= 0.0 || height <= 0.0 {
        return Ok(Vec::new());
    }

    // A missing corner radius takes the value of the other one.
    let (rx, ry) = match (optional_number(e, b"rx")?, optional_number(e, b"ry")?) {
        (Some(rx), Some(ry)) => (rx, ry),
        (Some(r), None) | (None, Some(r)) => (r, r),
        (None, None) => (0.0, 0.0),
    };
    let rx = rx.clamp(0.0, width / 2.0);
    let ry = ry.clamp(0.0, height / 2.0);

    if rx == 0.0 || ry == 0.0 {
        let corners = [
            Point2::new(x, y),
            Point2::new(x + width, y),
            Point2::new(x + width, y + height),
            Point2::new(x, y + height),
        ];
        return Ok(polyline_segments(&corners, true));
    }

    let radii = Vec2::new(rx, ry);
    let (left, right) = (x + rx, x + width - rx);
    let (top, bottom) = (y + ry, y + height - ry);
    // Straight run then corner arc, clockwise on screen from the top edge.
    let sides = [
        (Point2::new(left, y), Point2::new(right, y), Point2::new(right, top)),
        (
            Point2::new(x + width, top),
            Point2::new(x + width, bottom),
            Point2::new(right, bottom),
        ),
        (
            Point2::new(right, y + height),
            Point2::new(left, y + height),
            Point2::new(left, bottom),
        ),
        (Point2::new(x, bottom), Point2::new(x, top), Point2::new(left, top)),
    ];

    let mut segments = Vec::with_capacity(8);
    for (i, &(start, corner, center)) in sides.iter().enumerate() {
        push_segment(&mut segments, CurveSegment::line(start, corner));
        let start_angle = -FRAC_PI_2 + i as f64 * FRAC_PI_2;
        let arc = EllipticalArc::new(center, radii, 0.0, start_angle, FRAC_PI_2);
        let next = sides[(i + 1) % sides.len()].0;
        segments.push(exact_arc(arc, corner, next));
    }
    Ok(segments)
}

fn to_point(p: kurbo::Point) -> Point2 {
    Point2::new(p.x, p.y)
}

fn require_current(current: Option<Point2>) -> Result<Point2> {
    current.ok_or_else(|| ProfileError::Svg("path data does not start with a move-to".into()))
}

fn push_segment(segments: &mut Vec<CurveSegment>, segment: CurveSegment) {
    if !segment.is_degenerate() {
        segments.push(segment);
    }
}

fn polyline_segments(points: &[Point2], closed: bool) -> Vec<CurveSegment> {
    let mut segments = Vec::new();
    for pair in points.windows(2) {
        push_segment(&mut segments, CurveSegment::line(pair[0], pair[1]));
    }
    if closed && points.len() > 2 {
        push_segment(
            &mut segments,
            CurveSegment::line(points[points.len() - 1], points[0]),
        );
    }
    segments
}

/// Parse a `points` attribute: coordinate pairs separated by whitespace
/// and/or commas.
fn parse_points(value: &str) -> Result<Vec<Point2>> {
    let numbers = value
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<f64>()
                .map_err(|_| ProfileError::Svg(format!("invalid coordinate {:?} in points list", s)))
        })
        .collect::<Result<Vec<f64>>>()?;

    if numbers.len() % 2 != 0 {
        return Err(ProfileError::Svg(format!(
            "odd number of coordinates in points list {:?}",
            value
        )));
    }

    Ok(numbers
        .chunks(2)
        .map(|xy| Point2::new(xy[0], xy[1]))
        .collect())
}

fn attribute(e: &BytesStart, name: &[u8]) -> Result<Option<String>> {
    for attr in e.attributes().with_checks(false) {
        let attr = attr.map_err(|err| ProfileError::Svg(format!("malformed attribute: {}", err)))?;
        if attr.key.local_name().as_ref() == name {
            let value = attr
                .unescape_value()
                .map_err(|err| ProfileError::Svg(format!("malformed attribute value: {}", err)))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

/// Numeric attribute, defaulting to zero when absent (SVG shape rules).
fn number(e: &BytesStart, name: &[u8]) -> Result<f64> {
    Ok(optional_number(e, name)?.unwrap_or(0.0))
}

fn optional_number(e: &BytesStart, name: &[u8]) -> Result<Option<f64>> {
    match attribute(e, name)? {
        Some(value) => value.trim().parse::<f64>().map(Some).map_err(|_| {
            ProfileError::Svg(format!(
                "invalid number {:?} for attribute {}",
                value,
                String::from_utf8_lossy(name)
            ))
        }),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_closed_path_data() {
        let segments = segments_from_path_data("M 0 0 L 10 0 L 10 10 Z").unwrap();
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[2].end(), Point2::new(0.0, 0.0));
    }

    #[test]
    fn test_explicit_close_adds_nothing() {
        let segments = segments_from_path_data("M 0 0 L 10 0 L 0 10 L 0 0 Z").unwrap();
        assert_eq!(segments.len(), 3);
    }

    #[test]
    fn test_relative_and_curved_commands() {
        let segments = segments_from_path_data("M 0 0 q 5 5 10 0 c 0 5 -10 5 -10 0 z").unwrap();
        assert_eq!(segments.len(), 2);
        assert!(matches!(segments[0], CurveSegment::Quadratic { .. }));
        assert!(matches!(segments[1], CurveSegment::Cubic { .. }));
        assert_eq!(segments[1].end(), Point2::new(0.0, 0.0));
    }

    #[test]
    fn test_invalid_path_data() {
        assert!(matches!(
            segments_from_path_data("M 0 0 L 10"),
            Err(ProfileError::Svg(_))
        ));
    }

    #[test]
    fn test_document_with_fragments() {
        // A square split into two unordered fragments plus a polygon-free
        // group element that must be ignored.
        let doc = r#"<?xml version="1.0"?>
            <svg xmlns="http://www.w3.org/2000/svg" width="100" height="100">
              <g id="layer1">
                <path d="M 100 100 L 0 100 L 0 0" />
                <path d="M 100 100 L 100 0 L 0 0"></path>
                <text x="5" y="5">label</text>
              </g>
            </svg>"#;
        let contour = load_contour(doc, Tolerance::EXACT).unwrap();
        assert_eq!(contour.len(), 4);
        assert_relative_eq!(contour.length(), 400.0);
    }

    #[test]
    fn test_polygon_and_line_elements() {
        let doc = r#"<svg>
              <polygon points="0,0 10,0 10,10" />
            </svg>"#;
        let segments = segments_from_svg(doc).unwrap();
        assert_eq!(segments.len(), 3);

        let doc = r#"<svg>
              <polyline points="0 0, 10 0" />
              <line x1="10" y1="0" x2="0" y2="5" />
              <line x2="0" y2="5" />
            </svg>"#;
        let contour = load_contour(doc, Tolerance::EXACT).unwrap();
        assert_eq!(contour.len(), 3);
    }

    #[test]
    fn test_open_document() {
        let doc = r#"<svg><path d="M 0 0 L 10 0 L 10 10" /></svg>"#;
        assert!(matches!(
            load_contour(doc, Tolerance::EXACT),
            Err(ProfileError::OpenContour { .. })
        ));
    }

    #[test]
    fn test_empty_document() {
        assert!(matches!(
            load_contour("<svg></svg>", Tolerance::EXACT),
            Err(ProfileError::EmptyProfile)
        ));
    }

    #[test]
    fn test_bad_points_list() {
        let doc = r#"<svg><polygon points="0,0 10" /></svg>"#;
        assert!(matches!(segments_from_svg(doc), Err(ProfileError::Svg(_))));
    }

    #[test]
    fn test_arc_command() {
        let segments = segments_from_path_data("M 0 0 A 50 50 0 0 1 100 0 Z").unwrap();
        assert_eq!(segments.len(), 2);
        let CurveSegment::Arc(arc) = &segments[0] else {
            panic!("expected an arc, got {:?}", segments[0]);
        };
        assert!(matches!(segments[1], CurveSegment::Line { .. }));
        assert_eq!(arc.start, Point2::new(0.0, 0.0));
        assert_eq!(arc.end, Point2::new(100.0, 0.0));
        assert_relative_eq!(arc.center, Point2::new(50.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(segments[0].at(0.5), Point2::new(50.0, -50.0), epsilon = 1e-9);

        let contour = load_contour(
            r#"<svg><path d="M 0 0 A 50 50 0 0 1 100 0 Z" /></svg>"#,
            Tolerance::EXACT,
        )
        .unwrap();
        assert_eq!(
            contour.vertices(),
            vec![Point2::new(0.0, 0.0), Point2::new(100.0, 0.0)]
        );
        assert_relative_eq!(
            contour.length(),
            50.0 * std::f64::consts::PI + 100.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_arc_radii_are_scaled_up() {
        // Radius 1 cannot span 10 units: it grows to 5, a half circle.
        let segments = segments_from_path_data("M 0 0 a 1 1 0 0 0 10 0").unwrap();
        let CurveSegment::Arc(arc) = &segments[0] else {
            panic!("expected an arc, got {:?}", segments[0]);
        };
        assert_relative_eq!(arc.radii.x, 5.0, epsilon = 1e-12);
        assert_eq!(arc.end, Point2::new(10.0, 0.0));
        assert_relative_eq!(segments[0].length(), 5.0 * std::f64::consts::PI, epsilon = 1e-9);
        assert_relative_eq!(segments[0].at(0.5), Point2::new(5.0, 5.0), epsilon = 1e-9);
    }

    #[test]
    fn test_flat_arc_is_a_line() {
        let segments = segments_from_path_data("M 0 0 A 0 5 0 0 1 10 0").unwrap();
        assert_eq!(segments, vec![CurveSegment::line(Point2::origin(), Point2::new(10.0, 0.0))]);
        // Compact flags and coordinates.
        let segments = segments_from_path_data("M0,0a5,5,0,1010,0").unwrap();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].end(), Point2::new(10.0, 0.0));
    }

    #[test]
    fn test_line_shorthands() {
        let segments = segments_from_path_data("M 10 10 h 10 V 20 H 10 z").unwrap();
        let ends: Vec<Point2> = segments.iter().map(|s| s.end()).collect();
        assert_eq!(
            ends,
            vec![
                Point2::new(20.0, 10.0),
                Point2::new(20.0, 20.0),
                Point2::new(10.0, 20.0),
                Point2::new(10.0, 10.0),
            ]
        );

        // Extra pairs after a move-to are line-tos; numbers may run together.
        let segments = segments_from_path_data("m1-1 9,0 0 .5e1").unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].start(), Point2::new(1.0, -1.0));
        assert_eq!(segments[1].end(), Point2::new(10.0, 4.0));
    }

    #[test]
    fn test_smooth_curves_reflect_controls() {
        let segments = segments_from_path_data("M 0 0 C 0 10 10 10 10 0 S 20 -10 20 0").unwrap();
        let CurveSegment::Cubic { control1, .. } = segments[1] else {
            panic!("expected a cubic, got {:?}", segments[1]);
        };
        assert_eq!(control1, Point2::new(10.0, -10.0));

        let segments = segments_from_path_data("M 0 0 Q 5 5 10 0 T 20 0 L 30 0 T 40 0").unwrap();
        let CurveSegment::Quadratic { control, .. } = segments[1] else {
            panic!("expected a quadratic, got {:?}", segments[1]);
        };
        assert_eq!(control, Point2::new(15.0, -5.0));
        // No preceding quadratic: the control point is the current point.
        let CurveSegment::Quadratic { control, .. } = segments[3] else {
            panic!("expected a quadratic, got {:?}", segments[3]);
        };
        assert_eq!(control, Point2::new(30.0, 0.0));
    }

    #[test]
    fn test_unknown_path_command() {
        assert!(matches!(
            segments_from_path_data("M 0 0 X 10 10"),
            Err(ProfileError::Svg(_))
        ));
        assert!(matches!(
            segments_from_path_data("L 10 10"),
            Err(ProfileError::Svg(_))
        ));
    }

    #[test]
    fn test_rect_element() {
        let doc = r#"<svg><rect x="10" y="20" width="100" height="50" /></svg>"#;
        let segments = segments_from_svg(doc).unwrap();
        assert_eq!(segments.len(), 4);
        assert!(segments.iter().all(|s| matches!(s, CurveSegment::Line { .. })));
        assert_eq!(segments[0].start(), Point2::new(10.0, 20.0));
        let contour = load_contour(doc, Tolerance::EXACT).unwrap();
        assert_relative_eq!(contour.length(), 300.0);

        assert!(segments_from_svg(r#"<svg><rect width="0" height="50" /></svg>"#)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_rounded_rect_element() {
        let doc = r#"<svg><rect width="100" height="50" rx="10" /></svg>"#;
        let segments = segments_from_svg(doc).unwrap();
        assert_eq!(segments.len(), 8);
        assert_eq!(
            segments
                .iter()
                .filter(|s| matches!(s, CurveSegment::Arc(_)))
                .count(),
            4
        );
        let contour = load_contour(doc, Tolerance::EXACT).unwrap();
        assert_relative_eq!(
            contour.length(),
            220.0 + 20.0 * std::f64::consts::PI,
            epsilon = 1e-9
        );

        // Radii larger than half the side collapse the straight runs.
        let pill = r#"<svg><rect width="100" height="20" rx="40" ry="15" /></svg>"#;
        let segments = segments_from_svg(pill).unwrap();
        assert_eq!(segments.len(), 6);
        assert!(load_contour(pill, Tolerance::EXACT).is_ok());
    }

    #[test]
    fn test_circle_element() {
        let doc = r#"<svg><circle cx="50" cy="50" r="10" /></svg>"#;
        let segments = segments_from_svg(doc).unwrap();
        assert_eq!(segments.len(), 2);
        assert!(segments.iter().all(|s| matches!(s, CurveSegment::Arc(_))));
        assert_eq!(segments[0].start(), Point2::new(60.0, 50.0));
        assert_eq!(segments[0].end(), Point2::new(40.0, 50.0));

        let contour = load_contour(doc, Tolerance::EXACT).unwrap();
        assert_eq!(contour.len(), 2);
        assert_relative_eq!(
            contour.length(),
            20.0 * std::f64::consts::PI,
            epsilon = 1e-9
        );

        assert!(matches!(
            load_contour(r#"<svg><circle r="0" /></svg>"#, Tolerance::EXACT),
            Err(ProfileError::EmptyProfile)
        ));
    }

    #[test]
    fn test_ellipse_element() {
        let doc = r#"<svg><ellipse cx="0" cy="0" rx="20" ry="10" /></svg>"#;
        let segments = segments_from_svg(doc).unwrap();
        assert_eq!(segments.len(), 2);
        assert!(segments.iter().all(|s| matches!(s, CurveSegment::Arc(_))));
        assert_relative_eq!(segments[0].at(0.5), Point2::new(0.0, 10.0), epsilon = 1e-9);

        let contour = load_contour(doc, Tolerance::EXACT).unwrap();
        // Perimeter of a 20 x 10 ellipse.
        assert_relative_eq!(contour.length(), 96.884_5, epsilon = 1e-3);
    }
}
