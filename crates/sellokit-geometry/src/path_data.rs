//! SVG path data parsing.
//!
//! Turns the `d` attribute of a `<path>` element into a list of curve
//! segments. Supports the full command set `M L H V C S Q T A Z` in
//! absolute and relative form, implicit command repetition and the compact
//! number syntax produced by optimizers (`10-5`, `.5.5`, packed arc flags).
//!
//! Parsing follows the SVG error rule: everything up to the first error is
//! kept, the rest of the data is dropped and the result is marked incomplete.

use lyon::geom::{
    point, vector, Angle, ArcFlags, Box2D, CubicBezierSegment, LineSegment, Point,
    QuadraticBezierSegment, SvgArc,
};

/// One drawable piece of a path
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    Line(LineSegment<f64>),
    Quadratic(QuadraticBezierSegment<f64>),
    Cubic(CubicBezierSegment<f64>),
    Arc(SvgArc<f64>),
}

impl Segment {
    /// Tight axis-aligned bounds of the segment (curve extrema, not control points)
    pub fn bounding_box(&self) -> Box2D<f64> {
        match self {
            Self::Line(s) => s.bounding_box(),
            Self::Quadratic(s) => s.bounding_box(),
            Self::Cubic(s) => s.bounding_box(),
            Self::Arc(s) => {
                if s.is_straight_line() {
                    LineSegment {
                        from: s.from,
                        to: s.to,
                    }
                    .bounding_box()
                } else {
                    s.to_arc().bounding_box()
                }
            }
        }
    }
}

/// Parsed path data
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathData {
    pub segments: Vec<Segment>,
    /// False when the data contained an error and was truncated there
    pub complete: bool,
}

impl PathData {
    pub fn parse(data: &str) -> Self {
        let mut parser = PathParser::new(data);
        let complete = parser.run().is_some();
        Self {
            segments: parser.segments,
            complete,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Parse a whitespace/comma separated number list (`points` attributes).
/// Stops at the first malformed number.
pub(crate) fn parse_number_list(data: &str) -> Vec<f64> {
    let mut cursor = Cursor::new(data);
    let mut values = Vec::new();
    while cursor.at_number() {
        match cursor.number() {
            Some(v) => values.push(v),
            None => break,
        }
    }
    values
}

/// Byte cursor over path data
struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a str) -> Self {
        Self {
            bytes: data.as_bytes(),
            pos: 0,
        }
    }

    fn skip_separators(&mut self) {
        while let Some(&b) = self.bytes.get(self.pos) {
            if b.is_ascii_whitespace() || b == b',' {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn at_end(&mut self) -> bool {
        self.skip_separators();
        self.pos >= self.bytes.len()
    }

    /// Next byte is the start of a number (after separators)
    fn at_number(&mut self) -> bool {
        self.skip_separators();
        matches!(
            self.bytes.get(self.pos),
            Some(b'0'..=b'9' | b'.' | b'-' | b'+')
        )
    }

    fn command(&mut self) -> Option<u8> {
        self.skip_separators();
        let b = *self.bytes.get(self.pos)?;
        if b.is_ascii_alphabetic() {
            self.pos += 1;
            Some(b)
        } else {
            None
        }
    }

    fn number(&mut self) -> Option<f64> {
        self.skip_separators();
        let start = self.pos;

        if matches!(self.bytes.get(self.pos), Some(b'-' | b'+')) {
            self.pos += 1;
        }

        let mut digits = self.eat_digits();
        if self.bytes.get(self.pos) == Some(&b'.') {
            self.pos += 1;
            digits += self.eat_digits();
        }
        if digits == 0 {
            self.pos = start;
            return None;
        }

        // Exponent, only when followed by digits so `e` never swallows a command.
        if matches!(self.bytes.get(self.pos), Some(b'e' | b'E')) {
            let mark = self.pos;
            self.pos += 1;
            if matches!(self.bytes.get(self.pos), Some(b'-' | b'+')) {
                self.pos += 1;
            }
            if self.eat_digits() == 0 {
                self.pos = mark;
            }
        }

        let text = std::str::from_utf8(&self.bytes[start..self.pos]).ok()?;
        text.parse::<f64>().ok().filter(|v| v.is_finite())
    }

    /// Arc flags are single `0`/`1` characters and may be packed (`a5 5 0 016 6`)
    fn flag(&mut self) -> Option<bool> {
        self.skip_separators();
        let flag = match self.bytes.get(self.pos)? {
            b'0' => false,
            b'1' => true,
            _ => return None,
        };
        self.pos += 1;
        Some(flag)
    }

    fn eat_digits(&mut self) -> usize {
        let start = self.pos;
        while matches!(self.bytes.get(self.pos), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
        self.pos - start
    }
}

struct PathParser<'a> {
    cursor: Cursor<'a>,
    segments: Vec<Segment>,
    current: Point<f64>,
    subpath_start: Point<f64>,
    // Previous control points for the smooth commands.
    prev_cubic_ctrl: Option<Point<f64>>,
    prev_quad_ctrl: Option<Point<f64>>,
}

impl<'a> PathParser<'a> {
    fn new(data: &'a str) -> Self {
        Self {
            cursor: Cursor::new(data),
            segments: Vec::new(),
            current: point(0.0, 0.0),
            subpath_start: point(0.0, 0.0),
            prev_cubic_ctrl: None,
            prev_quad_ctrl: None,
        }
    }

    /// Returns `None` at the first error; segments parsed so far are kept.
    fn run(&mut self) -> Option<()> {
        if self.cursor.at_end() {
            return Some(());
        }

        let mut first = true;
        while !self.cursor.at_end() {
            let cmd = self.cursor.command()?;
            if first && !matches!(cmd, b'M' | b'm') {
                return None;
            }
            first = false;
            self.command(cmd)?;
        }
        Some(())
    }

    fn resolve(&self, relative: bool, x: f64, y: f64) -> Point<f64> {
        if relative {
            point(self.current.x + x, self.current.y + y)
        } else {
            point(x, y)
        }
    }

    fn coordinate_pair(&mut self, relative: bool) -> Option<Point<f64>> {
        let x = self.cursor.number()?;
        let y = self.cursor.number()?;
        Some(self.resolve(relative, x, y))
    }

    fn push_line(&mut self, to: Point<f64>) {
        self.segments.push(Segment::Line(LineSegment {
            from: self.current,
            to,
        }));
        self.current = to;
    }

    fn command(&mut self, cmd: u8) -> Option<()> {
        let relative = cmd.is_ascii_lowercase();

        match cmd.to_ascii_uppercase() {
            b'M' => {
                // First pair is the moveto, the rest are implicit linetos.
                let to = self.coordinate_pair(relative)?;
                self.current = to;
                self.subpath_start = to;
                while self.cursor.at_number() {
                    let to = self.coordinate_pair(relative)?;
                    self.push_line(to);
                }
                self.clear_smooth();
            }
            b'L' => {
                loop {
                    let to = self.coordinate_pair(relative)?;
                    self.push_line(to);
                    if !self.cursor.at_number() {
                        break;
                    }
                }
                self.clear_smooth();
            }
            b'H' => {
                loop {
                    let x = self.cursor.number()?;
                    let x = if relative { self.current.x + x } else { x };
                    self.push_line(point(x, self.current.y));
                    if !self.cursor.at_number() {
                        break;
                    }
                }
                self.clear_smooth();
            }
            b'V' => {
                loop {
                    let y = self.cursor.number()?;
                    let y = if relative { self.current.y + y } else { y };
                    self.push_line(point(self.current.x, y));
                    if !self.cursor.at_number() {
                        break;
                    }
                }
                self.clear_smooth();
            }
            b'C' => loop {
                let ctrl1 = self.coordinate_pair(relative)?;
                let ctrl2 = self.coordinate_pair(relative)?;
                let to = self.coordinate_pair(relative)?;
                self.push_cubic(ctrl1, ctrl2, to);
                if !self.cursor.at_number() {
                    break;
                }
            },
            b'S' => loop {
                let ctrl1 = match self.prev_cubic_ctrl {
                    Some(prev) => reflect(prev, self.current),
                    None => self.current,
                };
                let ctrl2 = self.coordinate_pair(relative)?;
                let to = self.coordinate_pair(relative)?;
                self.push_cubic(ctrl1, ctrl2, to);
                if !self.cursor.at_number() {
                    break;
                }
            },
            b'Q' => loop {
                let ctrl = self.coordinate_pair(relative)?;
                let to = self.coordinate_pair(relative)?;
                self.push_quadratic(ctrl, to);
                if !self.cursor.at_number() {
                    break;
                }
            },
            b'T' => loop {
                let ctrl = match self.prev_quad_ctrl {
                    Some(prev) => reflect(prev, self.current),
                    None => self.current,
                };
                let to = self.coordinate_pair(relative)?;
                self.push_quadratic(ctrl, to);
                if !self.cursor.at_number() {
                    break;
                }
            },
            b'A' => {
                loop {
                    let rx = self.cursor.number()?;
                    let ry = self.cursor.number()?;
                    let x_rotation = self.cursor.number()?;
                    let large_arc = self.cursor.flag()?;
                    let sweep = self.cursor.flag()?;
                    let to = self.coordinate_pair(relative)?;
                    self.push_arc(rx, ry, x_rotation, large_arc, sweep, to);
                    if !self.cursor.at_number() {
                        break;
                    }
                }
                self.clear_smooth();
            }
            b'Z' => {
                if self.current != self.subpath_start {
                    self.push_line(self.subpath_start);
                }
                self.current = self.subpath_start;
                self.clear_smooth();
            }
            _ => return None,
        }

        Some(())
    }

    fn push_cubic(&mut self, ctrl1: Point<f64>, ctrl2: Point<f64>, to: Point<f64>) {
        self.segments.push(Segment::Cubic(CubicBezierSegment {
            from: self.current,
            ctrl1,
            ctrl2,
            to,
        }));
        self.current = to;
        self.prev_cubic_ctrl = Some(ctrl2);
        self.prev_quad_ctrl = None;
    }

    fn push_quadratic(&mut self, ctrl: Point<f64>, to: Point<f64>) {
        self.segments.push(Segment::Quadratic(QuadraticBezierSegment {
            from: self.current,
            ctrl,
            to,
        }));
        self.current = to;
        self.prev_quad_ctrl = Some(ctrl);
        self.prev_cubic_ctrl = None;
    }

    fn push_arc(
        &mut self,
        rx: f64,
        ry: f64,
        x_rotation_deg: f64,
        large_arc: bool,
        sweep: bool,
        to: Point<f64>,
    ) {
        // An arc ending where it starts is omitted entirely.
        if to == self.current {
            return;
        }
        self.segments.push(Segment::Arc(SvgArc {
            from: self.current,
            to,
            radii: vector(rx.abs(), ry.abs()),
            x_rotation: Angle::degrees(x_rotation_deg),
            flags: ArcFlags { large_arc, sweep },
        }));
        self.current = to;
    }

    fn clear_smooth(&mut self) {
        self.prev_cubic_ctrl = None;
        self.prev_quad_ctrl = None;
    }
}

fn reflect(p: Point<f64>, around: Point<f64>) -> Point<f64> {
    point(2.0 * around.x - p.x, 2.0 * around.y - p.y)
}
