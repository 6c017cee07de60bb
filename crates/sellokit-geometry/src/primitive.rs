//! Geometric primitives recognized in vector markup.
//!
//! Each primitive knows its own axis-aligned bounds, computed analytically
//! from its attributes. Element transforms are never consulted.

use crate::bbox::Extent;
use crate::path_data::{parse_number_list, PathData};
use lyon::geom::{point, Point};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Element types that contribute geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    Path,
    Rect,
    Circle,
    Ellipse,
    Line,
    Polyline,
    Polygon,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 7] = [
        Self::Path,
        Self::Rect,
        Self::Circle,
        Self::Ellipse,
        Self::Line,
        Self::Polyline,
        Self::Polygon,
    ];

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "path" => Some(Self::Path),
            "rect" => Some(Self::Rect),
            "circle" => Some(Self::Circle),
            "ellipse" => Some(Self::Ellipse),
            "line" => Some(Self::Line),
            "polyline" => Some(Self::Polyline),
            "polygon" => Some(Self::Polygon),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Self::Path => "path",
            Self::Rect => "rect",
            Self::Circle => "circle",
            Self::Ellipse => "ellipse",
            Self::Line => "line",
            Self::Polyline => "polyline",
            Self::Polygon => "polygon",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A measurable shape
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Path(PathData),
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
    },
    Ellipse {
        cx: f64,
        cy: f64,
        rx: f64,
        ry: f64,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
    Polyline(Vec<Point<f64>>),
    Polygon(Vec<Point<f64>>),
}

impl Primitive {
    /// Build a primitive from an element's tag and attribute lookup.
    ///
    /// Returns `None` for unrecognized tags and for shapes that render
    /// nothing (non-positive sizes, no points, no path segments).
    pub fn from_attributes<'a, F>(kind: PrimitiveKind, attr: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        let length = |name: &str| attr(name).and_then(parse_length).unwrap_or(0.0);

        match kind {
            PrimitiveKind::Path => {
                let data = PathData::parse(attr("d")?);
                if !data.complete {
                    tracing::warn!(
                        segments = data.segments.len(),
                        "Path data contains an error, measuring the part before it"
                    );
                }
                (!data.is_empty()).then_some(Self::Path(data))
            }
            PrimitiveKind::Rect => {
                let (width, height) = (length("width"), length("height"));
                (width > 0.0 && height > 0.0).then(|| Self::Rect {
                    x: length("x"),
                    y: length("y"),
                    width,
                    height,
                })
            }
            PrimitiveKind::Circle => {
                let r = length("r");
                (r > 0.0).then(|| Self::Circle {
                    cx: length("cx"),
                    cy: length("cy"),
                    r,
                })
            }
            PrimitiveKind::Ellipse => {
                let (rx, ry) = (length("rx"), length("ry"));
                (rx > 0.0 && ry > 0.0).then(|| Self::Ellipse {
                    cx: length("cx"),
                    cy: length("cy"),
                    rx,
                    ry,
                })
            }
            PrimitiveKind::Line => Some(Self::Line {
                x1: length("x1"),
                y1: length("y1"),
                x2: length("x2"),
                y2: length("y2"),
            }),
            PrimitiveKind::Polyline | PrimitiveKind::Polygon => {
                let points = parse_points(attr("points")?);
                if points.is_empty() {
                    return None;
                }
                Some(if kind == PrimitiveKind::Polyline {
                    Self::Polyline(points)
                } else {
                    Self::Polygon(points)
                })
            }
        }
    }

    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Self::Path(_) => PrimitiveKind::Path,
            Self::Rect { .. } => PrimitiveKind::Rect,
            Self::Circle { .. } => PrimitiveKind::Circle,
            Self::Ellipse { .. } => PrimitiveKind::Ellipse,
            Self::Line { .. } => PrimitiveKind::Line,
            Self::Polyline(_) => PrimitiveKind::Polyline,
            Self::Polygon(_) => PrimitiveKind::Polygon,
        }
    }

    /// Own-geometry bounds, ignoring any transform
    pub fn extent(&self) -> Extent {
        let mut extent = Extent::empty();
        match self {
            Self::Path(data) => {
                for segment in &data.segments {
                    extent.include_box(&segment.bounding_box());
                }
            }
            Self::Rect {
                x,
                y,
                width,
                height,
            } => {
                extent.include_point(*x, *y);
                extent.include_point(x + width, y + height);
            }
            Self::Circle { cx, cy, r } => {
                extent.include_point(cx - r, cy - r);
                extent.include_point(cx + r, cy + r);
            }
            Self::Ellipse { cx, cy, rx, ry } => {
                extent.include_point(cx - rx, cy - ry);
                extent.include_point(cx + rx, cy + ry);
            }
            Self::Line { x1, y1, x2, y2 } => {
                extent.include_point(*x1, *y1);
                extent.include_point(*x2, *y2);
            }
            Self::Polyline(points) | Self::Polygon(points) => {
                for p in points {
                    extent.include_point(p.x, p.y);
                }
            }
        }
        extent
    }
}

/// User units per absolute CSS unit, at 96 user units to the inch
const ABSOLUTE_UNITS: [(&str, f64); 6] = [
    ("px", 1.0),
    ("in", 96.0),
    ("cm", 96.0 / 2.54),
    ("mm", 96.0 / 25.4),
    ("pt", 4.0 / 3.0),
    ("pc", 16.0),
];

/// Parse a length attribute into user units.
///
/// Accepts a plain number or one suffixed with an absolute CSS unit.
/// Relative lengths (`%`, `em`) have no meaning without a viewport and
/// yield `None`.
pub fn parse_length(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let (number, factor) = ABSOLUTE_UNITS
        .iter()
        .find_map(|(unit, factor)| trimmed.strip_suffix(*unit).map(|n| (n, *factor)))
        .unwrap_or((trimmed, 1.0));
    number
        .trim_end()
        .parse::<f64>()
        .ok()
        .map(|v| v * factor)
        .filter(|v| v.is_finite())
}

/// Coordinate pairs of a `points` attribute; a trailing odd coordinate is dropped
fn parse_points(raw: &str) -> Vec<Point<f64>> {
    parse_number_list(raw)
        .chunks_exact(2)
        .map(|pair| point(pair[0], pair[1]))
        .collect()
}
