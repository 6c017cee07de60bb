//! Parsed vector drawings and bounding-box measurement.

use crate::bbox::{BoundingBox, Extent};
use crate::primitive::{Primitive, PrimitiveKind};
use roxmltree::{Document, Node, ParsingOptions};
use sellokit_core::GeometryError;
use std::collections::HashMap;

/// A primitive element together with the attributes it was declared with.
///
/// The `transform` attribute is dropped at parse time: measurement and
/// fitting treat the whole drawing as one rigid body in its own coordinates.
/// Every matched element is kept for output; `primitive` is `None` when its
/// attributes describe nothing measurable (relative lengths, zero size).
#[derive(Debug, Clone, PartialEq)]
pub struct DrawingElement {
    pub kind: PrimitiveKind,
    pub primitive: Option<Primitive>,
    pub attributes: Vec<(String, String)>,
}

impl DrawingElement {
    pub fn kind(&self) -> PrimitiveKind {
        self.kind
    }

    pub fn is_measurable(&self) -> bool {
        self.primitive.is_some()
    }
}

/// Immutable view of an SVG document reduced to its measurable primitives
#[derive(Debug, Clone, PartialEq)]
pub struct VectorDrawing {
    root_attributes: Vec<(String, String)>,
    elements: Vec<DrawingElement>,
}

impl VectorDrawing {
    /// Parse SVG markup.
    ///
    /// Fails with [`GeometryError::Parse`] when the text is not well-formed
    /// XML or its root is not an `<svg>` element. A document without any
    /// primitives parses fine; measuring it is what fails.
    pub fn parse(markup: &str) -> Result<Self, GeometryError> {
        let options = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };
        let doc = Document::parse_with_options(markup, options).map_err(|e| {
            GeometryError::Parse {
                reason: e.to_string(),
            }
        })?;

        let root = doc.root_element();
        if root.tag_name().name() != "svg" {
            return Err(GeometryError::Parse {
                reason: format!(
                    "root element is <{}>, expected <svg>",
                    root.tag_name().name()
                ),
            });
        }

        let elements: Vec<DrawingElement> = root
            .descendants()
            .filter(|n| n.is_element())
            .filter_map(|node| {
                let kind = PrimitiveKind::from_tag(node.tag_name().name())?;
                let primitive = Primitive::from_attributes(kind, |name| node.attribute(name));
                if primitive.is_none() {
                    tracing::debug!(%kind, "Element has no measurable geometry, keeping it unmeasured");
                }
                Some(DrawingElement {
                    kind,
                    primitive,
                    attributes: plain_attributes(&node, &["transform"]),
                })
            })
            .collect();

        tracing::debug!(
            elements = elements.len(),
            measurable = elements.iter().filter(|e| e.is_measurable()).count(),
            "Parsed vector drawing"
        );

        Ok(Self {
            root_attributes: plain_attributes(
                &root,
                &["width", "height", "viewBox", "preserveAspectRatio"],
            ),
            elements,
        })
    }

    /// Root `<svg>` attributes other than the sizing ones
    pub fn root_attributes(&self) -> &[(String, String)] {
        &self.root_attributes
    }

    pub fn elements(&self) -> &[DrawingElement] {
        &self.elements
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Number of matched elements per kind
    pub fn primitive_counts(&self) -> HashMap<PrimitiveKind, usize> {
        let mut counts = HashMap::new();
        for element in &self.elements {
            *counts.entry(element.kind()).or_insert(0) += 1;
        }
        counts
    }

    /// Exclusive bounding box of all measurable primitives, transforms ignored.
    ///
    /// Fails with [`GeometryError::EmptyGeometry`] when there are no
    /// measurable primitives or their union has zero width or height.
    pub fn measure(&self) -> Result<BoundingBox, GeometryError> {
        let extent: Extent = self
            .elements
            .iter()
            .filter_map(|e| e.primitive.as_ref())
            .map(Primitive::extent)
            .collect();
        let bbox = extent.to_bounding_box()?;
        if bbox.is_degenerate() {
            tracing::debug!(?bbox, "Drawing bounding box has zero area");
            return Err(GeometryError::EmptyGeometry);
        }

        tracing::debug!(
            min_x = bbox.min_x,
            min_y = bbox.min_y,
            width = bbox.width,
            height = bbox.height,
            "Measured drawing"
        );
        Ok(bbox)
    }
}

/// Parse and measure in one step
pub fn measure_markup(markup: &str) -> Result<BoundingBox, GeometryError> {
    VectorDrawing::parse(markup)?.measure()
}

/// Unprefixed attributes of a node, minus the excluded names.
/// Namespaced attributes (editor metadata, `xml:space`) are not carried over.
fn plain_attributes(node: &Node<'_, '_>, excluded: &[&str]) -> Vec<(String, String)> {
    node.attributes()
        .filter(|a| a.namespace().is_none() && !excluded.contains(&a.name()))
        .map(|a| (a.name().to_string(), a.value().to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_collects_nested_primitives() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="300" height="300">
  <g transform="translate(5,5)">
    <rect x="10" y="10" width="50" height="30" transform="rotate(45)" fill="red"/>
    <g><circle cx="150" cy="30" r="15"/></g>
  </g>
  <text x="0" y="0">ignored</text>
</svg>"#;
        let drawing = VectorDrawing::parse(svg).unwrap();
        assert_eq!(drawing.elements().len(), 2);

        let rect = &drawing.elements()[0];
        assert_eq!(rect.kind(), PrimitiveKind::Rect);
        assert!(rect.attributes.iter().all(|(k, _)| k != "transform"));
        assert!(rect
            .attributes
            .contains(&("fill".to_string(), "red".to_string())));

        assert!(drawing
            .root_attributes()
            .iter()
            .all(|(k, _)| k != "width" && k != "height"));
    }

    #[test]
    fn test_measure_union() {
        let svg = r#"<svg><rect x="10" y="10" width="50" height="30"/><circle cx="150" cy="30" r="15"/></svg>"#;
        let bbox = measure_markup(svg).unwrap();
        assert_eq!(bbox, BoundingBox::new(10.0, 10.0, 155.0, 35.0));
    }

    #[test]
    fn test_malformed_markup_is_parse_error() {
        let err = VectorDrawing::parse("<svg><rect></svg>").unwrap_err();
        assert!(matches!(err, GeometryError::Parse { .. }));

        let err = VectorDrawing::parse("not markup at all").unwrap_err();
        assert!(matches!(err, GeometryError::Parse { .. }));
    }

    #[test]
    fn test_non_svg_root_is_parse_error() {
        let err = VectorDrawing::parse("<html><rect width='1' height='1'/></html>").unwrap_err();
        assert!(matches!(err, GeometryError::Parse { .. }));
    }

    #[test]
    fn test_doctype_is_accepted() {
        let svg = r#"<?xml version="1.0"?>
<!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 1.1//EN" "http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd">
<svg xmlns="http://www.w3.org/2000/svg"><rect width="4" height="2"/></svg>"#;
        assert_eq!(
            measure_markup(svg).unwrap(),
            BoundingBox::new(0.0, 0.0, 4.0, 2.0)
        );
    }

    #[test]
    fn test_empty_drawing() {
        let drawing = VectorDrawing::parse("<svg></svg>").unwrap();
        assert!(drawing.is_empty());
        assert_eq!(drawing.measure(), Err(GeometryError::EmptyGeometry));
    }

    #[test]
    fn test_zero_area_union_is_empty() {
        let svg = r#"<svg><line x1="0" y1="5" x2="100" y2="5"/></svg>"#;
        assert_eq!(measure_markup(svg), Err(GeometryError::EmptyGeometry));
    }

    #[test]
    fn test_unit_lengths_are_measured() {
        let svg = r#"<svg><rect width="100" height="50"/><rect x="200" width="10mm" height="10mm"/></svg>"#;
        let bbox = measure_markup(svg).unwrap();
        assert_eq!(bbox.min_x, 0.0);
        assert!((bbox.width - (200.0 + 960.0 / 25.4)).abs() < 1e-9);
        assert_eq!(bbox.height, 50.0);
    }

    #[test]
    fn test_unmeasurable_elements_are_kept() {
        let svg = r#"<svg><rect width="100" height="50"/><rect width="50%" height="20%" fill="blue"/></svg>"#;
        let drawing = VectorDrawing::parse(svg).unwrap();
        assert_eq!(drawing.elements().len(), 2);
        assert!(!drawing.elements()[1].is_measurable());
        assert_eq!(drawing.elements()[1].kind(), PrimitiveKind::Rect);
        assert_eq!(
            drawing.measure().unwrap(),
            BoundingBox::new(0.0, 0.0, 100.0, 50.0)
        );
    }

    #[test]
    fn test_only_unmeasurable_elements_is_empty() {
        let svg = r#"<svg><circle r="0"/><rect width="10%" height="10%"/></svg>"#;
        assert_eq!(measure_markup(svg), Err(GeometryError::EmptyGeometry));
    }

    #[test]
    fn test_primitive_counts() {
        let svg = r#"<svg><path d="M0 0 L1 1"/><path d="M0 0 L2 2"/><circle r="1"/></svg>"#;
        let counts = VectorDrawing::parse(svg).unwrap().primitive_counts();
        assert_eq!(counts.get(&PrimitiveKind::Path), Some(&2));
        assert_eq!(counts.get(&PrimitiveKind::Circle), Some(&1));
        assert_eq!(counts.get(&PrimitiveKind::Rect), None);
    }
}
