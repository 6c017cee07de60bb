//! Fit-and-center transformation.
//!
//! Scales a drawing uniformly so its bounding box fits a physical target
//! size, centers it on a canvas padded by a fixed margin, and writes a new
//! SVG document whose units are millimeters. The source drawing is never
//! modified: the output is rebuilt from the parsed primitives.

use crate::bbox::BoundingBox;
use crate::drawing::VectorDrawing;
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::Writer;
use sellokit_core::{Error, GeometryError, PhysicalSize, Result, SizeError};
use serde::{Deserialize, Serialize};

/// Margin added to the target size on each axis, in millimeters
pub const DEFAULT_CANVAS_MARGIN_MM: f64 = 20.0;

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Result of fitting a drawing to a target size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedDrawing {
    /// Complete output document
    pub markup: String,
    pub canvas_width_mm: f64,
    pub canvas_height_mm: f64,
    /// Uniform scale from drawing units to millimeters
    pub scale: f64,
    pub translate_x: f64,
    pub translate_y: f64,
    /// Bounding box of the source geometry, in drawing units
    pub source_bounds: BoundingBox,
}

impl FittedDrawing {
    /// Source bounds mapped through the group transform, in canvas millimeters
    pub fn placed_bounds(&self) -> BoundingBox {
        let b = &self.source_bounds;
        BoundingBox::new(
            b.min_x * self.scale + self.translate_x,
            b.min_y * self.scale + self.translate_y,
            b.width * self.scale,
            b.height * self.scale,
        )
    }

    /// Transform attribute applied to the primitive group
    pub fn transform_attribute(&self) -> String {
        format!(
            "translate({},{}) scale({})",
            self.translate_x, self.translate_y, self.scale
        )
    }
}

/// Fit-and-center transformer with a configurable canvas margin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fitter {
    pub margin_mm: f64,
}

impl Default for Fitter {
    fn default() -> Self {
        Self {
            margin_mm: DEFAULT_CANVAS_MARGIN_MM,
        }
    }
}

impl Fitter {
    pub fn new(margin_mm: f64) -> Self {
        Self { margin_mm }
    }

    /// Fit `drawing`, whose geometry spans `bbox`, to `target_cm`.
    ///
    /// Fails with [`GeometryError::EmptyGeometry`] for a zero-width or
    /// zero-height box and with [`SizeError::NonPositive`] for a target
    /// that is not strictly positive.
    pub fn fit(
        &self,
        drawing: &VectorDrawing,
        bbox: &BoundingBox,
        target_cm: PhysicalSize,
    ) -> Result<FittedDrawing> {
        if bbox.is_degenerate() {
            return Err(GeometryError::EmptyGeometry.into());
        }
        if !target_cm.is_positive() {
            return Err(SizeError::NonPositive {
                input: target_cm.to_string(),
            }
            .into());
        }

        let target_mm = target_cm.cm_to_mm();
        let scale = (target_mm.width / bbox.width).min(target_mm.height / bbox.height);
        if !(scale.is_finite() && scale > 0.0) {
            return Err(GeometryError::EmptyGeometry.into());
        }

        let canvas_width_mm = target_mm.width + self.margin_mm;
        let canvas_height_mm = target_mm.height + self.margin_mm;
        let translate_x = (canvas_width_mm - bbox.width * scale) / 2.0 - bbox.min_x * scale;
        let translate_y = (canvas_height_mm - bbox.height * scale) / 2.0 - bbox.min_y * scale;

        let mut fitted = FittedDrawing {
            markup: String::new(),
            canvas_width_mm,
            canvas_height_mm,
            scale,
            translate_x,
            translate_y,
            source_bounds: *bbox,
        };
        fitted.markup = write_document(drawing, &fitted)?;

        tracing::debug!(
            scale,
            canvas_width_mm,
            canvas_height_mm,
            translate_x,
            translate_y,
            "Fitted drawing to target size"
        );
        Ok(fitted)
    }

    /// Parse, measure and fit raw markup to a `"<w>x<h>"` size in centimeters.
    ///
    /// Unlike the scale option calculator, a malformed size string is a hard
    /// failure here: there is nothing to fit to without it.
    pub fn fit_markup(&self, markup: &str, size_cm: &str) -> Result<FittedDrawing> {
        let target = PhysicalSize::parse(size_cm)?;
        let drawing = VectorDrawing::parse(markup)?;
        let bbox = drawing.measure()?;
        self.fit(&drawing, &bbox, target)
    }
}

/// Fit with the default 20 mm margin
pub fn fit(
    drawing: &VectorDrawing,
    bbox: &BoundingBox,
    target_cm: PhysicalSize,
) -> Result<FittedDrawing> {
    Fitter::default().fit(drawing, bbox, target_cm)
}

/// Parse, measure and fit with the default 20 mm margin
pub fn fit_markup(markup: &str, size_cm: &str) -> Result<FittedDrawing> {
    Fitter::default().fit_markup(markup, size_cm)
}

fn write_document(drawing: &VectorDrawing, fitted: &FittedDrawing) -> Result<String> {
    let mut writer = Writer::new(Vec::new());

    let mut svg = BytesStart::new("svg");
    svg.push_attribute(("xmlns", SVG_NAMESPACE));
    for (name, value) in drawing.root_attributes() {
        if name != "xmlns" {
            svg.push_attribute((name.as_str(), value.as_str()));
        }
    }
    let width = format!("{}mm", fitted.canvas_width_mm);
    let height = format!("{}mm", fitted.canvas_height_mm);
    let view_box = format!("0 0 {} {}", fitted.canvas_width_mm, fitted.canvas_height_mm);
    svg.push_attribute(("width", width.as_str()));
    svg.push_attribute(("height", height.as_str()));
    svg.push_attribute(("viewBox", view_box.as_str()));
    svg.push_attribute(("preserveAspectRatio", "xMidYMid meet"));
    emit(&mut writer, Event::Start(svg))?;

    let transform = fitted.transform_attribute();
    let mut group = BytesStart::new("g");
    group.push_attribute(("transform", transform.as_str()));
    emit(&mut writer, Event::Start(group))?;

    for element in drawing.elements() {
        let mut tag = BytesStart::new(element.kind().tag());
        for (name, value) in &element.attributes {
            tag.push_attribute((name.as_str(), value.as_str()));
        }
        emit(&mut writer, Event::Empty(tag))?;
    }

    emit(&mut writer, Event::End(BytesEnd::new("g")))?;
    emit(&mut writer, Event::End(BytesEnd::new("svg")))?;

    String::from_utf8(writer.into_inner()).map_err(|e| {
        Error::from(GeometryError::Serialize {
            reason: e.to_string(),
        })
    })
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<()> {
    writer.write_event(event).map_err(|e| {
        Error::from(GeometryError::Serialize {
            reason: e.to_string(),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawing::measure_markup;

    const RECT_PATH: &str = r#"<svg xmlns="http://www.w3.org/2000/svg"><path d="M0 0 L100 0 L100 50 L0 50 Z"/></svg>"#;

    #[test]
    fn test_rect_path_scenario() {
        let fitted = fit_markup(RECT_PATH, "10x5").unwrap();
        assert_eq!(fitted.scale, 1.0);
        assert_eq!(fitted.canvas_width_mm, 120.0);
        assert_eq!(fitted.canvas_height_mm, 70.0);
        assert_eq!(fitted.translate_x, 10.0);
        assert_eq!(fitted.translate_y, 10.0);
        assert!(fitted.markup.contains(r#"width="120mm""#));
        assert!(fitted.markup.contains(r#"height="70mm""#));
        assert!(fitted.markup.contains(r#"viewBox="0 0 120 70""#));
        assert!(fitted.markup.contains(r#"preserveAspectRatio="xMidYMid meet""#));
        assert!(fitted
            .markup
            .contains(r#"<g transform="translate(10,10) scale(1)">"#));
    }

    #[test]
    fn test_limiting_dimension_sets_scale() {
        // 200x50 drawing into 10x10 cm: width limits, scale 0.5.
        let svg = r#"<svg><rect x="0" y="0" width="200" height="50"/></svg>"#;
        let fitted = fit_markup(svg, "10x10").unwrap();
        assert_eq!(fitted.scale, 0.5);
        let placed = fitted.placed_bounds();
        assert_eq!(placed.width, 100.0);
        assert_eq!(placed.height, 25.0);
        // Centered on a 120x120 canvas.
        assert_eq!(placed.min_x, 10.0);
        assert_eq!(placed.min_y, 47.5);
    }

    #[test]
    fn test_element_transforms_are_discarded() {
        let svg = r#"<svg viewBox="0 0 5 5" width="5cm" version="1.1"><rect x="10" y="10" width="20" height="20" transform="scale(3)" stroke="black"/></svg>"#;
        let fitted = fit_markup(svg, "2x2").unwrap();
        assert!(!fitted.markup.contains("scale(3)"));
        assert!(fitted.markup.contains(r#"stroke="black""#));
        assert!(fitted.markup.contains(r#"version="1.1""#));
        assert!(!fitted.markup.contains("5cm"));
        assert!(!fitted.markup.contains("0 0 5 5"));
    }

    #[test]
    fn test_output_is_measurable_again() {
        let fitted = fit_markup(RECT_PATH, "10x5").unwrap();
        let bbox = measure_markup(&fitted.markup).unwrap();
        assert_eq!(bbox, BoundingBox::new(0.0, 0.0, 100.0, 50.0));
    }

    #[test]
    fn test_attribute_values_are_escaped() {
        let svg = r#"<svg><rect width="1" height="1" data-note="a &lt; b &amp; &quot;c&quot;"/></svg>"#;
        let fitted = fit_markup(svg, "1x1").unwrap();
        assert!(VectorDrawing::parse(&fitted.markup).is_ok());
    }

    #[test]
    fn test_degenerate_bbox_fails() {
        let drawing = VectorDrawing::parse("<svg></svg>").unwrap();
        let bbox = BoundingBox::new(0.0, 0.0, 0.0, 10.0);
        let err = fit(&drawing, &bbox, PhysicalSize::new(10.0, 5.0)).unwrap_err();
        assert!(err.is_empty_geometry());
    }

    #[test]
    fn test_empty_markup_fails() {
        let err = fit_markup("<svg></svg>", "10x5").unwrap_err();
        assert!(err.is_empty_geometry());
    }

    #[test]
    fn test_bad_size_is_hard_failure() {
        let err = fit_markup(RECT_PATH, "10 por 5").unwrap_err();
        assert!(matches!(
            err,
            Error::Size(SizeError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_custom_margin() {
        let fitted = Fitter::new(6.0).fit_markup(RECT_PATH, "10x5").unwrap();
        assert_eq!(fitted.canvas_width_mm, 106.0);
        assert_eq!(fitted.canvas_height_mm, 56.0);
    }
}
