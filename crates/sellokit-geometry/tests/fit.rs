use proptest::prelude::*;
use sellokit_core::{Error, GeometryError, PhysicalSize, SizeError};
use sellokit_geometry::{fit, fit_markup, BoundingBox, VectorDrawing, DEFAULT_CANVAS_MARGIN_MM};

#[test]
fn test_fit_rect_path_to_10x5() {
    let svg = r#"<svg><path d="M0 0 L100 0 L100 50 L0 50 Z"/></svg>"#;
    let fitted = fit_markup(svg, "10x5").unwrap();

    assert_eq!(fitted.scale, 1.0);
    assert_eq!((fitted.canvas_width_mm, fitted.canvas_height_mm), (120.0, 70.0));
    assert_eq!((fitted.translate_x, fitted.translate_y), (10.0, 10.0));
    assert_eq!(
        fitted.placed_bounds(),
        BoundingBox::new(10.0, 10.0, 100.0, 50.0)
    );
}

#[test]
fn test_offset_drawing_is_moved_to_canvas_center() {
    let svg = r#"<svg><rect x="-40" y="300" width="20" height="20"/></svg>"#;
    let fitted = fit_markup(svg, "4x4").unwrap();
    assert_eq!(fitted.scale, 2.0);
    let placed = fitted.placed_bounds();
    assert!((placed.min_x - 10.0).abs() < 1e-9);
    assert!((placed.min_y - 10.0).abs() < 1e-9);
}

#[test]
fn test_empty_svg_cannot_be_fitted() {
    let err = fit_markup("<svg></svg>", "10x5").unwrap_err();
    assert!(matches!(err, Error::Geometry(GeometryError::EmptyGeometry)));
}

#[test]
fn test_degenerate_boxes_are_rejected() {
    let drawing = VectorDrawing::parse(r#"<svg><line x1="0" y1="0" x2="10" y2="0"/></svg>"#).unwrap();
    let target = PhysicalSize::new(5.0, 5.0);
    for bbox in [
        BoundingBox::new(0.0, 0.0, 10.0, 0.0),
        BoundingBox::new(0.0, 0.0, 0.0, 10.0),
        BoundingBox::new(f64::NAN, 0.0, 10.0, 10.0),
    ] {
        let err = fit(&drawing, &bbox, target).unwrap_err();
        assert!(err.is_empty_geometry(), "{bbox:?} gave {err}");
    }
}

#[test]
fn test_non_positive_target_is_rejected() {
    let drawing = VectorDrawing::parse(r#"<svg><rect width="10" height="10"/></svg>"#).unwrap();
    let bbox = drawing.measure().unwrap();
    let err = fit(&drawing, &bbox, PhysicalSize::new(0.0, 5.0)).unwrap_err();
    assert!(matches!(err, Error::Size(SizeError::NonPositive { .. })));

    let err = fit_markup(r#"<svg><rect width="10" height="10"/></svg>"#, "5x-1").unwrap_err();
    assert!(err.is_size_error());
}

#[test]
fn test_fitted_output_keeps_presentation_attributes() {
    let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" id="logo" width="10cm" height="5cm">
  <g fill="#000"><path d="M0 0 H 20 V 10 Z" stroke-width="0.5" transform="matrix(1,0,0,1,5,5)"/></g>
</svg>"##;
    let fitted = fit_markup(svg, "2x1").unwrap();
    let out = VectorDrawing::parse(&fitted.markup).unwrap();

    assert!(out.root_attributes().contains(&("id".to_string(), "logo".to_string())));
    let path = &out.elements()[0];
    assert!(path
        .attributes
        .contains(&("stroke-width".to_string(), "0.5".to_string())));
    assert!(path.attributes.iter().all(|(k, _)| k != "transform"));
}

#[test]
fn test_unit_suffixed_primitive_is_measured_and_kept() {
    let svg = r#"<svg><rect x="0" y="0" width="100" height="50"/><rect x="200" y="0" width="10mm" height="10mm"/></svg>"#;
    let fitted = fit_markup(svg, "10x5").unwrap();

    let side = 10.0 * 96.0 / 25.4;
    assert!((fitted.source_bounds.width - (200.0 + side)).abs() < 1e-9);
    assert_eq!(fitted.source_bounds.height, 50.0);

    let out = VectorDrawing::parse(&fitted.markup).unwrap();
    assert_eq!(out.elements().len(), 2);
    assert!(out.elements()[1]
        .attributes
        .contains(&("width".to_string(), "10mm".to_string())));
}

#[test]
fn test_unmeasurable_primitive_is_still_emitted() {
    let svg = r#"<svg><rect width="100" height="50"/><circle cx="50%" cy="50%" r="5%" transform="scale(2)"/></svg>"#;
    let fitted = fit_markup(svg, "10x5").unwrap();
    assert_eq!(fitted.source_bounds, BoundingBox::new(0.0, 0.0, 100.0, 50.0));

    let out = VectorDrawing::parse(&fitted.markup).unwrap();
    assert_eq!(out.elements().len(), 2);
    let circle = &out.elements()[1];
    assert!(!circle.is_measurable());
    assert!(circle.attributes.iter().all(|(k, _)| k != "transform"));
}

proptest! {
    #[test]
    fn prop_canvas_is_target_plus_margin(
        w in 0.1f64..50.0,
        h in 0.1f64..50.0,
        bw in 1.0f64..1000.0,
        bh in 1.0f64..1000.0,
    ) {
        let drawing = VectorDrawing::parse("<svg></svg>").unwrap();
        let bbox = BoundingBox::new(0.0, 0.0, bw, bh);
        let fitted = fit(&drawing, &bbox, PhysicalSize::new(w, h)).unwrap();
        prop_assert!((fitted.canvas_width_mm - (w * 10.0 + DEFAULT_CANVAS_MARGIN_MM)).abs() < 1e-9);
        prop_assert!((fitted.canvas_height_mm - (h * 10.0 + DEFAULT_CANVAS_MARGIN_MM)).abs() < 1e-9);
        prop_assert!(fitted.scale.is_finite() && fitted.scale > 0.0);
    }

    #[test]
    fn prop_placed_bounds_hit_limiting_dimension_and_are_centered(
        x in -200.0f64..200.0,
        y in -200.0f64..200.0,
        bw in 1.0f64..500.0,
        bh in 1.0f64..500.0,
        w in 0.5f64..30.0,
        h in 0.5f64..30.0,
    ) {
        let svg = format!(r#"<svg><rect x="{x}" y="{y}" width="{bw}" height="{bh}"/></svg>"#);
        let size = format!("{w}x{h}");
        let fitted = fit_markup(&svg, &size).unwrap();
        let placed = fitted.placed_bounds();
        let (tw, th) = (w * 10.0, h * 10.0);

        let width_hits = (placed.width - tw).abs() <= 0.5;
        let height_hits = (placed.height - th).abs() <= 0.5;
        prop_assert!(width_hits || height_hits);
        prop_assert!(placed.width <= tw + 0.5 && placed.height <= th + 0.5);

        let cx = placed.min_x + placed.width / 2.0;
        let cy = placed.min_y + placed.height / 2.0;
        prop_assert!((cx - fitted.canvas_width_mm / 2.0).abs() < 1e-6);
        prop_assert!((cy - fitted.canvas_height_mm / 2.0).abs() < 1e-6);
    }
}
