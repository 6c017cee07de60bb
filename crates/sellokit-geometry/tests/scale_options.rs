use proptest::prelude::*;
use sellokit_core::PhysicalSize;
use sellokit_geometry::{compute_options, measure_markup};

#[test]
fn test_options_from_measured_drawing() {
    let svg = r#"<svg><rect x="5" y="5" width="80" height="20"/></svg>"#;
    let measured = measure_markup(svg).unwrap().size();
    let options = compute_options(measured, Some("8x4")).unwrap();

    assert_eq!(options.normal.to_string(), "8x2.0");
    assert_eq!(options.inverted.to_string(), "16.0x4");
    assert_eq!(options.original.to_string(), "80.00x20.00");
}

#[test]
fn test_options_serialize_for_the_order_form() {
    let options = compute_options(PhysicalSize::new(80.0, 20.0), Some("8x4")).unwrap();
    let json = serde_json::to_value(&options).unwrap();
    assert_eq!(json["normal"]["label"], "8x2.0");
    assert_eq!(json["inverted"]["size"]["width"], 16.0);
}

proptest! {
    #[test]
    fn prop_options_preserve_source_ratio(
        mw in 1.0f64..1000.0,
        mh in 1.0f64..1000.0,
        rw in 1u32..100,
        rh in 1u32..100,
    ) {
        let measured = PhysicalSize::new(mw, mh);
        let ratio = mw / mh;
        let requested = format!("{rw}x{rh}");
        let options = compute_options(measured, Some(&requested)).unwrap();

        // Pinned axis is exact, the floating one is off by at most the rounding.
        prop_assert_eq!(options.normal.size.width, rw as f64);
        prop_assert!((options.normal.size.height - rw as f64 / ratio).abs() <= 0.05 + 1e-9);
        prop_assert_eq!(options.inverted.size.height, rh as f64);
        prop_assert!((options.inverted.size.width - rh as f64 * ratio).abs() <= 0.05 + 1e-9);
        prop_assert_eq!(options.original.size, measured);
    }
}
