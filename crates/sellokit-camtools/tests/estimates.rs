use proptest::prelude::*;
use sellokit_camtools::{
    derive_material, estimate_time, EstimateSource, OperationEstimator, OperationKind,
};
use sellokit_core::PhysicalSize;
use sellokit_geometry::fit_markup;

#[test]
fn test_estimate_on_fitted_output() {
    let svg = r#"<svg><path d="M0 0 L100 0 L100 50 L0 50 Z"/></svg>"#;
    let fitted = fit_markup(svg, "10x5").unwrap();
    let t = estimate_time(&fitted.markup, 100.0, 50.0);
    assert_eq!(t.source, EstimateSource::Heuristic);
    // 50 cm2 -> 100 s plus markup length.
    assert!(t.total_seconds > 100.0 && t.total_seconds < 105.0);
}

#[test]
fn test_operation_model_on_fitted_output() {
    let svg = r#"<svg><circle cx="0" cy="0" r="10"/><rect width="30" height="10"/></svg>"#;
    let fitted = fit_markup(svg, "3x2").unwrap();
    let breakdown = OperationEstimator::default().estimate(&fitted.markup, 30.0, 20.0);
    for kind in OperationKind::ALL {
        assert!(breakdown.minutes_for(kind).unwrap() > 0.0);
    }
}

#[test]
fn test_material_boundaries() {
    assert_eq!(derive_material(PhysicalSize::new(2.0, 1.2)).bar_width_mm, Some(19));
    assert_eq!(derive_material(PhysicalSize::new(3.9, 3.81)).bar_width_mm, None);
}

proptest! {
    #[test]
    fn prop_estimate_respects_floors(
        w in 0.0f64..2000.0,
        h in 0.0f64..2000.0,
        padding in 0usize..5000,
    ) {
        let markup = format!("<svg>{}<rect width='1' height='1'/></svg>", " ".repeat(padding));
        let t = estimate_time(&markup, w, h);
        prop_assert!(t.total_seconds >= 30.0);
        prop_assert!(t.roughing_seconds >= 10.0);
        prop_assert!(t.fine_profiling_seconds >= 20.0);
        prop_assert!((t.roughing_seconds + t.fine_profiling_seconds - t.total_seconds).abs() < 1e-9);
    }

    #[test]
    fn prop_bar_is_wider_than_short_side(w in 0.01f64..10.0, h in 0.01f64..10.0) {
        let material = derive_material(PhysicalSize::new(w, h));
        match material.bar_width_mm {
            Some(width) => prop_assert!(f64::from(width) > w.min(h) * 10.0),
            None => prop_assert!(w.min(h) * 10.0 >= 38.0),
        }
        prop_assert_eq!(material.bar_length_cm, Some(w.max(h)));
    }
}
