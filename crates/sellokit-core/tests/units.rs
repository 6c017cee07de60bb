use proptest::prelude::*;
use sellokit_core::{PhysicalSize, SizeError};

#[test]
fn test_size_serializes_as_struct() {
    let size = PhysicalSize::new(10.0, 5.0);
    let json = serde_json::to_string(&size).unwrap();
    assert_eq!(json, r#"{"width":10.0,"height":5.0}"#);
}

#[test]
fn test_error_messages_name_the_input() {
    let err = PhysicalSize::parse("diez por cinco").unwrap_err();
    assert_eq!(
        err,
        SizeError::InvalidFormat {
            input: "diez por cinco".to_string()
        }
    );
}

proptest! {
    #[test]
    fn prop_cm_to_mm_scales_both_sides(w in 0.1f64..500.0, h in 0.1f64..500.0) {
        let mm = PhysicalSize::new(w, h).cm_to_mm();
        prop_assert!((mm.width - w * 10.0).abs() < 1e-9);
        prop_assert!((mm.height - h * 10.0).abs() < 1e-9);
    }

    #[test]
    fn prop_min_side_never_exceeds_max_side(w in 0.1f64..500.0, h in 0.1f64..500.0) {
        let size = PhysicalSize::new(w, h);
        prop_assert!(size.min_side() <= size.max_side());
    }
}
