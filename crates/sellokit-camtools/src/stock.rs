//! Bar stock ("planchuela") selection.
//!
//! Seals are cut from flat bar stock sold in a few standard widths. The bar
//! must be strictly wider than the seal's short side, and the seal's long
//! side is the length of bar it consumes.

use sellokit_core::{PhysicalSize, MM_PER_CM};
use serde::{Deserialize, Serialize};

/// Standard bar widths in millimeters, ascending
pub const STANDARD_BAR_WIDTHS_MM: [u32; 4] = [12, 19, 25, 38];

/// Raw stock needed for one seal
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MaterialSpec {
    /// `None` when no standard width fits and the job needs manual handling
    pub bar_width_mm: Option<u32>,
    pub bar_length_cm: Option<f64>,
}

impl MaterialSpec {
    /// A standard bar was found for this job
    pub fn has_standard_bar(&self) -> bool {
        self.bar_width_mm.is_some()
    }
}

/// First width strictly greater than `min_side_mm`.
///
/// `widths` must be ascending.
pub fn select_bar_width(min_side_mm: f64, widths: &[u32]) -> Option<u32> {
    widths.iter().copied().find(|&w| min_side_mm < f64::from(w))
}

/// Material for a seal of `size_cm` using the standard widths
pub fn derive_material(size_cm: PhysicalSize) -> MaterialSpec {
    derive_material_with(size_cm, &STANDARD_BAR_WIDTHS_MM)
}

/// Material for a seal of `size_cm` using a custom ascending width list
pub fn derive_material_with(size_cm: PhysicalSize, widths: &[u32]) -> MaterialSpec {
    if !size_cm.is_positive() {
        tracing::debug!(%size_cm, "No material for a non-positive size");
        return MaterialSpec::default();
    }

    let min_side_mm = size_cm.min_side() * MM_PER_CM;
    let bar_width_mm = select_bar_width(min_side_mm, widths);
    if bar_width_mm.is_none() {
        tracing::info!(
            min_side_mm,
            "No standard bar is wide enough, manual handling required"
        );
    }

    MaterialSpec {
        bar_width_mm,
        bar_length_cm: Some(size_cm.max_side()),
    }
}

/// Material for a size string; an unparseable size yields empty fields
pub fn derive_material_str(size_cm: &str) -> MaterialSpec {
    match PhysicalSize::parse_lenient(size_cm) {
        Ok(size) => derive_material(size),
        Err(e) => {
            tracing::debug!(error = %e, "No material for size string");
            MaterialSpec::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_seal_scenario() {
        let material = derive_material(PhysicalSize::new(1.5, 0.8));
        assert_eq!(material.bar_width_mm, Some(12));
        assert_eq!(material.bar_length_cm, Some(1.5));
    }

    #[test]
    fn test_boundaries_are_strict() {
        // Exactly 12 mm does not fit a 12 mm bar.
        assert_eq!(derive_material(PhysicalSize::new(3.0, 1.2)).bar_width_mm, Some(19));
        assert_eq!(derive_material(PhysicalSize::new(3.0, 1.9)).bar_width_mm, Some(25));
        assert_eq!(derive_material(PhysicalSize::new(3.0, 2.5)).bar_width_mm, Some(38));
        assert_eq!(derive_material(PhysicalSize::new(4.0, 3.8)).bar_width_mm, None);
    }

    #[test]
    fn test_no_fit_keeps_length() {
        let material = derive_material(PhysicalSize::new(5.0, 4.0));
        assert_eq!(material.bar_width_mm, None);
        assert_eq!(material.bar_length_cm, Some(5.0));
        assert!(!material.has_standard_bar());
    }

    #[test]
    fn test_orientation_does_not_matter() {
        assert_eq!(
            derive_material(PhysicalSize::new(0.8, 1.5)),
            derive_material(PhysicalSize::new(1.5, 0.8))
        );
    }

    #[test]
    fn test_custom_widths() {
        let material = derive_material_with(PhysicalSize::new(6.0, 5.0), &[12, 19, 25, 38, 63]);
        assert_eq!(material.bar_width_mm, Some(63));
    }

    #[test]
    fn test_size_string() {
        assert_eq!(derive_material_str("2x1,5").bar_width_mm, Some(19));
        assert_eq!(derive_material_str("abc"), MaterialSpec::default());
        assert_eq!(derive_material_str("0x3"), MaterialSpec::default());
    }
}
