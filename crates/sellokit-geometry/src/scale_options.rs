//! Aspect-preserving size suggestions.
//!
//! Given the measured drawing and the nominal size an operator asked for,
//! offer the two sizes that keep the drawing's proportions by pinning one
//! requested axis and letting the other float.

use sellokit_core::{format_shortest, round_to, PhysicalSize};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One suggested size and its display label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleOption {
    pub size: PhysicalSize,
    pub label: String,
}

impl fmt::Display for ScaleOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Suggested sizes for a drawing.
///
/// `normal` and `inverted` are in centimeters; `original` is the measured
/// drawing in millimeters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleOptions {
    /// Requested width kept, height follows the drawing ratio
    pub normal: ScaleOption,
    /// Requested height kept, width follows the drawing ratio
    pub inverted: ScaleOption,
    pub original: ScaleOption,
}

/// Compute the scale options for a drawing measuring `measured_mm`.
///
/// Returns `None` when no size was requested, the request is not a
/// `"<w>x<h>"` string (a decimal comma is accepted), or any value is not
/// strictly positive. Never fails otherwise.
pub fn compute_options(measured_mm: PhysicalSize, requested: Option<&str>) -> Option<ScaleOptions> {
    let requested = requested?;
    if !measured_mm.is_positive() {
        tracing::debug!(%measured_mm, "No scale options for a degenerate drawing");
        return None;
    }
    let nominal = match PhysicalSize::parse_lenient(requested) {
        Ok(size) => size,
        Err(e) => {
            tracing::debug!(error = %e, "No scale options for requested size");
            return None;
        }
    };

    let ratio = measured_mm.aspect_ratio();

    let normal_height = round_to(nominal.width / ratio, 1);
    let inverted_width = round_to(nominal.height * ratio, 1);

    Some(ScaleOptions {
        normal: ScaleOption {
            size: PhysicalSize::new(nominal.width, normal_height),
            label: format!("{}x{:.1}", format_shortest(nominal.width), normal_height),
        },
        inverted: ScaleOption {
            size: PhysicalSize::new(inverted_width, nominal.height),
            label: format!("{:.1}x{}", inverted_width, format_shortest(nominal.height)),
        },
        original: ScaleOption {
            size: measured_mm,
            label: measured_mm.format_fixed(2),
        },
    })
}
