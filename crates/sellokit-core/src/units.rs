//! Physical sizes and unit conversion utilities
//!
//! Sizes travel through the system as `"<width>x<height>"` strings, in
//! centimeters unless a caller states otherwise. This module parses and
//! formats them and converts between centimeters and millimeters.

use crate::error::SizeError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Millimeters per centimeter
pub const MM_PER_CM: f64 = 10.0;

/// Separator between width and height in a size string
pub const SIZE_SEPARATOR: char = 'x';

/// A physical width/height pair.
///
/// The unit is given by context: requested and chosen sizes are in
/// centimeters, measured drawing sizes are in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicalSize {
    pub width: f64,
    pub height: f64,
}

impl PhysicalSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Parse the canonical `"<num>x<num>"` form, requiring positive components.
    pub fn parse(input: &str) -> Result<Self, SizeError> {
        let size = Self::parse_components(input, false)?;
        size.ensure_positive(input)
    }

    /// Like [`PhysicalSize::parse`] but also accepts a decimal comma
    /// (`"8,5x4"`), as typed by operators in the order forms.
    pub fn parse_lenient(input: &str) -> Result<Self, SizeError> {
        let size = Self::parse_components(input, true)?;
        size.ensure_positive(input)
    }

    fn parse_components(input: &str, allow_comma: bool) -> Result<Self, SizeError> {
        let invalid = || SizeError::InvalidFormat {
            input: input.to_string(),
        };

        let (w, h) = input.split_once(SIZE_SEPARATOR).ok_or_else(invalid)?;
        let width = parse_component(w, allow_comma).ok_or_else(invalid)?;
        let height = parse_component(h, allow_comma).ok_or_else(invalid)?;
        Ok(Self { width, height })
    }

    fn ensure_positive(self, input: &str) -> Result<Self, SizeError> {
        if self.is_positive() {
            Ok(self)
        } else {
            Err(SizeError::NonPositive {
                input: input.to_string(),
            })
        }
    }

    /// Both components strictly positive and finite
    pub fn is_positive(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Convert a centimeter size to millimeters
    pub fn cm_to_mm(&self) -> Self {
        Self::new(self.width * MM_PER_CM, self.height * MM_PER_CM)
    }

    /// Convert a millimeter size to centimeters
    pub fn mm_to_cm(&self) -> Self {
        Self::new(self.width / MM_PER_CM, self.height / MM_PER_CM)
    }

    /// Smaller of the two components
    pub fn min_side(&self) -> f64 {
        self.width.min(self.height)
    }

    /// Larger of the two components
    pub fn max_side(&self) -> f64 {
        self.width.max(self.height)
    }

    /// Width divided by height
    pub fn aspect_ratio(&self) -> f64 {
        self.width / self.height
    }

    /// Format with a fixed number of decimals on both components
    pub fn format_fixed(&self, decimals: usize) -> String {
        format!(
            "{:.prec$}{}{:.prec$}",
            self.width,
            SIZE_SEPARATOR,
            self.height,
            prec = decimals
        )
    }
}

impl fmt::Display for PhysicalSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.width, SIZE_SEPARATOR, self.height)
    }
}

impl FromStr for PhysicalSize {
    type Err = SizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn parse_component(raw: &str, allow_comma: bool) -> Option<f64> {
    // Plain decimals only: no whitespace, units, exponents or "inf".
    static PLAIN_DECIMAL: OnceLock<Regex> = OnceLock::new();
    let plain = PLAIN_DECIMAL
        .get_or_init(|| Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)$").expect("invalid decimal regex"));

    let normalized = if allow_comma {
        raw.replace(',', ".")
    } else {
        raw.to_string()
    };
    if !plain.is_match(&normalized) {
        return None;
    }

    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Round to a fixed number of decimal places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Format a length in its shortest form (`8`, `1.5`)
pub fn format_shortest(value: f64) -> String {
    format!("{}", value)
}
