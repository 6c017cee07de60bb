//! Error types for the CAM tools crate.
//!
//! This module provides structured error types for operation calibration
//! and parameter validation. Time estimates themselves never return these:
//! they fall back to empirical values instead.

use sellokit_core::GeometryError;
use thiserror::Error;

/// Errors that can occur during CAM tool operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CamToolError {
    /// The reference drawing could not be used.
    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    /// A parameter validation error occurred.
    #[error("Parameter error: {0}")]
    Parameter(#[from] ParameterError),
}

/// Errors related to CAM tool parameter validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// A parameter value is out of the valid range.
    #[error("Parameter '{name}' out of range: {value} (valid: {min}..{max})")]
    OutOfRange {
        name: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// A parameter value is invalid.
    #[error("Invalid value for '{name}': {reason}")]
    InvalidValue { name: String, reason: String },

    /// Dimensions are invalid (zero, negative or not finite).
    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),
}

impl ParameterError {
    /// Require a finite, strictly positive value
    pub fn ensure_positive(name: &str, value: f64) -> ParameterResult<f64> {
        if value.is_finite() && value > 0.0 {
            Ok(value)
        } else {
            Err(ParameterError::InvalidValue {
                name: name.to_string(),
                reason: format!("must be a positive number, got {value}"),
            })
        }
    }
}

/// Result type alias for CAM tool operations.
pub type CamToolResult<T> = Result<T, CamToolError>;

/// Result type alias for parameter validation.
pub type ParameterResult<T> = Result<T, ParameterError>;
