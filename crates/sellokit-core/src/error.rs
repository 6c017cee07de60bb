//! Error handling for SelloKit
//!
//! Provides the error taxonomy shared by every crate of the workspace:
//! - Geometry errors (markup parsing, empty or degenerate geometry)
//! - Size errors (malformed or non-positive size strings)
//!
//! All error types use `thiserror` for ergonomic error handling.
//! Machining time estimation never fails: it degrades to a fixed fallback
//! estimate instead, so there is no error type for it.

use thiserror::Error;

/// Geometry error type
///
/// Raised while parsing vector markup or deriving geometry from it.
/// These errors are fatal to the requested operation and are surfaced
/// to the caller unchanged.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Markup is not well-formed vector-graphics XML
    #[error("Failed to parse vector markup: {reason}")]
    Parse {
        /// The reason reported by the XML parser.
        reason: String,
    },

    /// No measurable primitives, or the bounding box has zero area
    #[error("Drawing contains no measurable geometry")]
    EmptyGeometry,

    /// The output document could not be written
    #[error("Failed to serialize vector markup: {reason}")]
    Serialize {
        /// The reason reported by the XML writer.
        reason: String,
    },
}

/// Size string error type
///
/// Represents errors parsing a `"<width>x<height>"` size string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SizeError {
    /// The string does not match `<number>x<number>`
    #[error("Invalid size format '{input}': expected <width>x<height>")]
    InvalidFormat {
        /// The rejected input.
        input: String,
    },

    /// One of the components is zero or negative
    #[error("Size '{input}' must have strictly positive width and height")]
    NonPositive {
        /// The rejected input.
        input: String,
    },
}

/// Main error type for SelloKit
///
/// A unified error type that can represent any error from the core layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Geometry error
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Size error
    #[error(transparent)]
    Size(#[from] SizeError),
}

impl Error {
    /// Check if this is an empty-geometry error
    pub fn is_empty_geometry(&self) -> bool {
        matches!(self, Error::Geometry(GeometryError::EmptyGeometry))
    }

    /// Check if this is a markup parse error
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Error::Geometry(GeometryError::Parse { .. }))
    }

    /// Check if this is a size error
    pub fn is_size_error(&self) -> bool {
        matches!(self, Error::Size(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_error_display() {
        let err = GeometryError::Parse {
            reason: "unexpected end of stream".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to parse vector markup: unexpected end of stream"
        );
        assert_eq!(
            GeometryError::EmptyGeometry.to_string(),
            "Drawing contains no measurable geometry"
        );
    }

    #[test]
    fn test_size_error_display() {
        let err = SizeError::InvalidFormat {
            input: "10 por 5".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid size format '10 por 5': expected <width>x<height>"
        );
    }

    #[test]
    fn test_error_conversion() {
        let err: Error = GeometryError::EmptyGeometry.into();
        assert!(err.is_empty_geometry());
        assert!(!err.is_size_error());

        let err: Error = SizeError::NonPositive {
            input: "0x5".to_string(),
        }
        .into();
        assert!(err.is_size_error());

        let err: Error = GeometryError::Parse {
            reason: "bad".to_string(),
        }
        .into();
        assert!(err.is_parse_error());
    }
}
