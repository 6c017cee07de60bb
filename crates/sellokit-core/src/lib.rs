//! # SelloKit Core
//!
//! Core types and utilities for SelloKit.
//! Provides the physical size value type, unit conversion helpers and the
//! error taxonomy shared by the geometry, CAM and settings crates.

pub mod error;
pub mod units;

pub use error::{Error, GeometryError, Result, SizeError};
pub use units::{format_shortest, round_to, PhysicalSize, MM_PER_CM, SIZE_SEPARATOR};
