//! SelloKit Settings Crate
//!
//! Handles shop configuration: fit margin, bar stock widths, time estimator
//! coefficients and machining operation profiles.

pub mod config;
pub mod error;

pub use config::{Config, EstimatorSettings, FitSettings, OperationSet, StockSettings};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
