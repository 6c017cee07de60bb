//! Shop configuration for SelloKit
//!
//! Provides configuration file handling and validation.
//! Supports JSON and TOML file formats.
//!
//! Configuration is organized into logical sections:
//! - Fit settings (canvas margin around a sized drawing)
//! - Stock settings (standard bar widths on hand)
//! - Estimator settings (heuristic time coefficients and floors)
//! - Operation profiles (per-operation CNC time model)

pub use sellokit_camtools::{EstimatorSettings, OperationSet};
use crate::error::{ConfigError, ConfigResult, SettingsResult};
use sellokit_camtools::STANDARD_BAR_WIDTHS_MM;
use sellokit_geometry::DEFAULT_CANVAS_MARGIN_MM;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Fit-to-size settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitSettings {
    /// Margin added to the target size on each axis (mm)
    pub margin_mm: f64,
}

impl Default for FitSettings {
    fn default() -> Self {
        Self {
            margin_mm: DEFAULT_CANVAS_MARGIN_MM,
        }
    }
}

/// Bar stock settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StockSettings {
    /// Standard bar widths in mm, strictly ascending
    pub bar_widths_mm: Vec<u32>,
}

impl Default for StockSettings {
    fn default() -> Self {
        Self {
            bar_widths_mm: STANDARD_BAR_WIDTHS_MM.to_vec(),
        }
    }
}

/// Complete shop configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub fit: FitSettings,
    pub stock: StockSettings,
    pub estimator: EstimatorSettings,
    pub operations: OperationSet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Json,
    Toml,
}

impl FileFormat {
    fn from_path(path: &Path) -> ConfigResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(format!(
                "{} (config file must be .json or .toml)",
                other.unwrap_or("no extension")
            ))),
        }
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = FileFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            FileFormat::Json => serde_json::from_str(&content)?,
            FileFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match FileFormat::from_path(path)? {
            FileFormat::Json => serde_json::to_string_pretty(self)?,
            FileFormat::Toml => toml::to_string_pretty(self)?,
        };

        std::fs::write(path, content)?;
        tracing::info!(path = %path.display(), "Saved configuration");
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        // Fit
        if !(self.fit.margin_mm.is_finite() && self.fit.margin_mm >= 0.0) {
            return Err(out_of_range("fit.margin_mm", self.fit.margin_mm));
        }

        // Stock
        let widths = &self.stock.bar_widths_mm;
        if widths.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "stock.bar_widths_mm".to_string(),
                reason: "at least one bar width is required".to_string(),
            });
        }
        if widths.contains(&0) || widths.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(ConfigError::InvalidValue {
                key: "stock.bar_widths_mm".to_string(),
                reason: format!("widths must be positive and strictly ascending, got {widths:?}"),
            });
        }

        // Estimator
        let e = &self.estimator;
        for (key, value) in [
            ("estimator.seconds_per_cm2", e.seconds_per_cm2),
            ("estimator.seconds_per_kilochar", e.seconds_per_kilochar),
            ("estimator.min_total_seconds", e.min_total_seconds),
            ("estimator.min_roughing_seconds", e.min_roughing_seconds),
            ("estimator.min_fine_seconds", e.min_fine_seconds),
            ("estimator.fallback_roughing_seconds", e.fallback_roughing_seconds),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(out_of_range(key, value));
            }
        }
        if !(0.0..=1.0).contains(&e.roughing_fraction) {
            return Err(out_of_range("estimator.roughing_fraction", e.roughing_fraction));
        }
        if !(e.fallback_total_seconds.is_finite()
            && e.fallback_total_seconds >= e.fallback_roughing_seconds)
        {
            return Err(ConfigError::InvalidValue {
                key: "estimator.fallback_total_seconds".to_string(),
                reason: "must not be less than the fallback roughing time".to_string(),
            });
        }

        // Operations
        self.operations
            .validate()
            .map_err(|e| ConfigError::InvalidValue {
                key: "operations".to_string(),
                reason: e.to_string(),
            })?;

        Ok(())
    }
}

fn out_of_range(key: &str, value: f64) -> ConfigError {
    ConfigError::ValueOutOfRange {
        key: key.to_string(),
        value: value.to_string(),
    }
}
