//! Quick machining time estimate.
//!
//! A deliberately coarse heuristic used when an order is sized: area drives
//! the base time and markup length stands in for path complexity. It never
//! fails. Anything it cannot work with yields a fixed fallback estimate.

use sellokit_geometry::VectorDrawing;
use serde::{Deserialize, Serialize};

/// Which rule produced an estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EstimateSource {
    Heuristic,
    Fallback,
}

/// Estimated cut time, in seconds. `roughing + fine == total`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeEstimate {
    pub total_seconds: f64,
    pub roughing_seconds: f64,
    pub fine_profiling_seconds: f64,
    pub source: EstimateSource,
}

impl TimeEstimate {
    pub fn total_minutes(&self) -> f64 {
        self.total_seconds / 60.0
    }

    pub fn is_fallback(&self) -> bool {
        self.source == EstimateSource::Fallback
    }
}

/// Coefficients and floors of the heuristic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorSettings {
    /// Base seconds per square centimeter of drawing
    pub seconds_per_cm2: f64,
    /// Seconds per thousand characters of markup
    pub seconds_per_kilochar: f64,
    /// Share of the total spent roughing
    pub roughing_fraction: f64,
    pub min_total_seconds: f64,
    pub min_roughing_seconds: f64,
    pub min_fine_seconds: f64,
    pub fallback_total_seconds: f64,
    pub fallback_roughing_seconds: f64,
}

impl Default for EstimatorSettings {
    fn default() -> Self {
        Self {
            seconds_per_cm2: 2.0,
            seconds_per_kilochar: 10.0,
            roughing_fraction: 0.3,
            min_total_seconds: 30.0,
            min_roughing_seconds: 10.0,
            min_fine_seconds: 20.0,
            fallback_total_seconds: 60.0,
            fallback_roughing_seconds: 20.0,
        }
    }
}

impl EstimatorSettings {
    pub fn fallback(&self) -> TimeEstimate {
        TimeEstimate {
            total_seconds: self.fallback_total_seconds,
            roughing_seconds: self.fallback_roughing_seconds,
            fine_profiling_seconds: self.fallback_total_seconds - self.fallback_roughing_seconds,
            source: EstimateSource::Fallback,
        }
    }
}

/// Time estimator with configurable coefficients
#[derive(Debug, Clone, Default)]
pub struct TimeEstimator {
    settings: EstimatorSettings,
}

impl TimeEstimator {
    pub fn new(settings: EstimatorSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &EstimatorSettings {
        &self.settings
    }

    /// Estimate the cut time of `markup` produced at `width_mm` by `height_mm`.
    ///
    /// Markup that is not a well-formed drawing, or dimensions that are
    /// negative or not finite, give the fallback estimate.
    pub fn estimate(&self, markup: &str, width_mm: f64, height_mm: f64) -> TimeEstimate {
        if !(width_mm.is_finite() && height_mm.is_finite() && width_mm >= 0.0 && height_mm >= 0.0)
        {
            tracing::warn!(
                width_mm,
                height_mm,
                "Unusable dimensions for time estimate, using fallback"
            );
            return self.settings.fallback();
        }
        if let Err(e) = VectorDrawing::parse(markup) {
            tracing::warn!(error = %e, "Cannot estimate time for markup, using fallback");
            return self.settings.fallback();
        }

        let s = &self.settings;
        let area_cm2 = width_mm * height_mm / 100.0;
        let complexity = markup.len() as f64 / 1000.0;

        let mut total = (area_cm2 * s.seconds_per_cm2 + complexity * s.seconds_per_kilochar)
            .max(s.min_total_seconds);
        let roughing = (total * s.roughing_fraction).max(s.min_roughing_seconds);
        if total - roughing < s.min_fine_seconds {
            total = roughing + s.min_fine_seconds;
        }

        let estimate = TimeEstimate {
            total_seconds: total,
            roughing_seconds: roughing,
            fine_profiling_seconds: total - roughing,
            source: EstimateSource::Heuristic,
        };
        tracing::debug!(
            area_cm2,
            complexity,
            total_seconds = estimate.total_seconds,
            "Estimated machining time"
        );
        estimate
    }
}

/// Estimate with the default coefficients
pub fn estimate_time(markup: &str, width_mm: f64, height_mm: f64) -> TimeEstimate {
    TimeEstimator::default().estimate(markup, width_mm, height_mm)
}
