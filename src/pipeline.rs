//! End-to-end sizing of an order's drawing.
//!
//! Applying a size to a drawing is the one place where every component runs
//! in sequence: measure, fit, pick stock and estimate time. The result is a
//! [`DerivedRecord`] the order system stores as-is.

use sellokit_camtools::{
    derive_material_with, MaterialSpec, OperationBreakdown, OperationEstimator, ProductionJob,
    TimeEstimate, TimeEstimator,
};
use sellokit_core::{PhysicalSize, Result};
use sellokit_geometry::{compute_options, BoundingBox, Fitter, ScaleOptions, VectorDrawing};
use sellokit_settings::Config;
use serde::{Deserialize, Serialize};

/// Measurement of an uploaded drawing, before any size is applied
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawingReport {
    /// Bounding box in drawing units, taken as millimeters
    pub bounds: BoundingBox,
    /// Suggested sizes for the requested nominal size, when one was given
    pub options: Option<ScaleOptions>,
}

/// Everything derived from applying a size to a drawing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedRecord {
    /// Fitted SVG document
    pub markup: String,
    /// Applied size in centimeters
    pub size: PhysicalSize,
    /// Canvas of the fitted document in millimeters
    pub canvas_mm: PhysicalSize,
    pub scale: f64,
    pub material: MaterialSpec,
    pub time: TimeEstimate,
    pub operations: OperationBreakdown,
}

impl DerivedRecord {
    /// Whole minutes recorded against the order
    pub fn estimated_minutes(&self) -> u32 {
        self.operations.total_minutes.round().max(0.0) as u32
    }

    /// Job entry for a production program
    pub fn to_production_job(&self, label: impl Into<String>) -> ProductionJob {
        ProductionJob {
            label: label.into(),
            material: self.material,
            estimated_minutes: Some(f64::from(self.estimated_minutes())),
        }
    }
}

/// Sizing pipeline configured from the shop settings
#[derive(Debug, Clone)]
pub struct SizingPipeline {
    fitter: Fitter,
    bar_widths_mm: Vec<u32>,
    time_estimator: TimeEstimator,
    operation_estimator: OperationEstimator,
}

impl Default for SizingPipeline {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl SizingPipeline {
    pub fn new(config: &Config) -> Self {
        Self {
            fitter: Fitter::new(config.fit.margin_mm),
            bar_widths_mm: config.stock.bar_widths_mm.clone(),
            time_estimator: TimeEstimator::new(config.estimator.clone()),
            operation_estimator: OperationEstimator::new(config.operations.clone()),
        }
    }

    /// Measure a drawing and, if a nominal size was requested, suggest
    /// sizes that keep its proportions.
    pub fn inspect(&self, markup: &str, requested: Option<&str>) -> Result<DrawingReport> {
        let bounds = VectorDrawing::parse(markup)?.measure()?;
        let options = compute_options(bounds.size(), requested);
        Ok(DrawingReport { bounds, options })
    }

    /// Fit `markup` to `size_cm` and derive stock and time for the result.
    ///
    /// Geometry and size errors are returned; time estimates degrade to
    /// their fallbacks instead of failing.
    pub fn apply(&self, markup: &str, size_cm: &str) -> Result<DerivedRecord> {
        let size = PhysicalSize::parse(size_cm)?;
        let drawing = VectorDrawing::parse(markup)?;
        let bbox = drawing.measure()?;
        let fitted = self.fitter.fit(&drawing, &bbox, size)?;

        let size_mm = size.cm_to_mm();
        let material = derive_material_with(size, &self.bar_widths_mm);
        let time = self
            .time_estimator
            .estimate(&fitted.markup, size_mm.width, size_mm.height);
        let operations =
            self.operation_estimator
                .estimate(&fitted.markup, size_mm.width, size_mm.height);

        tracing::info!(
            size = %size,
            bar_width_mm = ?material.bar_width_mm,
            total_seconds = time.total_seconds,
            "Applied size to drawing"
        );

        Ok(DerivedRecord {
            canvas_mm: PhysicalSize::new(fitted.canvas_width_mm, fitted.canvas_height_mm),
            scale: fitted.scale,
            markup: fitted.markup,
            size,
            material,
            time,
            operations,
        })
    }
}
