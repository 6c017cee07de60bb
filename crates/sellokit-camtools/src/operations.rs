//! Per-operation CNC time model.
//!
//! A seal is cut in four operations: facing the bar, roughing the pocket
//! with a 6 mm end mill, finishing the pocket with a 1 mm V-bit and tracing
//! the outline with a 0.5 mm V-bit. Each operation's time is modelled from
//! the drawing area and an estimated perimeter, with per-operation factors
//! tuned against times reported by the shop's CAM software. The factors can
//! be recalibrated from measured times with [`calibrate`].
//!
//! Times are in minutes throughout this module.

use crate::error::{CamToolError, CamToolResult, ParameterError, ParameterResult};
use sellokit_geometry::{PrimitiveKind, VectorDrawing};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

/// Cutter geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    FlatEndMill,
    VBit,
}

/// How an operation covers the drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CutStrategy {
    /// Back-and-forth over the area
    Raster,
    /// Concentric offsets of the outline
    Offset,
    /// Along the outline only
    Profile,
}

/// One machining operation and its time-model factors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationProfile {
    pub name: String,
    pub tool: ToolKind,
    pub tool_diameter_mm: f64,
    /// Feed rate in mm/min
    pub feed_rate: f64,
    pub pass_depth_mm: f64,
    pub total_depth_mm: f64,
    pub stepover_mm: f64,
    pub strategy: CutStrategy,
    /// Fraction of the drawing area the operation actually machines
    pub area_factor: f64,
    /// Multiplier on the perimeter for profile cuts
    pub perimeter_factor: f64,
    pub passes: u32,
    /// Rapids, plunges and retracts on top of cutting time
    pub overhead_factor: f64,
}

impl OperationProfile {
    pub fn facing_6mm() -> Self {
        Self {
            name: "Facing 6mm".to_string(),
            tool: ToolKind::FlatEndMill,
            tool_diameter_mm: 6.0,
            feed_rate: 800.0,
            pass_depth_mm: 0.2,
            total_depth_mm: 0.5,
            stepover_mm: 4.8,
            strategy: CutStrategy::Raster,
            area_factor: 0.5,
            perimeter_factor: 1.0,
            passes: 3,
            overhead_factor: 1.8,
        }
    }

    pub fn pocket_6mm() -> Self {
        Self {
            name: "Pocket 6mm".to_string(),
            tool: ToolKind::FlatEndMill,
            tool_diameter_mm: 6.0,
            feed_rate: 800.0,
            pass_depth_mm: 0.2,
            total_depth_mm: 2.5,
            stepover_mm: 3.6,
            strategy: CutStrategy::Offset,
            area_factor: 0.7,
            perimeter_factor: 1.0,
            passes: 13,
            overhead_factor: 2.2,
        }
    }

    pub fn pocket_1mm_vbit() -> Self {
        Self {
            name: "Pocket V-bit 1mm".to_string(),
            tool: ToolKind::VBit,
            tool_diameter_mm: 1.1,
            feed_rate: 1000.0,
            pass_depth_mm: 0.2,
            total_depth_mm: 1.2,
            stepover_mm: 0.33,
            strategy: CutStrategy::Offset,
            area_factor: 0.6,
            perimeter_factor: 1.0,
            passes: 6,
            overhead_factor: 3.5,
        }
    }

    pub fn profile_05mm_vbit() -> Self {
        Self {
            name: "Profile V-bit 0.5mm".to_string(),
            tool: ToolKind::VBit,
            tool_diameter_mm: 0.6,
            feed_rate: 800.0,
            pass_depth_mm: 0.1,
            total_depth_mm: 1.7,
            stepover_mm: 0.18,
            strategy: CutStrategy::Profile,
            area_factor: 1.0,
            perimeter_factor: 3.0,
            passes: 17,
            overhead_factor: 2.5,
        }
    }

    /// Modelled minutes for a drawing of `area_mm2` with `perimeter_mm`
    pub fn minutes(&self, area_mm2: f64, perimeter_mm: f64) -> f64 {
        let cutting = match self.strategy {
            CutStrategy::Raster => area_mm2 * self.area_factor * self.total_depth_mm / self.feed_rate,
            CutStrategy::Offset => perimeter_mm * f64::from(self.passes) / self.feed_rate,
            CutStrategy::Profile => {
                perimeter_mm * self.perimeter_factor * f64::from(self.passes) / self.feed_rate
            }
        };
        cutting * self.overhead_factor
    }

    pub fn validate(&self) -> ParameterResult<()> {
        ParameterError::ensure_positive("feed_rate", self.feed_rate)?;
        ParameterError::ensure_positive("total_depth_mm", self.total_depth_mm)?;
        ParameterError::ensure_positive("area_factor", self.area_factor)?;
        ParameterError::ensure_positive("perimeter_factor", self.perimeter_factor)?;
        ParameterError::ensure_positive("overhead_factor", self.overhead_factor)?;
        if self.passes == 0 {
            return Err(ParameterError::OutOfRange {
                name: "passes".to_string(),
                value: 0.0,
                min: 1.0,
                max: f64::from(u32::MAX),
            });
        }
        Ok(())
    }
}

/// Which of the four operations a time belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Facing,
    RoughPocket,
    FinePocket,
    Profiling,
}

impl OperationKind {
    pub const ALL: [OperationKind; 4] = [
        Self::Facing,
        Self::RoughPocket,
        Self::FinePocket,
        Self::Profiling,
    ];

    /// Facing and the 6 mm pocket count as roughing, the rest as fine work
    pub fn is_roughing(&self) -> bool {
        matches!(self, Self::Facing | Self::RoughPocket)
    }
}

/// The four operations used to cut a seal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperationSet {
    pub facing: OperationProfile,
    pub rough_pocket: OperationProfile,
    pub fine_pocket: OperationProfile,
    pub profiling: OperationProfile,
}

impl Default for OperationSet {
    fn default() -> Self {
        Self {
            facing: OperationProfile::facing_6mm(),
            rough_pocket: OperationProfile::pocket_6mm(),
            fine_pocket: OperationProfile::pocket_1mm_vbit(),
            profiling: OperationProfile::profile_05mm_vbit(),
        }
    }
}

impl OperationSet {
    pub fn get(&self, kind: OperationKind) -> &OperationProfile {
        match kind {
            OperationKind::Facing => &self.facing,
            OperationKind::RoughPocket => &self.rough_pocket,
            OperationKind::FinePocket => &self.fine_pocket,
            OperationKind::Profiling => &self.profiling,
        }
    }

    fn get_mut(&mut self, kind: OperationKind) -> &mut OperationProfile {
        match kind {
            OperationKind::Facing => &mut self.facing,
            OperationKind::RoughPocket => &mut self.rough_pocket,
            OperationKind::FinePocket => &mut self.fine_pocket,
            OperationKind::Profiling => &mut self.profiling,
        }
    }

    pub fn validate(&self) -> ParameterResult<()> {
        OperationKind::ALL
            .iter()
            .try_for_each(|kind| self.get(*kind).validate())
    }
}

/// Shape counts that make an outline longer than a plain blob of the same area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShapeComplexity {
    pub paths: usize,
    pub circles: usize,
    pub rects: usize,
    pub lines: usize,
}

impl ShapeComplexity {
    pub fn from_drawing(drawing: &VectorDrawing) -> Self {
        let counts = drawing.primitive_counts();
        let count = |kind| counts.get(&kind).copied().unwrap_or(0);
        Self {
            paths: count(PrimitiveKind::Path),
            circles: count(PrimitiveKind::Circle),
            rects: count(PrimitiveKind::Rect),
            lines: count(PrimitiveKind::Line),
        }
    }

    /// Paths weigh double
    pub fn weight(&self) -> usize {
        self.paths * 2 + self.circles + self.rects + self.lines
    }
}

/// Perimeter of a circle of `area_mm2`, stretched by 15 % per complexity unit
pub fn estimate_perimeter(area_mm2: f64, complexity: &ShapeComplexity) -> f64 {
    let base = 2.0 * (PI * area_mm2).sqrt();
    base * (1.0 + complexity.weight() as f64 * 0.15)
}

/// How a breakdown was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EstimateMethod {
    Modelled,
    Empirical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationTime {
    pub kind: OperationKind,
    pub name: String,
    pub minutes: f64,
}

/// Per-operation time estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationBreakdown {
    pub method: EstimateMethod,
    pub area_mm2: f64,
    /// Only known for modelled estimates
    pub perimeter_mm: Option<f64>,
    /// Empty for empirical estimates
    pub operations: Vec<OperationTime>,
    pub total_minutes: f64,
    pub roughing_minutes: f64,
    pub fine_minutes: f64,
}

impl OperationBreakdown {
    pub fn minutes_for(&self, kind: OperationKind) -> Option<f64> {
        self.operations
            .iter()
            .find(|op| op.kind == kind)
            .map(|op| op.minutes)
    }
}

impl fmt::Display for OperationBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let method = match self.method {
            EstimateMethod::Modelled => "modelled",
            EstimateMethod::Empirical => "empirical",
        };
        writeln!(f, "CNC time breakdown ({method})")?;
        writeln!(f, "  Area: {:.0} mm²", self.area_mm2)?;
        if let Some(perimeter) = self.perimeter_mm {
            writeln!(f, "  Perimeter: {perimeter:.1} mm")?;
        }
        for op in &self.operations {
            writeln!(f, "  {}: {:.2} min", op.name, op.minutes)?;
        }
        write!(
            f,
            "  Total: {:.2} min (roughing {:.2}, fine {:.2})",
            self.total_minutes, self.roughing_minutes, self.fine_minutes
        )
    }
}

const EMPIRICAL_BASE_MINUTES: f64 = 15.0;
const EMPIRICAL_MINUTES_PER_MM2: f64 = 0.01;
const EMPIRICAL_MIN_MINUTES: f64 = 25.0;
const EMPIRICAL_MAX_MINUTES: f64 = 35.0;
const EMPIRICAL_ROUGHING_SHARE: f64 = 0.43;

/// Area-only estimate used when the operation model cannot run
pub fn empirical_estimate(width_mm: f64, height_mm: f64) -> OperationBreakdown {
    let area_mm2 = width_mm * height_mm;
    let raw = EMPIRICAL_BASE_MINUTES + area_mm2 * EMPIRICAL_MINUTES_PER_MM2;
    let total = if raw.is_nan() {
        EMPIRICAL_MIN_MINUTES
    } else {
        raw.clamp(EMPIRICAL_MIN_MINUTES, EMPIRICAL_MAX_MINUTES)
    };
    let roughing = total * EMPIRICAL_ROUGHING_SHARE;
    OperationBreakdown {
        method: EstimateMethod::Empirical,
        area_mm2,
        perimeter_mm: None,
        operations: Vec::new(),
        total_minutes: total,
        roughing_minutes: roughing,
        fine_minutes: total - roughing,
    }
}

/// Operation-level estimator
#[derive(Debug, Clone, Default)]
pub struct OperationEstimator {
    operations: OperationSet,
}

impl OperationEstimator {
    pub fn new(operations: OperationSet) -> Self {
        Self { operations }
    }

    pub fn operations(&self) -> &OperationSet {
        &self.operations
    }

    /// Estimate per-operation times, falling back to [`empirical_estimate`]
    /// when the markup or the dimensions cannot be modelled.
    pub fn estimate(&self, markup: &str, width_mm: f64, height_mm: f64) -> OperationBreakdown {
        let modelled = VectorDrawing::parse(markup)
            .map_err(CamToolError::from)
            .and_then(|drawing| self.estimate_drawing(&drawing, width_mm, height_mm));

        let breakdown = match modelled {
            Ok(breakdown) => breakdown,
            Err(e) => {
                tracing::warn!(error = %e, "Operation model failed, using empirical estimate");
                empirical_estimate(width_mm, height_mm)
            }
        };
        tracing::debug!("{breakdown}");
        breakdown
    }

    /// Model the four operations for a parsed drawing cut at the given size
    pub fn estimate_drawing(
        &self,
        drawing: &VectorDrawing,
        width_mm: f64,
        height_mm: f64,
    ) -> CamToolResult<OperationBreakdown> {
        let area_mm2 = checked_area(width_mm, height_mm)?;
        self.operations.validate()?;

        let perimeter_mm = estimate_perimeter(area_mm2, &ShapeComplexity::from_drawing(drawing));
        let operations: Vec<OperationTime> = OperationKind::ALL
            .iter()
            .map(|&kind| {
                let profile = self.operations.get(kind);
                OperationTime {
                    kind,
                    name: profile.name.clone(),
                    minutes: profile.minutes(area_mm2, perimeter_mm),
                }
            })
            .collect();

        let roughing_minutes: f64 = operations
            .iter()
            .filter(|op| op.kind.is_roughing())
            .map(|op| op.minutes)
            .sum();
        let fine_minutes: f64 = operations
            .iter()
            .filter(|op| !op.kind.is_roughing())
            .map(|op| op.minutes)
            .sum();

        Ok(OperationBreakdown {
            method: EstimateMethod::Modelled,
            area_mm2,
            perimeter_mm: Some(perimeter_mm),
            operations,
            total_minutes: roughing_minutes + fine_minutes,
            roughing_minutes,
            fine_minutes,
        })
    }
}

/// Measured minutes for each operation on a reference job
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeasuredTimes {
    pub facing: f64,
    pub rough_pocket: f64,
    pub fine_pocket: f64,
    pub profiling: f64,
}

impl MeasuredTimes {
    pub fn get(&self, kind: OperationKind) -> f64 {
        match kind {
            OperationKind::Facing => self.facing,
            OperationKind::RoughPocket => self.rough_pocket,
            OperationKind::FinePocket => self.fine_pocket,
            OperationKind::Profiling => self.profiling,
        }
    }
}

/// Derive operation profiles that reproduce `measured` for a reference job.
///
/// Each feed rate is scaled by `modelled / measured`, so running the
/// returned set on the same drawing and size yields the measured minutes.
pub fn calibrate(
    base: &OperationSet,
    markup: &str,
    width_mm: f64,
    height_mm: f64,
    measured: &MeasuredTimes,
) -> CamToolResult<OperationSet> {
    for kind in OperationKind::ALL {
        let name = format!("{kind:?} measured minutes");
        ParameterError::ensure_positive(&name, measured.get(kind))?;
    }

    let drawing = VectorDrawing::parse(markup)?;
    let reference = OperationEstimator::new(base.clone()).estimate_drawing(&drawing, width_mm, height_mm)?;

    let mut calibrated = base.clone();
    for op in &reference.operations {
        let real = measured.get(op.kind);
        let profile = calibrated.get_mut(op.kind);
        profile.feed_rate *= op.minutes / real;
        tracing::info!(
            operation = %profile.name,
            modelled_minutes = op.minutes,
            measured_minutes = real,
            feed_rate = profile.feed_rate,
            "Calibrated operation"
        );
    }
    calibrated.validate()?;
    Ok(calibrated)
}

fn checked_area(width_mm: f64, height_mm: f64) -> ParameterResult<f64> {
    if width_mm.is_finite() && height_mm.is_finite() && width_mm > 0.0 && height_mm > 0.0 {
        Ok(width_mm * height_mm)
    } else {
        Err(ParameterError::InvalidDimensions(format!(
            "{width_mm} x {height_mm} mm"
        )))
    }
}
