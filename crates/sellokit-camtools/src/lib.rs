//! # SelloKit CAM Tools
//!
//! Manufacturing parameters derived from a sized seal drawing.
//!
//! ## Tools Included
//!
//! - **Bar Stock**: smallest standard bar width that fits the seal, and the
//!   length of bar it consumes
//! - **Machining Time**: quick heuristic estimate split into roughing and
//!   fine profiling, with a fixed fallback
//! - **Operations**: per-operation time model (facing, pocketing, profiling)
//!   with calibration from measured times
//! - **Batch**: bar and time totals for a production program

pub mod batch;
pub mod error;
pub mod machining_time;
pub mod operations;
pub mod stock;

pub use batch::{summarize, BatchSummary, ProductionJob, UsageLevel, TRACKED_BAR_WIDTHS_MM};
pub use error::{CamToolError, CamToolResult, ParameterError, ParameterResult};
pub use machining_time::{
    estimate_time, EstimateSource, EstimatorSettings, TimeEstimate, TimeEstimator,
};
pub use operations::{
    calibrate, empirical_estimate, estimate_perimeter, CutStrategy, EstimateMethod,
    MeasuredTimes, OperationBreakdown, OperationEstimator, OperationKind, OperationProfile,
    OperationSet, OperationTime, ShapeComplexity, ToolKind,
};
pub use stock::{
    derive_material, derive_material_str, derive_material_with, select_bar_width, MaterialSpec,
    STANDARD_BAR_WIDTHS_MM,
};
