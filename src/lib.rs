//! # SelloKit
//!
//! Geometry and manufacturing core for a seal engraving shop:
//! - Measuring the true extent of an uploaded SVG drawing
//! - Rescaling and centering it to a physical size in millimeters
//! - Picking bar stock ("planchuela") width and length
//! - Estimating CNC machining time
//!
//! ## Architecture
//!
//! SelloKit is organized as a workspace with multiple crates:
//!
//! 1. **sellokit-core** - Physical sizes, unit helpers, error taxonomy
//! 2. **sellokit-geometry** - Measurement, fit-to-size, scale options
//! 3. **sellokit-camtools** - Bar stock, time estimates, batch tallies
//! 4. **sellokit-settings** - Shop configuration files
//! 5. **sellokit** - This facade and the end-to-end [`SizingPipeline`]
//!
//! Everything is synchronous and pure apart from configuration file I/O.

pub mod pipeline;

pub use pipeline::{DerivedRecord, DrawingReport, SizingPipeline};

pub use sellokit_core::{Error, GeometryError, PhysicalSize, Result, SizeError};

pub use sellokit_geometry::{
    compute_options, fit, fit_markup, measure_markup, BoundingBox, FittedDrawing, Fitter,
    ScaleOption, ScaleOptions, VectorDrawing,
};

pub use sellokit_camtools::{
    calibrate, derive_material, derive_material_str, estimate_time, summarize, BatchSummary,
    EstimateSource, MaterialSpec, MeasuredTimes, OperationBreakdown, OperationEstimator,
    ProductionJob, TimeEstimate, TimeEstimator,
};

pub use sellokit_settings::{Config, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support, INFO by default
///
/// Fails if a global subscriber is already installed.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    tracing::debug!(version = VERSION, build_date = BUILD_DATE, "Logging initialized");
    Ok(())
}

/// Initialize logging as JSON lines, for services that ship logs elsewhere
pub fn init_json_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().json().with_writer(std::io::stdout))
        .try_init()?;

    Ok(())
}
