//! # SelloKit Geometry
//!
//! Vector drawing geometry for seal engraving: reading a drawing's true
//! extent, rescaling it to a physical size and suggesting sizes that keep
//! its proportions.
//!
//! ## Components
//!
//! - **Geometry Extractor**: analytic bounding boxes for `path`, `rect`,
//!   `circle`, `ellipse`, `line`, `polyline` and `polygon`, with element
//!   transforms ignored
//! - **Fit-and-Center Transformer**: uniform scale into a target size in
//!   centimeters, centered on a millimeter canvas with a margin
//! - **Scale Option Calculator**: aspect-preserving "normal" and "inverted"
//!   size suggestions
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sellokit_geometry::{fit, VectorDrawing};
//! use sellokit_core::PhysicalSize;
//!
//! let drawing = VectorDrawing::parse(svg)?;
//! let bbox = drawing.measure()?;
//! let fitted = fit(&drawing, &bbox, PhysicalSize::new(10.0, 5.0))?;
//! println!("{}", fitted.markup);
//! ```

pub mod bbox;
pub mod drawing;
pub mod fit;
pub mod path_data;
pub mod primitive;
pub mod scale_options;

pub use bbox::{BoundingBox, Extent};
pub use drawing::{measure_markup, DrawingElement, VectorDrawing};
pub use fit::{fit, fit_markup, FittedDrawing, Fitter, DEFAULT_CANVAS_MARGIN_MM};
pub use path_data::{PathData, Segment};
pub use primitive::{Primitive, PrimitiveKind};
pub use scale_options::{compute_options, ScaleOption, ScaleOptions};
