//! Axis-aligned bounding boxes.
//!
//! [`Extent`] is the accumulator used while walking primitives. It starts
//! from the infinite sentinels and only becomes a [`BoundingBox`] once some
//! geometry has been seen; an untouched extent is an error, never a zero box.

use lyon::geom::Box2D;
use sellokit_core::{GeometryError, PhysicalSize};
use serde::{Deserialize, Serialize};

/// Bounding box in drawing units. Width and height are never negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(min_x: f64, min_y: f64, width: f64, height: f64) -> Self {
        Self {
            min_x,
            min_y,
            width,
            height,
        }
    }

    pub fn max_x(&self) -> f64 {
        self.min_x + self.width
    }

    pub fn max_y(&self) -> f64 {
        self.min_y + self.height
    }

    /// Width and height as a size value, in the box's own units
    pub fn size(&self) -> PhysicalSize {
        PhysicalSize::new(self.width, self.height)
    }

    /// Zero width or height (or non-finite values): cannot be fitted or scaled
    pub fn is_degenerate(&self) -> bool {
        !(self.min_x.is_finite()
            && self.min_y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0)
    }

    /// Smallest box containing both
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        let min_x = self.min_x.min(other.min_x);
        let min_y = self.min_y.min(other.min_y);
        let max_x = self.max_x().max(other.max_x());
        let max_y = self.max_y().max(other.max_y());
        BoundingBox::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }
}

/// Running min/max accumulator over primitive bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl Default for Extent {
    fn default() -> Self {
        Self::empty()
    }
}

impl Extent {
    pub fn empty() -> Self {
        Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    pub fn include_point(&mut self, x: f64, y: f64) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    pub fn include_box(&mut self, b: &Box2D<f64>) {
        self.include_point(b.min.x, b.min.y);
        self.include_point(b.max.x, b.max.y);
    }

    pub fn merge(&mut self, other: &Extent) {
        if other.is_empty() {
            return;
        }
        self.include_point(other.min_x, other.min_y);
        self.include_point(other.max_x, other.max_y);
    }

    /// The box covered so far; `EmptyGeometry` while nothing was included
    pub fn to_bounding_box(&self) -> Result<BoundingBox, GeometryError> {
        if self.is_empty() {
            return Err(GeometryError::EmptyGeometry);
        }
        Ok(BoundingBox::new(
            self.min_x,
            self.min_y,
            self.max_x - self.min_x,
            self.max_y - self.min_y,
        ))
    }
}

impl FromIterator<Extent> for Extent {
    fn from_iter<I: IntoIterator<Item = Extent>>(iter: I) -> Self {
        iter.into_iter().fold(Extent::empty(), |mut acc, e| {
            acc.merge(&e);
            acc
        })
    }
}
