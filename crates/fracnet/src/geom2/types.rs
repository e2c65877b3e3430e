//! Basic 2D types for fracture maps.
//!
//! - `Canvas`: axis-aligned rectangle `[0,width]×[0,height]` hosting one map.
//! - `Segment`: a fracture trace given by center, orientation, and length;
//!   endpoints are derived, never stored.
//! - `Bounds2`: axis-aligned bounds of a segment, used for strict containment.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::error::{FractureError, Result};

/// Point or vector in the canvas plane.
pub type Point2 = Vector2<f64>;

/// Rectangular domain with origin at (0,0).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 100.0,
        }
    }
}

impl Canvas {
    pub fn new(width: f64, height: f64) -> Result<Self> {
        let canvas = Self { width, height };
        canvas.validate()?;
        Ok(canvas)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.width.is_finite() && self.height.is_finite()) {
            return Err(FractureError::invalid("canvas size must be finite"));
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(FractureError::invalid("canvas size must be positive"));
        }
        Ok(())
    }

    /// Closed containment test.
    #[inline]
    pub fn contains(&self, p: Point2) -> bool {
        p.x >= 0.0 && p.x <= self.width && p.y >= 0.0 && p.y <= self.height
    }
}

/// Axis-aligned bounds `[min, max]` per coordinate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds2 {
    pub min: Point2,
    pub max: Point2,
}

impl Bounds2 {
    pub fn from_corners(a: Point2, b: Point2) -> Self {
        Self {
            min: Point2::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point2::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Open-interior test: strict on both coordinates, so points on the
    /// boundary (and every point of a degenerate extent) are outside.
    #[inline]
    pub fn contains_strict(&self, p: Point2) -> bool {
        p.x > self.min.x && p.x < self.max.x && p.y > self.min.y && p.y < self.max.y
    }
}

/// Fracture trace: `endpoint = center ± (length/2)·(cos θ, sin θ)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub center: Point2,
    /// Orientation in radians (not standardized).
    pub theta: f64,
    pub length: f64,
}

impl Segment {
    #[inline]
    pub fn new(center: Point2, theta: f64, length: f64) -> Self {
        Self {
            center,
            theta,
            length,
        }
    }

    /// Segment through `p` and `q`; `p` becomes `endpoint1`.
    pub fn from_endpoints(p: Point2, q: Point2) -> Self {
        let d = p - q;
        Self {
            center: (p + q) * 0.5,
            theta: d.y.atan2(d.x),
            length: d.norm(),
        }
    }

    #[inline]
    fn half_extent(&self) -> Point2 {
        Point2::new(self.theta.cos(), self.theta.sin()) * (0.5 * self.length)
    }

    #[inline]
    pub fn endpoint1(&self) -> Point2 {
        self.center + self.half_extent()
    }

    #[inline]
    pub fn endpoint2(&self) -> Point2 {
        self.center - self.half_extent()
    }

    #[inline]
    pub fn endpoints(&self) -> (Point2, Point2) {
        let h = self.half_extent();
        (self.center + h, self.center - h)
    }

    pub fn bounds(&self) -> Bounds2 {
        let (p, q) = self.endpoints();
        Bounds2::from_corners(p, q)
    }
}
