//! Model ⇄ device coordinate transform.
//!
//! Purpose
//! - Map mathematical (model) coordinates to pixels on a drawing surface and
//!   back. Model y grows upward, device y grows downward; the model origin sits
//!   at the viewport centre.
//!
//! Formulas
//! - device: `x' = x·s + w/2`, `y' = -y·s + h/2`
//! - model:  `x = (x' - w/2)/s`, `y = -(y' - h/2)/s`
//!
//! Invariants are enforced by construction: a `Scale` is strictly positive and
//! finite, a `Viewport` is non-negative and finite. Passing a zero scale is a
//! caller bug and is rejected with `DomainError` before any geometry runs.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::geom2::{Line, Point};

/// Drawing surface size in device pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawViewport")]
pub struct Viewport {
    width: f64,
    height: f64,
}

#[derive(Deserialize)]
struct RawViewport {
    width: f64,
    height: f64,
}

impl TryFrom<RawViewport> for Viewport {
    type Error = DomainError;
    fn try_from(raw: RawViewport) -> Result<Self, Self::Error> {
        Viewport::new(raw.width, raw.height)
    }
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Result<Self, DomainError> {
        let ok = |v: f64| v.is_finite() && v >= 0.0;
        if ok(width) && ok(height) {
            Ok(Self { width, height })
        } else {
            Err(DomainError::Viewport { width, height })
        }
    }
    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }
    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }
    #[inline]
    fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Pixels per model unit.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Scale(f64);

impl Scale {
    pub fn new(value: f64) -> Result<Self, DomainError> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(DomainError::Scale(value))
        }
    }
    #[inline]
    pub fn get(self) -> f64 {
        self.0
    }
    /// Multiply (`In`) or divide (`Out`) by `factor`.
    pub fn zoomed(self, zoom: Zoom, factor: f64) -> Result<Self, DomainError> {
        match zoom {
            Zoom::In => Self::new(self.0 * factor),
            Zoom::Out => Self::new(self.0 / factor),
        }
    }
}

impl TryFrom<f64> for Scale {
    type Error = DomainError;
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Scale::new(value)
    }
}

impl From<Scale> for f64 {
    fn from(s: Scale) -> f64 {
        s.0
    }
}

/// Zoom action from the zoom control.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zoom {
    In,
    Out,
}

/// Model → device.
#[inline]
pub fn to_device(p: Point, viewport: Viewport, scale: Scale) -> Point {
    let s = scale.get();
    let c = viewport.center();
    Point::new(p.x * s + c.x, -p.y * s + c.y)
}

/// Device → model.
#[inline]
pub fn to_model(p: Point, viewport: Viewport, scale: Scale) -> Point {
    let s = scale.get();
    let c = viewport.center();
    Point::new((p.x - c.x) / s, -(p.y - c.y) / s)
}

/// Viewport and scale bundled for callers that convert many points.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub viewport: Viewport,
    pub scale: Scale,
}

impl Transform {
    #[inline]
    pub fn new(viewport: Viewport, scale: Scale) -> Self {
        Self { viewport, scale }
    }

    /// Validate raw numbers and build a transform.
    pub fn from_raw(width: f64, height: f64, scale: f64) -> Result<Self, DomainError> {
        Ok(Self::new(Viewport::new(width, height)?, Scale::new(scale)?))
    }

    #[inline]
    pub fn to_device(&self, p: Point) -> Point {
        to_device(p, self.viewport, self.scale)
    }

    #[inline]
    pub fn to_model(&self, p: Point) -> Point {
        to_model(p, self.viewport, self.scale)
    }

    #[inline]
    pub fn line_to_device(&self, l: &Line) -> Line {
        Line::new(self.to_device(l.p1), self.to_device(l.p2))
    }

    /// Device length (pixels) → model length.
    #[inline]
    pub fn model_len(&self, px: f64) -> f64 {
        px / self.scale.get()
    }

    /// Model length → device length (pixels).
    #[inline]
    pub fn device_len(&self, len: f64) -> f64 {
        len * self.scale.get()
    }

    #[inline]
    pub fn with_viewport(self, viewport: Viewport) -> Self {
        Self { viewport, ..self }
    }

    #[inline]
    pub fn with_scale(self, scale: Scale) -> Self {
        Self { scale, ..self }
    }
}

#[cfg(test)]
mod tests;
