//! Basic 2D types and tolerances shared by the intersector and triangle code.
//!
//! - `Point`: a model- or device-space position (`nalgebra::Vector2<f64>`).
//! - `Line`: infinite line through two points; direction `p2 - p1`.
//! - `GeomCfg`: centralizes the determinant epsilon used for parallel and
//!   collinearity checks.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// A point in the plane. Copy value; mutation always produces a new point.
pub type Point = Vector2<f64>;

/// Geometry configuration (tolerances).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeomCfg {
    /// Relative determinant threshold: a 2×2 system counts as singular when
    /// `|det| <= eps_det * |d1| * |d2|` for the two direction vectors.
    pub eps_det: f64,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self { eps_det: 1e-12 }
    }
}

/// Infinite line through `p1` and `p2`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub p1: Point,
    pub p2: Point,
}

impl Line {
    #[inline]
    pub fn new(p1: Point, p2: Point) -> Self {
        Self { p1, p2 }
    }

    /// Line through `origin` heading at `angle` (radians, counterclockwise from +x).
    #[inline]
    pub fn from_angle(origin: Point, angle: f64) -> Self {
        Self {
            p1: origin,
            p2: origin + Vector2::new(angle.cos(), angle.sin()),
        }
    }

    #[inline]
    pub fn direction(&self) -> Vector2<f64> {
        self.p2 - self.p1
    }

    /// Undefined line: both points coincide.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.p1 == self.p2
    }
}

#[inline]
pub fn distance(a: Point, b: Point) -> f64 {
    (a - b).norm()
}

#[inline]
pub fn midpoint(a: Point, b: Point) -> Point {
    (a + b) * 0.5
}

/// Direction angle of `to - from` via `atan2`.
#[inline]
pub fn heading(from: Point, to: Point) -> f64 {
    (to.y - from.y).atan2(to.x - from.x)
}

/// Signed area of the parallelogram spanned by `b - a` and `c - a`.
/// Positive for a→b→c counterclockwise.
#[inline]
pub fn cross(a: Point, b: Point, c: Point) -> f64 {
    let ab = b - a;
    let ac = c - a;
    ab.x * ac.y - ab.y * ac.x
}
