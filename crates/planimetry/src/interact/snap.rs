//! Post-drag normalization of control points toward integer coordinates.
//!
//! Each axis snaps independently when it lies strictly within its tolerance
//! of the nearest integer. The x/y asymmetry (0.1 vs 0.2) is tuning carried
//! over from the interactive diagrams, not a property of the geometry; both
//! are plain config values.

use serde::{Deserialize, Serialize};

use crate::geom2::Point;
use crate::points::ControlPointSet;

/// Per-axis snap tolerances (model units).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapCfg {
    pub tol_x: f64,
    pub tol_y: f64,
}

impl Default for SnapCfg {
    fn default() -> Self {
        Self {
            tol_x: 0.1,
            tol_y: 0.2,
        }
    }
}

/// Snapped value if `v` is within `tol` of an integer and not already on it.
#[inline]
fn snap_axis(v: f64, tol: f64) -> Option<f64> {
    // `+ 0.0` folds -0.0 into 0.0.
    let r = v.round() + 0.0;
    ((r - v).abs() < tol && r != v).then_some(r)
}

/// `Some(snapped)` when at least one axis moved, `None` when `p` is already normalized.
pub fn try_snap(p: Point, cfg: SnapCfg) -> Option<Point> {
    match (snap_axis(p.x, cfg.tol_x), snap_axis(p.y, cfg.tol_y)) {
        (None, None) => None,
        (x, y) => Some(Point::new(x.unwrap_or(p.x), y.unwrap_or(p.y))),
    }
}

/// Snapped point, or `p` itself when nothing changed.
#[inline]
pub fn snap(p: Point, cfg: SnapCfg) -> Point {
    try_snap(p, cfg).unwrap_or(p)
}

/// Snap every control point; `None` when no point moved.
pub fn snap_all(points: &ControlPointSet, cfg: SnapCfg) -> Option<ControlPointSet> {
    let mut changed = false;
    let next = points.map(|p| match try_snap(p, cfg) {
        Some(q) => {
            changed = true;
            q
        }
        None => p,
    });
    changed.then_some(next)
}
