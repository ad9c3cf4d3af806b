//! Triangle constructions: medians, angle bisectors, altitudes, incircle, circumcircle.
//!
//! Purpose
//! - Derive everything a triangle diagram shows from its three vertices in one
//!   pass. The result is a pure function of the vertices; nothing is cached
//!   between calls.
//!
//! Conventions
//! - Vertex `i` has neighbours `next = (i+1) % 3` and `prev = (i+2) % 3`
//!   (cyclic A→B→C→A); the side opposite `i` is `prev–next`.
//! - Bisector direction is the arithmetic mean of the two `atan2` headings
//!   from the vertex. When the headings straddle ±π the mean points the other
//!   way along the same line, which is why constructions are lines, not rays.
//! - Degenerate (collinear or coincident) vertices never panic; every
//!   sub-result that needs a proper triangle is `None` on its own.

use std::f64::consts::FRAC_PI_2;

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use super::intersect::intersect_eps;
use super::types::{cross, distance, heading, midpoint, GeomCfg, Line, Point};

/// Display names of the vertices, by index.
pub const VERTEX_NAMES: [&str; 3] = ["A", "B", "C"];

/// Triangle derivation settings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriangleCfg {
    /// Distance from a vertex to its label, along the bisector, in the same
    /// units as the vertices.
    pub label_offset: f64,
    pub geom: GeomCfg,
}

impl Default for TriangleCfg {
    fn default() -> Self {
        Self {
            label_offset: 30.0,
            geom: GeomCfg::default(),
        }
    }
}

/// Constructions anchored at one vertex.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct VertexConstruction {
    pub vertex: usize,
    /// Vertex → midpoint of the opposite side.
    pub median: Line,
    /// Heading of the bisector line through the vertex (radians).
    pub bisector_angle: f64,
    /// Vertex → foot of the bisector on the opposite side line.
    pub bisector: Option<Line>,
    /// Vertex → foot of the perpendicular on the opposite side line.
    pub altitude: Option<Line>,
    /// Perpendicular bisector of the opposite side (midpoint → one unit along the normal).
    pub perpendicular_bisector: Line,
    /// Label anchor, pushed away from the opposite side.
    pub label: Point,
}

/// Everything derived from three vertices.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TriangleDerived {
    pub vertices: [VertexConstruction; 3],
    /// `sides[i]` is the length of the side opposite vertex `i`.
    pub sides: [f64; 3],
    pub degenerate: bool,
    pub incenter: Option<Point>,
    pub inradius: Option<f64>,
    pub circumcenter: Option<Point>,
    pub circumradius: Option<f64>,
}

/// `(prev, next)` neighbours of vertex `i`.
#[inline]
pub fn neighbors(i: usize) -> (usize, usize) {
    ((i + 2) % 3, (i + 1) % 3)
}

/// Derive with default settings.
pub fn derive(v: &[Point; 3]) -> TriangleDerived {
    derive_with(v, &TriangleCfg::default())
}

pub fn derive_with(v: &[Point; 3], cfg: &TriangleCfg) -> TriangleDerived {
    let vertices = [0, 1, 2].map(|i| vertex_construction(v, i, cfg));
    let sides = [0, 1, 2].map(|i| {
        let (prev, next) = neighbors(i);
        distance(v[prev], v[next])
    });
    let degenerate = is_degenerate(v, cfg.geom);

    let (incenter, inradius_val, circumcenter) = if degenerate {
        (None, None, None)
    } else {
        let b0 = Line::from_angle(v[0], vertices[0].bisector_angle);
        let b1 = Line::from_angle(v[1], vertices[1].bisector_angle);
        (
            intersect_eps(&b0, &b1, cfg.geom),
            inradius(sides),
            intersect_eps(
                &vertices[0].perpendicular_bisector,
                &vertices[1].perpendicular_bisector,
                cfg.geom,
            ),
        )
    };

    TriangleDerived {
        vertices,
        sides,
        degenerate,
        incenter,
        inradius: inradius_val,
        circumcenter,
        circumradius: circumcenter.map(|c| distance(c, v[0])),
    }
}

/// Heron-style inradius `sqrt((s-a)(s-b)(s-c)/s)` from the three side lengths.
///
/// `None` when the semiperimeter is not positive, the product is negative, or
/// the result is not finite. Near-collinear input can still produce a tiny
/// positive value here; [`derive_with`] screens that case with [`is_degenerate`].
pub fn inradius(sides: [f64; 3]) -> Option<f64> {
    let [a, b, c] = sides;
    let s = (a + b + c) / 2.0;
    if !(s > 0.0) {
        return None;
    }
    let prod = (s - a) * (s - b) * (s - c);
    if prod < 0.0 {
        return None;
    }
    let r = (prod / s).sqrt();
    r.is_finite().then_some(r)
}

/// Collinear or coincident vertices, relative to the squared longest side.
pub fn is_degenerate(v: &[Point; 3], cfg: GeomCfg) -> bool {
    let longest = distance(v[0], v[1])
        .max(distance(v[1], v[2]))
        .max(distance(v[2], v[0]));
    !(cross(v[0], v[1], v[2]).abs() > cfg.eps_det * longest * longest)
}

fn vertex_construction(v: &[Point; 3], i: usize, cfg: &TriangleCfg) -> VertexConstruction {
    let (prev, next) = neighbors(i);
    let (vi, vp, vn) = (v[i], v[prev], v[next]);
    let opposite = Line::new(vn, vp);
    let mid = midpoint(vp, vn);

    let bisector_angle = (heading(vi, vp) + heading(vi, vn)) / 2.0;
    let bisector_foot = intersect_eps(&opposite, &Line::from_angle(vi, bisector_angle), cfg.geom);

    let normal_angle = heading(vp, vn) + FRAC_PI_2;
    let altitude_foot = intersect_eps(&opposite, &Line::from_angle(vi, normal_angle), cfg.geom);

    VertexConstruction {
        vertex: i,
        median: Line::new(vi, mid),
        bisector_angle,
        bisector: bisector_foot.map(|f| Line::new(vi, f)),
        altitude: altitude_foot.map(|f| Line::new(vi, f)),
        perpendicular_bisector: Line::from_angle(mid, normal_angle),
        label: label_position(vi, bisector_angle, bisector_foot, cfg.label_offset),
    }
}

/// Offset the label along the bisector, on the side away from the bisector foot.
fn label_position(vertex: Point, angle: f64, foot: Option<Point>, offset: f64) -> Point {
    let u = Vector2::new(angle.cos(), angle.sin()) * offset;
    let tentative = vertex - u;
    match foot {
        Some(f) if distance(vertex, f) > distance(tentative, f) => vertex + u,
        _ => tentative,
    }
}
