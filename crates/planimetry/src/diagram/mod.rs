//! Diagram variants and their derived geometry.
//!
//! Purpose
//! - A diagram is a kind (how many control points, which constructions) plus
//!   the current `ControlPointSet`. All variants share the same transform,
//!   hit-test, snap and intersection code; the kind only selects what to derive.
//!
//! Variants
//! - `Line`: two points, one line and its equation.
//! - `LinePair`: four points, two lines, their equations and intersection.
//! - `Triangle`: three vertices with medians, bisectors, altitudes, incircle.
//!
//! Derived geometry is recomputed from scratch on every call; nothing is cached.
//!
//! References
//! - Code cross-refs: `geom2::{intersect, derive_triangle_with}`, `Session`, `scene::build`

pub mod format;
pub mod session;

use std::fmt;
use std::str::FromStr;

use nalgebra::vector;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::geom2::{derive_triangle_with, intersect_eps, Line, Point, TriangleCfg, TriangleDerived};
use crate::points::ControlPointSet;

pub use format::{fixed_value, intersection_message, point_label, LineEquation};
pub use session::{InputEvent, Session, TimedEvent, Update};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagramKind {
    Line,
    LinePair,
    Triangle,
}

impl DiagramKind {
    pub const ALL: [DiagramKind; 3] = [DiagramKind::Line, DiagramKind::LinePair, DiagramKind::Triangle];

    /// Fixed number of control points for this kind.
    pub fn point_count(self) -> usize {
        match self {
            DiagramKind::Line => 2,
            DiagramKind::LinePair => 4,
            DiagramKind::Triangle => 3,
        }
    }

    /// Control points a freshly opened diagram starts with.
    pub fn default_points(self) -> ControlPointSet {
        let line = [vector![-2.0, -2.0], vector![2.0, 2.0]];
        match self {
            DiagramKind::Line => ControlPointSet::from(line),
            DiagramKind::LinePair => ControlPointSet::from([
                line[0],
                line[1],
                vector![0.0, -2.0],
                vector![4.0, 2.0],
            ]),
            DiagramKind::Triangle => {
                ControlPointSet::from([line[0], line[1], vector![0.0, -3.0]])
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DiagramKind::Line => "line",
            DiagramKind::LinePair => "line-pair",
            DiagramKind::Triangle => "triangle",
        }
    }
}

impl fmt::Display for DiagramKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiagramKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DiagramKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("unknown diagram kind `{s}` (expected line, line-pair or triangle)"))
    }
}

/// Derived geometry per variant.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Derived {
    Line {
        equation: LineEquation,
    },
    LinePair {
        equations: [LineEquation; 2],
        intersection: Option<Point>,
    },
    Triangle(TriangleDerived),
}

/// A diagram: its kind and current control points.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Diagram {
    kind: DiagramKind,
    points: ControlPointSet,
}

impl Diagram {
    /// Open a diagram with its default control points.
    pub fn open(kind: DiagramKind) -> Self {
        Self {
            kind,
            points: kind.default_points(),
        }
    }

    pub fn new(kind: DiagramKind, points: ControlPointSet) -> Result<Self, DomainError> {
        check_count(kind, &points)?;
        Ok(Self { kind, points })
    }

    #[inline]
    pub fn kind(&self) -> DiagramKind {
        self.kind
    }

    #[inline]
    pub fn points(&self) -> &ControlPointSet {
        &self.points
    }

    /// Same diagram over a new point set of the same size.
    pub fn with_points(&self, points: ControlPointSet) -> Result<Self, DomainError> {
        Self::new(self.kind, points)
    }

    /// Swap in a set produced by drag or snap; those never change the size.
    pub(crate) fn replace_points(&mut self, points: ControlPointSet) {
        debug_assert_eq!(points.len(), self.kind.point_count());
        self.points = points;
    }

    /// The drawn lines: one per point pair for line kinds, the three sides
    /// (`i → next`) for a triangle.
    pub fn lines(&self) -> Vec<Line> {
        let p = self.points.as_slice();
        match self.kind {
            DiagramKind::Line | DiagramKind::LinePair => {
                p.chunks_exact(2).map(|c| Line::new(c[0], c[1])).collect()
            }
            DiagramKind::Triangle => (0..3).map(|i| Line::new(p[i], p[(i + 1) % 3])).collect(),
        }
    }

    /// Recompute everything derived from the current points.
    pub fn derive(&self, tri: &TriangleCfg) -> Derived {
        let p = &self.points;
        match self.kind {
            DiagramKind::Line => Derived::Line {
                equation: LineEquation::through(p[0], p[1]),
            },
            DiagramKind::LinePair => Derived::LinePair {
                equations: [
                    LineEquation::through(p[0], p[1]),
                    LineEquation::through(p[2], p[3]),
                ],
                intersection: intersect_eps(
                    &Line::new(p[0], p[1]),
                    &Line::new(p[2], p[3]),
                    tri.geom,
                ),
            },
            DiagramKind::Triangle => {
                Derived::Triangle(derive_triangle_with(&[p[0], p[1], p[2]], tri))
            }
        }
    }

    /// Status lines for the host UI.
    pub fn messages(&self, derived: &Derived) -> Vec<String> {
        match derived {
            Derived::Line { equation } => vec![equation.to_string()],
            Derived::LinePair {
                equations,
                intersection,
            } => vec![
                equations[0].to_string(),
                equations[1].to_string(),
                intersection_message(*intersection),
            ],
            Derived::Triangle(t) => match t.inradius {
                Some(r) => vec![format!("inradius {}", fixed_value(r))],
                None => vec!["degenerate triangle".to_string()],
            },
        }
    }
}

fn check_count(kind: DiagramKind, points: &ControlPointSet) -> Result<(), DomainError> {
    if points.len() == kind.point_count() {
        Ok(())
    } else {
        Err(DomainError::PointCount {
            kind: kind.as_str(),
            expected: kind.point_count(),
            got: points.len(),
        })
    }
}
