//! Device-space display list for a rendering collaborator.
//!
//! Purpose
//! - Turn a diagram and its derived geometry into segments, circles and text
//!   anchors in pixels. Colours, stroke widths and fonts belong to the
//!   renderer; every primitive only carries a semantic `Ink` role.
//!
//! Conventions
//! - Lines are drawn across the whole viewport: each drawn line is clipped
//!   against the left and right edges, or drawn full-height when vertical.
//! - Anything the geometry reports as `None` is skipped, never drawn at a
//!   placeholder position.
//!
//! References
//! - Code cross-refs: `diagram::{Diagram, Derived}`, `view::Transform`

use serde::Serialize;

use crate::config::DiagramCfg;
use crate::diagram::{point_label, Derived, Diagram};
use crate::geom2::{intersect_eps, GeomCfg, Line, Point, TriangleDerived, VERTEX_NAMES};
use crate::view::Transform;

/// Pixel offset of coordinate text from its point.
const COORD_LABEL_DX: f64 = 15.0;
const COORD_LABEL_DY: f64 = -5.0;
/// Axis arrowhead length and half-width, in pixels.
const ARROW_LEN: f64 = 13.0;
const ARROW_HALF: f64 = 3.0;
/// Inset of the arrow tip from the viewport edge, in pixels.
const ARROW_INSET: f64 = 2.0;
/// Overshoot of the x axis past the last grid line, in pixels.
const AXIS_OVERSHOOT: f64 = 10.0;
/// Upper bound on grid lines per side of an axis.
pub const MAX_GRID_EXTENT: i64 = 500;

/// Semantic role of a primitive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Ink {
    Grid,
    Axis,
    /// The `i`-th line of a line diagram and its points.
    Line(usize),
    /// Intersection of a line pair.
    Intersection,
    /// Triangle side line extended across the viewport.
    Extension,
    Side,
    Median,
    Bisector,
    Altitude,
    Incircle,
    VertexName,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum Primitive {
    Segment { from: Point, to: Point, ink: Ink },
    Circle { center: Point, radius: f64, ink: Ink },
    Label { at: Point, text: String, ink: Ink },
}

impl Primitive {
    pub fn ink(&self) -> Ink {
        match self {
            Primitive::Segment { ink, .. }
            | Primitive::Circle { ink, .. }
            | Primitive::Label { ink, .. } => *ink,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Scene {
    pub primitives: Vec<Primitive>,
    /// Status text (line equations, intersection).
    pub messages: Vec<String>,
}

impl Scene {
    /// Primitives with the given role.
    pub fn with_ink(&self, ink: Ink) -> impl Iterator<Item = &Primitive> + '_ {
        self.primitives.iter().filter(move |p| p.ink() == ink)
    }
}

/// Number of grid lines on each side of an axis, at most `MAX_GRID_EXTENT`.
pub fn grid_extent(tf: &Transform) -> i64 {
    let vp = tf.viewport;
    let n = (vp.width().max(vp.height()) / tf.scale.get() / 2.0).round();
    (n as i64).min(MAX_GRID_EXTENT)
}

/// Build the full display list.
pub fn build(diagram: &Diagram, derived: &Derived, tf: &Transform, cfg: &DiagramCfg) -> Scene {
    let mut out = Vec::new();
    grid(tf, &mut out);
    match derived {
        Derived::Line { .. } | Derived::LinePair { .. } => {
            for (i, line) in diagram.lines().iter().enumerate() {
                line_with_points(line, Ink::Line(i), tf, cfg, &mut out);
            }
            if let Derived::LinePair {
                intersection: Some(p),
                ..
            } = derived
            {
                marker(*p, Ink::Intersection, tf, cfg, &mut out);
            }
        }
        Derived::Triangle(t) => triangle(diagram, t, tf, cfg, &mut out),
    }
    Scene {
        primitives: out,
        messages: diagram.messages(derived),
    }
}

/// Device-space segment covering `line` across the viewport: clipped to the
/// left and right edges, or full-height when the line is vertical. `None`
/// for a degenerate line.
pub fn span(line: &Line, tf: &Transform, geom: GeomCfg) -> Option<Line> {
    if line.is_degenerate() {
        return None;
    }
    let dev = tf.line_to_device(line);
    let (w, h) = (tf.viewport.width(), tf.viewport.height());
    let left = Line::new(Point::new(0.0, 0.0), Point::new(0.0, h));
    let right = Line::new(Point::new(w, 0.0), Point::new(w, h));
    match (intersect_eps(&dev, &left, geom), intersect_eps(&dev, &right, geom)) {
        (Some(a), Some(b)) => Some(Line::new(a, b)),
        _ => Some(Line::new(
            Point::new(dev.p1.x, 0.0),
            Point::new(dev.p1.x, h),
        )),
    }
}

fn segment(from: Point, to: Point, ink: Ink) -> Primitive {
    Primitive::Segment { from, to, ink }
}

fn grid(tf: &Transform, out: &mut Vec<Primitive>) {
    let n = grid_extent(tf);
    let (w, h) = (tf.viewport.width(), tf.viewport.height());
    for k in -n..n {
        let x = tf.to_device(Point::new(k as f64, 0.0)).x;
        out.push(segment(Point::new(x, 0.0), Point::new(x, h), Ink::Grid));
    }
    for k in -n..n {
        let y = tf.to_device(Point::new(0.0, k as f64)).y;
        out.push(segment(Point::new(0.0, y), Point::new(w, y), Ink::Grid));
    }

    let n = n as f64;
    let from = tf.to_device(Point::new(-n, 0.0));
    let to = tf.to_device(Point::new(n, 0.0));
    out.push(segment(from, to + Point::new(AXIS_OVERSHOOT, 0.0), Ink::Axis));
    let tip = Point::new(w - ARROW_INSET, to.y);
    for side in [-ARROW_HALF, ARROW_HALF] {
        let tail = Point::new(tip.x - ARROW_LEN, tip.y + side);
        out.push(segment(tail, tip, Ink::Axis));
    }

    let from = tf.to_device(Point::new(0.0, -n));
    let to = tf.to_device(Point::new(0.0, n));
    out.push(segment(from, to, Ink::Axis));
    let tip = Point::new(to.x, ARROW_INSET);
    for side in [-ARROW_HALF, ARROW_HALF] {
        let tail = Point::new(tip.x + side, tip.y + ARROW_LEN);
        out.push(segment(tail, tip, Ink::Axis));
    }
}

/// Point marker plus its coordinate text.
fn marker(p: Point, ink: Ink, tf: &Transform, cfg: &DiagramCfg, out: &mut Vec<Primitive>) {
    let at = tf.to_device(p);
    out.push(Primitive::Circle {
        center: at,
        radius: cfg.marker_radius_px,
        ink,
    });
    out.push(Primitive::Label {
        at: at + Point::new(COORD_LABEL_DX, COORD_LABEL_DY),
        text: point_label(p),
        ink,
    });
}

fn line_with_points(
    line: &Line,
    ink: Ink,
    tf: &Transform,
    cfg: &DiagramCfg,
    out: &mut Vec<Primitive>,
) {
    if let Some(s) = span(line, tf, cfg.geom) {
        out.push(segment(s.p1, s.p2, ink));
    }
    marker(line.p1, ink, tf, cfg, out);
    marker(line.p2, ink, tf, cfg, out);
}

fn triangle(
    diagram: &Diagram,
    t: &TriangleDerived,
    tf: &Transform,
    cfg: &DiagramCfg,
    out: &mut Vec<Primitive>,
) {
    let dev = |l: &Line| tf.line_to_device(l);
    for side in diagram.lines() {
        if let Some(s) = span(&side, tf, cfg.geom) {
            out.push(segment(s.p1, s.p2, Ink::Extension));
        }
        let s = dev(&side);
        out.push(segment(s.p1, s.p2, Ink::Side));
    }
    for vc in &t.vertices {
        let m = dev(&vc.median);
        out.push(segment(m.p1, m.p2, Ink::Median));
        if let Some(b) = vc.bisector {
            let b = dev(&b);
            out.push(segment(b.p1, b.p2, Ink::Bisector));
        }
        if let Some(a) = vc.altitude {
            let a = dev(&a);
            out.push(segment(a.p1, a.p2, Ink::Altitude));
        }
        out.push(Primitive::Label {
            at: tf.to_device(vc.label),
            text: VERTEX_NAMES[vc.vertex].to_string(),
            ink: Ink::VertexName,
        });
    }
    for p in diagram.points().iter() {
        out.push(Primitive::Circle {
            center: tf.to_device(p),
            radius: cfg.marker_radius_px,
            ink: Ink::Side,
        });
    }
    if let (Some(c), Some(r)) = (t.incenter, t.inradius) {
        out.push(Primitive::Circle {
            center: tf.to_device(c),
            radius: tf.device_len(r),
            ink: Ink::Incircle,
        });
    }
}
