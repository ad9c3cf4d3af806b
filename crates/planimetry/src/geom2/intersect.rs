//! Line–line intersection with a swap-and-retry fallback.
//!
//! Each line is written in implicit form `a·x + b·y + c = 0` with
//! `a = dy`, `b = -dx`, `c = p1.y·dx - p1.x·dy`. We eliminate `x` using the
//! first line's `a`. When that coefficient is zero (a horizontal first line)
//! or the eliminated system is singular in this ordering, the roles of x and
//! y are swapped in both equations and the solve is attempted once more; the
//! result is swapped back. Only when both attempts fail are the lines
//! reported as parallel (or coincident, or one of them undefined).

use super::types::{GeomCfg, Line, Point};

/// Intersection of two infinite lines, `None` when parallel/coincident.
///
/// Pure and deterministic: identical inputs give bit-identical outputs.
#[inline]
pub fn intersect(l1: &Line, l2: &Line) -> Option<Point> {
    intersect_eps(l1, l2, GeomCfg::default())
}

/// Same as [`intersect`] with explicit tolerances.
pub fn intersect_eps(l1: &Line, l2: &Line, cfg: GeomCfg) -> Option<Point> {
    let d1 = l1.direction();
    let d2 = l2.direction();
    // |det| is invariant under the x/y swap, so one threshold serves both attempts.
    let tol = cfg.eps_det * d1.norm() * d2.norm();

    let (mut a1, mut b1) = (d1.y, -d1.x);
    let c1 = l1.p1.y * d1.x - l1.p1.x * d1.y;
    let (mut a2, mut b2) = (d2.y, -d2.x);
    let c2 = l2.p1.y * d2.x - l2.p1.x * d2.y;

    for swapped in [false, true] {
        if a1 != 0.0 {
            let r = a2 / a1;
            let bb = b2 - b1 * r;
            // bb·a1 = a1·b2 - a2·b1, the determinant of the system.
            if (bb * a1).abs() > tol {
                let cc = c2 - c1 * r;
                let v = -cc / bb;
                let u = (-c1 - b1 * v) / a1;
                let p = if swapped {
                    Point::new(v, u)
                } else {
                    Point::new(u, v)
                };
                return (p.x.is_finite() && p.y.is_finite()).then_some(p);
            }
        }
        std::mem::swap(&mut a1, &mut b1);
        std::mem::swap(&mut a2, &mut b2);
    }
    None
}
