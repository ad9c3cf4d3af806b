//! Text for labels and status messages.
//!
//! Numbers use a fixed-precision rule: integers print without decimals,
//! anything else with two. Comparisons are exact on purpose; snapped control
//! points are exact integers, so `dx == 0` is the real vertical case.

use std::fmt;

use serde::Serialize;

use crate::geom2::Point;

/// `3` → `"3"`, `2.5` → `"2.50"`, `-0.0` → `"0"`.
pub fn fixed_value(v: f64) -> String {
    let v = v + 0.0;
    if v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        format!("{v:.2}")
    }
}

/// `"(x ; y)"` with both coordinates in fixed precision.
pub fn point_label(p: Point) -> String {
    format!("({} ; {})", fixed_value(p.x), fixed_value(p.y))
}

/// Slope-intercept description of the line through two control points.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "form", rename_all = "lowercase")]
pub enum LineEquation {
    /// Both points are the same; no line.
    Coincident,
    /// `x = const` (infinite slope).
    Vertical { x: f64 },
    /// `y = k·x + b`.
    Sloped { k: f64, b: f64 },
}

impl LineEquation {
    pub fn through(p1: Point, p2: Point) -> Self {
        let dx = p2.x - p1.x;
        let dy = p2.y - p1.y;
        if dx == 0.0 && dy == 0.0 {
            LineEquation::Coincident
        } else if dx == 0.0 {
            LineEquation::Vertical { x: p1.x }
        } else {
            let k = dy / dx;
            LineEquation::Sloped {
                k,
                b: p1.y - p1.x * k,
            }
        }
    }
}

impl fmt::Display for LineEquation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            LineEquation::Coincident => write!(f, "points coincide"),
            LineEquation::Vertical { x } => write!(f, "x = {}", fixed_value(x)),
            LineEquation::Sloped { k, b } => {
                write!(f, "y = {} * x", fixed_value(k))?;
                if b > 0.0 {
                    write!(f, " + {}", fixed_value(b))
                } else if b < 0.0 {
                    write!(f, " - {}", fixed_value(-b))
                } else {
                    Ok(())
                }
            }
        }
    }
}

/// Status text for the intersection of the two lines of a line pair.
pub fn intersection_message(p: Option<Point>) -> String {
    match p {
        Some(p) => format!("intersection {}", point_label(p)),
        None => "∅ (lines are parallel)".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    #[test]
    fn fixed_value_rule() {
        assert_eq!(fixed_value(3.0), "3");
        assert_eq!(fixed_value(-2.0), "-2");
        assert_eq!(fixed_value(2.5), "2.50");
        assert_eq!(fixed_value(1.0 / 3.0), "0.33");
        assert_eq!(fixed_value(-0.0), "0");
    }

    #[test]
    fn point_labels() {
        assert_eq!(point_label(vector![-2.0, 0.5]), "(-2 ; 0.50)");
    }

    #[test]
    fn equations_cover_all_forms() {
        let eq = LineEquation::through(vector![-2.0, -2.0], vector![2.0, 2.0]);
        assert_eq!(eq, LineEquation::Sloped { k: 1.0, b: 0.0 });
        assert_eq!(eq.to_string(), "y = 1 * x");

        let eq = LineEquation::through(vector![0.0, -2.0], vector![4.0, 2.0]);
        assert_eq!(eq.to_string(), "y = 1 * x - 2");

        let eq = LineEquation::through(vector![0.0, 1.0], vector![2.0, 2.0]);
        assert_eq!(eq.to_string(), "y = 0.50 * x + 1");

        let eq = LineEquation::through(vector![3.0, -1.0], vector![3.0, 5.0]);
        assert_eq!(eq, LineEquation::Vertical { x: 3.0 });
        assert_eq!(eq.to_string(), "x = 3");

        let eq = LineEquation::through(vector![1.0, 1.0], vector![1.0, 1.0]);
        assert_eq!(eq.to_string(), "points coincide");
    }

    #[test]
    fn intersection_messages() {
        assert_eq!(intersection_message(Some(vector![2.0, 2.0])), "intersection (2 ; 2)");
        assert_eq!(intersection_message(None), "∅ (lines are parallel)");
    }
}
