//! Ordered, fixed-size set of draggable control points.
//!
//! A set is an immutable snapshot: every update builds a new set, so readers
//! holding the previous one never see a half-applied change. Nothing here can
//! change the number of points.

use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::geom2::Point;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ControlPointSet(Vec<Point>);

impl ControlPointSet {
    pub fn new(points: Vec<Point>) -> Self {
        Self(points)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<Point> {
        self.0.get(index).copied()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Point] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = Point> + '_ {
        self.0.iter().copied()
    }

    /// New set with slot `index` replaced; all other slots are copied unchanged.
    pub fn with_point(&self, index: usize, p: Point) -> Result<Self, DomainError> {
        if index >= self.0.len() {
            return Err(DomainError::PointIndex {
                index,
                len: self.0.len(),
            });
        }
        let mut next = self.0.clone();
        next[index] = p;
        Ok(Self(next))
    }

    /// New set with `f` applied to every slot, in order.
    pub fn map(&self, f: impl FnMut(Point) -> Point) -> Self {
        Self(self.0.iter().copied().map(f).collect())
    }
}

impl Index<usize> for ControlPointSet {
    type Output = Point;
    fn index(&self, index: usize) -> &Point {
        &self.0[index]
    }
}

impl<const N: usize> From<[Point; N]> for ControlPointSet {
    fn from(points: [Point; N]) -> Self {
        Self(points.to_vec())
    }
}
