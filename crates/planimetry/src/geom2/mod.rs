//! Plane geometry primitives (model-space agnostic).
//!
//! Purpose
//! - Provide the two algorithmic building blocks of the diagrams: a robust
//!   line–line intersection and the triangle constructions built on it.
//! - Keep everything pure: inputs are `Copy` values, outputs are fresh values,
//!   degeneracy is an explicit `None`.
//!
//! The functions work in any uniformly scaled frame, including the y-flipped
//! device frame, because every construction here is similarity-equivariant.
//!
//! References
//! - Code cross-refs: `Line`, `GeomCfg`, `intersect`, `triangle::derive`

pub mod intersect;
pub mod triangle;
mod types;

pub use intersect::{intersect, intersect_eps};
pub use triangle::{
    derive as derive_triangle, derive_with as derive_triangle_with, TriangleCfg, TriangleDerived,
    VertexConstruction, VERTEX_NAMES,
};
pub use types::{cross, distance, heading, midpoint, GeomCfg, Line, Point};
