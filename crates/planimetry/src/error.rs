//! Domain errors: caller bugs in the surrounding application.
//!
//! Degenerate geometry is not an error here; it travels as `None` through the
//! geometry functions so one undrawable element never aborts the rest.

use thiserror::Error;

/// Invalid parameters handed to the core (non-positive scale, negative
/// viewport, wrong point count, nonsensical tuning).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("scale must be positive and finite, got {0}")]
    Scale(f64),
    #[error("viewport must be non-negative and finite, got {width}x{height}")]
    Viewport { width: f64, height: f64 },
    #[error("{kind} diagram needs {expected} control points, got {got}")]
    PointCount {
        kind: &'static str,
        expected: usize,
        got: usize,
    },
    #[error("control point index {index} out of range for {len} points")]
    PointIndex { index: usize, len: usize },
    #[error("invalid configuration: {0}")]
    Config(String),
}
