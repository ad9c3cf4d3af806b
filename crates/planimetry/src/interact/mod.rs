//! Pointer interaction: hit-testing, dragging, snapping, debounce deadlines.
//!
//! The pieces here never own the control points. Each operation receives the
//! current `ControlPointSet` and, when it changes something, returns a new one;
//! the caller decides what becomes current. Timers are modelled as
//! caller-clocked deadlines so nothing here depends on a runtime.
//!
//! References
//! - Code cross-refs: `points::ControlPointSet`, `view::Transform`, `diagram::Session`

pub mod debounce;
pub mod drag;
pub mod snap;

pub use debounce::Debounce;
pub use drag::{nearest_within, DragCfg, DragController, DragState, PointerEvent, PointerPhase};
pub use snap::{snap, snap_all, try_snap, SnapCfg};

#[cfg(test)]
mod tests;
