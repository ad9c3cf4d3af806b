//! Hit-testing and single-point dragging.
//!
//! A gesture starts on pointer-down: the device position is converted to
//! model space and the nearest control point within `hit_radius` becomes
//! active. Each move then replaces only that slot. Pointer-up or leaving the
//! surface ends the gesture. Mouse and touch are both plain `PointerEvent`s.

use serde::{Deserialize, Serialize};

use crate::geom2::{distance, Point};
use crate::points::ControlPointSet;
use crate::view::Transform;

/// Drag settings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragCfg {
    /// Maximum model-space distance (exclusive) for a press to grab a point.
    pub hit_radius: f64,
}

impl Default for DragCfg {
    fn default() -> Self {
        Self { hit_radius: 1.0 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Leave,
}

/// Pointer or touch sample in device pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub x: f64,
    pub y: f64,
}

impl PointerEvent {
    #[inline]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Per-gesture state.
///
/// Invariants:
/// - `active`, when set, indexes into the set the gesture started on.
/// - `pending` is the set produced by the last accepted move, waiting for
///   post-drag snapping; it survives the end of the gesture.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DragState {
    pub active: Option<usize>,
    pub pending: Option<ControlPointSet>,
}

/// Index of the point nearest to `target` if strictly closer than `radius`.
/// Ties go to the lowest index.
pub fn nearest_within(target: Point, points: &[Point], radius: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, p) in points.iter().enumerate() {
        let d = distance(target, *p);
        if best.map_or(true, |(_, bd)| d < bd) {
            best = Some((i, d));
        }
    }
    best.filter(|&(_, d)| d < radius).map(|(i, _)| i)
}

#[derive(Clone, Debug, Default)]
pub struct DragController {
    cfg: DragCfg,
    state: DragState,
}

impl DragController {
    pub fn new(cfg: DragCfg) -> Self {
        Self {
            cfg,
            state: DragState::default(),
        }
    }

    #[inline]
    pub fn state(&self) -> &DragState {
        &self.state
    }

    #[inline]
    pub fn active_index(&self) -> Option<usize> {
        self.state.active
    }

    /// Start a gesture; returns the grabbed index or `None` on a miss.
    pub fn on_pointer_down(
        &mut self,
        device: Point,
        tf: &Transform,
        points: &ControlPointSet,
    ) -> Option<usize> {
        let model = tf.to_model(device);
        self.state.active = nearest_within(model, points.as_slice(), self.cfg.hit_radius);
        match self.state.active {
            Some(index) => tracing::debug!(index, x = model.x, y = model.y, "drag started"),
            None => tracing::trace!(x = model.x, y = model.y, "press missed all points"),
        }
        self.state.active
    }

    /// Move the active point; `None` when no gesture is active.
    pub fn on_pointer_move(
        &mut self,
        device: Point,
        tf: &Transform,
        points: &ControlPointSet,
    ) -> Option<ControlPointSet> {
        let index = self.state.active?;
        let model = tf.to_model(device);
        match points.with_point(index, model) {
            Ok(next) => {
                tracing::trace!(index, x = model.x, y = model.y, "drag move");
                self.state.pending = Some(next.clone());
                Some(next)
            }
            Err(err) => {
                tracing::warn!(%err, "dropping gesture on a mismatched point set");
                self.state.active = None;
                None
            }
        }
    }

    /// End the gesture. Idempotent.
    pub fn on_pointer_up(&mut self) {
        if let Some(index) = self.state.active.take() {
            tracing::debug!(index, "drag released");
        }
    }

    /// Pointer left the surface: same as release.
    #[inline]
    pub fn on_pointer_leave(&mut self) {
        self.on_pointer_up();
    }

    /// Dispatch by phase; returns the updated set for accepted moves.
    pub fn handle(
        &mut self,
        ev: PointerEvent,
        tf: &Transform,
        points: &ControlPointSet,
    ) -> Option<ControlPointSet> {
        match ev.phase {
            PointerPhase::Down => {
                self.on_pointer_down(ev.position(), tf, points);
                None
            }
            PointerPhase::Move => self.on_pointer_move(ev.position(), tf, points),
            PointerPhase::Up => {
                self.on_pointer_up();
                None
            }
            PointerPhase::Leave => {
                self.on_pointer_leave();
                None
            }
        }
    }

    /// Take the set awaiting post-drag snapping.
    #[inline]
    pub fn take_pending(&mut self) -> Option<ControlPointSet> {
        self.state.pending.take()
    }
}
