use std::time::Duration;

use super::*;
use crate::geom2::Point;
use crate::points::ControlPointSet;
use crate::view::Transform;
use nalgebra::vector;
use proptest::prelude::*;

fn tf() -> Transform {
    Transform::from_raw(600.0, 600.0, 60.0).unwrap()
}

fn triangle() -> ControlPointSet {
    ControlPointSet::from([vector![-2.0, -2.0], vector![2.0, 2.0], vector![0.0, -3.0]])
}

// --- snapping -------------------------------------------------------------

#[test]
fn snap_x_boundary_at_tenth() {
    let cfg = SnapCfg::default();
    assert_eq!(snap(vector![1.09, 0.0], cfg), vector![1.0, 0.0]);
    assert_eq!(snap(vector![1.11, 0.0], cfg), vector![1.11, 0.0]);
    assert_eq!(snap(vector![-2.92, 0.0], cfg), vector![-3.0, 0.0]);
}

#[test]
fn snap_y_boundary_at_fifth() {
    let cfg = SnapCfg::default();
    assert_eq!(snap(vector![0.0, 2.19], cfg), vector![0.0, 2.0]);
    assert_eq!(snap(vector![0.0, 2.21], cfg), vector![0.0, 2.21]);
}

#[test]
fn snap_axes_are_independent() {
    let cfg = SnapCfg::default();
    // x is outside its tolerance, y is inside its wider one.
    assert_eq!(snap(vector![1.15, 1.15], cfg), vector![1.15, 1.0]);
}

#[test]
fn try_snap_reports_no_change() {
    let cfg = SnapCfg::default();
    assert_eq!(try_snap(vector![3.0, -1.0], cfg), None);
    assert_eq!(try_snap(vector![0.5, 0.5], cfg), None);
    assert_eq!(try_snap(vector![0.95, 0.5], cfg), Some(vector![1.0, 0.5]));
}

#[test]
fn snap_never_produces_negative_zero() {
    let q = snap(vector![-0.04, -0.1], SnapCfg::default());
    assert_eq!(q, vector![0.0, 0.0]);
    assert!(q.x.is_sign_positive() && q.y.is_sign_positive());
}

#[test]
fn snap_all_only_reports_real_changes() {
    let cfg = SnapCfg::default();
    assert_eq!(snap_all(&triangle(), cfg), None);
    let moved = triangle().with_point(1, vector![2.05, 1.9]).unwrap();
    let snapped = snap_all(&moved, cfg).unwrap();
    assert_eq!(snapped, triangle());
}

proptest! {
    #[test]
    fn snap_is_idempotent(x in -100.0..100.0f64, y in -100.0..100.0f64) {
        let cfg = SnapCfg::default();
        let once = snap(vector![x, y], cfg);
        prop_assert_eq!(snap(once, cfg), once);
        prop_assert_eq!(try_snap(once, cfg), None);
    }
}

// --- hit-testing ------------------------------------------------------------

#[test]
fn tie_goes_to_lowest_index() {
    let points = [vector![-0.5, 0.0], vector![0.5, 0.0]];
    for _ in 0..10 {
        assert_eq!(nearest_within(vector![0.0, 0.0], &points, 1.0), Some(0));
    }
    let three = [vector![5.0, 5.0], vector![0.0, 0.5], vector![0.0, -0.5]];
    assert_eq!(nearest_within(vector![0.0, 0.0], &three, 1.0), Some(1));
}

#[test]
fn hit_radius_is_exclusive() {
    let points = [vector![1.0, 0.0]];
    assert_eq!(nearest_within(vector![0.0, 0.0], &points, 1.0), None);
    assert_eq!(nearest_within(vector![0.01, 0.0], &points, 1.0), Some(0));
    assert_eq!(nearest_within(vector![0.0, 0.0], &[], 1.0), None);
}

#[test]
fn press_converts_device_to_model_before_hit_test() {
    let mut drag = DragController::new(DragCfg::default());
    // Device (300, 300) is the model origin; both points are 0.5 away.
    let set = ControlPointSet::from([vector![-0.5, 0.0], vector![0.5, 0.0]]);
    assert_eq!(drag.on_pointer_down(vector![300.0, 300.0], &tf(), &set), Some(0));
    // Device (330, 300) is model (0.5, 0): right on point 1.
    assert_eq!(drag.on_pointer_down(vector![330.0, 300.0], &tf(), &set), Some(1));
}

// --- dragging ---------------------------------------------------------------

#[test]
fn miss_makes_the_gesture_a_no_op() {
    let mut drag = DragController::default();
    let set = triangle();
    assert_eq!(drag.on_pointer_down(vector![0.0, 0.0], &tf(), &set), None);
    assert_eq!(drag.on_pointer_move(vector![10.0, 10.0], &tf(), &set), None);
    assert_eq!(drag.state().pending, None);
}

#[test]
fn move_replaces_only_the_active_slot() {
    let t = tf();
    let mut drag = DragController::default();
    let set = triangle();
    let press = t.to_device(set[1]);
    assert_eq!(drag.on_pointer_down(press, &t, &set), Some(1));
    let next = drag
        .on_pointer_move(t.to_device(vector![3.0, 1.5]), &t, &set)
        .unwrap();
    assert_eq!(next[0], set[0]);
    assert!((next[1] - vector![3.0, 1.5]).norm() < 1e-12);
    assert_eq!(next[2], set[2]);
    assert_eq!(drag.state().pending.as_ref(), Some(&next));
}

#[test]
fn release_and_leave_clear_the_active_index() {
    let t = tf();
    let set = triangle();
    let mut drag = DragController::default();
    drag.on_pointer_down(t.to_device(set[0]), &t, &set);
    assert_eq!(drag.active_index(), Some(0));
    drag.on_pointer_up();
    assert_eq!(drag.active_index(), None);
    drag.on_pointer_up();
    assert_eq!(drag.active_index(), None);

    drag.on_pointer_down(t.to_device(set[2]), &t, &set);
    drag.on_pointer_leave();
    assert_eq!(drag.active_index(), None);
    assert_eq!(drag.on_pointer_move(vector![1.0, 1.0], &t, &set), None);
}

#[test]
fn handle_dispatches_by_phase() {
    let t = tf();
    let set = triangle();
    let mut drag = DragController::default();
    let at = t.to_device(set[2]);
    let ev = |phase, p: Point| PointerEvent {
        phase,
        x: p.x,
        y: p.y,
    };
    assert_eq!(drag.handle(ev(PointerPhase::Down, at), &t, &set), None);
    assert_eq!(drag.active_index(), Some(2));
    let moved = drag.handle(ev(PointerPhase::Move, at + vector![6.0, 0.0]), &t, &set);
    assert!(moved.is_some());
    drag.handle(ev(PointerPhase::Up, at), &t, &set);
    assert_eq!(drag.active_index(), None);
    assert!(drag.take_pending().is_some());
    assert!(drag.take_pending().is_none());
}

proptest! {
    #[test]
    fn drag_never_touches_other_points(
        index in 0usize..3,
        moves in prop::collection::vec((0.0..600.0f64, 0.0..600.0f64), 1..40),
    ) {
        let t = tf();
        let mut set = triangle();
        let original = set.clone();
        let mut drag = DragController::default();
        prop_assert_eq!(drag.on_pointer_down(t.to_device(set[index]), &t, &set), Some(index));
        for (x, y) in moves {
            set = drag.on_pointer_move(vector![x, y], &t, &set).unwrap();
            for other in (0..3).filter(|&j| j != index) {
                prop_assert_eq!(set[other], original[other]);
            }
            prop_assert_eq!(drag.active_index(), Some(index));
        }
    }
}

// --- debounce ---------------------------------------------------------------

#[test]
fn debounce_fires_once_after_window() {
    let ms = Duration::from_millis;
    let mut d = Debounce::new(ms(300));
    assert!(!d.fire(ms(1_000)));
    d.schedule(ms(100));
    assert!(!d.fire(ms(399)));
    assert!(d.fire(ms(400)));
    assert!(!d.fire(ms(500)));
    assert!(!d.is_pending());
}

#[test]
fn debounce_reschedule_replaces_deadline() {
    let ms = Duration::from_millis;
    let mut d = Debounce::new(ms(250));
    d.schedule(ms(0));
    d.schedule(ms(200));
    assert_eq!(d.deadline(), Some(ms(450)));
    assert!(!d.fire(ms(300)));
    assert!(d.fire(ms(450)));
    d.schedule(ms(500));
    d.cancel();
    assert!(!d.fire(ms(10_000)));
}
