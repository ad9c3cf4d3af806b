//! Scripted drag on the triangle diagram.
//!
//! Purpose
//! - Show the host loop end to end: open a session, feed timestamped pointer
//!   events, let the snap window pass, then read back the derived geometry and
//!   the display list a renderer would draw.
//!
//! Run: `cargo run -p planimetry --example drag_session`

use std::time::Duration;

use planimetry::diagram::{fixed_value, point_label, Derived, DiagramKind, InputEvent, Session};
use planimetry::interact::{PointerEvent, PointerPhase};
use planimetry::scene::{self, Ink};
use planimetry::view::Viewport;
use planimetry::DiagramCfg;

fn main() -> Result<(), planimetry::DomainError> {
    let cfg = DiagramCfg::default();
    let mut session = Session::new(DiagramKind::Triangle, Viewport::new(600.0, 600.0)?, cfg)?;

    // Grab C at (0, -3) and pull it towards (1, -1), overshooting slightly.
    let path = [(300.0, 480.0), (320.0, 440.0), (345.0, 400.0), (362.0, 358.0)];
    for (i, &(x, y)) in path.iter().enumerate() {
        let phase = if i == 0 {
            PointerPhase::Down
        } else {
            PointerPhase::Move
        };
        let at = Duration::from_millis(16 * i as u64);
        session.handle(InputEvent::Pointer(PointerEvent { phase, x, y }), at);
    }
    let held = session.diagram().points()[2];
    println!("released at {}", point_label(held));
    session.handle(
        InputEvent::Pointer(PointerEvent {
            phase: PointerPhase::Up,
            x: 362.0,
            y: 358.0,
        }),
        Duration::from_millis(64),
    );

    let quiet = Duration::from_millis(64) + cfg.snap_quiescence();
    let update = session.tick(quiet);
    println!(
        "snapped={} now at {}",
        update.points,
        point_label(session.diagram().points()[2])
    );

    if let Derived::Triangle(t) = session.derived() {
        let fmt = |v: Option<f64>| v.map_or_else(|| "-".to_string(), fixed_value);
        println!(
            "sides a={} b={} c={}",
            fixed_value(t.sides[0]),
            fixed_value(t.sides[1]),
            fixed_value(t.sides[2])
        );
        println!("inradius={} circumradius={}", fmt(t.inradius), fmt(t.circumradius));
    }

    let derived = session.derived();
    let scene = scene::build(session.diagram(), &derived, &session.transform(), &cfg);
    println!(
        "scene: {} primitives ({} grid), messages: {:?}",
        scene.primitives.len(),
        scene.with_ink(Ink::Grid).count(),
        scene.messages
    );
    Ok(())
}
