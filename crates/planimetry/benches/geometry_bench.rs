//! Criterion benchmarks for the per-frame geometry.
//! A drag redraws on every pointer move, so intersect/derive/scene must stay
//! well under a frame budget.
//! Results: by default under target/criterion; to store under data/bench, run:
//!   CARGO_TARGET_DIR=data/bench cargo bench -p planimetry

use std::time::Duration;

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use nalgebra::Vector2;
use planimetry::diagram::{Diagram, DiagramKind, InputEvent, Session, TimedEvent};
use planimetry::geom2::{derive_triangle, intersect, Line, Point};
use planimetry::interact::{PointerEvent, PointerPhase};
use planimetry::points::ControlPointSet;
use planimetry::scene;
use planimetry::view::{Transform, Viewport};
use planimetry::DiagramCfg;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_points<const N: usize>(rng: &mut StdRng) -> [Point; N] {
    std::array::from_fn(|_| Vector2::new(rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0)))
}

/// Down on vertex 2 of the default triangle, `moves` moves, up, then a late tick.
fn drag_script(moves: usize, seed: u64) -> Vec<TimedEvent> {
    let mut rng = StdRng::seed_from_u64(seed);
    let ev = |at_ms, phase, x, y| TimedEvent {
        at_ms,
        event: InputEvent::Pointer(PointerEvent { phase, x, y }),
    };
    let mut script = vec![ev(0, PointerPhase::Down, 300.0, 480.0)];
    for i in 0..moves {
        let (x, y) = (rng.gen_range(0.0..600.0), rng.gen_range(0.0..600.0));
        script.push(ev(16 * (i as u64 + 1), PointerPhase::Move, x, y));
    }
    let end = 16 * (moves as u64 + 1);
    script.push(ev(end, PointerPhase::Up, 0.0, 0.0));
    script.push(TimedEvent {
        at_ms: end + 1_000,
        event: InputEvent::Tick,
    });
    script
}

fn bench_geometry(c: &mut Criterion) {
    let mut group = c.benchmark_group("geometry");
    group.bench_function("intersect", |b| {
        b.iter_batched(
            || {
                let mut rng = StdRng::seed_from_u64(41);
                let [a, b, c, d] = random_points::<4>(&mut rng);
                (Line::new(a, b), Line::new(c, d))
            },
            |(l1, l2)| intersect(&l1, &l2),
            BatchSize::SmallInput,
        )
    });
    group.bench_function("derive_triangle", |b| {
        b.iter_batched(
            || random_points::<3>(&mut StdRng::seed_from_u64(42)),
            |v| derive_triangle(&v),
            BatchSize::SmallInput,
        )
    });
    group.bench_function("scene_triangle", |b| {
        let cfg = DiagramCfg::default();
        let tf = Transform::from_raw(1200.0, 800.0, 60.0).unwrap();
        let d = Diagram::new(
            DiagramKind::Triangle,
            ControlPointSet::from(random_points::<3>(&mut StdRng::seed_from_u64(43))),
        )
        .unwrap();
        let derived = d.derive(&cfg.triangle_cfg(tf.scale));
        b.iter(|| scene::build(&d, &derived, &tf, &cfg))
    });
    group.finish();
}

fn bench_replay(c: &mut Criterion) {
    let mut group = c.benchmark_group("session");
    for &moves in &[10usize, 100, 1_000] {
        group.bench_with_input(BenchmarkId::new("replay", moves), &moves, |b, &moves| {
            let script = drag_script(moves, 44);
            let vp = Viewport::new(600.0, 600.0).unwrap();
            b.iter_batched(
                || Session::new(DiagramKind::Triangle, vp, DiagramCfg::default()).unwrap(),
                |mut s| {
                    let _ = s.replay(&script);
                    s.tick(Duration::from_secs(3_600))
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_geometry, bench_replay);
criterion_main!(benches);
