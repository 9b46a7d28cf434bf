//! Per-frame step cost on a saturated pool.
//!
//! Run with: `cargo bench --bench step`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fireflies::prelude::*;

const WARM_UP_FRAMES: usize = 600;

fn saturated(capacity: usize) -> Simulator<Silent> {
    let config = GlowConfig::default()
        .with_capacity(capacity)
        .with_ambient_spawn_chance(1.0);
    let mut sim = Simulator::seeded(config, 7, Silent).expect("valid config");

    // Ten seconds of ambient wanderers, then bursts fill the rest.
    let mut clock = FrameClock::fixed(1.0 / 60.0);
    for _ in 0..WARM_UP_FRAMES {
        let t = clock.tick();
        sim.step(t.delta, t.elapsed);
    }
    sim.spawn_burst(Vec3::new(0.0, 0.5, 0.0), capacity);
    sim
}

fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("step");
    for capacity in [200usize, 2000] {
        group.bench_with_input(BenchmarkId::from_parameter(capacity), &capacity, |b, &capacity| {
            let mut sim = saturated(capacity);
            let mut elapsed = 1.0;
            b.iter(|| {
                elapsed += 1.0 / 60.0;
                black_box(sim.step(1.0 / 60.0, elapsed));
            });
        });
    }
    group.finish();
}

fn bench_view(c: &mut Criterion) {
    let sim = saturated(2000);
    let mut view = FrameView::default();
    c.bench_function("write_view_2000", |b| {
        b.iter(|| {
            sim.write_view(&mut view);
            black_box(view.as_bytes().len());
        })
    });
}

criterion_group!(benches, bench_step, bench_view);
criterion_main!(benches);
