//! Benchmarks for the event loop.
//!
//! Measures full runs at a few particle counts and the pair prediction kernel.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use edmd::config::{ScenarioConfig, SimulationConfig};
use edmd::core::{Body, NullSink, Vector2D};
use edmd::placement::build_simulation;

fn bench_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulation_run");
    group.sample_size(10);

    for &n in &[50usize, 100, 210] {
        let cfg = ScenarioConfig::new()
            .with_simulation(SimulationConfig::new().with_time_limit(0.02))
            .with_particles(n, 0.0005, 1.0)
            .with_seed(1);

        group.bench_with_input(BenchmarkId::new("particles", n), &cfg, |b, cfg| {
            b.iter(|| {
                let mut sim = match build_simulation(black_box(cfg)) {
                    Ok(sim) => sim,
                    Err(e) => panic!("placement failed: {e}"),
                };
                let reason = sim.run(&mut NullSink);
                black_box(reason)
            })
        });
    }
    group.finish();
}

fn bench_time_to_hit(c: &mut Criterion) {
    let pair = Body::particle(1, Vector2D::new(-0.01, 0.0), Vector2D::new(1.0, 0.2), 0.001, 1.0)
        .and_then(|a| {
            Body::particle(2, Vector2D::new(0.01, 0.001), Vector2D::new(-1.0, 0.0), 0.001, 1.0)
                .map(|b| (a, b))
        });
    let Ok((a, b)) = pair else {
        return;
    };
    c.bench_function("body_time_to_hit", |bench| {
        bench.iter(|| black_box(&a).time_to_hit(black_box(&b)))
    });
}

criterion_group!(benches, bench_run, bench_time_to_hit);
criterion_main!(benches);
