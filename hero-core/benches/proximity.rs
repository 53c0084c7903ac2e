//! Cost of the quadratic edge builder at growing particle counts.
//!
//! Run with: `cargo bench -p hero-core`

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::{SeedableRng, rngs::SmallRng};

use hero_core::{
    config::Config,
    edge_buffer::EdgeBuffer,
    particle::ParticleStore,
    phases::{link_phase, step_phase},
    types::Bounds,
};

fn seeded_store(count: usize, bounds: Bounds) -> ParticleStore {
    let mut rng = SmallRng::seed_from_u64(0x5EED);
    let mut store = ParticleStore::new();
    store.seed(count, bounds, &Config::default(), &mut rng);
    store
}

fn bench_link_phase(c: &mut Criterion) {
    let mut group = c.benchmark_group("link_phase");
    let bounds = Bounds::new(1280.0, 720.0);

    for count in [30usize, 80, 320, 1280] {
        let store = seeded_store(count, bounds);
        let mut edges = EdgeBuffer::with_capacity(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &store, |b, store| {
            b.iter(|| {
                link_phase(black_box(store), 110.0, &mut edges);
                black_box(edges.len())
            })
        });
    }

    group.finish();
}

fn bench_frame(c: &mut Criterion) {
    let bounds = Bounds::new(1280.0, 720.0);
    let mut store = seeded_store(80, bounds);
    let mut edges = EdgeBuffer::default();

    c.bench_function("frame_80", |b| {
        b.iter(|| {
            step_phase(&mut store, bounds, 10.0);
            link_phase(&store, 110.0, &mut edges);
            black_box(edges.len())
        })
    });
}

criterion_group!(benches, bench_link_phase, bench_frame);
criterion_main!(benches);
