//! Benchmarks for event network walks.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use drone_chance::chance::prebuilt::events_network_by_name;
use rand::{rngs::StdRng, SeedableRng};

pub fn bench_network(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/network");
    let mut rng = StdRng::seed_from_u64(3);

    for name in ["piano", "viola_1", "speaker_1"] {
        let mut network = events_network_by_name(name).unwrap().unwrap();
        group.bench_with_input(BenchmarkId::new("walk_1000", name), &name, |b, _| {
            b.iter(|| black_box(network.walk(&mut rng, 1_000).unwrap()))
        });
    }

    group.finish();
}
