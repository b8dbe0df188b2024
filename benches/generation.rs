//! Criterion benchmarks for full-level generation.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use quizcrawl::world::generation::InMemoryBossSource;
use quizcrawl::DungeonGenerator;

fn bench_levels(c: &mut Criterion) {
    let generator = DungeonGenerator::default().with_boss_source(InMemoryBossSource::new());
    let mut group = c.benchmark_group("generate");

    for level in [1u32, 25, 60, 99] {
        group.bench_with_input(BenchmarkId::new("80x40", level), &level, |b, &level| {
            let mut seed = 0u64;
            b.iter(|| {
                seed += 1;
                black_box(generator.generate(level, 80, 40, Some(seed)))
            });
        });
    }

    group.bench_function("200x100", |b| {
        b.iter(|| black_box(generator.generate(10, 200, 100, Some(7))));
    });

    group.finish();
}

criterion_group!(benches, bench_levels);
criterion_main!(benches);
