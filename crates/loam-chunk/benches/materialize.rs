use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use loam_chunk::materialize;
use loam_edit::EditStore;
use loam_world::{ChunkCoord, World, WorldGenConfig};
use std::hint::black_box;

fn bench_materialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("materialize");
    for &size in &[16i32, 32] {
        let world = World::new(&WorldGenConfig {
            chunk_size: size,
            ..WorldGenConfig::default()
        });
        let store = EditStore::new(world.chunk_size);
        let coord = ChunkCoord::new(3, -2);
        let edits = store.snapshot_for_chunk(coord);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                let buf = materialize(black_box(&world), black_box(coord), black_box(&edits));
                black_box(buf.len())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_materialize);
criterion_main!(benches);
