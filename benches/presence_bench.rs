use criterion::{black_box, criterion_group, criterion_main, Criterion};
use setbench::container::{BitTable, DenseArray, HashSetKeys, SparseObject};
use setbench::presence::populate;
use setbench::workload::presence_workload;

const POPULATION: usize = 10_000;
const QUERIES: usize = 1000;
const SEED: u32 = 42;

fn bench_presence(c: &mut Criterion) {
    let set: HashSetKeys<usize> = populate(POPULATION);
    let object: SparseObject = populate(POPULATION);
    let array = DenseArray::filled(POPULATION);
    let bits = BitTable::filled(POPULATION);

    let mut group = c.benchmark_group("presence_check");

    group.bench_function("set", |b| {
        b.iter(|| presence_workload(black_box(&set), SEED, QUERIES, POPULATION))
    });

    group.bench_function("object", |b| {
        b.iter(|| presence_workload(black_box(&object), SEED, QUERIES, POPULATION))
    });

    group.bench_function("array", |b| {
        b.iter(|| presence_workload(black_box(&array), SEED, QUERIES, POPULATION))
    });

    group.bench_function("bit_table", |b| {
        b.iter(|| presence_workload(black_box(&bits), SEED, QUERIES, POPULATION))
    });

    group.finish();
}

criterion_group!(benches, bench_presence);
criterion_main!(benches);
