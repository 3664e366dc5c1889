use criterion::{black_box, criterion_group, criterion_main, Criterion};
use setbench::builder::build_key_set;
use setbench::container::{HashMapKeys, HashSetKeys, SparseObject};
use setbench::similarity::jaccard;
use setbench::workload::similarity_workload;
use setbench::SeededRandom;

const SEED: u32 = 42;
const TRIALS: usize = 10;
const SET_SIZE: usize = 100;
const KEY_LENGTH: usize = 3;

fn bench_top_pair(c: &mut Criterion) {
    let mut group = c.benchmark_group("jaccard_top_pair");

    group.bench_function("set", |b| {
        b.iter(|| similarity_workload::<HashSetKeys<String>>(black_box(SEED), TRIALS, SET_SIZE, KEY_LENGTH))
    });

    group.bench_function("map", |b| {
        b.iter(|| similarity_workload::<HashMapKeys<String>>(black_box(SEED), TRIALS, SET_SIZE, KEY_LENGTH))
    });

    group.bench_function("obj", |b| {
        b.iter(|| similarity_workload::<SparseObject>(black_box(SEED), TRIALS, SET_SIZE, KEY_LENGTH))
    });

    group.finish();
}

/// Jaccard alone, with the sets built outside the timed loop.
fn bench_jaccard_only(c: &mut Criterion) {
    let mut rnd = SeededRandom::new(SEED);
    let set_a: HashSetKeys<String> = build_key_set(SET_SIZE, KEY_LENGTH, &mut rnd);
    let set_b: HashSetKeys<String> = build_key_set(SET_SIZE, KEY_LENGTH, &mut rnd);
    let mut rnd = SeededRandom::new(SEED);
    let obj_a: SparseObject = build_key_set(SET_SIZE, KEY_LENGTH, &mut rnd);
    let obj_b: SparseObject = build_key_set(SET_SIZE, KEY_LENGTH, &mut rnd);

    let mut group = c.benchmark_group("jaccard_only");
    group.bench_function("set", |b| b.iter(|| jaccard(black_box(&set_a), black_box(&set_b))));
    group.bench_function("obj", |b| b.iter(|| jaccard(black_box(&obj_a), black_box(&obj_b))));
    group.finish();
}

criterion_group!(benches, bench_top_pair, bench_jaccard_only);
criterion_main!(benches);
