//! Benchmarks for the enumerator engine.
//!
//! Measures the cost of the operations an observer tool performs most:
//! - Snapshot construction from a slice
//! - Draining with single-element and chunked fetches
//! - Skip, reset and count
//! - Cloning and reference counting

extern crate profenum;

use criterion::{criterion_group, criterion_main, Criterion};
use profenum::{ObjectEnum, ObjectId};
use std::hint::black_box;

fn objects(count: usize) -> Vec<ObjectId> {
    (0..count).map(|i| ObjectId(0x1000 + i * 8)).collect()
}

/// Benchmark building a snapshot of 10k object identifiers.
fn bench_construct_10k(c: &mut Criterion) {
    let elements = objects(10_000);

    c.bench_function("enum_construct_10k", |b| {
        b.iter(|| {
            let e = ObjectEnum::new(black_box(&elements)).unwrap();
            black_box(e)
        });
    });
}

/// Benchmark draining 10k elements one at a time.
fn bench_next_single(c: &mut Criterion) {
    let e = ObjectEnum::new(&objects(10_000)).unwrap();
    let mut one = [ObjectId::default(); 1];

    c.bench_function("enum_next_single_10k", |b| {
        b.iter(|| {
            e.reset();
            while e.next_into(1, Some(&mut one[..]), None).unwrap().is_complete() {
                black_box(one[0]);
            }
        });
    });
}

/// Benchmark draining 10k elements in chunks of 256.
fn bench_next_chunked(c: &mut Criterion) {
    let e = ObjectEnum::new(&objects(10_000)).unwrap();
    let mut buffer = [ObjectId::default(); 256];
    let mut fetched = 0;

    c.bench_function("enum_next_chunked_10k", |b| {
        b.iter(|| {
            e.reset();
            while e
                .next_into(256, Some(&mut buffer[..]), Some(&mut fetched))
                .unwrap()
                .is_complete()
            {
                black_box(&buffer);
            }
            black_box(fetched)
        });
    });
}

/// Benchmark the cursor-only operations.
fn bench_skip_reset_count(c: &mut Criterion) {
    let e = ObjectEnum::new(&objects(1_000)).unwrap();
    let mut count = 0;

    c.bench_function("enum_skip_reset_count", |b| {
        b.iter(|| {
            e.skip(black_box(500));
            e.get_count(Some(&mut count)).unwrap();
            e.reset();
            black_box(count)
        });
    });
}

/// Benchmark cloning a 10k snapshot.
fn bench_clone_10k(c: &mut Criterion) {
    let e = ObjectEnum::new(&objects(10_000)).unwrap();

    c.bench_function("enum_clone_10k", |b| {
        b.iter(|| {
            let clone = e.try_clone().unwrap();
            black_box(clone)
        });
    });
}

/// Benchmark taking and releasing a reference.
fn bench_add_ref_release(c: &mut Criterion) {
    let e = ObjectEnum::new(&objects(16)).unwrap();

    c.bench_function("enum_add_ref_release", |b| {
        b.iter(|| {
            let extra = e.add_ref();
            black_box(extra.release())
        });
    });
}

criterion_group!(
    benches,
    bench_construct_10k,
    bench_next_single,
    bench_next_chunked,
    bench_skip_reset_count,
    bench_clone_10k,
    bench_add_ref_release,
);
criterion_main!(benches);
