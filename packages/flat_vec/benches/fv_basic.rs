//! Basic benchmarks for the `flat_vec` crate.
#![allow(
    missing_docs,
    reason = "No need for API documentation in benchmark code"
)]

use std::hint::black_box;
use std::iter;
use std::time::Instant;

use criterion::{Criterion, criterion_group, criterion_main};
use flat_vec::FlatVec;

criterion_group!(benches, entrypoint);
criterion_main!(benches);

type TestItem = usize;
const TEST_VALUE: TestItem = 1024;
const FILL_COUNT: usize = 1024;

fn entrypoint(c: &mut Criterion) {
    let mut group = c.benchmark_group("fv_basic");

    group.bench_function("build_empty", |b| {
        b.iter(|| drop(black_box(FlatVec::<TestItem>::new())));
    });

    group.bench_function("push_first", |b| {
        b.iter_custom(|iters| {
            let mut vecs = iter::repeat_with(FlatVec::<TestItem>::new)
                .take(usize::try_from(iters).unwrap())
                .collect::<Vec<_>>();

            let start = Instant::now();

            for vec in &mut vecs {
                vec.push(black_box(TEST_VALUE));
            }

            start.elapsed()
        });
    });

    group.bench_function("push_preallocated", |b| {
        b.iter_custom(|iters| {
            let mut vecs = iter::repeat_with(|| FlatVec::<TestItem>::with_capacity(FILL_COUNT))
                .take(usize::try_from(iters).unwrap())
                .collect::<Vec<_>>();

            let start = Instant::now();

            for vec in &mut vecs {
                for _ in 0..FILL_COUNT {
                    vec.push(black_box(TEST_VALUE));
                }
            }

            start.elapsed()
        });
    });

    group.bench_function("push_with_growth", |b| {
        b.iter(|| {
            let mut vec = FlatVec::new();

            for _ in 0..FILL_COUNT {
                vec.push(black_box(TEST_VALUE));
            }

            black_box(&vec);
        });
    });

    group.bench_function("insert_front", |b| {
        b.iter(|| {
            let mut vec = FlatVec::with_capacity(FILL_COUNT);

            for _ in 0..FILL_COUNT {
                _ = vec.insert(0, black_box(TEST_VALUE));
            }

            black_box(&vec);
        });
    });

    group.bench_function("clone_filled", |b| {
        let mut vec = FlatVec::with_capacity(FILL_COUNT);

        for _ in 0..FILL_COUNT {
            vec.push(TEST_VALUE);
        }

        b.iter(|| black_box(vec.clone()));
    });

    group.finish();
}
