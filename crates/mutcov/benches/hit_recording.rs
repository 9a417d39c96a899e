//! Hit Recording Benchmarks
//!
//! Benchmarks for the probe firing hot path and hit snapshots.
//!
//! Run with: `cargo bench --bench hit_recording`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mutcov::{encode, CoverageStore, NullReceiver, StoreConfig};
use std::sync::Arc;
use std::thread;

fn store_with_unit(probes: i32) -> (CoverageStore, i32) {
    let store = CoverageStore::with_config(Arc::new(NullReceiver), StoreConfig::default());
    let id = store.register_class("bench.Unit").unwrap();
    let lines: Vec<i32> = (0..probes).collect();
    store.register_class_probes(id, &lines).unwrap();
    (store, id.as_i32())
}

fn bench_visit_line(c: &mut Criterion) {
    let mut group = c.benchmark_group("visit_line");

    for probes in [16, 1024] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_probes", probes)),
            &probes,
            |bench, &n| {
                let (store, id) = store_with_unit(n);
                let mut probe = 0;
                bench.iter(|| {
                    store.visit_line(black_box(encode(id, probe)));
                    probe = (probe + 1) % n;
                });
            },
        );
    }

    group.finish();
}

fn bench_contended_visits(c: &mut Criterion) {
    let mut group = c.benchmark_group("contended_visits");

    for threads in [2, 8] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}_threads", threads)),
            &threads,
            |bench, &t| {
                let (store, id) = store_with_unit(1000);
                bench.iter(|| {
                    thread::scope(|s| {
                        for _ in 0..t {
                            let store = &store;
                            s.spawn(move || {
                                for probe in 0..1000 {
                                    store.visit_line(encode(id, probe));
                                }
                            });
                        }
                    });
                });
            },
        );
    }

    group.finish();
}

fn bench_snapshot(c: &mut Criterion) {
    let (store, id) = store_with_unit(10_000);
    for probe in 0..10_000 {
        store.visit_line(encode(id, probe));
    }

    c.bench_function("get_hits_10k", |bench| {
        bench.iter(|| black_box(store.get_hits()));
    });
}

criterion_group!(benches, bench_visit_line, bench_contended_visits, bench_snapshot);
criterion_main!(benches);
