//! Result store benchmark: insert scored results and read counts back.

use behaviord::scoring::{ScoredResult, Verdict};
use behaviord::storage::ResultStore;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tempfile::tempdir;

fn bench_save_result(c: &mut Criterion) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("store.db");
    let store = ResultStore::open(&path).unwrap();
    let result = ScoredResult {
        prediction: Verdict::Suspicious,
        confidence: 0.913,
    };

    c.bench_function("storage_save_result", |b| {
        b.iter(|| black_box(store.save_result(black_box(&result))).unwrap())
    });
}

fn bench_count_where(c: &mut Criterion) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("store.db");
    let store = ResultStore::open(&path).unwrap();
    for i in 0..500 {
        let result = ScoredResult {
            prediction: if i % 4 == 0 {
                Verdict::Suspicious
            } else {
                Verdict::Normal
            },
            confidence: 0.75,
        };
        store.save_result(&result).unwrap();
    }

    c.bench_function("storage_count_where", |b| {
        b.iter(|| black_box(store.count_where(Verdict::Suspicious)).unwrap())
    });
}

criterion_group!(benches, bench_save_result, bench_count_where);
criterion_main!(benches);
