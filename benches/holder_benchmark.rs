use criterion::{black_box, criterion_group, criterion_main, Criterion};
use holdfast::{DoubleCheckedHolder, EagerHolder, MutexHolder, RacyHolder};
use std::thread;

fn bench_steady_state(c: &mut Criterion) {
    let mut group = c.benchmark_group("steady_state_get");

    let eager = EagerHolder::new(42_u64);
    group.bench_function("eager", |b| b.iter(|| *black_box(&eager).get()));

    let racy = RacyHolder::new(|| 42_u64);
    racy.get();
    group.bench_function("racy", |b| b.iter(|| *black_box(&racy).get()));

    let double_checked = DoubleCheckedHolder::new(|| 42_u64);
    double_checked.get();
    group.bench_function("double_checked", |b| {
        b.iter(|| *black_box(&double_checked).get());
    });

    // The comparison the catalogue exists for: the fully synchronized holder
    // pays its lock on every one of these iterations.
    let mutex = MutexHolder::new(|| 42_u64);
    mutex.get();
    group.bench_function("mutex", |b| b.iter(|| *black_box(&mutex).get()));

    group.finish();
}

fn bench_contended(c: &mut Criterion) {
    let mut group = c.benchmark_group("contended_get");
    group.sample_size(10);

    const THREADS: usize = 4;
    const CALLS: usize = 10_000;

    group.bench_function("mutex", |b| {
        let holder = MutexHolder::new(|| 42_u64);
        holder.get();
        b.iter(|| {
            thread::scope(|s| {
                for _ in 0..THREADS {
                    s.spawn(|| {
                        for _ in 0..CALLS {
                            black_box(*holder.get());
                        }
                    });
                }
            });
        });
    });

    group.bench_function("double_checked", |b| {
        let holder = DoubleCheckedHolder::new(|| 42_u64);
        holder.get();
        b.iter(|| {
            thread::scope(|s| {
                for _ in 0..THREADS {
                    s.spawn(|| {
                        for _ in 0..CALLS {
                            black_box(*holder.get());
                        }
                    });
                }
            });
        });
    });

    group.finish();
}

criterion_group!(benches, bench_steady_state, bench_contended);
criterion_main!(benches);
