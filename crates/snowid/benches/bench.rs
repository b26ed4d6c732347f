use core::hint::black_box;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use snowid::{
    GeneratorConfig, IdGenStatus, MonotonicClock, SnowflakeDatacenterId, SnowflakeGenerator,
    SnowflakeId, SnowflakeWorkerId, TimeSource,
};
use std::{
    sync::{Arc, Barrier},
    thread::scope,
    time::{Duration, Instant},
};

struct FixedMockTime {
    millis: u64,
}

impl TimeSource for FixedMockTime {
    fn current_millis(&self) -> u64 {
        self.millis
    }
}

// Number of IDs generated per benchmark iteration (per-thread for
// multi-threaded).
const TOTAL_IDS: usize = 4096;

/// Benchmarks the hot path where IDs are always `Ready`.
fn bench_poll<ID: SnowflakeId>(c: &mut Criterion, group_name: &str) {
    let mut group = c.benchmark_group(group_name);
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();

            for _ in 0..iters {
                let generator =
                    SnowflakeGenerator::<ID, _>::new(0, FixedMockTime { millis: 1 }).unwrap();
                for _ in 0..TOTAL_IDS {
                    match generator.try_poll_id().unwrap() {
                        IdGenStatus::Ready { id } => {
                            black_box(id);
                        }
                        IdGenStatus::Pending { .. } => unreachable!(),
                    }
                }
            }

            start.elapsed()
        });
    });

    group.finish();
}

/// Benchmarks blocking generation against a real clock, including waits for
/// the next millisecond.
fn bench_next_id<ID: SnowflakeId>(c: &mut Criterion, group_name: &str) {
    let mut group = c.benchmark_group(group_name);
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    let generator = SnowflakeGenerator::<ID, _>::new(0, MonotonicClock::default())
        .unwrap()
        .with_config(
            GeneratorConfig::default()
                .poll_interval(Duration::ZERO)
                .exhaustion_retries(u32::MAX),
        );

    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter(|| {
            for _ in 0..TOTAL_IDS {
                black_box(generator.next_id().unwrap());
            }
        });
    });

    group.finish();
}

/// Benchmarks lock contention with every thread sharing one generator.
fn bench_contended(c: &mut Criterion, group_name: &str) {
    let threads = num_cpus::get().max(2);
    let mut group = c.benchmark_group(group_name);
    group.throughput(Throughput::Elements((TOTAL_IDS * threads) as u64));

    group.bench_function(format!("threads/{threads}/elems/{TOTAL_IDS}"), |b| {
        b.iter_custom(|iters| {
            let generator =
                SnowflakeGenerator::<SnowflakeWorkerId, _>::new(0, MonotonicClock::default())
                    .unwrap();
            let barrier = Arc::new(Barrier::new(threads + 1));

            scope(|s| {
                for _ in 0..threads {
                    let barrier = Arc::clone(&barrier);
                    let generator = &generator;
                    s.spawn(move || {
                        barrier.wait();
                        for _ in 0..iters {
                            for _ in 0..TOTAL_IDS {
                                black_box(generator.next_id().unwrap());
                            }
                        }
                    });
                }

                barrier.wait();
                Instant::now()
            })
            .elapsed()
        });
    });

    group.finish();
}

fn benches(c: &mut Criterion) {
    bench_poll::<SnowflakeWorkerId>(c, "poll/worker");
    bench_poll::<SnowflakeDatacenterId>(c, "poll/datacenter");
    bench_next_id::<SnowflakeWorkerId>(c, "next_id/worker");
    bench_contended(c, "next_id/contended");
}

criterion_group!(all, benches);
criterion_main!(all);
