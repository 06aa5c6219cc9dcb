//! Micro-operation benchmarks for every cache policy.
//!
//! Run with: `cargo bench --bench ops`
//!
//! Measures per-operation latency for get and insert under identical
//! conditions. Policies are built through `CacheBuilder` so each group runs
//! the same loop for LRU, LFU and ARC.

use std::hint::black_box;
use std::time::{Duration, Instant};

use arcache::builder::{Cache, CacheBuilder, CachePolicy};
use arcache::traits::CoreCache;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};

const CAPACITY: usize = 16_384;
const OPS: u64 = 100_000;

fn filled(policy: CachePolicy) -> Cache<u64, u64> {
    let mut cache = CacheBuilder::new(CAPACITY).build(policy);
    for i in 0..CAPACITY as u64 {
        cache.insert(i, i);
    }
    cache
}

// ============================================================================
// Get Hit Latency (ns/op)
// ============================================================================

fn bench_get_hit(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_hit_ns");
    group.throughput(Throughput::Elements(OPS));

    for policy in CachePolicy::ALL {
        group.bench_function(policy.as_str(), |b| {
            b.iter_custom(|iters| {
                let mut cache = filled(policy);
                let start = Instant::now();
                for _ in 0..iters {
                    for i in 0..OPS {
                        let key = i % (CAPACITY as u64);
                        black_box(cache.get(&key));
                    }
                }
                start.elapsed()
            })
        });
    }

    group.finish();
}

// ============================================================================
// Insert with Eviction (ns/op)
// ============================================================================

fn bench_insert_evict(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_evict_ns");
    group.throughput(Throughput::Elements(OPS));

    for policy in CachePolicy::ALL {
        group.bench_function(policy.as_str(), |b| {
            b.iter_custom(|iters| {
                let mut total = Duration::ZERO;
                for _ in 0..iters {
                    let mut cache = filled(policy);
                    let start = Instant::now();
                    for i in 0..OPS {
                        let key = CAPACITY as u64 + i;
                        black_box(cache.insert(key, key));
                    }
                    total += start.elapsed();
                }
                total
            })
        });
    }

    group.finish();
}

// ============================================================================
// Mixed: 80% hits, 20% misses followed by insert (ns/op)
// ============================================================================

fn bench_mixed(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed_ops_ns");
    group.throughput(Throughput::Elements(OPS));

    for policy in CachePolicy::ALL {
        group.bench_function(policy.as_str(), |b| {
            b.iter_custom(|iters| {
                let mut total = Duration::ZERO;
                for _ in 0..iters {
                    let mut cache = filled(policy);
                    let start = Instant::now();
                    for i in 0..OPS {
                        let key = if i % 5 == 0 {
                            CAPACITY as u64 + i
                        } else {
                            i % (CAPACITY as u64)
                        };
                        if cache.get(&key).is_none() {
                            cache.insert(key, key);
                        }
                    }
                    total += start.elapsed();
                }
                total
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_get_hit, bench_insert_evict, bench_mixed);
criterion_main!(benches);
