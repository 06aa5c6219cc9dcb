//! Hit-rate benchmarks: every policy under the same synthetic key streams.
//!
//! Run with: `cargo bench --bench hit_rate`
//!
//! Criterion times the full read-through loop; the hit rate for each
//! (workload, policy) pair is printed once before timing starts.

mod common;

use arcache::builder::{CacheBuilder, CachePolicy};
use common::workload::{Workload, WorkloadSpec, run_hit_rate};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

const CAPACITY: usize = 1024;
const UNIVERSE: u64 = 8192;
const OPS: usize = 100_000;
const SEED: u64 = 42;

fn workloads() -> Vec<(&'static str, Workload)> {
    vec![
        ("uniform", Workload::Uniform),
        (
            "hotset_90_10",
            Workload::Hotset {
                hot_fraction: 0.1,
                hot_prob: 0.9,
            },
        ),
        (
            "periodic_over_capacity",
            Workload::Periodic {
                period: CAPACITY as u64 + CAPACITY as u64 / 4,
            },
        ),
        ("zipfian_0.99", Workload::Zipfian { theta: 0.99 }),
    ]
}

fn bench_hit_rate(c: &mut Criterion) {
    let mut group = c.benchmark_group("hit_rate");
    group.throughput(Throughput::Elements(OPS as u64));
    group.sample_size(20);

    for (name, workload) in workloads() {
        let spec = WorkloadSpec {
            universe: UNIVERSE,
            workload,
            seed: SEED,
        };

        for policy in CachePolicy::ALL {
            let mut cache = CacheBuilder::new(CAPACITY).build::<u64, u64>(policy);
            let rate = run_hit_rate(&mut cache, &mut spec.generator(), OPS);
            println!("{name:<24} {policy:<4} hit rate {:.4}", rate.hit_rate());

            group.bench_with_input(BenchmarkId::new(name, policy), &spec, |b, spec| {
                b.iter(|| {
                    let mut cache = CacheBuilder::new(CAPACITY).build::<u64, u64>(policy);
                    run_hit_rate(&mut cache, &mut spec.generator(), OPS)
                })
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_hit_rate);
criterion_main!(benches);
