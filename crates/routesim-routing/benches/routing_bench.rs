//! Benchmarks for route computation
//!
//! Measures performance of:
//! - Single shortest-path queries
//! - Full forwarding tables
//! - All-router CSV export

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use routesim_routing::{export_csv, forwarding_table, shortest_path, Algorithm};
use routesim_topology::Topology;

/// A `side` x `side` grid with bidirectional links of varying weight.
fn grid(side: usize) -> Topology {
    let mut t = Topology::new();
    let name = |x: usize, y: usize| format!("R{x}_{y}");
    for y in 0..side {
        for x in 0..side {
            t.add_router(&name(x, y)).expect("fresh router");
        }
    }
    for y in 0..side {
        for x in 0..side {
            let w = ((x * 7 + y * 3) % 9 + 1) as i64;
            if x + 1 < side {
                t.add_link_pair(&name(x, y), &name(x + 1, y), w, true).expect("fresh link");
            }
            if y + 1 < side {
                t.add_link_pair(&name(x, y), &name(x, y + 1), w, true).expect("fresh link");
            }
        }
    }
    t
}

fn bench_shortest_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("shortest_path");

    for &side in &[4usize, 8, 16] {
        let t = grid(side);
        let dest = format!("R{}_{}", side - 1, side - 1);
        for algorithm in Algorithm::ALL {
            group.throughput(Throughput::Elements(1));
            group.bench_with_input(
                BenchmarkId::new(algorithm.name(), side * side),
                &t,
                |b, t| b.iter(|| shortest_path(black_box(t), "R0_0", &dest, algorithm)),
            );
        }
    }
    group.finish();
}

fn bench_forwarding_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("forwarding_table");

    for &side in &[4usize, 8, 16] {
        let t = grid(side);
        for algorithm in Algorithm::ALL {
            group.throughput(Throughput::Elements((side * side - 1) as u64));
            group.bench_with_input(
                BenchmarkId::new(algorithm.name(), side * side),
                &t,
                |b, t| b.iter(|| forwarding_table(black_box(t), "R0_0", algorithm)),
            );
        }
    }
    group.finish();
}

fn bench_export(c: &mut Criterion) {
    let mut group = c.benchmark_group("export_csv");

    for &side in &[4usize, 8] {
        let t = grid(side);
        group.bench_with_input(BenchmarkId::from_parameter(side * side), &t, |b, t| {
            b.iter(|| export_csv(black_box(t), Algorithm::NegativeTolerant))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_shortest_path, bench_forwarding_table, bench_export);
criterion_main!(benches);
