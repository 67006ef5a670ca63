//! Benchmarks for drainage network analysis

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use streamnet_algorithms::geometry::{SlopeParams, SnapTarget};
use streamnet_algorithms::network::{DrainageNetwork, NetworkParams};
use streamnet_algorithms::topology::{OrderKind, PoiKind};
use streamnet_core::{FlowGraph, GeoTransform, GridLayout};

/// Comb-shaped network: every column drains south into the last row, which
/// drains east to the outlet in the bottom-right corner.
fn create_comb_flow(size: usize) -> FlowGraph {
    let layout = GridLayout::new(size, size, GeoTransform::new(0.0, size as f64, 1.0, -1.0));
    let idx = |row: usize, col: usize| row * size + col;
    let last = size - 1;

    let mut givers = Vec::with_capacity(size * size);
    let mut receivers = Vec::with_capacity(size * size);
    let mut accumulation = vec![0.0; size * size];
    let mut elevation = vec![0.0; size * size];

    for col in 0..size {
        for row in 0..last {
            givers.push(idx(row, col));
            receivers.push(idx(row + 1, col));
        }
    }
    for col in 0..last {
        givers.push(idx(last, col));
        receivers.push(idx(last, col + 1));
    }

    for row in 0..size {
        for col in 0..size {
            accumulation[idx(row, col)] = if row < last {
                (row + 1) as f64
            } else {
                ((col + 1) * size) as f64
            };
            elevation[idx(row, col)] = (last - row) as f64 + (last - col) as f64 * 0.01;
        }
    }

    FlowGraph::new(layout, givers, receivers, accumulation, elevation).unwrap()
}

fn create_network(size: usize) -> DrainageNetwork {
    DrainageNetwork::new(&create_comb_flow(size), NetworkParams { threshold: 2.0, ..Default::default() })
        .unwrap()
}

fn bench_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("network/extract");
    for size in [128, 256, 512] {
        let flow = create_comb_flow(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                DrainageNetwork::new(
                    black_box(&flow),
                    NetworkParams { threshold: 2.0, ..Default::default() },
                )
                .unwrap()
            })
        });
    }
    group.finish();
}

fn bench_topology(c: &mut Criterion) {
    let mut group = c.benchmark_group("network/topology");
    for size in [128, 256, 512] {
        let network = create_network(size);
        group.bench_with_input(BenchmarkId::new("heads", size), &size, |b, _| {
            b.iter(|| black_box(&network).stream_poi(PoiKind::Heads))
        });
        group.bench_with_input(BenchmarkId::new("segments", size), &size, |b, _| {
            b.iter(|| black_box(&network).segment_ids())
        });
        group.bench_with_input(BenchmarkId::new("strahler", size), &size, |b, _| {
            b.iter(|| black_box(&network).order_values(OrderKind::Strahler))
        });
    }
    group.finish();
}

fn bench_slope(c: &mut Criterion) {
    let mut group = c.benchmark_group("network/slope");
    for size in [128, 256, 512] {
        let network = create_network(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                black_box(&network)
                    .channel_slope(SlopeParams::default())
                    .unwrap()
            })
        });
    }
    group.finish();
}

fn bench_snap(c: &mut Criterion) {
    let mut group = c.benchmark_group("network/snap");
    let network = create_network(256);
    for npoints in [10, 100, 1000] {
        let points: Vec<(f64, f64)> = (0..npoints)
            .map(|i| (((i * 37) % 256) as f64 + 0.3, ((i * 91) % 256) as f64 + 0.7))
            .collect();
        group.bench_with_input(BenchmarkId::from_parameter(npoints), &npoints, |b, _| {
            b.iter(|| {
                network
                    .snap_points(black_box(&points), SnapTarget::Channel)
                    .unwrap()
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_extraction, bench_topology, bench_slope, bench_snap);
criterion_main!(benches);
