use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use graphkit_algorithms::{
    bfs, connected_components, dfs, dijkstra, edmonds_karp, kosaraju_scc, kruskal_mst, prim_mst,
    topological_sort,
};
use graphkit_core::Graph;

const SIZES: [u32; 3] = [100, 1_000, 10_000];

/// Deterministic sparse graph: a ring plus two pseudo-random chords per vertex.
fn create_graph(size: u32, directed: bool) -> Graph<u32> {
    let mut g = Graph::new(directed, true);
    for i in 0..size {
        g.add_edge(i, (i + 1) % size, f64::from(i % 7 + 1));
        g.add_edge(i, (i * 31 + 7) % size, f64::from(i % 13 + 1));
        g.add_edge(i, (i * 17 + 3) % size, f64::from(i % 5 + 1));
    }
    g
}

/// Layered DAG: every vertex points to the next few vertices.
fn create_dag(size: u32) -> Graph<u32> {
    let mut g = Graph::new(true, true);
    for i in 0..size {
        g.add_vertex(i);
        for step in 1..=3 {
            if i + step < size {
                g.add_edge(i, i + step, f64::from(step));
            }
        }
    }
    g
}

fn bench_traversal(c: &mut Criterion) {
    let mut group = c.benchmark_group("traversal");
    for size in SIZES {
        let g = create_graph(size, false);
        group.bench_with_input(BenchmarkId::new("dfs", size), &g, |b, g| {
            b.iter(|| dfs(black_box(g), &0));
        });
        group.bench_with_input(BenchmarkId::new("bfs", size), &g, |b, g| {
            b.iter(|| bfs(black_box(g), &0));
        });
    }
    group.finish();
}

fn bench_shortest_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("shortest_path");
    for size in SIZES {
        let g = create_graph(size, true);
        group.bench_with_input(BenchmarkId::new("dijkstra", size), &g, |b, g| {
            b.iter(|| dijkstra(black_box(g), &0));
        });
    }
    group.finish();
}

fn bench_components(c: &mut Criterion) {
    let mut group = c.benchmark_group("components");
    for size in SIZES {
        let directed = create_graph(size, true);
        let dag = create_dag(size);
        group.bench_with_input(BenchmarkId::new("connected", size), &directed, |b, g| {
            b.iter(|| connected_components(black_box(g)));
        });
        group.bench_with_input(BenchmarkId::new("kosaraju", size), &directed, |b, g| {
            b.iter(|| kosaraju_scc(black_box(g)));
        });
        group.bench_with_input(BenchmarkId::new("topological_sort", size), &dag, |b, g| {
            b.iter(|| topological_sort(black_box(g)));
        });
    }
    group.finish();
}

fn bench_mst(c: &mut Criterion) {
    let mut group = c.benchmark_group("mst");
    for size in SIZES {
        let g = create_graph(size, false);
        group.bench_with_input(BenchmarkId::new("prim", size), &g, |b, g| {
            b.iter(|| prim_mst(black_box(g)));
        });
        group.bench_with_input(BenchmarkId::new("kruskal", size), &g, |b, g| {
            b.iter(|| kruskal_mst(black_box(g)));
        });
    }
    group.finish();
}

fn bench_flow(c: &mut Criterion) {
    let mut group = c.benchmark_group("flow");
    for size in [100, 1_000] {
        let g = create_dag(size);
        group.bench_with_input(BenchmarkId::new("edmonds_karp", size), &g, |b, g| {
            b.iter(|| edmonds_karp(black_box(g), &0, &(size - 1)));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_traversal,
    bench_shortest_path,
    bench_components,
    bench_mst,
    bench_flow
);
criterion_main!(benches);
