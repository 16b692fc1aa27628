use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use incidence::prelude::*;
use petgraph::graphmap::DiGraphMap;

const SIZE: u32 = 1000;

/// A chain plus a few strided shortcuts per vertex.
fn workload_edges(size: u32) -> Vec<(u32, u32)> {
    let mut edges = Vec::with_capacity(size as usize * 4);
    for i in 0..size {
        edges.push((i, (i + 1) % size));
        for stride in [7, 31, 101] {
            edges.push((i, (i * stride + 13) % size));
        }
    }
    edges
}

fn bench_build(c: &mut Criterion) {
    let edges = workload_edges(SIZE);
    let mut group = c.benchmark_group("build");
    group.throughput(Throughput::Elements(edges.len() as u64));

    group.bench_function("adjacency", |b| {
        b.iter(|| {
            let graph: AdjacencyGraph<u32, SEdge<u32>> =
                edges.iter().copied().map(SEdge::from).collect();
            black_box(graph.edge_count())
        });
    });

    group.bench_function("bidirectional", |b| {
        b.iter(|| {
            let graph: BidirectionalGraph<u32, SEdge<u32>> =
                edges.iter().copied().map(SEdge::from).collect();
            black_box(graph.edge_count())
        });
    });

    group.bench_function("undirected", |b| {
        b.iter(|| {
            let graph: UndirectedGraph<u32, SEdge<u32>> =
                edges.iter().copied().map(SEdge::from).collect();
            black_box(graph.edge_count())
        });
    });

    group.bench_function("petgraph", |b| {
        b.iter(|| {
            let graph: DiGraphMap<u32, ()> = DiGraphMap::from_edges(edges.iter().copied());
            black_box(graph.edge_count())
        });
    });

    group.finish();
}

fn bench_scan(c: &mut Criterion) {
    let edges = workload_edges(SIZE);
    let adjacency: AdjacencyGraph<u32, SEdge<u32>> =
        edges.iter().copied().map(SEdge::from).collect();
    let bidirectional: BidirectionalGraph<u32, SEdge<u32>> =
        edges.iter().copied().map(SEdge::from).collect();
    let petgraph: DiGraphMap<u32, ()> = DiGraphMap::from_edges(edges.iter().copied());

    let mut group = c.benchmark_group("out_edge_scan");
    group.throughput(Throughput::Elements(edges.len() as u64));

    group.bench_function("adjacency", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            for v in 0..SIZE {
                for e in adjacency.out_edges(&v).into_iter().flatten() {
                    sum += u64::from(*e.target());
                }
            }
            black_box(sum)
        });
    });

    group.bench_function("bidirectional_in", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            for v in 0..SIZE {
                for e in bidirectional.in_edges(&v).into_iter().flatten() {
                    sum += u64::from(*e.source());
                }
            }
            black_box(sum)
        });
    });

    group.bench_function("petgraph", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            for v in 0..SIZE {
                for n in petgraph.neighbors(v) {
                    sum += u64::from(n);
                }
            }
            black_box(sum)
        });
    });

    group.finish();
}

fn bench_remove_vertex(c: &mut Criterion) {
    let edges = workload_edges(SIZE);
    let mut group = c.benchmark_group("remove_vertex");

    // Bidirectional removal is local; the plain adjacency store scans every list.
    for victims in [1u32, 10] {
        group.bench_with_input(BenchmarkId::new("adjacency", victims), &victims, |b, &k| {
            b.iter_batched(
                || -> AdjacencyGraph<u32, SEdge<u32>> {
                    edges.iter().copied().map(SEdge::from).collect()
                },
                |mut graph| {
                    for v in 0..k {
                        graph.remove_vertex(&(v * 37 % SIZE));
                    }
                    black_box(graph.edge_count())
                },
                criterion::BatchSize::LargeInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("bidirectional", victims), &victims, |b, &k| {
            b.iter_batched(
                || -> BidirectionalGraph<u32, SEdge<u32>> {
                    edges.iter().copied().map(SEdge::from).collect()
                },
                |mut graph| {
                    for v in 0..k {
                        graph.remove_vertex(&(v * 37 % SIZE));
                    }
                    black_box(graph.edge_count())
                },
                criterion::BatchSize::LargeInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("petgraph", victims), &victims, |b, &k| {
            b.iter_batched(
                || -> DiGraphMap<u32, ()> { DiGraphMap::from_edges(edges.iter().copied()) },
                |mut graph| {
                    for v in 0..k {
                        graph.remove_node(v * 37 % SIZE);
                    }
                    black_box(graph.edge_count())
                },
                criterion::BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

fn bench_merge_vertex(c: &mut Criterion) {
    let edges = workload_edges(SIZE);
    c.bench_function("bidirectional_merge_vertex", |b| {
        b.iter_batched(
            || -> BidirectionalGraph<u32, SEdge<u32>> {
                edges.iter().copied().map(SEdge::from).collect()
            },
            |mut graph| black_box(graph.merge_vertex(&(SIZE / 2), |s, t| SEdge::new(*s, *t))),
            criterion::BatchSize::LargeInput,
        );
    });
}

fn bench_matrix(c: &mut Criterion) {
    let edges = workload_edges(SIZE);
    c.bench_function("matrix_fill_and_query", |b| {
        b.iter(|| {
            let Ok(mut graph) = BidirectionalMatrixGraph::<u32, SEdge<u32>>::new(SIZE as usize)
            else {
                return 0;
            };
            for &(s, t) in &edges {
                // Duplicate pairs collide with the occupied slot.
                let _ = graph.add_edge(SEdge::new(s, t));
            }
            black_box(graph.in_degree(&0).unwrap_or(0))
        });
    });
}

criterion_group!(
    benches,
    bench_build,
    bench_scan,
    bench_remove_vertex,
    bench_merge_vertex,
    bench_matrix
);
criterion_main!(benches);
