use incidence::graph::{ClusterId, GraphOptions};
use incidence::prelude::*;
use proptest::prelude::*;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone)]
enum Operation {
    AddVertex(u8),
    RemoveVertex(u8),
    AddEdge(u8, u8),
    RemoveEdge(u8, u8),
    ClearOut(u8),
}

fn operations() -> impl Strategy<Value = Vec<Operation>> {
    proptest::collection::vec(
        prop_oneof![
            (0u8..8).prop_map(Operation::AddVertex),
            (0u8..8).prop_map(Operation::RemoveVertex),
            (0u8..8, 0u8..8).prop_map(|(s, t)| Operation::AddEdge(s, t)),
            (0u8..8, 0u8..8).prop_map(|(s, t)| Operation::RemoveEdge(s, t)),
            (0u8..8).prop_map(Operation::ClearOut),
        ],
        1..80,
    )
}

fn apply<G>(graph: &mut G, op: &Operation)
where
    G: MutableVertexAndEdgeSet<Vertex = u8, Edge = SEdge<u8>> + MutableIncidenceGraph,
{
    match *op {
        Operation::AddVertex(v) => {
            graph.add_vertex(v);
        }
        Operation::RemoveVertex(v) => {
            graph.remove_vertex(&v);
        }
        Operation::AddEdge(s, t) => {
            let _ = graph.add_edge(SEdge::new(s, t));
        }
        Operation::RemoveEdge(s, t) => {
            graph.remove_edge(&SEdge::new(s, t));
        }
        Operation::ClearOut(v) => {
            let _ = graph.clear_out_edges(&v);
        }
    }
}

fn assert_mirrored(graph: &BidirectionalGraph<u8, SEdge<u8>>) {
    let all: Vec<SEdge<u8>> = graph.edges().collect();
    for v in graph.vertices() {
        let mut out: Vec<SEdge<u8>> = graph.out_edges(&v).unwrap().collect();
        let mut expected_out: Vec<SEdge<u8>> =
            all.iter().filter(|e| *e.source() == v).copied().collect();
        out.sort_unstable();
        expected_out.sort_unstable();
        assert_eq!(out, expected_out, "out-edges of {v}");

        let mut inc: Vec<SEdge<u8>> = graph.in_edges(&v).unwrap().collect();
        let mut expected_in: Vec<SEdge<u8>> =
            all.iter().filter(|e| *e.target() == v).copied().collect();
        inc.sort_unstable();
        expected_in.sort_unstable();
        assert_eq!(inc, expected_in, "in-edges of {v}");
    }
}

proptest! {
    #[test]
    fn adjacency_count_matches_enumeration(ops in operations(), parallel in any::<bool>()) {
        let mut graph: AdjacencyGraph<u8, SEdge<u8>> = AdjacencyGraph::with_parallel_edges(parallel);
        for op in &ops {
            apply(&mut graph, op);
            prop_assert_eq!(graph.edge_count(), graph.edges().count());
            for e in graph.edges() {
                prop_assert!(graph.contains_vertex(e.source()));
                prop_assert!(graph.contains_vertex(e.target()));
            }
        }
    }

    #[test]
    fn bidirectional_indices_stay_mirrored(ops in operations(), parallel in any::<bool>()) {
        let mut graph: BidirectionalGraph<u8, SEdge<u8>> =
            BidirectionalGraph::with_parallel_edges(parallel);
        for op in &ops {
            apply(&mut graph, op);
            prop_assert_eq!(graph.edge_count(), graph.edges().count());
        }
        assert_mirrored(&graph);
    }

    #[test]
    fn merge_keeps_indices_mirrored(ops in operations(), victim in 0u8..8) {
        let mut graph: BidirectionalGraph<u8, SEdge<u8>> = BidirectionalGraph::new();
        for op in &ops {
            apply(&mut graph, op);
        }
        let existed = graph.contains_vertex(&victim);
        let merged = graph.merge_vertex(&victim, |a, b| SEdge::new(*a, *b));
        prop_assert_eq!(merged.is_ok(), existed);
        prop_assert!(!graph.contains_vertex(&victim));
        prop_assert_eq!(graph.edge_count(), graph.edges().count());
        assert_mirrored(&graph);
    }

    #[test]
    fn undirected_lookup_is_symmetric(edges in proptest::collection::vec((0u8..6, 0u8..6), 0..30)) {
        let graph: UndirectedGraph<u8, SEdge<u8>> = edges.iter().copied().map(SEdge::from).collect();
        prop_assert_eq!(graph.edge_count(), graph.edges().count());
        for s in 0..6 {
            for t in 0..6 {
                prop_assert_eq!(graph.contains_edge_between(&s, &t), graph.contains_edge_between(&t, &s));
            }
        }
        let degrees: usize = graph.vertices().map(|v| graph.adjacent_degree(&v).unwrap()).sum();
        prop_assert_eq!(degrees, 2 * graph.edge_count());
    }

    #[test]
    fn cascade_removes_exactly_incident_edges(
        edges in proptest::collection::vec((0u8..6, 0u8..6), 0..30),
        victim in 0u8..6,
    ) {
        let mut graph: BidirectionalGraph<u8, SEdge<u8>> =
            edges.iter().copied().map(SEdge::from).collect();
        let before: Vec<SEdge<u8>> = graph.edges().collect();
        let expected: usize = before.iter().filter(|e| e.is_adjacent(&victim)).count();
        let count = graph.edge_count();

        if graph.remove_vertex(&victim) {
            prop_assert_eq!(graph.edge_count(), count - expected);
            prop_assert!(graph.edges().all(|e| !e.is_adjacent(&victim)));
        } else {
            prop_assert_eq!(expected, 0);
            prop_assert_eq!(graph.edge_count(), count);
        }
        // A second removal is a no-op.
        let vertices = graph.vertex_count();
        prop_assert!(!graph.remove_vertex(&victim));
        prop_assert_eq!(graph.vertex_count(), vertices);
        prop_assert_eq!(graph.edge_count(), count - expected);
    }

    #[test]
    fn parallel_policy_is_honoured(s in 0u8..4, t in 0u8..4, allow in any::<bool>()) {
        let options = GraphOptions::new().allow_parallel_edges(allow);
        let mut graph: AdjacencyGraph<u8, SEdge<u8>> = AdjacencyGraph::with_options(options);
        graph.add_vertex_range([s, t]);
        prop_assert_eq!(graph.add_edge(SEdge::new(s, t)), Ok(true));
        prop_assert_eq!(graph.add_edge(SEdge::new(s, t)), Ok(allow));
        prop_assert_eq!(graph.edge_count(), if allow { 2 } else { 1 });
    }

    #[test]
    fn clusters_stay_nested_in_their_parents(
        ops in cluster_operations(),
        allow in any::<bool>(),
    ) {
        let mut tree: ClusteredAdjacencyGraph<u8, TaggedEdge<u8, u8>> =
            ClusteredAdjacencyGraph::with_parallel_edges(allow);
        let a = tree.add_cluster(ClusterId::ROOT).unwrap();
        let b = tree.add_cluster(a).unwrap();
        let c = tree.add_cluster(ClusterId::ROOT).unwrap();
        let clusters = [ClusterId::ROOT, a, b, c];

        for op in &ops {
            match *op {
                ClusterOperation::AddEdge { at, source, target, tag } => {
                    tree.cluster_mut(clusters[at])
                        .unwrap()
                        .add_vertices_and_edge(TaggedEdge::new(source, target, tag));
                }
                ClusterOperation::RemoveEdge { at, source, target, tag } => {
                    tree.cluster_mut(clusters[at])
                        .unwrap()
                        .remove_edge(&TaggedEdge::new(source, target, tag));
                }
                ClusterOperation::RemoveVertex { at, vertex } => {
                    tree.cluster_mut(clusters[at]).unwrap().remove_vertex(&vertex);
                }
            }
            for id in clusters {
                let graph = tree.graph(id).unwrap();
                prop_assert_eq!(graph.edge_count(), graph.edges().count());
                if !allow {
                    for v in graph.vertices() {
                        let targets: Vec<u8> =
                            graph.out_edges(&v).unwrap().map(|e| *e.target()).collect();
                        let distinct: HashSet<u8> = targets.iter().copied().collect();
                        prop_assert_eq!(targets.len(), distinct.len());
                    }
                }
                let Some(parent) = tree.parent(id).unwrap() else {
                    continue;
                };
                let outer = tree.graph(parent).unwrap();
                prop_assert!(graph.vertices().all(|v| outer.contains_vertex(&v)));
                let inner_counts = edge_counts(graph.edges());
                let outer_counts = edge_counts(outer.edges());
                for (edge, count) in inner_counts {
                    prop_assert!(
                        outer_counts.get(&edge).copied().unwrap_or(0) >= count,
                        "{:?} has more copies of {:?} than its parent", id, edge
                    );
                }
            }
        }
    }
}

#[derive(Debug, Clone)]
enum ClusterOperation {
    AddEdge { at: usize, source: u8, target: u8, tag: u8 },
    RemoveEdge { at: usize, source: u8, target: u8, tag: u8 },
    RemoveVertex { at: usize, vertex: u8 },
}

fn cluster_operations() -> impl Strategy<Value = Vec<ClusterOperation>> {
    proptest::collection::vec(
        prop_oneof![
            4 => (0usize..4, 0u8..5, 0u8..5, 0u8..2).prop_map(|(at, source, target, tag)| {
                ClusterOperation::AddEdge { at, source, target, tag }
            }),
            1 => (0usize..4, 0u8..5, 0u8..5, 0u8..2).prop_map(|(at, source, target, tag)| {
                ClusterOperation::RemoveEdge { at, source, target, tag }
            }),
            1 => (0usize..4, 0u8..5)
                .prop_map(|(at, vertex)| ClusterOperation::RemoveVertex { at, vertex }),
        ],
        1..60,
    )
}

fn edge_counts<I>(edges: I) -> HashMap<TaggedEdge<u8, u8>, usize>
where
    I: Iterator<Item = TaggedEdge<u8, u8>>,
{
    let mut counts = HashMap::new();
    for edge in edges {
        *counts.entry(edge).or_insert(0) += 1;
    }
    counts
}
