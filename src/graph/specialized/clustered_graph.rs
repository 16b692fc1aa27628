//! A tree of directed stores sharing vertex and edge identity.
//!
//! Every cluster owns an [`AdjacencyGraph`]. The tree keeps one invariant:
//! whatever a cluster holds, each of its ancestors holds too.
//!
//! - Insertions complete upward: adding to a cluster first adds to every
//!   ancestor, root first.
//! - Removals cascade through the whole tree: the cluster's subtree, the
//!   cluster itself, then each ancestor together with its other subtrees.
//!
//! Clusters live in an arena indexed by [`ClusterId`]; parent and children
//! are plain id tables, and every cascade is an explicit iterative walk.
//! Slots of removed clusters are reused, so a stale id may later name a new
//! cluster.

use core::hash::Hash;

use crate::edge::Edge;
use crate::error::{GraphError, GraphResult};
use crate::graph::basic::AdjacencyGraph;
use crate::graph::events::{GraphEvents, ObservableGraph};
use crate::graph::options::GraphOptions;
use crate::graph::traits::{
    EdgeSet, GraphBase, ImplicitGraph, IncidenceGraph, MutableEdgeSet, MutableGraph,
    MutableIncidenceGraph, MutableVertexAndEdgeSet, MutableVertexSet, VertexSet,
};

/// Handle of a cluster inside one [`ClusteredAdjacencyGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClusterId(usize);

impl ClusterId {
    /// The root cluster, present in every tree.
    pub const ROOT: ClusterId = ClusterId(0);

    /// Arena slot of this cluster.
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
struct ClusterNode<V, E> {
    graph: AdjacencyGraph<V, E>,
    parent: Option<ClusterId>,
    children: Vec<ClusterId>,
    collapsed: bool,
    live: bool,
}

impl<V, E> ClusterNode<V, E> {
    fn new(graph: AdjacencyGraph<V, E>, parent: Option<ClusterId>) -> Self {
        Self {
            graph,
            parent,
            children: Vec::new(),
            collapsed: false,
            live: true,
        }
    }
}

/// A hierarchy of directed adjacency graphs.
///
/// The tree itself answers queries for the root cluster. Mutations go through
/// a [`ClusterMut`] handle from [`root_mut`](Self::root_mut) or
/// [`cluster_mut`](Self::cluster_mut), so that every insertion and removal
/// runs its cascade.
///
/// ### Performance Characteristics
/// | Operation | Complexity | Notes |
/// |-----------|------------|-------|
/// | `add_vertex` | \(O(h)\) | One insert per ancestor |
/// | `add_edge` | \(O(h \cdot \text{out-degree})\) | Ancestors are checked before insertion |
/// | `remove_vertex` | \(O(c \cdot (n + m))\) | Directed removal in each of `c` clusters |
/// | `add_cluster` | \(O(1)\) amortized | |
#[derive(Debug, Clone)]
pub struct ClusteredAdjacencyGraph<V, E> {
    nodes: Vec<ClusterNode<V, E>>,
    free: Vec<ClusterId>,
    options: GraphOptions,
}

impl<V, E> ClusteredAdjacencyGraph<V, E> {
    /// Creates a tree holding only an empty root.
    pub fn new() -> Self {
        Self::with_options(GraphOptions::default())
    }

    /// Creates a tree whose clusters use the given parallel-edge policy.
    pub fn with_parallel_edges(allow_parallel_edges: bool) -> Self {
        Self::with_options(GraphOptions::new().allow_parallel_edges(allow_parallel_edges))
    }

    /// Creates a tree whose clusters are built from `options`.
    pub fn with_options(options: GraphOptions) -> Self {
        Self {
            nodes: vec![ClusterNode::new(AdjacencyGraph::with_options(options), None)],
            free: Vec::new(),
            options,
        }
    }

    /// Number of live clusters, root included.
    pub fn cluster_total(&self) -> usize {
        self.nodes.iter().filter(|node| node.live).count()
    }

    fn check(&self, id: ClusterId) -> GraphResult<()> {
        match self.nodes.get(id.0) {
            Some(node) if node.live => Ok(()),
            _ => Err(GraphError::InvalidArgument("unknown cluster")),
        }
    }

    /// Adds an empty child cluster under `parent`.
    ///
    /// The slot of a removed cluster is reused when one is free.
    pub fn add_cluster(&mut self, parent: ClusterId) -> GraphResult<ClusterId> {
        self.check(parent)?;
        let node = ClusterNode::new(AdjacencyGraph::with_options(self.options), Some(parent));
        let id = if let Some(slot) = self.free.pop() {
            self.nodes[slot.0] = node;
            slot
        } else {
            self.nodes.push(node);
            ClusterId(self.nodes.len() - 1)
        };
        self.nodes[parent.0].children.push(id);
        trace_op!(slots = self.nodes.len(), "cluster added");
        Ok(id)
    }

    /// Number of arena slots, live or free.
    pub fn slot_count(&self) -> usize {
        self.nodes.len()
    }

    /// Detaches `id` and its whole subtree. The root cannot be removed.
    ///
    /// Content of the ancestors is left as is.
    pub fn remove_cluster(&mut self, id: ClusterId) -> GraphResult<()> {
        self.check(id)?;
        let Some(parent) = self.nodes[id.0].parent else {
            return Err(GraphError::InvalidArgument("the root cluster cannot be removed"));
        };
        self.nodes[parent.0].children.retain(|child| *child != id);
        let subtree = self.subtree_post_order(id);
        for dead in &subtree {
            let node = &mut self.nodes[dead.0];
            node.live = false;
            node.children.clear();
            node.graph = AdjacencyGraph::with_options(self.options);
        }
        self.free.extend(subtree.iter().copied());
        debug_op!(dropped = subtree.len(), "cluster removed");
        Ok(())
    }

    /// The direct children of `id`.
    pub fn clusters(&self, id: ClusterId) -> GraphResult<impl Iterator<Item = ClusterId> + '_> {
        self.check(id)?;
        Ok(self.nodes[id.0].children.iter().copied())
    }

    /// Number of direct children of `id`.
    pub fn clusters_count(&self, id: ClusterId) -> GraphResult<usize> {
        self.check(id)?;
        Ok(self.nodes[id.0].children.len())
    }

    /// The parent of `id`, `None` for the root.
    pub fn parent(&self, id: ClusterId) -> GraphResult<Option<ClusterId>> {
        self.check(id)?;
        Ok(self.nodes[id.0].parent)
    }

    /// Advisory collapsed flag of `id`.
    pub fn is_collapsed(&self, id: ClusterId) -> GraphResult<bool> {
        self.check(id)?;
        Ok(self.nodes[id.0].collapsed)
    }

    /// Sets the collapsed flag of `id`. Has no structural effect.
    pub fn set_collapsed(&mut self, id: ClusterId, collapsed: bool) -> GraphResult<()> {
        self.check(id)?;
        self.nodes[id.0].collapsed = collapsed;
        Ok(())
    }

    /// Read access to the store of `id`.
    pub fn graph(&self, id: ClusterId) -> GraphResult<&AdjacencyGraph<V, E>> {
        self.check(id)?;
        Ok(&self.nodes[id.0].graph)
    }

    /// Mutation handle on `id`.
    pub fn cluster_mut(&mut self, id: ClusterId) -> GraphResult<ClusterMut<'_, V, E>> {
        self.check(id)?;
        Ok(ClusterMut { tree: self, id })
    }

    /// Mutation handle on the root.
    pub fn root_mut(&mut self) -> ClusterMut<'_, V, E> {
        ClusterMut {
            tree: self,
            id: ClusterId::ROOT,
        }
    }

    /// `id` and its ancestors, root first.
    fn lineage(&self, id: ClusterId) -> Vec<ClusterId> {
        let mut chain = vec![id];
        let mut current = id;
        while let Some(parent) = self.nodes[current.0].parent {
            chain.push(parent);
            current = parent;
        }
        chain.reverse();
        chain
    }

    /// The subtree of `id`, children before their parent.
    fn subtree_post_order(&self, id: ClusterId) -> Vec<ClusterId> {
        let mut order = Vec::new();
        let mut stack = vec![(id, false)];
        while let Some((node, expanded)) = stack.pop() {
            if expanded {
                order.push(node);
                continue;
            }
            stack.push((node, true));
            for child in self.nodes[node.0].children.iter().rev() {
                stack.push((*child, false));
            }
        }
        order
    }

    /// Clusters touched by a removal started at `id`, in visiting order: the
    /// subtree of `id`, then each ancestor after its other subtrees.
    fn removal_order(&self, id: ClusterId) -> Vec<ClusterId> {
        let mut order = self.subtree_post_order(id);
        let mut child = id;
        while let Some(parent) = self.nodes[child.0].parent {
            for sibling in &self.nodes[parent.0].children {
                if *sibling != child {
                    order.extend(self.subtree_post_order(*sibling));
                }
            }
            order.push(parent);
            child = parent;
        }
        order
    }
}

impl<V, E> Default for ClusteredAdjacencyGraph<V, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, E> ClusteredAdjacencyGraph<V, E>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
{
    /// Listener registry of the store of `id`.
    pub fn events_mut(&mut self, id: ClusterId) -> GraphResult<&mut GraphEvents<V, E>> {
        self.check(id)?;
        Ok(self.nodes[id.0].graph.events_mut())
    }

    fn add_vertex_at(&mut self, id: ClusterId, vertex: V) -> bool {
        let lineage = self.lineage(id);
        let mut added = false;
        for cluster in lineage {
            added = self.nodes[cluster.0].graph.add_vertex(vertex.clone());
        }
        added
    }

    /// Inserts `edge` at `id` and along its lineage.
    ///
    /// Every cluster of the lineage ends up holding at least as many copies
    /// of `edge` as `id` does. No cluster changes unless all of them accept.
    fn add_edge_at(&mut self, id: ClusterId, edge: E) -> GraphResult<bool> {
        let local = &self.nodes[id.0].graph;
        if !local.contains_vertex(edge.source()) || !local.contains_vertex(edge.target()) {
            return Err(GraphError::VertexNotFound);
        }
        let wanted = copies(local, &edge) + 1;
        let lineage = self.lineage(id);
        for cluster in &lineage {
            let graph = &self.nodes[cluster.0].graph;
            if copies(graph, &edge) < wanted
                && !graph.allow_parallel_edges()
                && graph.contains_edge_between(edge.source(), edge.target())
            {
                return Ok(false);
            }
        }
        for cluster in &lineage {
            let graph = &mut self.nodes[cluster.0].graph;
            if copies(graph, &edge) < wanted {
                graph.add_edge(edge.clone())?;
            }
        }
        Ok(true)
    }

    fn remove_vertex_at(&mut self, id: ClusterId, vertex: &V) -> bool {
        if !self.nodes[id.0].graph.contains_vertex(vertex) {
            return false;
        }
        let order = self.removal_order(id);
        for cluster in &order {
            self.nodes[cluster.0].graph.remove_vertex(vertex);
        }
        debug_op!(clusters = order.len(), "vertex removed from cluster tree");
        true
    }

    fn remove_edge_at(&mut self, id: ClusterId, edge: &E) -> bool {
        if !self.nodes[id.0].graph.contains_edge(edge) {
            return false;
        }
        let order = self.removal_order(id);
        for cluster in &order {
            self.nodes[cluster.0].graph.remove_edge(edge);
        }
        debug_op!(clusters = order.len(), "edge removed from cluster tree");
        true
    }

    fn clear_at(&mut self, id: ClusterId) {
        for cluster in self.subtree_post_order(id) {
            self.nodes[cluster.0].graph.clear();
        }
    }

    fn root(&self) -> &AdjacencyGraph<V, E> {
        &self.nodes[ClusterId::ROOT.0].graph
    }
}

/// Number of stored edges equal to `edge`.
fn copies<V, E>(graph: &AdjacencyGraph<V, E>, edge: &E) -> usize
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
{
    graph
        .out_edge_slice(edge.source())
        .map_or(0, |edges| edges.iter().filter(|stored| *stored == edge).count())
}

/// Mutable access to one cluster of a [`ClusteredAdjacencyGraph`].
///
/// Queries answer for this cluster alone; mutations run the tree cascades.
#[derive(Debug)]
pub struct ClusterMut<'a, V, E> {
    tree: &'a mut ClusteredAdjacencyGraph<V, E>,
    id: ClusterId,
}

impl<V, E> ClusterMut<'_, V, E> {
    /// The cluster this handle mutates.
    pub fn id(&self) -> ClusterId {
        self.id
    }

    fn local(&self) -> &AdjacencyGraph<V, E> {
        &self.tree.nodes[self.id.0].graph
    }
}

impl<V, E> GraphBase for ClusterMut<'_, V, E>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
{
    type Vertex = V;
    type Edge = E;

    fn is_directed(&self) -> bool {
        true
    }

    fn allow_parallel_edges(&self) -> bool {
        self.local().allow_parallel_edges()
    }
}

impl<V, E> VertexSet for ClusterMut<'_, V, E>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
{
    fn vertex_count(&self) -> usize {
        self.local().vertex_count()
    }

    fn vertices(&self) -> impl Iterator<Item = V> + '_ {
        self.local().vertices()
    }

    fn contains_vertex(&self, vertex: &V) -> bool {
        self.local().contains_vertex(vertex)
    }
}

impl<V, E> EdgeSet for ClusterMut<'_, V, E>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
{
    fn edge_count(&self) -> usize {
        self.local().edge_count()
    }

    fn edges(&self) -> impl Iterator<Item = E> + '_ {
        self.local().edges()
    }

    fn contains_edge(&self, edge: &E) -> bool {
        self.local().contains_edge(edge)
    }
}

impl<V, E> ImplicitGraph for ClusterMut<'_, V, E>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
{
    fn try_get_out_edges(&self, vertex: &V) -> Option<impl Iterator<Item = E> + '_> {
        self.local().try_get_out_edges(vertex)
    }

    fn out_degree(&self, vertex: &V) -> GraphResult<usize> {
        self.local().out_degree(vertex)
    }

    fn out_edge(&self, vertex: &V, index: usize) -> GraphResult<E> {
        self.local().out_edge(vertex, index)
    }
}

impl<V, E> IncidenceGraph for ClusterMut<'_, V, E>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
{
}

impl<V, E> MutableGraph for ClusterMut<'_, V, E>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
{
    /// Empties this cluster and its descendants. Ancestors keep their content.
    fn clear(&mut self) {
        self.tree.clear_at(self.id);
    }
}

impl<V, E> MutableVertexSet for ClusterMut<'_, V, E>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
{
    fn add_vertex(&mut self, vertex: V) -> bool {
        self.tree.add_vertex_at(self.id, vertex)
    }

    fn remove_vertex(&mut self, vertex: &V) -> bool {
        self.tree.remove_vertex_at(self.id, vertex)
    }
}

impl<V, E> MutableEdgeSet for ClusterMut<'_, V, E>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
{
    fn add_edge(&mut self, edge: E) -> GraphResult<bool> {
        self.tree.add_edge_at(self.id, edge)
    }

    fn remove_edge(&mut self, edge: &E) -> bool {
        self.tree.remove_edge_at(self.id, edge)
    }
}

impl<V, E> MutableVertexAndEdgeSet for ClusterMut<'_, V, E>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
{
}

impl<V, E> MutableIncidenceGraph for ClusterMut<'_, V, E>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
{
    fn remove_out_edge_if<P>(&mut self, vertex: &V, mut pred: P) -> GraphResult<usize>
    where
        P: FnMut(&E) -> bool,
    {
        let doomed: Vec<E> = self
            .local()
            .try_get_out_edges(vertex)
            .ok_or(GraphError::VertexNotFound)?
            .filter(|e| pred(e))
            .collect();
        Ok(doomed
            .iter()
            .filter(|e| self.tree.remove_edge_at(self.id, e))
            .count())
    }

    fn trim_edge_excess(&mut self) {
        self.tree.nodes[self.id.0].graph.trim_edge_excess();
    }
}

impl<V, E> GraphBase for ClusteredAdjacencyGraph<V, E>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
{
    type Vertex = V;
    type Edge = E;

    fn is_directed(&self) -> bool {
        true
    }

    fn allow_parallel_edges(&self) -> bool {
        self.options.allow_parallel_edges
    }
}

impl<V, E> VertexSet for ClusteredAdjacencyGraph<V, E>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
{
    fn vertex_count(&self) -> usize {
        self.root().vertex_count()
    }

    fn vertices(&self) -> impl Iterator<Item = V> + '_ {
        self.root().vertices()
    }

    fn contains_vertex(&self, vertex: &V) -> bool {
        self.root().contains_vertex(vertex)
    }
}

impl<V, E> EdgeSet for ClusteredAdjacencyGraph<V, E>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
{
    fn edge_count(&self) -> usize {
        self.root().edge_count()
    }

    fn edges(&self) -> impl Iterator<Item = E> + '_ {
        self.root().edges()
    }

    fn contains_edge(&self, edge: &E) -> bool {
        self.root().contains_edge(edge)
    }
}

impl<V, E> ImplicitGraph for ClusteredAdjacencyGraph<V, E>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
{
    fn try_get_out_edges(&self, vertex: &V) -> Option<impl Iterator<Item = E> + '_> {
        self.root().try_get_out_edges(vertex)
    }

    fn out_degree(&self, vertex: &V) -> GraphResult<usize> {
        self.root().out_degree(vertex)
    }
}

impl<V, E> IncidenceGraph for ClusteredAdjacencyGraph<V, E>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
{
}

impl<V, E> FromIterator<E> for ClusteredAdjacencyGraph<V, E>
where
    V: Clone + Eq + Hash,
    E: Edge<V> + Clone + PartialEq,
{
    /// Builds a tree whose root holds every edge and its endpoints.
    fn from_iter<I: IntoIterator<Item = E>>(edges: I) -> Self {
        let mut tree = Self::new();
        tree.root_mut().add_vertices_and_edge_range(edges);
        tree
    }
}
