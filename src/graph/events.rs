//! Mutation listeners.
//!
//! Stores call their listeners synchronously, in-line, before the mutating
//! call returns. Listeners must not re-enter a mutation on the same store.
//!
//! Removal listeners are only enumerated when one is attached: cascades such
//! as `clear` or `remove_vertex` check `has_edge_removed_listeners` and skip
//! the per-edge walk entirely when nothing observes it.

use core::fmt;

use super::traits::GraphBase;

/// Handle returned by listener registration, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener<T> = Box<dyn FnMut(&T)>;

/// Listener registry for the four mutation events of a store.
pub struct GraphEvents<V, E> {
    next_id: u64,
    vertex_added: Vec<(ListenerId, Listener<V>)>,
    vertex_removed: Vec<(ListenerId, Listener<V>)>,
    edge_added: Vec<(ListenerId, Listener<E>)>,
    edge_removed: Vec<(ListenerId, Listener<E>)>,
}

impl<V, E> Default for GraphEvents<V, E> {
    fn default() -> Self {
        Self {
            next_id: 0,
            vertex_added: Vec::new(),
            vertex_removed: Vec::new(),
            edge_added: Vec::new(),
            edge_removed: Vec::new(),
        }
    }
}

impl<V, E> fmt::Debug for GraphEvents<V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphEvents")
            .field("vertex_added", &self.vertex_added.len())
            .field("vertex_removed", &self.vertex_removed.len())
            .field("edge_added", &self.edge_added.len())
            .field("edge_removed", &self.edge_removed.len())
            .finish()
    }
}

impl<V, E> GraphEvents<V, E> {
    /// Creates a registry with no listener.
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Registers a listener fired after a vertex is added.
    pub fn on_vertex_added<F: FnMut(&V) + 'static>(&mut self, listener: F) -> ListenerId {
        let id = self.next_id();
        self.vertex_added.push((id, Box::new(listener)));
        id
    }

    /// Registers a listener fired after a vertex is removed.
    pub fn on_vertex_removed<F: FnMut(&V) + 'static>(&mut self, listener: F) -> ListenerId {
        let id = self.next_id();
        self.vertex_removed.push((id, Box::new(listener)));
        id
    }

    /// Registers a listener fired after an edge is added.
    pub fn on_edge_added<F: FnMut(&E) + 'static>(&mut self, listener: F) -> ListenerId {
        let id = self.next_id();
        self.edge_added.push((id, Box::new(listener)));
        id
    }

    /// Registers a listener fired after an edge is removed.
    pub fn on_edge_removed<F: FnMut(&E) + 'static>(&mut self, listener: F) -> ListenerId {
        let id = self.next_id();
        self.edge_removed.push((id, Box::new(listener)));
        id
    }

    /// Detaches the listener registered under `id`.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listener_count();
        self.vertex_added.retain(|(i, _)| *i != id);
        self.vertex_removed.retain(|(i, _)| *i != id);
        self.edge_added.retain(|(i, _)| *i != id);
        self.edge_removed.retain(|(i, _)| *i != id);
        before != self.listener_count()
    }

    /// Detaches every listener.
    pub fn clear(&mut self) {
        self.vertex_added.clear();
        self.vertex_removed.clear();
        self.edge_added.clear();
        self.edge_removed.clear();
    }

    /// Total number of attached listeners.
    pub fn listener_count(&self) -> usize {
        self.vertex_added.len()
            + self.vertex_removed.len()
            + self.edge_added.len()
            + self.edge_removed.len()
    }

    /// Returns `true` if a vertex-added listener is attached.
    #[inline]
    pub fn has_vertex_added_listeners(&self) -> bool {
        !self.vertex_added.is_empty()
    }

    /// Returns `true` if a vertex-removed listener is attached.
    #[inline]
    pub fn has_vertex_removed_listeners(&self) -> bool {
        !self.vertex_removed.is_empty()
    }

    /// Returns `true` if an edge-added listener is attached.
    #[inline]
    pub fn has_edge_added_listeners(&self) -> bool {
        !self.edge_added.is_empty()
    }

    /// Returns `true` if an edge-removed listener is attached.
    #[inline]
    pub fn has_edge_removed_listeners(&self) -> bool {
        !self.edge_removed.is_empty()
    }

    pub(crate) fn vertex_added(&mut self, vertex: &V) {
        for (_, listener) in &mut self.vertex_added {
            listener(vertex);
        }
    }

    pub(crate) fn vertex_removed(&mut self, vertex: &V) {
        for (_, listener) in &mut self.vertex_removed {
            listener(vertex);
        }
    }

    pub(crate) fn edge_added(&mut self, edge: &E) {
        for (_, listener) in &mut self.edge_added {
            listener(edge);
        }
    }

    pub(crate) fn edge_removed(&mut self, edge: &E) {
        for (_, listener) in &mut self.edge_removed {
            listener(edge);
        }
    }

    pub(crate) fn edges_removed<'a, I>(&mut self, edges: I)
    where
        I: IntoIterator<Item = &'a E>,
        E: 'a,
    {
        if self.has_edge_removed_listeners() {
            for edge in edges {
                self.edge_removed(edge);
            }
        }
    }
}

/// A store exposing its listener registry.
pub trait ObservableGraph: GraphBase {
    /// The listener registry.
    fn events(&self) -> &GraphEvents<Self::Vertex, Self::Edge>;

    /// The mutable listener registry.
    fn events_mut(&mut self) -> &mut GraphEvents<Self::Vertex, Self::Edge>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn listeners_fire_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut events: GraphEvents<u32, (u32, u32)> = GraphEvents::new();

        let first = Rc::clone(&log);
        events.on_vertex_added(move |v| first.borrow_mut().push(("a", *v)));
        let second = Rc::clone(&log);
        events.on_vertex_added(move |v| second.borrow_mut().push(("b", *v)));

        events.vertex_added(&7);
        assert_eq!(*log.borrow(), vec![("a", 7), ("b", 7)]);
    }

    #[test]
    fn unsubscribe_detaches_one_listener() {
        let hits = Rc::new(RefCell::new(0));
        let mut events: GraphEvents<u32, (u32, u32)> = GraphEvents::new();

        let h = Rc::clone(&hits);
        let id = events.on_edge_removed(move |_| *h.borrow_mut() += 1);
        assert!(events.has_edge_removed_listeners());

        events.edges_removed(&[(1, 2), (2, 3)]);
        assert_eq!(*hits.borrow(), 2);

        assert!(events.unsubscribe(id));
        assert!(!events.unsubscribe(id));
        assert!(!events.has_edge_removed_listeners());
        events.edges_removed(&[(1, 2)]);
        assert_eq!(*hits.borrow(), 2);
    }
}
