// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! A generic undirected graph with stable vertex and edge indices.
//!
//! Indices freed by removals are reused by later additions.  Mutations are
//! reported to the listeners registered with
//! [`add_listener`][UndirectedGraph::add_listener].

mod creation;
pub mod iterators;
mod retrieval;
mod traversal;

pub use traversal::TraverseResult;

use petgraph::stable_graph::StableUnGraph;

/// Stable index of a vertex in an [`UndirectedGraph`].
pub type VertexIndex = petgraph::stable_graph::NodeIndex<u32>;

/// Stable index of an edge in an [`UndirectedGraph`].
pub type EdgeIndex = petgraph::stable_graph::EdgeIndex<u32>;

type Listener = Box<dyn Fn() + Send + Sync>;

/// An undirected graph that owns its vertex and edge objects.
pub struct UndirectedGraph<V, E> {
    graph: StableUnGraph<V, E>,
    listeners: Vec<Listener>,
}

impl<V, E> Default for UndirectedGraph<V, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, E> UndirectedGraph<V, E> {
    pub fn new() -> Self {
        Self {
            graph: StableUnGraph::default(),
            listeners: Vec::new(),
        }
    }

    /// Registers a callback that is invoked after every successful vertex or
    /// edge addition or removal.
    pub fn add_listener(&mut self, listener: impl Fn() + Send + Sync + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn notify_listeners(&self) {
        for listener in &self.listeners {
            listener();
        }
    }
}
