// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Methods for retrieving vertices and edges from an [`UndirectedGraph`].

use petgraph::visit::{EdgeRef, NodeIndexable};

use super::iterators::{Edges, Vertices};
use super::{EdgeIndex, UndirectedGraph, VertexIndex};

/// Vertex and edge retrieval.
impl<V, E> UndirectedGraph<V, E> {
    /// Returns the object of the vertex at `v`, if it exists.
    pub fn vertex(&self, v: VertexIndex) -> Option<&V> {
        self.graph.node_weight(v)
    }

    /// Returns a mutable reference to the object of the vertex at `v`.
    ///
    /// Changes made through it are not reported to the listeners.
    pub fn vertex_mut(&mut self, v: VertexIndex) -> Option<&mut V> {
        self.graph.node_weight_mut(v)
    }

    /// Returns the object of the edge at `e`, if it exists.
    pub fn edge(&self, e: EdgeIndex) -> Option<&E> {
        self.graph.edge_weight(e)
    }

    /// Returns a mutable reference to the object of the edge at `e`.
    ///
    /// Changes made through it are not reported to the listeners.
    pub fn edge_mut(&mut self, e: EdgeIndex) -> Option<&mut E> {
        self.graph.edge_weight_mut(e)
    }

    /// Returns the two endpoints of the edge at `e`, in the order they were
    /// given when the edge was added.
    pub fn edge_vertices(&self, e: EdgeIndex) -> Option<(VertexIndex, VertexIndex)> {
        self.graph.edge_endpoints(e)
    }

    pub fn contains_vertex(&self, v: VertexIndex) -> bool {
        self.graph.contains_node(v)
    }

    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns an upper bound of the vertex indices in use, suitable for
    /// sizing traversal masks.
    pub fn vertex_bound(&self) -> usize {
        self.graph.node_bound()
    }

    /// Returns an iterator over the vertices, in index order.
    pub fn vertices(&self) -> Vertices<'_, V, E> {
        Vertices {
            graph: &self.graph,
            iter: self.graph.node_indices(),
        }
    }

    /// Returns an iterator over the edges, in index order.
    pub fn edges(&self) -> Edges<'_, V, E> {
        Edges {
            graph: &self.graph,
            iter: self.graph.edge_indices(),
        }
    }

    /// Returns the indices of the edges that have `v` as an endpoint.
    pub fn adjacent_edges(&self, v: VertexIndex) -> impl Iterator<Item = EdgeIndex> + '_ {
        self.graph.edges(v).map(|e| e.id())
    }
}
