// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Methods for adding and removing vertices and edges of an
//! [`UndirectedGraph`].

use petgraph::visit::EdgeRef;

use crate::Error;

use super::{EdgeIndex, UndirectedGraph, VertexIndex};

/// Vertex and edge mutation.
impl<V, E> UndirectedGraph<V, E> {
    /// Adds a vertex holding `vertex` and returns its index.
    pub fn add_vertex(&mut self, vertex: V) -> VertexIndex {
        let v = self.graph.add_node(vertex);
        self.notify_listeners();
        v
    }

    /// Removes the vertex at `v` and returns its object.
    ///
    /// Fails if the vertex doesn't exist or if it is still the endpoint of an
    /// edge.
    pub fn remove_vertex(&mut self, v: VertexIndex) -> Result<V, Error> {
        if !self.graph.contains_node(v) {
            return Err(Error::not_found(format!("Vertex {} not found.", v.index())));
        }
        if let Some(edge) = self.graph.edges(v).next() {
            return Err(Error::validation(format!(
                "Vertex {} can't be removed, it is an endpoint of edge {}.",
                v.index(),
                edge.id().index()
            )));
        }
        let vertex = self
            .graph
            .remove_node(v)
            .ok_or_else(|| Error::internal(format!("Vertex {} vanished.", v.index())))?;
        self.notify_listeners();
        Ok(vertex)
    }

    /// Removes all the vertices.  Fails if the graph still has edges.
    pub fn remove_all_vertices(&mut self) -> Result<Vec<V>, Error> {
        if self.graph.edge_count() > 0 {
            return Err(Error::validation(format!(
                "Can't remove all vertices, {} edges remain.",
                self.graph.edge_count()
            )));
        }
        let indices = self.graph.node_indices().collect::<Vec<_>>();
        let removed = indices
            .into_iter()
            .filter_map(|v| self.graph.remove_node(v))
            .collect();
        self.notify_listeners();
        Ok(removed)
    }

    /// Adds an edge between `v1` and `v2` holding `edge` and returns its
    /// index.
    ///
    /// Fails if either endpoint doesn't exist.
    pub fn add_edge(&mut self, v1: VertexIndex, v2: VertexIndex, edge: E) -> Result<EdgeIndex, Error> {
        for v in [v1, v2] {
            if !self.graph.contains_node(v) {
                return Err(Error::validation(format!(
                    "Edge:({}, {}) Can't find vertex {}.",
                    v1.index(),
                    v2.index(),
                    v.index()
                )));
            }
        }
        let e = self.graph.add_edge(v1, v2, edge);
        self.notify_listeners();
        Ok(e)
    }

    /// Removes the edge at `e` and returns its object.
    pub fn remove_edge(&mut self, e: EdgeIndex) -> Result<E, Error> {
        let edge = self
            .graph
            .remove_edge(e)
            .ok_or_else(|| Error::not_found(format!("Edge {} not found.", e.index())))?;
        self.notify_listeners();
        Ok(edge)
    }

    /// Removes all the edges.
    pub fn remove_all_edges(&mut self) -> Vec<E> {
        let indices = self.graph.edge_indices().collect::<Vec<_>>();
        let removed = indices
            .into_iter()
            .filter_map(|e| self.graph.remove_edge(e))
            .collect();
        self.notify_listeners();
        removed
    }
}
