// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Iterators over vertices and edges in an `UndirectedGraph`.

use petgraph::stable_graph::{EdgeIndices, NodeIndices, StableUnGraph};

use super::{EdgeIndex, VertexIndex};

/// An iterator over the vertices in an `UndirectedGraph`.
pub struct Vertices<'a, V, E> {
    pub(crate) graph: &'a StableUnGraph<V, E>,
    pub(crate) iter: NodeIndices<'a, V>,
}

impl<'a, V, E> Iterator for Vertices<'a, V, E> {
    type Item = (VertexIndex, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let graph = self.graph;
        self.iter
            .by_ref()
            .find_map(|v| graph.node_weight(v).map(|w| (v, w)))
    }
}

/// An iterator over the edges in an `UndirectedGraph`.
pub struct Edges<'a, V, E> {
    pub(crate) graph: &'a StableUnGraph<V, E>,
    pub(crate) iter: EdgeIndices<'a, E>,
}

impl<'a, V, E> Iterator for Edges<'a, V, E> {
    type Item = (EdgeIndex, &'a E);

    fn next(&mut self) -> Option<Self::Item> {
        let graph = self.graph;
        self.iter
            .by_ref()
            .find_map(|e| graph.edge_weight(e).map(|w| (e, w)))
    }
}
