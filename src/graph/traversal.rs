// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module contains methods that help with graph traversal.

use petgraph::visit::EdgeRef;

use crate::Error;

use super::{UndirectedGraph, VertexIndex};

/// Tells [`UndirectedGraph::traverse`] whether to expand across an edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraverseResult {
    /// Mark the vertex at the other end as visited and expand from it.
    Continue,
    /// Don't cross this edge.  The vertex at the other end may still be
    /// reached through another edge.
    Terminate,
}

/// Traversal methods.
impl<V, E> UndirectedGraph<V, E> {
    /// Returns a traversal mask with no vertex marked as visited.
    pub fn new_traversal_mask(&self) -> Vec<bool> {
        vec![false; self.vertex_bound()]
    }

    /// Expands depth-first from `start`, marking every vertex reached in
    /// `encountered`.
    ///
    /// `traverser` is called with `(from, edge, to)` for every edge leading to
    /// a vertex that isn't marked yet, and decides whether to cross it.
    /// Vertices already marked in `encountered` are never expanded, so the same
    /// mask can be reused to cover disconnected parts of the graph.
    pub fn traverse(
        &self,
        start: VertexIndex,
        mut traverser: impl FnMut(VertexIndex, &E, VertexIndex) -> TraverseResult,
        encountered: &mut [bool],
    ) -> Result<(), Error> {
        if !self.graph.contains_node(start) {
            return Err(Error::not_found(format!(
                "Vertex {} not found.",
                start.index()
            )));
        }
        if encountered.len() < self.vertex_bound() {
            return Err(Error::validation(format!(
                "Traversal mask has {} entries, {} needed.",
                encountered.len(),
                self.vertex_bound()
            )));
        }

        encountered[start.index()] = true;
        let mut stack = vec![start];

        while let Some(v1) = stack.pop() {
            for edge in self.graph.edges(v1) {
                let v2 = if edge.source() == v1 {
                    edge.target()
                } else {
                    edge.source()
                };
                if encountered[v2.index()] {
                    continue;
                }
                if traverser(v1, edge.weight(), v2) == TraverseResult::Continue {
                    encountered[v2.index()] = true;
                    stack.push(v2);
                }
            }
        }

        Ok(())
    }
}
