use serde::{Deserialize, Serialize};

use super::{vec_vec_graph::VecVecGraph, Graph, WeightedEdge};

/// Forward and reverse adjacency of the same edge set. The in graph stores
/// every edge reversed, so `in_graph().edges(v)` yields the predecessors of
/// `v` as heads.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct ReversibleGraph {
    out_graph: VecVecGraph,
    in_graph: VecVecGraph,
}

impl ReversibleGraph {
    pub fn new(number_of_vertices: u32) -> ReversibleGraph {
        ReversibleGraph {
            out_graph: VecVecGraph::new(number_of_vertices),
            in_graph: VecVecGraph::new(number_of_vertices),
        }
    }

    /// Caller guarantees that all endpoints are smaller than
    /// `number_of_vertices`.
    pub fn from_edges(number_of_vertices: u32, edges: &[WeightedEdge]) -> ReversibleGraph {
        let mut graph = ReversibleGraph::new(number_of_vertices);
        edges.iter().for_each(|edge| graph.add_edge(edge));
        graph
    }

    pub fn out_graph(&self) -> &VecVecGraph {
        &self.out_graph
    }

    pub fn in_graph(&self) -> &VecVecGraph {
        &self.in_graph
    }

    pub fn add_edge(&mut self, edge: &WeightedEdge) {
        self.out_graph.add_edge(edge);
        self.in_graph.add_edge(&edge.reversed());
    }

    pub fn number_of_vertices(&self) -> u32 {
        self.out_graph.number_of_vertices()
    }

    pub fn all_edges(&self) -> Vec<WeightedEdge> {
        self.out_graph
            .vertices()
            .flat_map(|vertex| self.out_graph.edges(vertex))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::ReversibleGraph;
    use crate::graphs::{Graph, WeightedEdge};

    #[test]
    fn in_graph_mirrors_out_graph() {
        let mut graph = ReversibleGraph::new(3);
        graph.add_edge(&WeightedEdge::new(0, 2, 7));
        graph.add_edge(&WeightedEdge::new(1, 2, 3));

        let predecessors: Vec<_> = graph.in_graph().edges(2).map(|edge| edge.head).collect();
        assert_eq!(predecessors, vec![0, 1]);
        assert_eq!(graph.out_graph().edges(2).len(), 0);
        assert_eq!(graph.all_edges().len(), 2);
    }
}
