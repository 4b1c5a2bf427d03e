use crate::{
    error::ChError,
    graphs::{reversible_graph::ReversibleGraph, Distance, Vertex},
};

pub mod ch;
pub mod collections;
pub mod dijkstra;

pub trait PathFinding: Send + Sync {
    /// `Ok(None)` if `target` is not reachable from `source`.
    fn shortest_path_distance(
        &self,
        source: Vertex,
        target: Vertex,
    ) -> Result<Option<Distance>, ChError>;

    fn number_of_vertices(&self) -> u32;
}

/// Reference answers by plain Dijkstra on the uncontracted graph.
impl PathFinding for ReversibleGraph {
    fn shortest_path_distance(
        &self,
        source: Vertex,
        target: Vertex,
    ) -> Result<Option<Distance>, ChError> {
        dijkstra::dijkstra_one_to_one_wrapped(self.out_graph(), source, target)
    }

    fn number_of_vertices(&self) -> u32 {
        ReversibleGraph::number_of_vertices(self)
    }
}
