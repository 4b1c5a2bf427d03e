use super::contracted_graph::ContractedGraph;
use crate::{
    error::ChError,
    graphs::{Distance, Vertex},
    search::PathFinding,
};

impl PathFinding for ContractedGraph {
    fn shortest_path_distance(
        &self,
        source: Vertex,
        target: Vertex,
    ) -> Result<Option<Distance>, ChError> {
        ContractedGraph::shortest_path_distance(self, source, target)
    }

    fn number_of_vertices(&self) -> u32 {
        ContractedGraph::number_of_vertices(self)
    }
}
