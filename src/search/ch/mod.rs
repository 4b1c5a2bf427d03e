use log::info;

use contracted_graph::ContractedGraph;
use contraction::contraction_bottom_up;

use crate::{
    error::ChError,
    graphs::{check_edges, reversible_graph::ReversibleGraph, WeightedEdge},
};

pub mod contracted_graph;
pub mod contraction;
pub mod pathfinding;
pub mod witness;

/// Builds a contraction hierarchy over the vertices `0..number_of_vertices`.
///
/// Fails with [`ChError::InvalidVertex`] if an edge endpoint is out of range.
/// Any other input, including graphs without edges or with several
/// components, yields a valid [`ContractedGraph`]. The working graph is
/// dropped before this returns.
pub fn preprocess(
    number_of_vertices: u32,
    edges: &[WeightedEdge],
) -> Result<ContractedGraph, ChError> {
    check_edges(edges, number_of_vertices)?;

    info!(
        "Preprocessing graph with {} vertices and {} edges",
        number_of_vertices,
        edges.len()
    );
    let graph = ReversibleGraph::from_edges(number_of_vertices, edges);
    let output = contraction_bottom_up(graph);

    Ok(ContractedGraph::new(
        number_of_vertices,
        &output.edges,
        &output.level_to_vertex,
        output.statistics,
    ))
}
