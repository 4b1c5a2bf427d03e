use std::{cmp::Reverse, collections::BinaryHeap};

use fixedbitset::FixedBitSet;
use indicatif::ParallelProgressIterator;
use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::witness::simulate_contraction;
use crate::{
    graphs::{reversible_graph::ReversibleGraph, Graph, Vertex, WeightedEdge},
    utility::get_progressbar,
};

/// Lower is contracted earlier.
pub type Importance = i64;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractionStatistics {
    pub shortcuts: u64,
    pub reinsertions: u64,
    pub upward_edges: u64,
    pub downward_edges: u64,
}

pub struct ContractionOutput {
    /// Contraction order, the index of a vertex in here is its level.
    pub level_to_vertex: Vec<Vertex>,
    /// Original edges followed by all inserted shortcuts.
    pub edges: Vec<WeightedEdge>,
    pub statistics: ContractionStatistics,
}

/// Contracts all vertices of `graph`, least important first, and inserts the
/// shortcuts needed to preserve distances between the remaining vertices.
///
/// Importances are re-evaluated lazily: a popped vertex is only contracted if
/// its current importance is not larger than the smallest stored importance,
/// otherwise it is pushed back with the new value.
pub fn contraction_bottom_up(mut graph: ReversibleGraph) -> ContractionOutput {
    let number_of_vertices = graph.number_of_vertices();
    let mut contracted = FixedBitSet::with_capacity(number_of_vertices as usize);

    info!("Setting up queue");
    let mut queue = new_queue(&graph, &contracted);

    let mut level_to_vertex = Vec::with_capacity(number_of_vertices as usize);
    let mut statistics = ContractionStatistics::default();

    let pb = get_progressbar("Contracting", number_of_vertices as u64);

    info!("Start contracting");
    while let Some(Reverse((_, vertex))) = queue.pop() {
        let shortcuts = simulate_contraction(&graph, &contracted, vertex);
        let importance = edge_difference(&graph, vertex, shortcuts.len())
            + contracted_neighbors(&graph, &contracted, vertex);

        if let Some(&Reverse((next_importance, _))) = queue.peek() {
            if importance > next_importance {
                queue.push(Reverse((importance, vertex)));
                statistics.reinsertions += 1;
                continue;
            }
        }

        debug!(
            "Contracting {} (importance {}, {} shortcuts). {:>2.2}% remaining",
            vertex,
            importance,
            shortcuts.len(),
            queue.len() as f32 / number_of_vertices as f32 * 100.0
        );

        statistics.shortcuts += shortcuts.len() as u64;
        shortcuts.iter().for_each(|shortcut| graph.add_edge(shortcut));

        let was_contracted = contracted.put(vertex as usize);
        assert!(!was_contracted, "vertex {} was contracted twice", vertex);
        level_to_vertex.push(vertex);

        pb.inc(1);
    }
    pb.finish_and_clear();

    assert_eq!(
        level_to_vertex.len(),
        number_of_vertices as usize,
        "every vertex must receive a level"
    );
    info!(
        "Finished contracting, added {} shortcuts ({} lazy reinsertions)",
        statistics.shortcuts, statistics.reinsertions
    );

    ContractionOutput {
        level_to_vertex,
        edges: graph.all_edges(),
        statistics,
    }
}

/// Seeds the queue with the edge difference of every vertex. Read only on
/// the graph, so it runs in parallel.
pub fn new_queue(
    graph: &ReversibleGraph,
    contracted: &FixedBitSet,
) -> BinaryHeap<Reverse<(Importance, Vertex)>> {
    let pb = get_progressbar("Initializing queue", graph.number_of_vertices() as u64);

    let entries: Vec<_> = (0..graph.number_of_vertices())
        .into_par_iter()
        .progress_with(pb)
        .map(|vertex| {
            let shortcuts = simulate_contraction(graph, contracted, vertex);
            Reverse((edge_difference(graph, vertex, shortcuts.len()), vertex))
        })
        .collect();

    BinaryHeap::from(entries)
}

/// Shortcuts added minus edges stored at `vertex`. Edges to already
/// contracted neighbors are part of the degree.
pub fn edge_difference(
    graph: &ReversibleGraph,
    vertex: Vertex,
    number_of_shortcuts: usize,
) -> Importance {
    let degree = graph.out_graph().edges(vertex).len() + graph.in_graph().edges(vertex).len();

    number_of_shortcuts as Importance - degree as Importance
}

/// Number of in and out edges of `vertex` whose other endpoint is
/// contracted.
pub fn contracted_neighbors(
    graph: &ReversibleGraph,
    contracted: &FixedBitSet,
    vertex: Vertex,
) -> Importance {
    graph
        .out_graph()
        .edges(vertex)
        .chain(graph.in_graph().edges(vertex))
        .filter(|edge| contracted.contains(edge.head as usize))
        .count() as Importance
}

#[cfg(test)]
mod tests {
    use fixedbitset::FixedBitSet;
    use itertools::Itertools;

    use super::{contracted_neighbors, contraction_bottom_up, edge_difference};
    use crate::graphs::{reversible_graph::ReversibleGraph, WeightedEdge};

    fn path_graph() -> ReversibleGraph {
        ReversibleGraph::from_edges(3, &[WeightedEdge::new(0, 1, 1), WeightedEdge::new(1, 2, 1)])
    }

    #[test]
    fn edge_difference_of_path() {
        let graph = path_graph();

        // one shortcut 0 -> 2 replaces two edges
        assert_eq!(edge_difference(&graph, 1, 1), -1);
        assert_eq!(edge_difference(&graph, 0, 0), -1);
    }

    #[test]
    fn counts_contracted_neighbors() {
        let graph = path_graph();
        let mut contracted = FixedBitSet::with_capacity(3);
        assert_eq!(contracted_neighbors(&graph, &contracted, 1), 0);

        contracted.insert(0);
        contracted.insert(2);
        assert_eq!(contracted_neighbors(&graph, &contracted, 1), 2);
    }

    #[test]
    fn every_vertex_gets_one_level() {
        let output = contraction_bottom_up(path_graph());

        let levels = output.level_to_vertex.iter().copied().sorted().collect_vec();
        assert_eq!(levels, vec![0, 1, 2]);
        assert_eq!(output.edges.len() as u64, 2 + output.statistics.shortcuts);
    }

    #[test]
    fn ties_are_contracted() {
        // Every vertex starts at -1. After 0 is contracted, 1 and then 2 each
        // come back equal to the next stored key, so nothing is pushed back.
        let output = contraction_bottom_up(path_graph());

        assert_eq!(output.level_to_vertex, vec![0, 1, 2]);
        assert_eq!(output.statistics.reinsertions, 0);
        assert_eq!(output.statistics.shortcuts, 0);
    }

    #[test]
    fn rising_importance_is_reinserted() {
        // Two disjoint edges, every vertex starts at -1. Once 0 is contracted,
        // 1 has a contracted neighbor and rises to 0 while 2 is still at -1.
        let graph = ReversibleGraph::from_edges(
            4,
            &[WeightedEdge::new(0, 1, 1), WeightedEdge::new(2, 3, 1)],
        );
        let output = contraction_bottom_up(graph);

        assert_eq!(output.statistics.reinsertions, 1);
        assert_eq!(output.statistics.shortcuts, 0);
        // 3 rises to 0 as well, but ties with the stored 0 of vertex 1.
        assert_eq!(output.level_to_vertex, vec![0, 2, 3, 1]);
    }

    #[test]
    fn empty_graph() {
        let output = contraction_bottom_up(ReversibleGraph::new(0));

        assert!(output.level_to_vertex.is_empty());
        assert!(output.edges.is_empty());
    }
}
