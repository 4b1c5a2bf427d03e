use ahash::{HashMap, HashMapExt};
use fixedbitset::FixedBitSet;
use itertools::Itertools;

use crate::{
    graphs::{reversible_graph::ReversibleGraph, Distance, Graph, Vertex, WeightedEdge},
    search::collections::{
        dijkstra_data::{DijkstraData, DijkstraDataHashMap},
        vertex_distance_queue::{VertexDistanceQueue, VertexDistanceQueueRadixHeap},
        vertex_expanded_data::{VertexExpandedData, VertexExpandedDataHashSet},
    },
};

/// Local Dijkstra from `source` over uncontracted vertices, never entering
/// `without`. Vertices farther away than `max_distance` are not labeled.
/// The search also stops once every vertex in `targets` is expanded.
pub fn witness_search(
    graph: &ReversibleGraph,
    contracted: &FixedBitSet,
    source: Vertex,
    without: Vertex,
    max_distance: Distance,
    targets: &[Vertex],
) -> DijkstraDataHashMap {
    let mut data = DijkstraDataHashMap::new();
    let mut expanded = VertexExpandedDataHashSet::new();
    let mut queue = VertexDistanceQueueRadixHeap::new();

    let mut remaining_targets = targets.len();

    data.set_distance(source, 0);
    queue.insert(source, 0);

    while let Some((tail, distance_tail)) = queue.pop() {
        if expanded.expand(tail) {
            continue;
        }

        if targets.contains(&tail) {
            remaining_targets -= 1;
            if remaining_targets == 0 {
                break;
            }
        }

        for edge in graph.out_graph().edges(tail) {
            if edge.head == without || contracted.contains(edge.head as usize) {
                continue;
            }

            let alternative_distance_head = distance_tail.saturating_add(edge.weight);
            if alternative_distance_head > max_distance {
                continue;
            }

            let current_distance_head = data.get_distance(edge.head).unwrap_or(Distance::MAX);
            if alternative_distance_head < current_distance_head {
                data.set_distance(edge.head, alternative_distance_head);
                queue.insert(edge.head, alternative_distance_head);
            }
        }
    }

    data
}

/// Cheapest edge to every uncontracted neighbor other than `vertex` itself.
fn cheapest_edges(
    edges: impl Iterator<Item = WeightedEdge>,
    contracted: &FixedBitSet,
    vertex: Vertex,
) -> Vec<(Vertex, Distance)> {
    let mut cheapest: HashMap<Vertex, Distance> = HashMap::new();

    edges
        .filter(|edge| edge.head != vertex && !contracted.contains(edge.head as usize))
        .for_each(|edge| {
            let weight = cheapest.entry(edge.head).or_insert(edge.weight);
            *weight = std::cmp::min(*weight, edge.weight);
        });

    cheapest.into_iter().sorted().collect()
}

/// Simulates the contraction of `vertex`. Returns the shortcuts needed to
/// keep all shortest path distances between the remaining vertices, without
/// touching the graph.
///
/// For each predecessor `tail` one witness search is run, bounded by the
/// most expensive path `tail -> vertex -> head`. A shortcut `tail -> head` is
/// needed iff no path avoiding `vertex` is at most as long as the path over
/// `vertex`. Weights that do not fit are saturated at `Distance::MAX`.
pub fn simulate_contraction(
    graph: &ReversibleGraph,
    contracted: &FixedBitSet,
    vertex: Vertex,
) -> Vec<WeightedEdge> {
    let mut shortcuts = Vec::new();

    let out_neighbors = cheapest_edges(graph.out_graph().edges(vertex), contracted, vertex);
    let Some(max_out_weight) = out_neighbors.iter().map(|&(_, weight)| weight).max() else {
        return shortcuts;
    };
    let heads = out_neighbors.iter().map(|&(head, _)| head).collect_vec();

    // tail -> vertex -> head
    for (tail, in_weight) in cheapest_edges(graph.in_graph().edges(vertex), contracted, vertex) {
        let max_distance = in_weight.saturating_add(max_out_weight);
        let data = witness_search(graph, contracted, tail, vertex, max_distance, &heads);

        for &(head, out_weight) in out_neighbors.iter() {
            if head == tail {
                continue;
            }

            // Saturated shortcuts are always kept, a witness can not be
            // compared against them.
            let shortcut_distance = in_weight.saturating_add(out_weight);
            let witness_distance = data.get_distance(head).unwrap_or(Distance::MAX);
            if shortcut_distance == Distance::MAX || witness_distance > shortcut_distance {
                shortcuts.push(WeightedEdge::new(tail, head, shortcut_distance));
            }
        }
    }

    shortcuts
}
