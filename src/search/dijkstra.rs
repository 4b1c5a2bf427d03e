use super::collections::{
    dijkstra_data::{DijkstraData, DijkstraDataVec},
    vertex_distance_queue::{VertexDistanceQueue, VertexDistanceQueueBinaryHeap},
    vertex_expanded_data::{VertexExpandedData, VertexExpandedDataBitSet},
};
use crate::{
    error::ChError,
    graphs::{Distance, Graph, Vertex},
};

/// Plain Dijkstra. Stops early once `target` is expanded, if one is given.
///
/// Distances of `Distance::MAX` and above are not representable. Edges that
/// would lead there are skipped, the return value tells whether that
/// happened.
pub fn dijkstra(
    graph: &dyn Graph,
    data: &mut dyn DijkstraData,
    expanded: &mut dyn VertexExpandedData,
    queue: &mut dyn VertexDistanceQueue,
    source: Vertex,
    target: Option<Vertex>,
) -> bool {
    let mut overflowed = false;

    data.set_distance(source, 0);
    queue.insert(source, 0);

    while let Some((tail, distance_tail)) = queue.pop() {
        if expanded.expand(tail) {
            continue;
        }
        if Some(tail) == target {
            break;
        }

        for edge in graph.edges(tail) {
            let Some(alternative_distance_head) = add_distances(distance_tail, edge.weight) else {
                overflowed = true;
                continue;
            };

            let current_distance_head = data.get_distance(edge.head).unwrap_or(Distance::MAX);
            if alternative_distance_head < current_distance_head {
                data.set_distance(edge.head, alternative_distance_head);
                queue.insert(edge.head, alternative_distance_head);
            }
        }
    }

    overflowed
}

/// Sum of two distances, `None` if it is not below `Distance::MAX`.
pub fn add_distances(first: Distance, second: Distance) -> Option<Distance> {
    first
        .checked_add(second)
        .filter(|&distance| distance < Distance::MAX)
}

/// Targets whose distance is not representable stay unlabeled.
pub fn dijkstra_one_to_all_wrapped(
    graph: &dyn Graph,
    source: Vertex,
) -> Result<DijkstraDataVec, ChError> {
    graph.check_vertex(source)?;

    let mut data = DijkstraDataVec::new(graph.number_of_vertices());
    let mut expanded = VertexExpandedDataBitSet::new(graph.number_of_vertices());
    let mut queue = VertexDistanceQueueBinaryHeap::new();

    dijkstra(graph, &mut data, &mut expanded, &mut queue, source, None);

    Ok(data)
}

pub fn dijkstra_one_to_one_wrapped(
    graph: &dyn Graph,
    source: Vertex,
    target: Vertex,
) -> Result<Option<Distance>, ChError> {
    graph.check_vertex(source)?;
    graph.check_vertex(target)?;

    let mut data = DijkstraDataVec::new(graph.number_of_vertices());
    let mut expanded = VertexExpandedDataBitSet::new(graph.number_of_vertices());
    let mut queue = VertexDistanceQueueBinaryHeap::new();

    let overflowed = dijkstra(graph, &mut data, &mut expanded, &mut queue, source, Some(target));

    match data.get_distance(target) {
        None if overflowed => Err(ChError::DistanceOverflow { source, target }),
        distance => Ok(distance),
    }
}
