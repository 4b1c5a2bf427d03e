use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

use log::info;
use serde::{Deserialize, Serialize};

use super::contraction::ContractionStatistics;
use crate::{
    error::ChError,
    graphs::{
        check_vertex, vec_vec_graph::VecVecGraph, Distance, Graph, Level, Vertex, WeightedEdge,
    },
    search::{
        collections::{
            dijkstra_data::{DijkstraData, DijkstraDataHashMap},
            vertex_distance_queue::{VertexDistanceQueue, VertexDistanceQueueBinaryHeap},
            vertex_expanded_data::{VertexExpandedData, VertexExpandedDataHashSet},
        },
        dijkstra::add_distances,
    },
};

/// Result of the preprocessing. Immutable, safe to share between threads.
///
/// `upward_graph` holds every edge `tail -> head` with
/// `level(tail) < level(head)`. All other edges are stored reversed in
/// `downward_graph`, so a search from the target over it only climbs levels
/// too.
#[derive(Clone, Serialize, Deserialize)]
pub struct ContractedGraph {
    upward_graph: VecVecGraph,
    downward_graph: VecVecGraph,
    vertex_to_level: Vec<Level>,
    statistics: ContractionStatistics,
}

impl ContractedGraph {
    /// Partitions `edges` by the levels given through the contraction order
    /// `level_to_vertex`, which must be a permutation of all vertices.
    pub(crate) fn new(
        number_of_vertices: u32,
        edges: &[WeightedEdge],
        level_to_vertex: &[Vertex],
        mut statistics: ContractionStatistics,
    ) -> ContractedGraph {
        debug_assert_eq!(
            level_to_vertex.len(),
            number_of_vertices as usize,
            "every vertex needs a level"
        );
        let vertex_to_level = vertex_to_level(level_to_vertex);

        let mut upward_graph = VecVecGraph::new(number_of_vertices);
        let mut downward_graph = VecVecGraph::new(number_of_vertices);
        for edge in edges.iter() {
            if vertex_to_level[edge.tail as usize] < vertex_to_level[edge.head as usize] {
                upward_graph.add_edge(edge);
            } else {
                downward_graph.add_edge(&edge.reversed());
            }
        }

        statistics.upward_edges = upward_graph.number_of_edges() as u64;
        statistics.downward_edges = downward_graph.number_of_edges() as u64;
        info!(
            "Partitioned into {} upward and {} downward edges",
            statistics.upward_edges, statistics.downward_edges
        );

        ContractedGraph {
            upward_graph,
            downward_graph,
            vertex_to_level,
            statistics,
        }
    }

    pub fn upward_graph(&self) -> &VecVecGraph {
        &self.upward_graph
    }

    pub fn downward_graph(&self) -> &VecVecGraph {
        &self.downward_graph
    }

    pub fn vertex_to_level(&self) -> &[Level] {
        &self.vertex_to_level
    }

    pub fn statistics(&self) -> &ContractionStatistics {
        &self.statistics
    }

    pub fn number_of_vertices(&self) -> u32 {
        self.vertex_to_level.len() as u32
    }

    pub fn number_of_edges(&self) -> u32 {
        self.upward_graph.number_of_edges() + self.downward_graph.number_of_edges()
    }

    pub fn level(&self, vertex: Vertex) -> Result<Level, ChError> {
        check_vertex(vertex, self.number_of_vertices())?;
        Ok(self.vertex_to_level[vertex as usize])
    }

    /// Shortest path distance from `source` to `target`, `None` if `target`
    /// is unreachable. Fails with [`ChError::DistanceOverflow`] if `target`
    /// may only be reachable over a distance of `Distance::MAX` or more.
    pub fn shortest_path_distance(
        &self,
        source: Vertex,
        target: Vertex,
    ) -> Result<Option<Distance>, ChError> {
        check_vertex(source, self.number_of_vertices())?;
        check_vertex(target, self.number_of_vertices())?;

        let mut forward_data = DijkstraDataHashMap::new();
        let mut forward_expanded = VertexExpandedDataHashSet::new();
        let mut forward_queue = VertexDistanceQueueBinaryHeap::new();

        let mut backward_data = DijkstraDataHashMap::new();
        let mut backward_expanded = VertexExpandedDataHashSet::new();
        let mut backward_queue = VertexDistanceQueueBinaryHeap::new();

        let meeting = ch_one_to_one(
            self,
            &mut forward_data,
            &mut forward_expanded,
            &mut forward_queue,
            &mut backward_data,
            &mut backward_expanded,
            &mut backward_queue,
            source,
            target,
        )?;

        Ok(meeting.map(|(_vertex, distance)| distance))
    }

    pub fn write_bincode(&self, path: &Path) -> Result<(), ChError> {
        let writer = BufWriter::new(File::create(path)?);
        bincode::serialize_into(writer, self)?;
        Ok(())
    }

    pub fn read_bincode(path: &Path) -> Result<ContractedGraph, ChError> {
        let reader = BufReader::new(File::open(path)?);
        Ok(bincode::deserialize_from(reader)?)
    }
}

pub fn vertex_to_level(level_to_vertex: &[Vertex]) -> Vec<Level> {
    let mut vertex_to_level = vec![0; level_to_vertex.len()];

    for (level, &vertex) in level_to_vertex.iter().enumerate() {
        vertex_to_level[vertex as usize] = level as Level;
    }

    vertex_to_level
}

/// Bidirectional search, forward over the upward graph and backward over the
/// downward graph, one step each in turn. Returns the meeting vertex and the
/// distance, `None` if the searches never meet.
///
/// Every expanded vertex that is also labeled by the other side is a meeting
/// candidate. A side is done once it pops a distance that is not below the
/// best candidate. Sums of `Distance::MAX` and above are skipped; if the
/// searches never meet after skipping one, the result is
/// [`ChError::DistanceOverflow`].
#[allow(clippy::too_many_arguments)]
pub fn ch_one_to_one(
    ch_graph: &ContractedGraph,
    forward_data: &mut dyn DijkstraData,
    forward_expanded: &mut dyn VertexExpandedData,
    forward_queue: &mut dyn VertexDistanceQueue,
    backward_data: &mut dyn DijkstraData,
    backward_expanded: &mut dyn VertexExpandedData,
    backward_queue: &mut dyn VertexDistanceQueue,
    source: Vertex,
    target: Vertex,
) -> Result<Option<(Vertex, Distance)>, ChError> {
    forward_data.set_distance(source, 0);
    forward_queue.insert(source, 0);

    backward_data.set_distance(target, 0);
    backward_queue.insert(target, 0);

    let mut meeting_vertex_and_distance = None;
    let mut overflowed = false;

    loop {
        let forward_step = single_search_step(
            &ch_graph.upward_graph,
            forward_data,
            forward_expanded,
            forward_queue,
            &*backward_data,
            &mut meeting_vertex_and_distance,
            &mut overflowed,
        );

        let backward_step = single_search_step(
            &ch_graph.downward_graph,
            backward_data,
            backward_expanded,
            backward_queue,
            &*forward_data,
            &mut meeting_vertex_and_distance,
            &mut overflowed,
        );

        if !forward_step && !backward_step {
            break;
        }
    }

    if meeting_vertex_and_distance.is_none() && overflowed {
        return Err(ChError::DistanceOverflow { source, target });
    }

    Ok(meeting_vertex_and_distance)
}

/// Expands at most one vertex. Returns false if this side is done.
fn single_search_step(
    graph: &dyn Graph,
    data: &mut dyn DijkstraData,
    expanded: &mut dyn VertexExpandedData,
    queue: &mut dyn VertexDistanceQueue,
    other_data: &dyn DijkstraData,
    meeting_vertex_and_distance: &mut Option<(Vertex, Distance)>,
    overflowed: &mut bool,
) -> bool {
    let meeting_distance =
        meeting_vertex_and_distance.map_or(Distance::MAX, |(_vertex, distance)| distance);

    let Some((tail, distance_tail)) = queue.pop() else {
        return false;
    };
    if distance_tail >= meeting_distance {
        queue.clear();
        return false;
    }
    if expanded.expand(tail) {
        return true;
    }

    if let Some(other_distance_tail) = other_data.get_distance(tail) {
        match add_distances(distance_tail, other_distance_tail) {
            Some(alternative_meeting_distance) => {
                if alternative_meeting_distance < meeting_distance {
                    *meeting_vertex_and_distance = Some((tail, alternative_meeting_distance));
                }
            }
            None => *overflowed = true,
        }
    }

    for edge in graph.edges(tail) {
        let Some(alternative_distance_head) = add_distances(distance_tail, edge.weight) else {
            *overflowed = true;
            continue;
        };

        let current_distance_head = data.get_distance(edge.head).unwrap_or(Distance::MAX);
        if alternative_distance_head < current_distance_head {
            data.set_distance(edge.head, alternative_distance_head);
            queue.insert(edge.head, alternative_distance_head);
        }
    }

    true
}
