use ahash::{HashMap, HashMapExt};

use crate::graphs::{Distance, Vertex};

/// Trait for handling distance labels in Dijkstra's algorithm.
pub trait DijkstraData {
    /// Retrieves the tentative distance to a given vertex, if any.
    fn get_distance(&self, vertex: Vertex) -> Option<Distance>;

    /// Sets the tentative distance to a given vertex.
    fn set_distance(&mut self, vertex: Vertex, distance: Distance);
}

/// Dense labels, one slot per vertex.
pub struct DijkstraDataVec {
    distances: Vec<Distance>,
}

impl DijkstraDataVec {
    pub fn new(number_of_vertices: u32) -> Self {
        DijkstraDataVec {
            distances: vec![Distance::MAX; number_of_vertices as usize],
        }
    }
}

impl DijkstraData for DijkstraDataVec {
    fn get_distance(&self, vertex: Vertex) -> Option<Distance> {
        let distance = *self.distances.get(vertex as usize)?;

        if distance == Distance::MAX {
            return None;
        }

        Some(distance)
    }

    fn set_distance(&mut self, vertex: Vertex, distance: Distance) {
        self.distances[vertex as usize] = distance;
    }
}

/// Sparse labels for searches that only touch a small part of the graph.
#[derive(Default)]
pub struct DijkstraDataHashMap {
    distances: HashMap<Vertex, Distance>,
}

impl DijkstraDataHashMap {
    pub fn new() -> Self {
        DijkstraDataHashMap {
            distances: HashMap::new(),
        }
    }
}

impl DijkstraData for DijkstraDataHashMap {
    fn get_distance(&self, vertex: Vertex) -> Option<Distance> {
        self.distances.get(&vertex).copied()
    }

    fn set_distance(&mut self, vertex: Vertex, distance: Distance) {
        self.distances.insert(vertex, distance);
    }
}
