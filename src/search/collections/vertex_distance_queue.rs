use std::{cmp::Reverse, collections::BinaryHeap};

use radix_heap::RadixHeapMap;

use crate::graphs::{Distance, Vertex};

/// A trait for a priority queue that manages vertices and their distances.
/// This trait is useful for graph algorithms that need to repeatedly retrieve
/// the vertex with the smallest distance (such as Dijkstra's algorithm).
///
/// None of the implementations use a decrease key operation, so a vertex may
/// be popped more than once. Callers skip stale entries with a
/// [`VertexExpandedData`](super::vertex_expanded_data::VertexExpandedData).
pub trait VertexDistanceQueue {
    /// Clears all stored data, preparing for a new search.
    fn clear(&mut self);

    /// Inserts a vertex with its associated distance into the priority queue.
    fn insert(&mut self, vertex: Vertex, distance: Distance);

    /// Removes and returns the vertex with the smallest distance from the
    /// priority queue or none if the queue is empty.
    fn pop(&mut self) -> Option<(Vertex, Distance)>;
}

/// A priority queue implementation using a Binary Heap.
#[derive(Default)]
pub struct VertexDistanceQueueBinaryHeap {
    heap: BinaryHeap<Reverse<(Distance, Vertex)>>,
}

impl VertexDistanceQueueBinaryHeap {
    pub fn new() -> Self {
        VertexDistanceQueueBinaryHeap {
            heap: BinaryHeap::new(),
        }
    }
}

impl VertexDistanceQueue for VertexDistanceQueueBinaryHeap {
    fn clear(&mut self) {
        self.heap.clear();
    }

    fn insert(&mut self, vertex: Vertex, distance: Distance) {
        self.heap.push(Reverse((distance, vertex)));
    }

    fn pop(&mut self) -> Option<(Vertex, Distance)> {
        let Reverse((distance, vertex)) = self.heap.pop()?;

        Some((vertex, distance))
    }
}

/// Radix heap. Only valid for monotone searches: an inserted distance must
/// never be smaller than the last popped one.
pub struct VertexDistanceQueueRadixHeap {
    heap: RadixHeapMap<Reverse<Distance>, Vertex>,
}

impl Default for VertexDistanceQueueRadixHeap {
    fn default() -> Self {
        Self::new()
    }
}

impl VertexDistanceQueueRadixHeap {
    pub fn new() -> Self {
        VertexDistanceQueueRadixHeap {
            heap: RadixHeapMap::new(),
        }
    }
}

impl VertexDistanceQueue for VertexDistanceQueueRadixHeap {
    fn clear(&mut self) {
        self.heap.clear();
    }

    fn insert(&mut self, vertex: Vertex, distance: Distance) {
        self.heap.push(Reverse(distance), vertex);
    }

    fn pop(&mut self) -> Option<(Vertex, Distance)> {
        let (Reverse(distance), vertex) = self.heap.pop()?;

        Some((vertex, distance))
    }
}
