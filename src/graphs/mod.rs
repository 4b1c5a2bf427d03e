use serde::{Deserialize, Serialize};

use crate::error::ChError;

pub mod reversible_graph;
pub mod vec_vec_graph;

pub type Vertex = u32;
pub type Distance = u64;
pub type Level = u32;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WeightedEdge {
    pub tail: Vertex,
    pub head: Vertex,
    pub weight: Distance,
}

impl WeightedEdge {
    pub fn new(tail: Vertex, head: Vertex, weight: Distance) -> WeightedEdge {
        WeightedEdge { tail, head, weight }
    }

    pub fn remove_tail(&self) -> TaillessEdge {
        TaillessEdge {
            head: self.head,
            weight: self.weight,
        }
    }

    pub fn reversed(&self) -> WeightedEdge {
        WeightedEdge {
            tail: self.head,
            head: self.tail,
            weight: self.weight,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaillessEdge {
    pub head: Vertex,
    pub weight: Distance,
}

impl TaillessEdge {
    pub fn set_tail(&self, tail: Vertex) -> WeightedEdge {
        WeightedEdge {
            tail,
            head: self.head,
            weight: self.weight,
        }
    }
}

pub trait Graph: Send + Sync {
    fn number_of_vertices(&self) -> u32;

    fn number_of_edges(&self) -> u32 {
        self.vertices()
            .map(|vertex| self.edges(vertex).len() as u32)
            .sum::<u32>()
    }

    fn edges(&self, tail: Vertex) -> Box<dyn ExactSizeIterator<Item = WeightedEdge> + Send + '_>;

    fn vertices(&self) -> std::ops::Range<Vertex> {
        0..self.number_of_vertices()
    }

    /// Fails with [`ChError::InvalidVertex`] if `vertex` is not in `0..V`.
    fn check_vertex(&self, vertex: Vertex) -> Result<(), ChError> {
        check_vertex(vertex, self.number_of_vertices())
    }
}

pub fn check_vertex(vertex: Vertex, number_of_vertices: u32) -> Result<(), ChError> {
    if vertex >= number_of_vertices {
        return Err(ChError::InvalidVertex {
            vertex,
            number_of_vertices,
        });
    }

    Ok(())
}

/// Checks that both endpoints of every edge are valid vertex ids.
pub fn check_edges(edges: &[WeightedEdge], number_of_vertices: u32) -> Result<(), ChError> {
    edges.iter().try_for_each(|edge| {
        check_vertex(edge.tail, number_of_vertices)?;
        check_vertex(edge.head, number_of_vertices)
    })
}
