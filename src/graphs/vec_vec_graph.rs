use serde::{Deserialize, Serialize};

use super::{Graph, TaillessEdge, Vertex, WeightedEdge};

/// Adjacency list graph. Edges are only ever appended, parallel edges are
/// kept in insertion order.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct VecVecGraph {
    edges: Vec<Vec<TaillessEdge>>,
}

impl VecVecGraph {
    pub fn new(number_of_vertices: u32) -> VecVecGraph {
        VecVecGraph {
            edges: vec![Vec::new(); number_of_vertices as usize],
        }
    }

    /// Caller guarantees that all endpoints are smaller than
    /// `number_of_vertices`.
    pub fn from_edges(number_of_vertices: u32, edges: &[WeightedEdge]) -> VecVecGraph {
        let mut graph = VecVecGraph::new(number_of_vertices);
        edges.iter().for_each(|edge| graph.add_edge(edge));
        graph
    }

    pub fn add_edge(&mut self, edge: &WeightedEdge) {
        self.edges[edge.tail as usize].push(edge.remove_tail());
    }
}

impl Graph for VecVecGraph {
    fn number_of_vertices(&self) -> u32 {
        self.edges.len() as u32
    }

    fn number_of_edges(&self) -> u32 {
        self.edges.iter().map(Vec::len).sum::<usize>() as u32
    }

    fn edges(&self, tail: Vertex) -> Box<dyn ExactSizeIterator<Item = WeightedEdge> + Send + '_> {
        // Define a struct for iterating over edges with the same tail. Struct is needed
        // as tail would otherwise not live enough.
        struct EdgeIterator<'a> {
            edge_iter: std::slice::Iter<'a, TaillessEdge>,
            tail: Vertex,
        }

        impl<'a> Iterator for EdgeIterator<'a> {
            type Item = WeightedEdge;

            fn next(&mut self) -> Option<Self::Item> {
                self.edge_iter
                    .next()
                    .map(|tailless_edge| tailless_edge.set_tail(self.tail))
            }
        }

        impl<'a> ExactSizeIterator for EdgeIterator<'a> {
            fn len(&self) -> usize {
                self.edge_iter.len()
            }
        }

        let edge_iter = match self.edges.get(tail as usize) {
            Some(edges) => edges.iter(),
            None => [].iter(),
        };

        Box::new(EdgeIterator { edge_iter, tail })
    }
}

#[cfg(test)]
mod tests {
    use super::VecVecGraph;
    use crate::graphs::{Graph, WeightedEdge};

    #[test]
    fn keeps_parallel_edges() {
        let edges = vec![
            WeightedEdge::new(0, 1, 4),
            WeightedEdge::new(0, 1, 2),
            WeightedEdge::new(1, 2, 1),
        ];
        let graph = VecVecGraph::from_edges(3, &edges);

        assert_eq!(graph.number_of_vertices(), 3);
        assert_eq!(graph.number_of_edges(), 3);

        let weights: Vec<_> = graph.edges(0).map(|edge| edge.weight).collect();
        assert_eq!(weights, vec![4, 2]);
        assert_eq!(graph.edges(2).len(), 0);
    }

    #[test]
    fn out_of_range_tail_has_no_edges() {
        let graph = VecVecGraph::new(2);
        assert_eq!(graph.edges(7).len(), 0);
    }
}
