use ahash::{HashSet, HashSetExt};
use fixedbitset::FixedBitSet;

use crate::graphs::Vertex;

pub trait VertexExpandedData {
    /// Marks `vertex` as expanded. Returns true if it already was.
    fn expand(&mut self, vertex: Vertex) -> bool;
}

pub struct VertexExpandedDataBitSet {
    expanded: FixedBitSet,
}

impl VertexExpandedDataBitSet {
    pub fn new(number_of_vertices: u32) -> Self {
        VertexExpandedDataBitSet {
            expanded: FixedBitSet::with_capacity(number_of_vertices as usize),
        }
    }
}

impl VertexExpandedData for VertexExpandedDataBitSet {
    fn expand(&mut self, vertex: Vertex) -> bool {
        self.expanded.put(vertex as usize)
    }
}

#[derive(Default)]
pub struct VertexExpandedDataHashSet {
    expanded: HashSet<Vertex>,
}

impl VertexExpandedDataHashSet {
    pub fn new() -> Self {
        VertexExpandedDataHashSet {
            expanded: HashSet::new(),
        }
    }
}

impl VertexExpandedData for VertexExpandedDataHashSet {
    fn expand(&mut self, vertex: Vertex) -> bool {
        !self.expanded.insert(vertex)
    }
}

#[cfg(test)]
mod tests {
    use super::{VertexExpandedData, VertexExpandedDataBitSet, VertexExpandedDataHashSet};

    #[test]
    fn second_expand_reports_expanded() {
        let mut dense = VertexExpandedDataBitSet::new(8);
        let mut sparse = VertexExpandedDataHashSet::new();

        for expanded in [&mut dense as &mut dyn VertexExpandedData, &mut sparse] {
            assert!(!expanded.expand(5));
            assert!(expanded.expand(5));
            assert!(!expanded.expand(6));
        }
    }
}
