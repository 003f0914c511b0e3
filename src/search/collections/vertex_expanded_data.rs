use ahash::{HashSet, HashSetExt};

use crate::graphs::{Graph, Vertex};

pub trait VertexExpandedData {
    /// Returns false the first time a vertex is expanded, true afterwards.
    fn expand(&mut self, vertex: Vertex) -> bool;

    fn clear(&mut self);
}

pub struct VertexExpandedDataVec {
    expanded: Vec<bool>,
}

impl VertexExpandedDataVec {
    pub fn new(graph: &dyn Graph) -> Self {
        VertexExpandedDataVec {
            expanded: vec![false; graph.number_of_vertices() as usize],
        }
    }
}

impl VertexExpandedData for VertexExpandedDataVec {
    fn expand(&mut self, vertex: Vertex) -> bool {
        let expanded = self.expanded[vertex as usize];
        self.expanded[vertex as usize] = true;
        expanded
    }

    fn clear(&mut self) {
        self.expanded.fill(false);
    }
}

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

impl Default for VertexExpandedDataHashSet {
    fn default() -> Self {
        Self::new()
    }
}

impl VertexExpandedData for VertexExpandedDataHashSet {
    fn expand(&mut self, vertex: Vertex) -> bool {
        !self.expanded.insert(vertex)
    }

    fn clear(&mut self) {
        self.expanded.clear();
    }
}
