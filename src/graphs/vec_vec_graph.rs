use serde_derive::{Deserialize, Serialize};

use super::{Distance, Edge, Graph, TaillessEdge, Vertex, WeightedEdge};

/// Adjacency-vector graph. Edges sharing a tail are kept sorted by head so
/// weight lookup is a binary search.
#[derive(Clone, Serialize, Deserialize)]
pub struct VecVecGraph {
    edges: Vec<Vec<TaillessEdge>>,
}

impl Default for VecVecGraph {
    fn default() -> Self {
        VecVecGraph { edges: Vec::new() }
    }
}

impl VecVecGraph {
    pub fn from_edges(edges: &[WeightedEdge]) -> VecVecGraph {
        let mut graph = VecVecGraph::default();

        edges.iter().for_each(|edge| {
            // parallel edges collapse to the cheapest one
            if edge.weight
                < graph
                    .get_weight(&edge.unweighted())
                    .unwrap_or(Distance::MAX)
            {
                graph.set_weight(&edge.unweighted(), Some(edge.weight));
            }
        });

        graph
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
        // A named struct is needed as a plain map closure would not capture
        // the tail long enough.
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

    fn get_weight(&self, edge: &Edge) -> Option<Distance> {
        let edges_sharing_tail = self.edges.get(edge.tail as usize)?;

        let edge_index = edges_sharing_tail
            .binary_search_by_key(&edge.head, |tailless_edge| tailless_edge.head)
            .ok()?;

        Some(edges_sharing_tail[edge_index].weight)
    }

    fn set_weight(&mut self, edge: &Edge, weight: Option<Distance>) {
        let max_edge_endpoint = std::cmp::max(edge.tail, edge.head) as usize;
        if max_edge_endpoint >= self.edges.len() {
            self.edges.resize(max_edge_endpoint + 1, Vec::new());
        }

        let edges_sharing_tail = &mut self.edges[edge.tail as usize];
        let edge_index = edges_sharing_tail.binary_search_by_key(&edge.head, |other| other.head);

        if let Some(weight) = weight {
            match edge_index {
                Ok(index) => {
                    edges_sharing_tail[index].weight = weight;
                }
                Err(index) => {
                    let new_edge = TaillessEdge {
                        head: edge.head,
                        weight,
                    };
                    edges_sharing_tail.insert(index, new_edge);
                }
            }
        } else {
            // no weight means disconnect
            if let Ok(index) = edge_index {
                edges_sharing_tail.remove(index);
            }
        }
    }
}
