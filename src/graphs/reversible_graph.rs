use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

use serde_derive::{Deserialize, Serialize};

use super::{read_edges_from_fmi_file, Graph, Vertex, WeightedEdge};
use crate::error::{Error, Result};

/// A graph stored twice, once forward and once with every edge reversed.
///
/// A shortest-path tree *towards* a vertex is the same as a tree *from* it on
/// the reversed graph, so both directions are plain forward searches.
#[derive(Clone, Serialize, Deserialize)]
pub struct ReversibleGraph<G: Graph + Default> {
    out_graph: G,
    in_graph: G,
}

impl<G: Graph + Default> Default for ReversibleGraph<G> {
    fn default() -> Self {
        ReversibleGraph {
            out_graph: G::default(),
            in_graph: G::default(),
        }
    }
}

impl<G: Graph + Default> ReversibleGraph<G> {
    pub fn out_graph(&self) -> &G {
        &self.out_graph
    }

    pub fn in_graph(&self) -> &G {
        &self.in_graph
    }

    pub fn number_of_vertices(&self) -> u32 {
        std::cmp::max(
            self.out_graph.number_of_vertices(),
            self.in_graph.number_of_vertices(),
        )
    }

    pub fn add_edge(&mut self, edge: &WeightedEdge) {
        self.out_graph
            .set_weight(&edge.unweighted(), Some(edge.weight));
        self.in_graph
            .set_weight(&edge.reversed().unweighted(), Some(edge.weight));
    }

    /// Adds the edge in both travel directions, as road segments usually are.
    pub fn add_edge_bidirectional(&mut self, edge: &WeightedEdge) {
        self.add_edge(edge);
        self.add_edge(&edge.reversed());
    }

    pub fn from_edges(edges: &[WeightedEdge]) -> ReversibleGraph<G> {
        let mut graph = ReversibleGraph::default();
        edges.iter().for_each(|edge| graph.add_edge(edge));
        graph
    }

    pub fn from_fmi_file(path: &Path) -> Result<ReversibleGraph<G>> {
        let edges = read_edges_from_fmi_file(path)?;
        Ok(Self::from_edges(&edges))
    }

    /// Loads a graph from an `.fmi` text file or, for any other extension,
    /// the bincode format `write_bincode_file` produces. The bincode form
    /// skips re-sorting the adjacency vectors, which dominates fmi loading
    /// on large graphs.
    pub fn from_file(path: &Path) -> Result<ReversibleGraph<G>>
    where
        G: serde::de::DeserializeOwned,
    {
        if path.extension().is_some_and(|extension| extension == "fmi") {
            return Self::from_fmi_file(path);
        }

        let reader = BufReader::new(File::open(path)?);
        bincode::deserialize_from(reader).map_err(|error| Error::Format(error.to_string()))
    }

    pub fn write_bincode_file(&self, path: &Path) -> Result<()>
    where
        G: serde::Serialize,
    {
        let writer = BufWriter::new(File::create(path)?);
        bincode::serialize_into(writer, self).map_err(|error| Error::Format(error.to_string()))
    }
}

/// Builds a bidirectional `width` x `height` grid where vertex `(x, y)` has
/// id `y * width + x`. Edge weights come from the callback, called with the
/// crossing coordinate fixed: `(x, y, true)` for the horizontal edge from
/// `(x, y)` to `(x + 1, y)` and `(x, y, false)` for the vertical edge from
/// `(x, y)` to `(x, y + 1)`.
pub fn grid_graph<G: Graph + Default>(
    width: u32,
    height: u32,
    edge_weight: impl Fn(u32, u32, bool) -> u32,
) -> ReversibleGraph<G> {
    let mut graph = ReversibleGraph::default();

    for y in 0..height {
        for x in 0..width {
            let vertex: Vertex = y * width + x;

            if x + 1 < width {
                let weight = edge_weight(x, y, true);
                graph.add_edge_bidirectional(&WeightedEdge::new(vertex, vertex + 1, weight));
            }

            if y + 1 < height {
                let weight = edge_weight(x, y, false);
                graph.add_edge_bidirectional(&WeightedEdge::new(vertex, vertex + width, weight));
            }
        }
    }

    graph
}
