use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use indicatif::ProgressIterator;
use serde_derive::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub mod reversible_graph;
pub mod vec_vec_graph;

pub type Vertex = u32;
pub type Distance = u32;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
    pub tail: Vertex,
    pub head: Vertex,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeightedEdge {
    pub tail: Vertex,
    pub head: Vertex,
    pub weight: Distance,
}

impl WeightedEdge {
    pub fn new(tail: Vertex, head: Vertex, weight: Distance) -> WeightedEdge {
        WeightedEdge { tail, head, weight }
    }

    pub fn unweighted(&self) -> Edge {
        Edge {
            tail: self.tail,
            head: self.head,
        }
    }

    pub fn reversed(&self) -> WeightedEdge {
        WeightedEdge {
            tail: self.head,
            head: self.tail,
            weight: self.weight,
        }
    }

    pub fn tailless(&self) -> TaillessEdge {
        TaillessEdge {
            head: self.head,
            weight: self.weight,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
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
        (0..self.number_of_vertices())
            .map(|vertex| self.edges(vertex).count() as u32)
            .sum::<u32>()
    }

    fn edges(&self, tail: Vertex) -> Box<dyn ExactSizeIterator<Item = WeightedEdge> + Send + '_>;

    fn get_weight(&self, edge: &Edge) -> Option<Distance>;

    fn set_weight(&mut self, edge: &Edge, weight: Option<Distance>);
}

/// Evaluates the cost of traversing an edge. `None` means the edge cannot be
/// traversed in the requested direction, i.e. its weight is infinite.
///
/// Landmark selection deliberately uses a different weighting than routing
/// does. Cost features such as ferries make a "fastest" style weighting
/// geographically lopsided, while plain distance keeps landmarks spread out.
pub trait EdgeWeighting: Send + Sync {
    fn name(&self) -> &str;

    fn calc_weight(&self, edge: &WeightedEdge, reverse: bool) -> Option<Distance>;

    /// The smallest weight any path of the given length can have. Used to
    /// bound the largest weight the quantized table has to represent.
    fn min_weight_for_distance(&self, distance: Distance) -> f64 {
        distance as f64
    }
}

/// Weighting that takes the stored edge weight as-is, in both directions.
pub struct DistanceWeighting;

impl EdgeWeighting for DistanceWeighting {
    fn name(&self) -> &str {
        "shortest"
    }

    fn calc_weight(&self, edge: &WeightedEdge, _reverse: bool) -> Option<Distance> {
        Some(edge.weight)
    }
}

pub fn read_edges_from_fmi_file(file: &Path) -> Result<Vec<WeightedEdge>> {
    let file = File::open(file)?;
    let reader = BufReader::new(file);

    let mut lines = reader.lines();

    // skip comment lines
    while let Some(next_line) = lines.next() {
        if !next_line?.starts_with('#') {
            break;
        }
    }

    let number_of_vertices: usize = parse_next_line(&mut lines)?;
    let number_of_edges: usize = parse_next_line(&mut lines)?;

    let mut edges = Vec::with_capacity(number_of_edges);
    for line in lines
        .progress_count((number_of_vertices + number_of_edges) as u64)
        .skip(number_of_vertices)
        .take(number_of_edges)
    {
        // srcIDX trgIDX cost type maxspeed
        let line = line?;
        let mut values = line.split_whitespace();
        let tail = parse_value(values.next(), "tail", &line)?;
        let head = parse_value(values.next(), "head", &line)?;
        let weight = parse_value(values.next(), "weight", &line)?;
        edges.push(WeightedEdge { tail, head, weight });
    }

    Ok(edges)
}

fn parse_next_line<T: std::str::FromStr>(
    lines: &mut impl Iterator<Item = std::io::Result<String>>,
) -> Result<T> {
    let line = lines
        .next()
        .ok_or_else(|| Error::Format("unexpected end of file".to_string()))??;
    line.trim()
        .parse()
        .map_err(|_| Error::Format(format!("unable to parse header line {}", line)))
}

fn parse_value(value: Option<&str>, what: &str, line: &str) -> Result<u32> {
    value
        .ok_or_else(|| Error::Format(format!("no {} found in line {}", what, line)))?
        .parse()
        .map_err(|_| Error::Format(format!("unable to parse {} in line {}", what, line)))
}
