use crate::graphs::{Distance, Vertex};

pub mod alt;
pub mod collections;
pub mod dijkstra;

/// Estimates the distance between two vertices. `lower_bound` must never
/// exceed the true shortest-path distance, otherwise searches guided by it
/// lose their optimality guarantee.
pub trait DistanceHeuristic: Send + Sync {
    fn lower_bound(&self, _source: Vertex, _target: Vertex) -> Distance {
        0
    }

    fn upper_bound(&self, _source: Vertex, _target: Vertex) -> Distance {
        Distance::MAX
    }
}

/// Heuristic without any knowledge, degrading A* to plain Dijkstra.
pub struct TrivialHeuristic {}

impl DistanceHeuristic for TrivialHeuristic {}
