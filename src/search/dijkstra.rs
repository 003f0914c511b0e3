use super::{
    collections::{
        dijkstra_data::{DijkstraData, DijkstraDataVec, Path},
        vertex_distance_queue::{VertexDistanceQueue, VertexDistanceQueueBinaryHeap},
        vertex_expanded_data::{VertexExpandedData, VertexExpandedDataVec},
    },
    DistanceHeuristic,
};
use crate::graphs::{Distance, EdgeWeighting, Graph, Vertex};

/// Result of a one-to-one search that also counts how many vertices were
/// settled before termination.
pub struct SearchOutcome {
    pub path: Option<Path>,
    pub settled_vertices: u32,
}

/// Grows a shortest-path tree from all seed vertices at once, every seed
/// starting at distance zero. With a single seed this is plain Dijkstra; with
/// several, each vertex ends up with its distance to the nearest seed.
pub fn dijkstra_multi_source(
    graph: &dyn Graph,
    weighting: &dyn EdgeWeighting,
    reverse: bool,
    data: &mut dyn DijkstraData,
    expanded: &mut dyn VertexExpandedData,
    queue: &mut dyn VertexDistanceQueue,
    sources: &[Vertex],
) {
    for &source in sources {
        data.set_distance(source, 0);
        queue.insert(source, 0);
    }

    while let Some(tail) = queue.pop() {
        if expanded.expand(tail) {
            continue;
        }

        let distance_tail = data.get_distance(tail);

        for edge in graph.edges(tail) {
            let Some(edge_weight) = weighting.calc_weight(&edge, reverse) else {
                continue;
            };

            let current_distance_head = data.get_distance(edge.head);
            // saturating add keeps an overflowing distance at the
            // unreached sentinel instead of wrapping
            let alternative_distance_head = distance_tail.saturating_add(edge_weight);
            if alternative_distance_head < current_distance_head {
                data.set_distance(edge.head, alternative_distance_head);
                data.set_predecessor(edge.head, tail);
                queue.insert(edge.head, alternative_distance_head);
            }
        }
    }
}

/// One-to-all tree from a single source, with the working sets allocated
/// internally.
pub fn dijkstra_one_to_all(
    graph: &dyn Graph,
    weighting: &dyn EdgeWeighting,
    reverse: bool,
    source: Vertex,
) -> DijkstraDataVec {
    let mut data = DijkstraDataVec::new(graph);
    let mut expanded = VertexExpandedDataVec::new(graph);
    let mut queue = VertexDistanceQueueBinaryHeap::new();

    dijkstra_multi_source(
        graph,
        weighting,
        reverse,
        &mut data,
        &mut expanded,
        &mut queue,
        &[source],
    );

    data
}

/// One-to-all tree from several sources at once, with the working sets
/// allocated internally.
pub fn dijkstra_multi_source_to_all(
    graph: &dyn Graph,
    weighting: &dyn EdgeWeighting,
    reverse: bool,
    sources: &[Vertex],
) -> DijkstraDataVec {
    let mut data = DijkstraDataVec::new(graph);
    let mut expanded = VertexExpandedDataVec::new(graph);
    let mut queue = VertexDistanceQueueBinaryHeap::new();

    dijkstra_multi_source(
        graph,
        weighting,
        reverse,
        &mut data,
        &mut expanded,
        &mut queue,
        sources,
    );

    data
}

/// The reached vertex with the largest finite distance. Ties go to the
/// lowest vertex id so repeated runs stay reproducible.
pub fn farthest_vertex(data: &DijkstraDataVec) -> Option<(Vertex, Distance)> {
    let mut farthest = None;

    for (vertex, &distance) in data.distances.iter().enumerate() {
        if distance == Distance::MAX {
            continue;
        }

        match farthest {
            Some((_, max_distance)) if distance <= max_distance => {}
            _ => farthest = Some((vertex as Vertex, distance)),
        }
    }

    farthest
}

/// Number of vertices the tree reached.
pub fn reached_vertices(data: &DijkstraDataVec) -> u32 {
    data.distances
        .iter()
        .filter(|&&distance| distance != Distance::MAX)
        .count() as u32
}

pub fn dijkstra_one_to_one(
    graph: &dyn Graph,
    weighting: &dyn EdgeWeighting,
    source: Vertex,
    target: Vertex,
) -> SearchOutcome {
    let mut data = DijkstraDataVec::new(graph);
    let mut expanded = VertexExpandedDataVec::new(graph);
    let mut queue = VertexDistanceQueueBinaryHeap::new();
    let mut settled_vertices = 0;

    data.set_distance(source, 0);
    queue.insert(source, 0);

    while let Some(tail) = queue.pop() {
        if expanded.expand(tail) {
            continue;
        }
        settled_vertices += 1;
        if tail == target {
            break;
        }

        let distance_tail = data.get_distance(tail);

        for edge in graph.edges(tail) {
            let Some(edge_weight) = weighting.calc_weight(&edge, false) else {
                continue;
            };

            let current_distance_head = data.get_distance(edge.head);
            let alternative_distance_head = distance_tail.saturating_add(edge_weight);
            if alternative_distance_head < current_distance_head {
                data.set_distance(edge.head, alternative_distance_head);
                data.set_predecessor(edge.head, tail);
                queue.insert(edge.head, alternative_distance_head);
            }
        }
    }

    SearchOutcome {
        path: data.get_path(target),
        settled_vertices,
    }
}

/// A* guided by the heuristic's lower bound towards the target. With an
/// admissible heuristic the returned path is a shortest path; the tighter
/// the bound, the fewer vertices get settled.
pub fn a_star_one_to_one(
    graph: &dyn Graph,
    weighting: &dyn EdgeWeighting,
    heuristic: &dyn DistanceHeuristic,
    source: Vertex,
    target: Vertex,
) -> SearchOutcome {
    let mut data = DijkstraDataVec::new(graph);
    let mut expanded = VertexExpandedDataVec::new(graph);
    let mut queue = VertexDistanceQueueBinaryHeap::new();
    let mut settled_vertices = 0;

    data.set_distance(source, 0);
    queue.insert(source, heuristic.lower_bound(source, target));

    while let Some(tail) = queue.pop() {
        if expanded.expand(tail) {
            continue;
        }
        settled_vertices += 1;
        if tail == target {
            break;
        }

        let distance_tail = data.get_distance(tail);

        for edge in graph.edges(tail) {
            let Some(edge_weight) = weighting.calc_weight(&edge, false) else {
                continue;
            };

            let current_distance_head = data.get_distance(edge.head);
            let alternative_distance_head = distance_tail.saturating_add(edge_weight);
            if alternative_distance_head < current_distance_head {
                data.set_distance(edge.head, alternative_distance_head);
                data.set_predecessor(edge.head, tail);

                let estimate = alternative_distance_head
                    .saturating_add(heuristic.lower_bound(edge.head, target));
                queue.insert(edge.head, estimate);
            }
        }
    }

    SearchOutcome {
        path: data.get_path(target),
        settled_vertices,
    }
}
