use rand::{seq::IteratorRandom, Rng};
use tracing::info;

use crate::{
    error::{Error, Result},
    graphs::{reversible_graph::ReversibleGraph, EdgeWeighting, Graph, Vertex},
    search::dijkstra::{
        dijkstra_multi_source_to_all, dijkstra_one_to_all, farthest_vertex, reached_vertices,
    },
};

/// Picks `count` landmarks by iterative farthest-point search.
///
/// The tree from fixed seed vertex 0 yields the first landmark as its
/// farthest vertex; every further landmark is the vertex farthest from all
/// landmarks chosen so far, grown as one multi-source tree. Greedily
/// maximizes the minimum distance to the existing set, which spreads
/// landmarks towards the rim of the network.
///
/// The graph is assumed to be one connected component. On a graph with
/// several, all landmarks end up in the component of vertex 0 and the rest
/// of the table keeps its unreachable fill.
pub fn select_landmarks<G: Graph + Default>(
    graph: &ReversibleGraph<G>,
    weighting: &dyn EdgeWeighting,
    count: usize,
) -> Result<Vec<Vertex>> {
    if count == 0 {
        return Ok(Vec::new());
    }
    if graph.number_of_vertices() == 0 {
        return Err(Error::InvalidArgument(
            "cannot select landmarks on an empty graph".to_string(),
        ));
    }

    let seed_tree = dijkstra_one_to_all(graph.out_graph(), weighting, false, 0);
    let reachable = reached_vertices(&seed_tree);
    if (count as u32) > reachable {
        return Err(Error::InvalidArgument(format!(
            "cannot select {} landmarks, only {} vertices are reachable from vertex 0",
            count, reachable
        )));
    }

    let (first_landmark, _) = farthest_vertex(&seed_tree).expect("seed vertex is always reached");
    let mut landmarks = vec![first_landmark];

    let log_offset = std::cmp::max(1, count / 4);
    for index in 1..count {
        let tree = dijkstra_multi_source_to_all(graph.out_graph(), weighting, false, &landmarks);
        let (landmark, _) = farthest_vertex(&tree).expect("landmarks are always reached");
        landmarks.push(landmark);

        if index % log_offset == 0 {
            info!(
                "finding landmarks, progress {}%",
                (100.0 * index as f64 / count as f64) as u32
            );
        }
    }

    info!(
        "finding landmarks done for the subnetwork of {} vertices around vertex 0",
        reachable
    );

    Ok(landmarks)
}

/// Uniformly random landmarks. Cheaper than farthest-point selection and
/// good enough for experiments, but gives no spread guarantee.
pub fn select_random_landmarks<G: Graph + Default>(
    graph: &ReversibleGraph<G>,
    count: usize,
    rng: &mut impl Rng,
) -> Vec<Vertex> {
    (0..graph.number_of_vertices()).choose_multiple(rng, count)
}
