use landmark_paths::{
    graphs::{
        reversible_graph::{grid_graph, ReversibleGraph},
        vec_vec_graph::VecVecGraph,
        DistanceWeighting, Vertex,
    },
    search::{
        alt::{heuristic::LandmarkAltHeuristic, landmark_storage::LandmarkStorage},
        dijkstra::{a_star_one_to_one, dijkstra_one_to_one},
        DistanceHeuristic,
    },
    storage::Directory,
};

/// 15 x 15 grid with every edge at weight 10, vertex `(x, y)` has id
/// `y * 15 + x`. Distances on it are exact Manhattan distances times 10.
fn grid() -> ReversibleGraph<VecVecGraph> {
    grid_graph(15, 15, |_, _, _| 10)
}

fn prepared_storage(graph: &ReversibleGraph<VecVecGraph>) -> LandmarkStorage {
    let mut storage = LandmarkStorage::new(
        &Directory::ram(),
        graph.number_of_vertices(),
        4,
        Box::new(DistanceWeighting),
    );
    storage.create_landmarks(graph).unwrap();
    storage
}

#[test]
fn landmarks_spread_over_the_grid() {
    let graph = grid();
    let storage = prepared_storage(&graph);

    // farthest-point selection on a uniform grid: the corner opposite the
    // seed, the seed corner, one corner of the remaining diagonal, and then
    // the middle, which is as far from three corners as the last corner is
    assert_eq!(&[224, 0, 14, 112], storage.landmarks());

    // every pair of landmarks is at least a grid width apart
    let manhattan = |a: Vertex, b: Vertex| {
        let (ax, ay) = (a % 15, a / 15);
        let (bx, by) = (b % 15, b / 15);
        ax.abs_diff(bx) + ay.abs_diff(by)
    };
    for &a in storage.landmarks() {
        for &b in storage.landmarks() {
            if a != b {
                assert!(manhattan(a, b) >= 14);
            }
        }
    }
}

#[test]
fn landmark_weights_are_grid_distances() {
    let graph = grid();
    let storage = prepared_storage(&graph);

    assert_eq!(0, storage.get_from_weight(0, 224).unwrap());

    // vertex 47 is (2, 3)
    assert_eq!(230, storage.get_from_weight(0, 47).unwrap());
    assert_eq!(50, storage.get_from_weight(1, 47).unwrap());
    assert_eq!(150, storage.get_from_weight(2, 47).unwrap());
    assert_eq!(90, storage.get_from_weight(3, 47).unwrap());

    // the grid is undirected, so both directions must agree everywhere
    for landmark_index in 0..storage.landmark_count() {
        for vertex in 0..graph.number_of_vertices() {
            assert_eq!(
                storage.get_from_weight(landmark_index, vertex).unwrap(),
                storage.get_to_weight(landmark_index, vertex).unwrap()
            );
        }
    }
}

#[test]
fn active_selection_prefers_tight_landmarks() {
    let graph = grid();
    let storage = prepared_storage(&graph);

    // for 27 = (12, 1) towards 47 = (2, 3) the top-right corner landmark 14
    // lies almost behind the source and bounds the pair best; the two
    // opposite corners tie and the first of them wins the second slot
    let active = storage.select_active(27, 47, 2, false).unwrap();
    assert_eq!(vec![2, 0], active.indices);
    assert_eq!(vec![150, 230], active.active_froms);
    assert_eq!(vec![150, 230], active.active_tos);

    // a reverse search ranks by the bound for the swapped pair
    let reverse_active = storage.select_active(47, 27, 2, true).unwrap();
    assert_eq!(vec![2, 0], reverse_active.indices);
}

#[test]
fn lower_bounds_never_overestimate() {
    let graph = grid();
    let storage = prepared_storage(&graph);

    let weighting = DistanceWeighting;
    for source in [0, 37, 61, 112, 224] {
        for target in [8, 14, 112, 200, 210] {
            let heuristic = LandmarkAltHeuristic::new(&storage, source, target, 2).unwrap();
            let bound = heuristic.lower_bound(source, target);

            let outcome = dijkstra_one_to_one(graph.out_graph(), &weighting, source, target);
            let distance = outcome.path.unwrap().distance;
            assert!(
                bound <= distance,
                "bound {} exceeds distance {} for {} -> {}",
                bound,
                distance,
                source,
                target
            );
        }
    }
}

#[test]
fn guided_search_settles_fewer_vertices() {
    let graph = grid();
    let storage = prepared_storage(&graph);
    let weighting = DistanceWeighting;

    // 105 = (0, 7) to 119 = (14, 7): the straight row is the unique
    // shortest path, and the corner landmarks bound it exactly
    let baseline = dijkstra_one_to_one(graph.out_graph(), &weighting, 105, 119);
    let heuristic = LandmarkAltHeuristic::new(&storage, 105, 119, 2).unwrap();
    let guided = a_star_one_to_one(graph.out_graph(), &weighting, &heuristic, 105, 119);

    let baseline_path = baseline.path.unwrap();
    let guided_path = guided.path.unwrap();
    assert_eq!(140, baseline_path.distance);
    assert_eq!(baseline_path.vertices, guided_path.vertices);
    assert_eq!((105..=119).collect::<Vec<Vertex>>(), guided_path.vertices);
    assert!(guided.settled_vertices < baseline.settled_vertices);

    // a pair with many equally short paths still gets the right distance
    let baseline = dijkstra_one_to_one(graph.out_graph(), &weighting, 41, 183);
    let heuristic = LandmarkAltHeuristic::new(&storage, 41, 183, 2).unwrap();
    let guided = a_star_one_to_one(graph.out_graph(), &weighting, &heuristic, 41, 183);

    assert_eq!(180, baseline.path.unwrap().distance);
    assert_eq!(180, guided.path.unwrap().distance);
}
