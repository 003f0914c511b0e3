use landmark_paths::{
    graphs::{
        reversible_graph::ReversibleGraph, vec_vec_graph::VecVecGraph, DistanceWeighting,
        WeightedEdge,
    },
    search::alt::landmark_storage::{LandmarkStorage, WeightDirection},
    storage::Directory,
    Error,
};

fn path_graph() -> ReversibleGraph<VecVecGraph> {
    let mut graph = ReversibleGraph::default();
    graph.add_edge_bidirectional(&WeightedEdge::new(0, 1, 40));
    graph.add_edge_bidirectional(&WeightedEdge::new(1, 2, 40));
    graph
}

fn new_storage(directory: &Directory, graph: &ReversibleGraph<VecVecGraph>) -> LandmarkStorage {
    LandmarkStorage::new(
        directory,
        graph.number_of_vertices(),
        2,
        Box::new(DistanceWeighting),
    )
}

#[test]
fn store_and_load() {
    let graph = path_graph();
    let dir = tempfile::tempdir().unwrap();
    let directory = Directory::with_path(dir.path());

    let mut storage = new_storage(&directory, &graph);
    storage.create_landmarks(&graph).unwrap();

    assert!(storage.is_initialized());
    assert_eq!(&[2, 0], storage.landmarks());
    assert_eq!(40, storage.get_from_weight(0, 1).unwrap());

    storage.flush().unwrap();
    storage.close();
    assert!(storage.is_closed());
    // closing again must be harmless
    storage.close();

    let mut reloaded = new_storage(&directory, &graph);
    assert!(reloaded.load_existing().unwrap());
    assert_eq!(&[2, 0], reloaded.landmarks());
    assert_eq!(40, reloaded.get_from_weight(0, 1).unwrap());
    assert_eq!(40, reloaded.get_to_weight(0, 1).unwrap());
    assert_eq!(80, reloaded.get_from_weight(0, 0).unwrap());
    assert_eq!(0, reloaded.get_from_weight(0, 2).unwrap());
}

#[test]
fn load_without_prior_data_reports_false() {
    let graph = path_graph();
    let directory = Directory::ram();

    let mut storage = new_storage(&directory, &graph);
    assert!(!storage.load_existing().unwrap());
    assert!(!storage.is_initialized());
}

#[test]
fn initializing_twice_is_an_error() {
    let graph = path_graph();
    let directory = Directory::ram();

    let mut storage = new_storage(&directory, &graph);
    storage.create_landmarks(&graph).unwrap();

    assert!(matches!(
        storage.create_landmarks(&graph),
        Err(Error::InvalidState(_))
    ));
    assert!(matches!(
        storage.load_existing(),
        Err(Error::InvalidState(_))
    ));
}

#[test]
fn reading_weights_before_initialization_is_an_error() {
    let graph = path_graph();
    let storage = new_storage(&Directory::ram(), &graph);

    assert!(matches!(
        storage.get_from_weight(0, 1),
        Err(Error::InvalidState(_))
    ));
    assert!(matches!(
        storage.select_active(0, 1, 1, false),
        Err(Error::InvalidState(_))
    ));
}

#[test]
fn out_of_range_arguments_are_rejected() {
    let graph = path_graph();
    let mut storage = new_storage(&Directory::ram(), &graph);
    storage.create_landmarks(&graph).unwrap();

    assert!(matches!(
        storage.get_from_weight(2, 0),
        Err(Error::InvalidArgument(_))
    ));
    assert!(matches!(
        storage.get_from_weight(0, 3),
        Err(Error::InvalidArgument(_))
    ));
    assert!(matches!(
        storage.select_active(0, 3, 1, false),
        Err(Error::InvalidArgument(_))
    ));
}

#[test]
fn more_landmarks_than_reachable_vertices_fails_cleanly() {
    let graph = path_graph();
    let mut storage = LandmarkStorage::new(
        &Directory::ram(),
        graph.number_of_vertices(),
        5,
        Box::new(DistanceWeighting),
    );

    assert!(matches!(
        storage.create_landmarks(&graph),
        Err(Error::InvalidArgument(_))
    ));
}

#[test]
fn infinity_cells_error_on_lookup() {
    let graph = path_graph();
    let dir = tempfile::tempdir().unwrap();
    let directory = Directory::with_path(dir.path());

    let mut storage = new_storage(&directory, &graph);
    storage.create_landmarks(&graph).unwrap();
    storage.flush().unwrap();

    // corrupt the from cell of vertex 0 / landmark 0 into the infinity
    // sentinel, as a table written by a weighting with untraversable edges
    // would hold
    let file = dir.path().join("landmarks_shortest");
    let mut bytes = std::fs::read(&file).unwrap();
    bytes[0] = 0xFF;
    bytes[1] = 0xFF;
    std::fs::write(&file, bytes).unwrap();

    let mut reloaded = new_storage(&directory, &graph);
    assert!(reloaded.load_existing().unwrap());

    assert!(reloaded
        .is_infinity(0, 0, WeightDirection::From)
        .unwrap());
    assert!(matches!(
        reloaded.get_from_weight(0, 0),
        Err(Error::UnreachableWeight {
            landmark: 0,
            vertex: 0
        })
    ));
    // the to cell is untouched
    assert!(!reloaded.is_infinity(0, 0, WeightDirection::To).unwrap());
    assert_eq!(80, reloaded.get_to_weight(0, 0).unwrap());
}

#[test]
fn disconnected_subnetwork_degrades_instead_of_failing() {
    // vertices 3 and 4 are a second component the landmarks never reach
    let mut graph: ReversibleGraph<VecVecGraph> = ReversibleGraph::default();
    graph.add_edge_bidirectional(&WeightedEdge::new(0, 1, 10));
    graph.add_edge_bidirectional(&WeightedEdge::new(1, 2, 10));
    graph.add_edge_bidirectional(&WeightedEdge::new(3, 4, 10));

    let mut storage = LandmarkStorage::new(
        &Directory::ram(),
        graph.number_of_vertices(),
        2,
        Box::new(DistanceWeighting),
    );
    storage.create_landmarks(&graph).unwrap();

    assert_eq!(&[2, 0], storage.landmarks());

    // cells of the unreached component keep the clamp fill: a uselessly
    // large but finite weight, not the infinity sentinel
    assert!(!storage.is_infinity(0, 3, WeightDirection::From).unwrap());
    assert_eq!(65534, storage.get_from_weight(0, 3).unwrap());
    assert_eq!(65534, storage.get_to_weight(1, 4).unwrap());

    // ranking still works, it just cannot tell the landmarks apart
    let active = storage.select_active(3, 4, 1, false).unwrap();
    assert_eq!(vec![0], active.indices);
}
