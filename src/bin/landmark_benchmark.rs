use std::{path::PathBuf, time::Instant};

use clap::Parser;
use landmark_paths::{
    graphs::{reversible_graph::ReversibleGraph, vec_vec_graph::VecVecGraph, DistanceWeighting},
    search::{
        alt::{heuristic::LandmarkAltHeuristic, landmark_storage::LandmarkStorage},
        dijkstra::{a_star_one_to_one, dijkstra_one_to_one},
    },
    storage::Directory,
};
use rand::{thread_rng, Rng};

/// Compares plain Dijkstra against landmark-guided A* on random pairs.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Infile in .fmi or bincode format
    #[arg(short, long)]
    graph: PathBuf,
    /// Directory holding a previously created landmark file
    #[arg(short, long)]
    landmark_dir: PathBuf,
    /// Number of landmarks the file was created with
    #[arg(short, long, default_value_t = 8)]
    number_of_landmarks: usize,
    /// Number of active landmarks per query
    #[arg(short, long, default_value_t = 2)]
    active_landmarks: usize,
    /// Number of random pairs
    #[arg(short = 'b', long, default_value_t = 100)]
    number_of_benchmarks: u32,
}

fn main() {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    println!("Loading graph");
    let graph: ReversibleGraph<VecVecGraph> =
        ReversibleGraph::from_file(&args.graph).expect("failed to load graph");

    let directory = Directory::with_path(&args.landmark_dir);
    let mut storage = LandmarkStorage::new(
        &directory,
        graph.number_of_vertices(),
        args.number_of_landmarks,
        Box::new(DistanceWeighting),
    );
    if !storage.load_existing().expect("failed to read landmark file") {
        println!("No landmark file found, run create_landmarks first");
        return;
    }

    let weighting = DistanceWeighting;
    let mut rng = thread_rng();
    let mut dijkstra_settled: u64 = 0;
    let mut alt_settled: u64 = 0;

    let start = Instant::now();
    for _ in 0..args.number_of_benchmarks {
        let source = rng.gen_range(0..graph.number_of_vertices());
        let target = rng.gen_range(0..graph.number_of_vertices());

        let baseline = dijkstra_one_to_one(graph.out_graph(), &weighting, source, target);

        let heuristic = LandmarkAltHeuristic::new(&storage, source, target, args.active_landmarks)
            .expect("failed to select active landmarks");
        let guided = a_star_one_to_one(graph.out_graph(), &weighting, &heuristic, source, target);

        assert_eq!(
            baseline.path.as_ref().map(|path| path.distance),
            guided.path.as_ref().map(|path| path.distance),
            "landmark guided search returned a different distance for {} -> {}",
            source,
            target
        );

        dijkstra_settled += baseline.settled_vertices as u64;
        alt_settled += guided.settled_vertices as u64;
    }

    println!(
        "{} pairs in {:?}: dijkstra settled {} vertices, landmark A* settled {} ({:.1}%)",
        args.number_of_benchmarks,
        start.elapsed(),
        dijkstra_settled,
        alt_settled,
        100.0 * alt_settled as f64 / dijkstra_settled as f64
    );
}
