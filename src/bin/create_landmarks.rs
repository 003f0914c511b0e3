use std::{path::PathBuf, time::Instant};

use clap::Parser;
use landmark_paths::{
    graphs::{reversible_graph::ReversibleGraph, vec_vec_graph::VecVecGraph, DistanceWeighting},
    search::alt::landmark_storage::LandmarkStorage,
    storage::Directory,
};

/// Precomputes a landmark weight table for a graph and writes it to disk.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Infile in .fmi or bincode format
    #[arg(short, long)]
    graph: PathBuf,
    /// Directory the landmark file is written to
    #[arg(short, long)]
    landmark_dir: PathBuf,
    /// Number of landmarks
    #[arg(short, long, default_value_t = 8)]
    number_of_landmarks: usize,
}

fn main() {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    println!("Loading graph");
    let start = Instant::now();
    let graph: ReversibleGraph<VecVecGraph> =
        ReversibleGraph::from_file(&args.graph).expect("failed to load graph");
    println!("it took {:?} to load the graph", start.elapsed());

    let directory = Directory::with_path(&args.landmark_dir);
    let mut storage = LandmarkStorage::new(
        &directory,
        graph.number_of_vertices(),
        args.number_of_landmarks,
        Box::new(DistanceWeighting),
    );

    println!("Creating landmarks");
    let start = Instant::now();
    storage
        .create_landmarks(&graph)
        .expect("failed to create landmarks");
    println!("Creating landmarks took {:?}", start.elapsed());
    println!("Landmarks: {:?}", storage.landmarks());

    storage.flush().expect("failed to write the landmark file");
    storage.close();
}
