use std::{path::PathBuf, time::Instant};

use clap::Parser;
use landmark_paths::graphs::{reversible_graph::ReversibleGraph, vec_vec_graph::VecVecGraph};

/// Converts an .fmi graph into the bincode format, which loads much faster.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Infile in .fmi format
    #[arg(short, long)]
    infile: PathBuf,
    /// Outfile in bincode format
    #[arg(short, long)]
    outfile: PathBuf,
}

fn main() {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    println!("Loading graph");
    let start = Instant::now();
    let graph: ReversibleGraph<VecVecGraph> =
        ReversibleGraph::from_fmi_file(&args.infile).expect("failed to load graph");
    println!("it took {:?} to load the graph", start.elapsed());

    println!("Writing graph");
    graph
        .write_bincode_file(&args.outfile)
        .expect("failed to write graph");
}
