use rayon::prelude::*;
use std::time::{Duration, Instant};

use shortest_route::graph::generators::generate_random_matrix;
use shortest_route::{shortest_path, Error};

// Time one query from vertex 1 to vertex n
fn benchmark_query(matrix: &[Vec<f64>]) -> (Duration, Result<usize, Error>) {
    let n = matrix.len();
    let start = Instant::now();
    let result = shortest_path(matrix, 1, n).map(|r| r.stats.pops);
    (start.elapsed(), result)
}

// Time every source against vertex n, one fresh graph per query, in parallel
fn benchmark_batch(matrix: &[Vec<f64>]) -> (Duration, usize) {
    let n = matrix.len();
    let start = Instant::now();
    let reachable = (1..=n)
        .into_par_iter()
        .filter(|&source| shortest_path(matrix, source, n).is_ok())
        .count();
    (start.elapsed(), reachable)
}

fn main() {
    // Matrix sizes to test
    let matrix_sizes = vec![100, 250, 500, 1_000, 2_000];

    // Probability that an off-diagonal cell holds an edge
    let edge_probability = 0.05;

    println!("=====================================================");
    println!("Benchmark: Dijkstra over dense adjacency matrices");
    println!("Edge probability: {}", edge_probability);
    println!("=====================================================");

    let mut results = Vec::new();

    for &size in &matrix_sizes {
        println!("\nGenerating random {}x{} matrix...", size, size);
        let matrix = generate_random_matrix(size, edge_probability);

        let (single_time, outcome) = benchmark_query(&matrix);
        match &outcome {
            Ok(pops) => println!("  - 1 -> {}: {} frontier pops in {:?}", size, pops, single_time),
            Err(err) => println!("  - 1 -> {}: {} ({:?})", size, err, single_time),
        }

        let (batch_time, reachable) = benchmark_batch(&matrix);
        println!(
            "  - all sources -> {}: {} reachable in {:?}",
            size, reachable, batch_time
        );

        results.push((size, single_time, batch_time, reachable));
    }

    // Print summary table
    println!("\n=====================================================");
    println!("Summary of Results");
    println!("=====================================================");
    println!(
        "{:<10} | {:<15} | {:<15} | {:<10}",
        "Vertices", "Single (ms)", "Batch (ms)", "Reachable"
    );
    println!("-----------------------------------------------------");

    for (size, single_time, batch_time, reachable) in &results {
        println!(
            "{:<10} | {:<15.3} | {:<15.3} | {:<10}",
            size,
            single_time.as_secs_f64() * 1000.0,
            batch_time.as_secs_f64() * 1000.0,
            reachable
        );
    }
}
