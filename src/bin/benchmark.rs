use std::time::{Duration, Instant};

use shortest_path_solver::algorithm::{dijkstra, reconstruct_path};
use shortest_path_solver::graph::generators::{generate_grid, generate_random, node_name};
use shortest_path_solver::graph::WeightedGraph;

// Function to benchmark one run plus a path query on a graph
fn benchmark_graph(name: &str, graph: &mut WeightedGraph, source: &str, target: &str) -> Duration {
    println!(
        "Running Dijkstra on {} with {} nodes and {} edges...",
        name,
        graph.node_count(),
        graph.edge_count()
    );

    let start = Instant::now();
    let stats = match dijkstra(graph, source) {
        Ok(stats) => stats,
        Err(err) => {
            eprintln!("  - run failed: {}", err);
            return start.elapsed();
        }
    };
    let path = reconstruct_path(graph, target);
    let duration = start.elapsed();

    let reachable = graph.nodes().filter(|node| node.is_reached()).count();
    println!(
        "  - {} reachable nodes, {} relaxations, {} stale entries in {:?}",
        reachable, stats.edges_relaxed, stats.stale_entries_skipped, duration
    );
    match path {
        Ok(result) => match (result.path, result.distance) {
            (Some(path), Some(distance)) => {
                println!("  - {} -> {}: {} hops, distance {:.2}", source, target, path.len() - 1, distance)
            }
            _ => println!("  - {} is unreachable from {}", target, source),
        },
        Err(err) => eprintln!("  - path reconstruction failed: {}", err),
    }

    duration
}

fn main() -> shortest_path_solver::Result<()> {
    env_logger::init();

    // Define graph sizes to test
    let graph_sizes = vec![1_000, 10_000, 100_000];

    for &size in &graph_sizes {
        let mut graph = generate_random(size, 4.0)?;
        let name = format!("random graph ({} nodes)", size);
        benchmark_graph(&name, &mut graph, &node_name(0), &node_name(size - 1));
        println!();
    }

    for &side in &[32usize, 128, 316] {
        let mut graph = generate_grid(side, side)?;
        let name = format!("{}x{} grid", side, side);
        benchmark_graph(&name, &mut graph, &node_name(0), &node_name(side * side - 1));
        println!();
    }

    Ok(())
}
