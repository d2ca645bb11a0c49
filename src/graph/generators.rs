use crate::graph::WeightedGraph;
use crate::Result;
use rand::prelude::*;

/// Name of the `i`-th generated node
pub fn node_name(i: usize) -> String {
    format!("n{}", i)
}

/// Generates a random directed graph with `n` nodes and roughly `edge_factor * n`
/// edges, weights drawn uniformly from `1.0..100.0`. Self-loops are skipped.
pub fn generate_random(n: usize, edge_factor: f64) -> Result<WeightedGraph> {
    let mut graph = WeightedGraph::with_capacity(n);
    let mut rng = rand::thread_rng();

    for i in 0..n {
        graph.add_node(&node_name(i));
    }
    if n < 2 {
        return Ok(graph);
    }

    let edge_count = (edge_factor * n as f64) as usize;
    for _ in 0..edge_count {
        let u = rng.gen_range(0..n);
        let v = rng.gen_range(0..n);
        if u != v {
            let weight = rng.gen_range(1.0..100.0);
            graph.add_edge(&node_name(u), &node_name(v), weight, false)?;
        }
    }

    Ok(graph)
}

/// Generates a `width` x `height` grid with unit-weight bidirectional edges
/// between 4-neighbours. Node `(x, y)` is named `node_name(y * width + x)`.
pub fn generate_grid(width: usize, height: usize) -> Result<WeightedGraph> {
    let mut graph = WeightedGraph::with_capacity(width * height);

    let get_index = |x: usize, y: usize| -> usize { y * width + x };

    for y in 0..height {
        for x in 0..width {
            let current = node_name(get_index(x, y));
            graph.add_node(&current);

            if x + 1 < width {
                graph.add_edge(&current, &node_name(get_index(x + 1, y)), 1.0, true)?;
            }
            if y + 1 < height {
                graph.add_edge(&current, &node_name(get_index(x, y + 1)), 1.0, true)?;
            }
        }
    }

    Ok(graph)
}
