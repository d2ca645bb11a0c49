pub mod dijkstra;
pub mod traits;

pub use traits::{reconstruct_path, PathResult, RunStats, ShortestPathAlgorithm};

use crate::graph::WeightedGraph;
use crate::{Error, Result};
use dijkstra::Dijkstra;

/// Runs Dijkstra's algorithm from `source`, leaving distances and predecessors in
/// the graph's working state
pub fn dijkstra(graph: &mut WeightedGraph, source: &str) -> Result<RunStats> {
    Dijkstra::new().compute_shortest_paths(graph, source)
}

/// Shortest path from `source` to `target`
///
/// Both ids are checked before the run so an unknown target leaves the graph's
/// working state untouched.
pub fn solve(graph: &mut WeightedGraph, source: &str, target: &str) -> Result<PathResult> {
    for id in [source, target] {
        if !graph.contains_node(id) {
            return Err(Error::NodeNotFound(id.to_string()));
        }
    }

    dijkstra(graph, source)?;
    reconstruct_path(graph, target)
}
