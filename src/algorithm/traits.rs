use crate::graph::WeightedGraph;
use crate::{Error, Result};

/// Summary of one shortest path run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunStats {
    /// Source node id
    pub source: String,

    /// Nodes extracted from the frontier with a current distance
    pub nodes_settled: usize,

    /// Adjacency entries examined
    pub edges_scanned: usize,

    /// Adjacency entries that improved a tentative distance
    pub edges_relaxed: usize,

    /// Superseded frontier entries discarded on extraction
    pub stale_entries_skipped: usize,
}

/// Shortest path from the last run's source to one target
#[derive(Debug, Clone, PartialEq)]
pub struct PathResult {
    /// Node ids from source to target inclusive, `None` if the target is unreachable
    pub path: Option<Vec<String>>,

    /// Total path weight, `None` if the target is unreachable
    pub distance: Option<f64>,
}

impl PathResult {
    pub fn unreachable() -> Self {
        PathResult {
            path: None,
            distance: None,
        }
    }

    pub fn is_reachable(&self) -> bool {
        self.path.is_some()
    }
}

/// Trait for shortest path algorithms that record their results in the graph's
/// per-node working state
pub trait ShortestPathAlgorithm {
    /// Compute shortest paths from a source node to all other nodes
    ///
    /// Any working state left by a previous run is discarded first.
    fn compute_shortest_paths(&self, graph: &mut WeightedGraph, source: &str) -> Result<RunStats>;

    /// Get the name of the algorithm
    fn name(&self) -> &'static str;

    /// Get the shortest path from the last run's source to `target`
    ///
    /// Only reads the graph, so it can be called for any number of targets after a
    /// single run.
    fn get_path(&self, graph: &WeightedGraph, target: &str) -> Result<PathResult> {
        reconstruct_path(graph, target)
    }
}

/// Walks predecessor links back from `target` to the run's source
pub fn reconstruct_path(graph: &WeightedGraph, target: &str) -> Result<PathResult> {
    let target_node = graph.get_node(target)?;
    if !target_node.is_reached() {
        return Ok(PathResult::unreachable());
    }

    let mut path = vec![target_node.id().to_string()];
    let mut current = target_node;

    while let Some(prev_id) = current.prev() {
        // a simple path never visits more nodes than the graph has
        if path.len() >= graph.node_count() {
            return Err(Error::BrokenInvariant(format!(
                "predecessor chain from {} does not reach a source",
                target
            )));
        }

        current = graph.get_node(prev_id).map_err(|_| {
            Error::BrokenInvariant(format!(
                "predecessor {} of {} is not in the graph",
                prev_id,
                current.id()
            ))
        })?;
        path.push(current.id().to_string());
    }

    if current.dist() != 0.0 {
        return Err(Error::BrokenInvariant(format!(
            "predecessor chain from {} ends at {} with distance {}",
            target,
            current.id(),
            current.dist()
        )));
    }

    path.reverse();

    Ok(PathResult {
        path: Some(path),
        distance: Some(target_node.dist()),
    })
}
