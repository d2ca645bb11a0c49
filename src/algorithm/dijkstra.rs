use log::debug;
use ordered_float::OrderedFloat;

use crate::algorithm::{RunStats, ShortestPathAlgorithm};
use crate::data_structures::BinaryHeapWrapper;
use crate::graph::WeightedGraph;
use crate::{Error, Result};

/// Classic Dijkstra's algorithm with a lazily invalidated binary-heap frontier
#[derive(Debug, Default, Clone, Copy)]
pub struct Dijkstra;

impl Dijkstra {
    /// Creates a new Dijkstra algorithm instance
    pub fn new() -> Self {
        Dijkstra
    }
}

impl ShortestPathAlgorithm for Dijkstra {
    fn name(&self) -> &'static str {
        "Dijkstra"
    }

    fn compute_shortest_paths(&self, graph: &mut WeightedGraph, source: &str) -> Result<RunStats> {
        let source_slot = graph
            .index_of(source)
            .ok_or_else(|| Error::NodeNotFound(source.to_string()))?;

        debug!(
            "Running Dijkstra from {} over {} nodes and {} edges",
            source,
            graph.node_count(),
            graph.edge_count()
        );

        // Results of any earlier run must not leak into this one
        graph.reset_working_state();
        graph.node_at_mut(source_slot).dist = 0.0;

        let mut stats = RunStats {
            source: source.to_string(),
            ..RunStats::default()
        };

        let mut queue = BinaryHeapWrapper::new();
        queue.push(source_slot, OrderedFloat(0.0));

        // Main Dijkstra loop
        while let Some((u, OrderedFloat(dist_u))) = queue.pop() {
            // If we've already found a shorter path to u, skip
            if dist_u > graph.node_at(u).dist {
                stats.stale_entries_skipped += 1;
                continue;
            }
            stats.nodes_settled += 1;

            // Relax all outgoing edges
            let degree = graph.outgoing(u).len();
            for i in 0..degree {
                let (v, weight) = graph.outgoing(u)[i];
                let candidate = dist_u + weight;
                stats.edges_scanned += 1;

                if candidate < graph.node_at(v).dist {
                    let prev = graph.node_at(u).id().to_string();
                    let neighbor = graph.node_at_mut(v);
                    neighbor.dist = candidate;
                    neighbor.prev = Some(prev);
                    queue.push(v, OrderedFloat(candidate));
                    stats.edges_relaxed += 1;
                }
            }
        }

        debug!(
            "Dijkstra from {} settled {} nodes, relaxed {} of {} edges, skipped {} stale entries",
            source, stats.nodes_settled, stats.edges_relaxed, stats.edges_scanned, stats.stale_entries_skipped
        );

        Ok(stats)
    }
}
