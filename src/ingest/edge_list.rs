use log::debug;
use serde::{Deserialize, Serialize};

use crate::graph::WeightedGraph;
use crate::{Error, Result};

/// One edge of an edge-list upload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub source: String,
    pub target: String,
    pub weight: f64,
    #[serde(default)]
    pub bidirectional: bool,
}

impl EdgeRecord {
    pub fn new(source: impl Into<String>, target: impl Into<String>, weight: f64, bidirectional: bool) -> Self {
        EdgeRecord {
            source: source.into(),
            target: target.into(),
            weight,
            bidirectional,
        }
    }
}

/// Parses a JSON array of edge records
pub fn parse_edge_list(json: &str) -> Result<Vec<EdgeRecord>> {
    serde_json::from_str(json).map_err(|err| Error::MalformedInput(format!("edge list: {}", err)))
}

/// Builds a graph from edge records, in order
///
/// The first rejected record aborts the build; no partially built graph is returned.
pub fn build_from_edge_list(records: &[EdgeRecord]) -> Result<WeightedGraph> {
    let mut graph = WeightedGraph::with_capacity(records.len());

    for (i, record) in records.iter().enumerate() {
        if record.source.is_empty() || record.target.is_empty() {
            return Err(Error::MalformedInput(format!("edge list record {} has an empty node id", i)));
        }

        graph.add_node(&record.source);
        graph.add_node(&record.target);
        graph.add_edge(&record.source, &record.target, record.weight, record.bidirectional)?;
    }

    debug!(
        "Built graph from {} edge records: {} nodes, {} adjacency entries",
        records.len(),
        graph.node_count(),
        graph.edge_count()
    );

    Ok(graph)
}

/// Parses and builds a graph from an edge-list JSON document
pub fn load_edge_list(json: &str) -> Result<WeightedGraph> {
    let records = parse_edge_list(json)?;
    build_from_edge_list(&records)
}
