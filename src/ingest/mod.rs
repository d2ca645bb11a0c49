//! Translation of uploaded graph descriptions into [`WeightedGraph`] construction calls
//!
//! Parsers only check structure. Weight validation stays with
//! [`WeightedGraph::add_edge`], so a negative weight in either format surfaces as
//! [`Error::InvalidWeight`](crate::Error::InvalidWeight).
//!
//! [`WeightedGraph`]: crate::graph::WeightedGraph
//! [`WeightedGraph::add_edge`]: crate::graph::WeightedGraph::add_edge

pub mod adjacency_matrix;
pub mod edge_list;

pub use adjacency_matrix::{load_adjacency_matrix, AdjacencyMatrix};
pub use edge_list::{build_from_edge_list, load_edge_list, parse_edge_list, EdgeRecord};

use serde::{Deserialize, Serialize};

/// How adjacency-matrix cells map to edges
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatrixPolicy {
    /// Every cell (i, j) adds an edge in both directions, even for asymmetric input
    #[default]
    Bidirectional,

    /// Cell (i, j) adds only the edge from row i to column j
    Directed,
}

impl MatrixPolicy {
    pub fn is_bidirectional(self) -> bool {
        matches!(self, MatrixPolicy::Bidirectional)
    }
}
