//! Shortest Path Solver - Dijkstra over uploaded weighted graphs
//!
//! Graphs are built from an edge list or an adjacency matrix, held by the caller
//! (or by a server-side session), and queried for the shortest path between two
//! string-identified nodes. Edge weights must be finite and non-negative.

pub mod algorithm;
pub mod data_structures;
pub mod graph;
pub mod ingest;
pub mod web;

pub use algorithm::{dijkstra::Dijkstra, solve, PathResult, RunStats, ShortestPathAlgorithm};
/// Re-export main types for convenient use
pub use graph::{Node, WeightedGraph};
pub use ingest::MatrixPolicy;

/// Error types for the library
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid edge weight: {0} (weights must be finite and non-negative)")]
    InvalidWeight(f64),

    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Broken graph invariant: {0}")]
    BrokenInvariant(String),
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, Error>;
