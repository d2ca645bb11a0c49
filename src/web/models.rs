use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::graph::WeightedGraph;
use crate::ingest::MatrixPolicy;

/// Adjacency-matrix upload body
#[derive(Debug, Deserialize)]
pub struct MatrixUpload {
    /// Header row of node ids followed by one row of cells per node
    pub matrix: Vec<Vec<Value>>,
    #[serde(default)]
    pub policy: MatrixPolicy,
}

/// Query parameters for a shortest path request
#[derive(Debug, Deserialize)]
pub struct SolveQuery {
    pub start_node_id: String,
    pub end_node_id: String,
}

/// Shortest path answer; both fields are null when the end node is unreachable
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SolveResponse {
    pub shortest_path: Option<Vec<String>>,
    pub total_distance: Option<f64>,
}

/// Summary returned when a graph upload creates a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionInfo {
    pub session_id: Uuid,
    pub node_count: usize,
    pub edge_count: usize,
    pub created_at: DateTime<Utc>,
}

/// Error response for API
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// A server-side slot holding one uploaded graph
///
/// The graph has its own lock so a long run blocks only this session.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub graph: Arc<Mutex<WeightedGraph>>,
    pub node_count: usize,
    pub edge_count: usize,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(graph: WeightedGraph) -> Self {
        Self {
            id: Uuid::new_v4(),
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
            graph: Arc::new(Mutex::new(graph)),
            created_at: Utc::now(),
        }
    }

    pub fn info(&self) -> SessionInfo {
        SessionInfo {
            session_id: self.id,
            node_count: self.node_count,
            edge_count: self.edge_count,
            created_at: self.created_at,
        }
    }
}
