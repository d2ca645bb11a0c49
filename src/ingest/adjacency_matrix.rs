use std::collections::HashSet;

use log::debug;
use serde_json::Value;

use crate::graph::WeightedGraph;
use crate::ingest::MatrixPolicy;
use crate::{Error, Result};

/// Cell sentinel meaning "no direct edge"
pub const NO_EDGE: &str = "inf";

/// A parsed adjacency matrix: node ids from the header row and one row of
/// optional weights per node, in header order
#[derive(Debug, Clone, PartialEq)]
pub struct AdjacencyMatrix {
    ids: Vec<String>,
    weights: Vec<Vec<Option<f64>>>,
}

impl AdjacencyMatrix {
    /// Builds a matrix from raw JSON rows: a header of string ids followed by one
    /// row per id, each cell a number or `"inf"`
    pub fn from_rows(rows: &[Vec<Value>]) -> Result<Self> {
        let (header, body) = rows
            .split_first()
            .ok_or_else(|| Error::MalformedInput("adjacency matrix is empty".to_string()))?;

        if header.is_empty() {
            return Err(Error::MalformedInput("adjacency matrix header has no node ids".to_string()));
        }

        let mut ids = Vec::with_capacity(header.len());
        let mut seen = HashSet::with_capacity(header.len());
        for (col, cell) in header.iter().enumerate() {
            let id = match cell {
                Value::String(id) if !id.is_empty() => id.clone(),
                other => {
                    return Err(Error::MalformedInput(format!(
                        "header cell {} must be a non-empty node id, got {}",
                        col, other
                    )))
                }
            };
            if !seen.insert(id.clone()) {
                return Err(Error::MalformedInput(format!("duplicate node id {} in header", id)));
            }
            ids.push(id);
        }

        if body.len() != ids.len() {
            return Err(Error::MalformedInput(format!(
                "expected {} rows after the header, got {}",
                ids.len(),
                body.len()
            )));
        }

        let mut weights = Vec::with_capacity(body.len());
        for (row, cells) in body.iter().enumerate() {
            if cells.len() != ids.len() {
                return Err(Error::MalformedInput(format!(
                    "row {} has {} cells, expected {}",
                    row,
                    cells.len(),
                    ids.len()
                )));
            }

            let parsed = cells
                .iter()
                .enumerate()
                .map(|(col, cell)| parse_cell(cell, row, col))
                .collect::<Result<Vec<_>>>()?;
            weights.push(parsed);
        }

        Ok(AdjacencyMatrix { ids, weights })
    }

    /// Parses a JSON array of rows
    pub fn parse(json: &str) -> Result<Self> {
        let rows: Vec<Vec<Value>> = serde_json::from_str(json)
            .map_err(|err| Error::MalformedInput(format!("adjacency matrix: {}", err)))?;
        Self::from_rows(&rows)
    }

    /// Node ids in header order
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Weight of cell (row, col), `None` for `"inf"`
    pub fn weight(&self, row: usize, col: usize) -> Option<f64> {
        self.weights.get(row).and_then(|cells| cells.get(col)).copied().flatten()
    }

    /// Builds a graph with every header id as a node and one edge per non-diagonal,
    /// non-`"inf"` cell, directed according to `policy`
    pub fn to_graph(&self, policy: MatrixPolicy) -> Result<WeightedGraph> {
        let mut graph = WeightedGraph::with_capacity(self.ids.len());
        for id in &self.ids {
            graph.add_node(id);
        }

        for (row, cells) in self.weights.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                if row == col {
                    continue;
                }
                if let Some(weight) = *cell {
                    graph.add_edge(&self.ids[row], &self.ids[col], weight, policy.is_bidirectional())?;
                }
            }
        }

        debug!(
            "Built graph from {0}x{0} adjacency matrix ({1:?}): {2} adjacency entries",
            self.ids.len(),
            policy,
            graph.edge_count()
        );

        Ok(graph)
    }
}

/// Parses and builds a graph from an adjacency-matrix JSON document
pub fn load_adjacency_matrix(json: &str, policy: MatrixPolicy) -> Result<WeightedGraph> {
    AdjacencyMatrix::parse(json)?.to_graph(policy)
}

fn parse_cell(cell: &Value, row: usize, col: usize) -> Result<Option<f64>> {
    match cell {
        Value::Number(number) => number
            .as_f64()
            .map(Some)
            .ok_or_else(|| Error::MalformedInput(format!("cell ({}, {}) is not a representable number", row, col))),
        Value::String(text) if text.trim().eq_ignore_ascii_case(NO_EDGE) => Ok(None),
        // "NaN" and "Infinity" parse as f64 but are not weights
        Value::String(text) => match text.trim().parse::<f64>() {
            Ok(weight) if weight.is_finite() => Ok(Some(weight)),
            _ => Err(Error::MalformedInput(format!(
                "cell ({}, {}) must be a number or \"inf\", got {:?}",
                row, col, text
            ))),
        },
        other => Err(Error::MalformedInput(format!(
            "cell ({}, {}) must be a number or \"inf\", got {}",
            row, col, other
        ))),
    }
}
