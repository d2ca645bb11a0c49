use std::collections::HashMap;

use log::trace;

use crate::graph::Node;
use crate::{Error, Result};

/// A weighted graph keyed by string node ids, using adjacency lists
///
/// Nodes live in an arena owned by the graph; adjacency and predecessor links refer
/// to them by id (or by arena slot internally), never by reference.
#[derive(Debug, Clone, Default)]
pub struct WeightedGraph {
    /// Node arena in insertion order
    nodes: Vec<Node>,

    /// Node id -> arena slot
    index: HashMap<String, usize>,

    /// Outgoing edges for each slot: slot -> [(target_slot, weight)]
    adjacency: HashMap<usize, Vec<(usize, f64)>>,
}

impl WeightedGraph {
    /// Creates a new empty graph
    pub fn new() -> Self {
        WeightedGraph::default()
    }

    /// Creates an empty graph with room for the given number of nodes
    pub fn with_capacity(nodes: usize) -> Self {
        WeightedGraph {
            nodes: Vec::with_capacity(nodes),
            index: HashMap::with_capacity(nodes),
            adjacency: HashMap::with_capacity(nodes),
        }
    }

    /// Adds a node if it is not already present. Adding an existing id is a no-op.
    pub fn add_node(&mut self, id: &str) {
        self.ensure_node(id);
    }

    /// Adds a weighted edge from `source` to `target`, and the reverse edge too when
    /// `bidirectional` is set. Missing endpoints are created.
    ///
    /// The weight is validated before anything is touched, so a rejected edge leaves
    /// the graph exactly as it was.
    pub fn add_edge(&mut self, source: &str, target: &str, weight: f64, bidirectional: bool) -> Result<()> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(Error::InvalidWeight(weight));
        }

        let from = self.ensure_node(source);
        let to = self.ensure_node(target);

        self.adjacency.entry(from).or_default().push((to, weight));
        if bidirectional {
            self.adjacency.entry(to).or_default().push((from, weight));
        }

        trace!("added edge {} -> {} ({}, bidirectional: {})", source, target, weight, bidirectional);
        Ok(())
    }

    /// Looks up a node by id
    pub fn get_node(&self, id: &str) -> Result<&Node> {
        self.index_of(id)
            .map(|slot| &self.nodes[slot])
            .ok_or_else(|| Error::NodeNotFound(id.to_string()))
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Returns the number of nodes in the graph
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of adjacency entries (a bidirectional edge counts twice)
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(|edges| edges.len()).sum()
    }

    /// Node ids in the order they were first added
    pub fn node_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.nodes.iter().map(|node| node.id())
    }

    /// All nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter()
    }

    /// Outgoing edges of a node as (target id, weight), in insertion order
    pub fn neighbors(&self, id: &str) -> Result<Vec<(&str, f64)>> {
        let slot = self
            .index_of(id)
            .ok_or_else(|| Error::NodeNotFound(id.to_string()))?;

        Ok(self
            .outgoing(slot)
            .iter()
            .map(|&(target, weight)| (self.nodes[target].id(), weight))
            .collect())
    }

    /// Every adjacency entry as (source id, target id, weight), grouped by source in
    /// node insertion order
    pub fn edges(&self) -> Vec<(&str, &str, f64)> {
        let mut edges = Vec::with_capacity(self.edge_count());
        for (slot, node) in self.nodes.iter().enumerate() {
            for &(target, weight) in self.outgoing(slot) {
                edges.push((node.id(), self.nodes[target].id(), weight));
            }
        }
        edges
    }

    /// Clears the distance and predecessor of every node
    pub fn reset_working_state(&mut self) {
        for node in &mut self.nodes {
            node.reset();
        }
    }

    pub(crate) fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub(crate) fn node_at(&self, slot: usize) -> &Node {
        &self.nodes[slot]
    }

    pub(crate) fn node_at_mut(&mut self, slot: usize) -> &mut Node {
        &mut self.nodes[slot]
    }

    pub(crate) fn outgoing(&self, slot: usize) -> &[(usize, f64)] {
        self.adjacency.get(&slot).map(Vec::as_slice).unwrap_or(&[])
    }

    fn ensure_node(&mut self, id: &str) -> usize {
        if let Some(slot) = self.index_of(id) {
            return slot;
        }

        let slot = self.nodes.len();
        self.nodes.push(Node::new(id));
        self.index.insert(id.to_string(), slot);
        slot
    }
}
