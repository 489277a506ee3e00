//! Graph wrapper using petgraph::UnGraph with caller-facing NodeIds

use crate::error::{GraphError, Result};
use crate::model::*;
use petgraph::algo::connected_components;
use petgraph::graph::{NodeIndex, UnGraph};
use std::collections::HashMap;
use std::path::Path;

/// An undirected simple graph. Built once, then only read by the analyses.
pub struct Graph {
    inner: UnGraph<GraphNode, GraphEdge>,
    index: HashMap<NodeId, NodeIndex>,
}

impl std::fmt::Debug for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Graph")
            .field("node_count", &self.inner.node_count())
            .field("edge_count", &self.inner.edge_count())
            .finish()
    }
}

impl Graph {
    pub fn new() -> Self {
        Graph {
            inner: UnGraph::new_undirected(),
            index: HashMap::new(),
        }
    }

    /// Add a node to graph. Node ids must be unique.
    pub fn add_node(&mut self, node: GraphNode) -> Result<NodeId> {
        let id = node.id;
        if self.index.contains_key(&id) {
            return Err(GraphError::DuplicateNode(id));
        }
        let idx = self.inner.add_node(node);
        self.index.insert(id, idx);
        Ok(id)
    }

    /// Add an undirected edge. Re-adding an existing pair replaces its weight.
    pub fn add_edge(&mut self, source: NodeId, target: NodeId, weight: f64) -> Result<()> {
        if source == target {
            return Err(GraphError::SelfLoop(source));
        }
        if !(weight > 0.0 && weight <= 1.0) {
            return Err(GraphError::InvalidWeight {
                u: source,
                v: target,
                weight,
            });
        }
        let a = self.index_of(source)?;
        let b = self.index_of(target)?;
        self.inner.update_edge(
            a,
            b,
            GraphEdge {
                source,
                target,
                weight,
            },
        );
        Ok(())
    }

    /// Build a graph from its serialised description, validating every entry.
    pub fn from_spec(spec: &GraphSpec) -> Result<Self> {
        let mut graph = Graph::new();
        for &id in &spec.nodes {
            graph.add_node(GraphNode::new(id))?;
        }
        for edge in &spec.edges {
            graph.add_edge(edge.source, edge.target, edge.weight)?;
        }
        Ok(graph)
    }

    /// Parse a JSON graph description.
    pub fn from_json(json: &str) -> Result<Self> {
        let spec: GraphSpec = serde_json::from_str(json)?;
        Self::from_spec(&spec)
    }

    /// Load a JSON graph description from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let graph = Self::from_json(&json)?;
        tracing::debug!(
            "Loaded graph from {}: {} nodes, {} edges",
            path.display(),
            graph.node_count(),
            graph.edge_count()
        );
        Ok(graph)
    }

    /// Total number of nodes.
    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Total number of edges.
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Node ids in insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.inner
            .node_indices()
            .filter_map(move |idx| self.inner.node_weight(idx).map(|n| n.id))
    }

    /// Iterate over all edges.
    pub fn all_edges(&self) -> impl Iterator<Item = &GraphEdge> {
        self.inner.edge_references().map(|edge_ref| edge_ref.weight())
    }

    /// Neighbours of a node; empty for unknown ids.
    pub fn neighbors(&self, id: NodeId) -> Vec<NodeId> {
        match self.index.get(&id) {
            Some(&idx) => self
                .inner
                .neighbors(idx)
                .filter_map(|n| self.inner.node_weight(n).map(|node| node.id))
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn has_edge(&self, a: NodeId, b: NodeId) -> bool {
        match (self.index.get(&a), self.index.get(&b)) {
            (Some(&a), Some(&b)) => self.inner.find_edge(a, b).is_some(),
            _ => false,
        }
    }

    pub fn degree(&self, id: NodeId) -> usize {
        self.index
            .get(&id)
            .map_or(0, |&idx| self.inner.neighbors(idx).count())
    }

    /// Edges over the maximum possible for a simple undirected graph.
    pub fn density(&self) -> f64 {
        let n = self.node_count();
        if n <= 1 {
            return 0.0;
        }
        let max_edges = (n * (n - 1)) as f64 / 2.0;
        self.edge_count() as f64 / max_edges
    }

    /// True when every node can reach every other node.
    pub fn is_connected(&self) -> bool {
        self.node_count() <= 1 || connected_components(&self.inner) == 1
    }

    /// Neighbour lists over dense positions `0..node_count`, in insertion order.
    pub(crate) fn adjacency(&self) -> Vec<Vec<usize>> {
        self.inner
            .node_indices()
            .map(|idx| {
                let mut neighbors: Vec<usize> =
                    self.inner.neighbors(idx).map(|n| n.index()).collect();
                neighbors.sort_unstable();
                neighbors.dedup();
                neighbors
            })
            .collect()
    }

    fn index_of(&self, id: NodeId) -> Result<NodeIndex> {
        self.index
            .get(&id)
            .copied()
            .ok_or(GraphError::UnknownNode(id))
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}
