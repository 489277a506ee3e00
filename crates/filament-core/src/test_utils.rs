//! Test utilities for Filament

use crate::graph::Graph;
use crate::model::{GraphNode, NodeId};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fs;
use tempfile::TempDir;

pub const TEST_SEED: u64 = 20_240_601;

pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(TEST_SEED)
}

/// Graph with nodes `0..n` and no edges.
pub fn empty_graph(n: u64) -> Graph {
    let mut graph = Graph::new();
    for i in 0..n {
        graph.add_node(GraphNode::new(NodeId(i))).unwrap();
    }
    graph
}

/// Graph with nodes `0..n` and the given unit-weight edges.
pub fn graph_from_edges(n: u64, edges: &[(u64, u64)]) -> Graph {
    let mut graph = empty_graph(n);
    for &(a, b) in edges {
        graph.add_edge(NodeId(a), NodeId(b), 1.0).unwrap();
    }
    graph
}

pub fn complete_graph(n: u64) -> Graph {
    let mut edges = Vec::new();
    for a in 0..n {
        for b in (a + 1)..n {
            edges.push((a, b));
        }
    }
    graph_from_edges(n, &edges)
}

/// Node 0 joined to every other node.
pub fn star_graph(n: u64) -> Graph {
    let edges: Vec<(u64, u64)> = (1..n).map(|leaf| (0, leaf)).collect();
    graph_from_edges(n, &edges)
}

/// 0-1-2-...-(n-1)
pub fn path_graph(n: u64) -> Graph {
    let edges: Vec<(u64, u64)> = (1..n).map(|b| (b - 1, b)).collect();
    graph_from_edges(n, &edges)
}

/// Write a JSON graph file into a fresh temp directory.
pub fn write_graph_file(json: &str) -> (TempDir, std::path::PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("graph.json");
    fs::write(&path, json).unwrap();
    (temp_dir, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_shapes() {
        assert_eq!(complete_graph(5).edge_count(), 10);
        assert_eq!(star_graph(5).degree(NodeId(0)), 4);
        assert_eq!(path_graph(5).edge_count(), 4);
        assert_eq!(empty_graph(3).edge_count(), 0);
    }
}
