//! Synthetic graph generators: Watts–Strogatz small-world and Erdős–Rényi G(n, p)

use crate::error::{GraphError, Result};
use crate::graph::Graph;
use crate::model::{GraphNode, NodeId};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Parameters of the small-world generator used when no graph is supplied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorParams {
    /// Number of nodes on the ring.
    pub nodes: usize,
    /// Each node starts joined to this many nearest ring neighbours.
    pub neighbors: usize,
    /// Probability that a lattice edge is rewired.
    pub rewire_probability: f64,
}

impl Default for GeneratorParams {
    fn default() -> Self {
        Self {
            nodes: 50,
            neighbors: 6,
            rewire_probability: 0.3,
        }
    }
}

/// Edge weights are drawn uniformly from this range.
const WEIGHT_RANGE: std::ops::Range<f64> = 0.1..1.0;

/// Ring lattice with random rewiring, weighted uniformly in [0.1, 1.0).
///
/// Rewiring walks the lattice edges ring-distance by ring-distance; a chosen
/// edge (u, v) moves to (u, w) with w drawn uniformly among nodes that are
/// neither u nor already adjacent to u. Nodes already joined to everyone keep
/// their edge.
pub fn watts_strogatz<R: Rng>(params: GeneratorParams, rng: &mut R) -> Result<Graph> {
    let GeneratorParams {
        nodes: n,
        neighbors: k,
        rewire_probability: p,
    } = params;

    if n == 0 {
        return Err(GraphError::InvalidParameters(
            "generator needs at least one node".to_string(),
        ));
    }
    if k > n {
        return Err(GraphError::InvalidParameters(format!(
            "neighbors ({k}) must not exceed nodes ({n})"
        )));
    }
    if !(0.0..=1.0).contains(&p) {
        return Err(GraphError::InvalidParameters(format!(
            "rewire probability {p} outside [0, 1]"
        )));
    }

    let mut adjacency: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); n];

    if k == n {
        for u in 0..n {
            for v in (u + 1)..n {
                link(&mut adjacency, u, v);
            }
        }
        return build_weighted(&adjacency, rng);
    }

    for j in 1..=k / 2 {
        for u in 0..n {
            link(&mut adjacency, u, (u + j) % n);
        }
    }

    for j in 1..=k / 2 {
        for u in 0..n {
            let v = (u + j) % n;
            if rng.random::<f64>() >= p {
                continue;
            }
            if adjacency[u].len() >= n - 1 {
                continue;
            }
            let mut w = rng.random_range(0..n);
            while w == u || adjacency[u].contains(&w) {
                w = rng.random_range(0..n);
            }
            unlink(&mut adjacency, u, v);
            link(&mut adjacency, u, w);
        }
    }

    let graph = build_weighted(&adjacency, rng)?;
    tracing::debug!(
        "Generated small-world graph: n={}, k={}, p={}, edges={}",
        n,
        k,
        p,
        graph.edge_count()
    );
    Ok(graph)
}

/// G(n, p): every unordered pair is joined independently with probability p.
pub fn erdos_renyi<R: Rng>(n: usize, p: f64, rng: &mut R) -> Graph {
    let mut graph = Graph::new();
    for i in 0..n {
        // Ids 0..n are unique by construction.
        let _ = graph.add_node(GraphNode::new(NodeId(i as u64)));
    }
    for u in 0..n {
        for v in (u + 1)..n {
            if rng.random::<f64>() < p {
                let _ = graph.add_edge(NodeId(u as u64), NodeId(v as u64), 1.0);
            }
        }
    }
    graph
}

fn link(adjacency: &mut [BTreeSet<usize>], u: usize, v: usize) {
    if u != v {
        adjacency[u].insert(v);
        adjacency[v].insert(u);
    }
}

fn unlink(adjacency: &mut [BTreeSet<usize>], u: usize, v: usize) {
    adjacency[u].remove(&v);
    adjacency[v].remove(&u);
}

fn build_weighted<R: Rng>(adjacency: &[BTreeSet<usize>], rng: &mut R) -> Result<Graph> {
    let mut graph = Graph::new();
    for i in 0..adjacency.len() {
        graph.add_node(GraphNode::new(NodeId(i as u64)))?;
    }
    for (u, neighbors) in adjacency.iter().enumerate() {
        for &v in neighbors.range(u + 1..) {
            let weight = rng.random_range(WEIGHT_RANGE);
            graph.add_edge(NodeId(u as u64), NodeId(v as u64), weight)?;
        }
    }
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_lattice_without_rewiring() {
        let mut rng = StdRng::seed_from_u64(1);
        let params = GeneratorParams {
            nodes: 10,
            neighbors: 4,
            rewire_probability: 0.0,
        };
        let graph = watts_strogatz(params, &mut rng).unwrap();

        assert_eq!(graph.node_count(), 10);
        assert_eq!(graph.edge_count(), 20);
        for id in graph.node_ids() {
            assert_eq!(graph.degree(id), 4);
        }
        assert!(graph.has_edge(NodeId(0), NodeId(9)));
        assert!(graph.has_edge(NodeId(0), NodeId(2)));
        assert!(!graph.has_edge(NodeId(0), NodeId(3)));
    }

    #[test]
    fn test_rewiring_preserves_edge_count() {
        let mut rng = StdRng::seed_from_u64(7);
        let graph = watts_strogatz(GeneratorParams::default(), &mut rng).unwrap();

        assert_eq!(graph.node_count(), 50);
        assert_eq!(graph.edge_count(), 150);
        for edge in graph.all_edges() {
            assert!(edge.weight >= 0.1 && edge.weight < 1.0);
        }
    }

    #[test]
    fn test_same_seed_same_graph() {
        let params = GeneratorParams::default();
        let a = watts_strogatz(params, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = watts_strogatz(params, &mut StdRng::seed_from_u64(42)).unwrap();

        let edges_a: Vec<_> = a.all_edges().map(|e| (e.source, e.target)).collect();
        let edges_b: Vec<_> = b.all_edges().map(|e| (e.source, e.target)).collect();
        assert_eq!(edges_a, edges_b);
    }

    #[test]
    fn test_neighbors_equal_to_nodes_is_complete() {
        let mut rng = StdRng::seed_from_u64(3);
        let params = GeneratorParams {
            nodes: 5,
            neighbors: 5,
            rewire_probability: 0.5,
        };
        let graph = watts_strogatz(params, &mut rng).unwrap();
        assert_eq!(graph.edge_count(), 10);
    }

    #[test]
    fn test_invalid_parameters() {
        let mut rng = StdRng::seed_from_u64(0);
        let too_many = GeneratorParams {
            nodes: 4,
            neighbors: 6,
            rewire_probability: 0.3,
        };
        assert!(matches!(
            watts_strogatz(too_many, &mut rng),
            Err(GraphError::InvalidParameters(_))
        ));

        let bad_p = GeneratorParams {
            rewire_probability: 1.5,
            ..GeneratorParams::default()
        };
        assert!(watts_strogatz(bad_p, &mut rng).is_err());
    }

    #[test]
    fn test_erdos_renyi_extremes() {
        let mut rng = StdRng::seed_from_u64(11);
        assert_eq!(erdos_renyi(8, 1.0, &mut rng).edge_count(), 28);
        assert_eq!(erdos_renyi(8, 0.0, &mut rng).edge_count(), 0);
    }
}
