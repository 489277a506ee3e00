//! Structural statistics: clustering, shortest paths, centrality and sigma
//!
//! Everything here works on the dense neighbour lists of a [`Graph`], so
//! per-node results are vectors ordered like `Graph::node_ids`.

use crate::error::{GraphError, Result};
use crate::generators::erdos_renyi;
use crate::graph::Graph;
use crate::model::{NodeId, PathLength, Sigma};
use rand::Rng;
use std::collections::{BTreeMap, VecDeque};

/// Everything derived from one graph in one analysis. Never cached.
#[derive(Debug, Clone)]
pub struct StatisticsBundle {
    pub node_ids: Vec<NodeId>,
    pub node_count: usize,
    pub edge_count: usize,
    pub density: f64,
    pub avg_clustering: f64,
    pub clustering: Vec<f64>,
    pub avg_path_length: PathLength,
    pub sigma: Sigma,
    pub degrees: Vec<usize>,
    pub betweenness: Vec<f64>,
    pub closeness: Vec<f64>,
}

impl StatisticsBundle {
    /// Compute the full battery for `graph`. `rng` drives the reference
    /// random graph used for sigma.
    pub fn compute<R: Rng>(graph: &Graph, rng: &mut R) -> Result<Self> {
        if graph.node_count() == 0 {
            return Err(GraphError::Empty);
        }

        let adjacency = graph.adjacency();
        let clustering = clustering_from_adjacency(&adjacency);
        let avg_clustering = mean(&clustering);
        let avg_path_length = path_length_from_adjacency(&adjacency);
        let density = graph.density();
        let sigma = small_world_sigma(
            graph.node_count(),
            density,
            avg_clustering,
            avg_path_length,
            rng,
        );

        tracing::debug!(
            "Statistics: n={}, m={}, density={:.3}, C={:.3}, L={}, sigma={:?}",
            graph.node_count(),
            graph.edge_count(),
            density,
            avg_clustering,
            avg_path_length,
            sigma
        );

        Ok(StatisticsBundle {
            node_ids: graph.node_ids().collect(),
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
            density,
            avg_clustering,
            clustering,
            avg_path_length,
            sigma,
            degrees: adjacency.iter().map(Vec::len).collect(),
            betweenness: betweenness_from_adjacency(&adjacency),
            closeness: closeness_from_adjacency(&adjacency),
        })
    }

    pub fn betweenness_map(&self) -> BTreeMap<NodeId, f64> {
        self.node_ids
            .iter()
            .copied()
            .zip(self.betweenness.iter().copied())
            .collect()
    }

    pub fn closeness_map(&self) -> BTreeMap<NodeId, f64> {
        self.node_ids
            .iter()
            .copied()
            .zip(self.closeness.iter().copied())
            .collect()
    }
}

/// Per-node clustering coefficients.
pub fn clustering_coefficients(graph: &Graph) -> Vec<f64> {
    clustering_from_adjacency(&graph.adjacency())
}

/// Mean of the per-node clustering coefficients (0 for an empty graph).
pub fn average_clustering(graph: &Graph) -> f64 {
    mean(&clustering_coefficients(graph))
}

/// Mean hop count over all ordered pairs of distinct nodes.
pub fn average_shortest_path_length(graph: &Graph) -> PathLength {
    path_length_from_adjacency(&graph.adjacency())
}

/// Normalised betweenness centrality per node.
pub fn betweenness_centrality(graph: &Graph) -> Vec<f64> {
    betweenness_from_adjacency(&graph.adjacency())
}

/// Closeness centrality per node, scaled by the fraction of reachable nodes.
pub fn closeness_centrality(graph: &Graph) -> Vec<f64> {
    closeness_from_adjacency(&graph.adjacency())
}

/// Small-world coefficient against a G(n, density) reference graph.
pub fn small_world_sigma<R: Rng>(
    node_count: usize,
    density: f64,
    avg_clustering: f64,
    avg_path_length: PathLength,
    rng: &mut R,
) -> Sigma {
    let length = match avg_path_length {
        PathLength::Finite(length) => length,
        PathLength::Disconnected => return Sigma::Disconnected,
    };

    let reference = erdos_renyi(node_count, density, rng);
    sigma_against_reference(avg_clustering, length, &reference)
}

/// Sigma of a connected graph with clustering `avg_clustering` and mean path
/// length `length`, measured against `reference`.
///
/// A reference with unreachable pairs scores as disconnected; one with zero
/// clustering or zero path length is degenerate.
pub fn sigma_against_reference(avg_clustering: f64, length: f64, reference: &Graph) -> Sigma {
    let adjacency = reference.adjacency();
    let reference_length = match path_length_from_adjacency(&adjacency) {
        PathLength::Finite(l) => l,
        PathLength::Disconnected => {
            tracing::debug!("Reference graph is disconnected");
            return Sigma::Disconnected;
        }
    };
    let reference_clustering = mean(&clustering_from_adjacency(&adjacency));

    if reference_clustering <= 0.0 || reference_length <= 0.0 || length <= 0.0 {
        tracing::debug!(
            "Degenerate reference: clustering {}, path length {}",
            reference_clustering,
            reference_length
        );
        return Sigma::DegenerateReference;
    }

    Sigma::Computed((avg_clustering / reference_clustering) / (length / reference_length))
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation.
pub(crate) fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

fn clustering_from_adjacency(adjacency: &[Vec<usize>]) -> Vec<f64> {
    adjacency
        .iter()
        .map(|neighbors| {
            let degree = neighbors.len();
            if degree < 2 {
                return 0.0;
            }
            let mut links = 0usize;
            for (i, &a) in neighbors.iter().enumerate() {
                for &b in &neighbors[i + 1..] {
                    if adjacency[a].binary_search(&b).is_ok() {
                        links += 1;
                    }
                }
            }
            (2 * links) as f64 / (degree * (degree - 1)) as f64
        })
        .collect()
}

fn bfs_distances(adjacency: &[Vec<usize>], source: usize) -> Vec<Option<usize>> {
    let mut distances = vec![None; adjacency.len()];
    let mut queue = VecDeque::new();
    distances[source] = Some(0);
    queue.push_back(source);

    while let Some(v) = queue.pop_front() {
        let next = distances[v].map_or(0, |d| d + 1);
        for &w in &adjacency[v] {
            if distances[w].is_none() {
                distances[w] = Some(next);
                queue.push_back(w);
            }
        }
    }

    distances
}

fn path_length_from_adjacency(adjacency: &[Vec<usize>]) -> PathLength {
    let n = adjacency.len();
    if n <= 1 {
        return PathLength::Finite(0.0);
    }

    let mut total = 0usize;
    for source in 0..n {
        for distance in bfs_distances(adjacency, source) {
            match distance {
                Some(d) => total += d,
                None => return PathLength::Disconnected,
            }
        }
    }

    PathLength::Finite(total as f64 / (n * (n - 1)) as f64)
}

/// Brandes' algorithm for unweighted graphs.
fn betweenness_from_adjacency(adjacency: &[Vec<usize>]) -> Vec<f64> {
    let n = adjacency.len();
    let mut centrality = vec![0.0; n];

    for source in 0..n {
        let mut stack = Vec::with_capacity(n);
        let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut paths = vec![0.0f64; n];
        let mut distance: Vec<Option<usize>> = vec![None; n];
        let mut queue = VecDeque::new();

        paths[source] = 1.0;
        distance[source] = Some(0);
        queue.push_back(source);

        while let Some(v) = queue.pop_front() {
            stack.push(v);
            let dv = distance[v].unwrap_or(0);
            for &w in &adjacency[v] {
                if distance[w].is_none() {
                    distance[w] = Some(dv + 1);
                    queue.push_back(w);
                }
                if distance[w] == Some(dv + 1) {
                    paths[w] += paths[v];
                    predecessors[w].push(v);
                }
            }
        }

        let mut dependency = vec![0.0f64; n];
        while let Some(w) = stack.pop() {
            for &v in &predecessors[w] {
                dependency[v] += paths[v] / paths[w] * (1.0 + dependency[w]);
            }
            if w != source {
                centrality[w] += dependency[w];
            }
        }
    }

    // Each unordered pair was seen from both ends; the scale folds that in.
    if n > 2 {
        let scale = 1.0 / ((n - 1) * (n - 2)) as f64;
        for value in &mut centrality {
            *value *= scale;
        }
    }

    centrality
}

fn closeness_from_adjacency(adjacency: &[Vec<usize>]) -> Vec<f64> {
    let n = adjacency.len();
    (0..n)
        .map(|u| {
            let distances = bfs_distances(adjacency, u);
            let reachable = distances.iter().flatten().count();
            let total: usize = distances.iter().flatten().sum();
            if total > 0 && n > 1 {
                let others = (reachable - 1) as f64;
                (others / total as f64) * (others / (n - 1) as f64)
            } else {
                0.0
            }
        })
        .collect()
}
