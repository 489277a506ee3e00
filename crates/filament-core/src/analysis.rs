//! Rounded, report-facing views of a [`StatisticsBundle`]

use crate::classifier::Classification;
use crate::model::{Category, ConnectivityPattern, NodeId, PathLength, round_to};
use crate::stats::{StatisticsBundle, mean, std_dev};
use serde::Serialize;

const HIGH_CLUSTERING: f64 = 0.7;
const BOTTLENECK_BETWEENNESS: f64 = 0.1;
const WELL_CONNECTED_CLOSENESS: f64 = 0.6;

/// Classification plus the four analyses, ready for projection or output.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisBundle {
    pub network_motifs: MotifAnalysis,
    pub clustering_analysis: ClusteringAnalysis,
    pub connectivity_patterns: ConnectivityAnalysis,
    pub information_flow: InformationFlow,
}

#[derive(Debug, Clone, Serialize)]
pub struct MotifAnalysis {
    #[serde(rename = "type")]
    pub category: Category,
    pub nodes: usize,
    pub edges: usize,
    pub density: f64,
    pub avg_clustering: f64,
    pub avg_path_length: PathLength,
    pub small_world_coefficient: f64,
    pub confidence: f64,
}

impl MotifAnalysis {
    pub fn new(stats: &StatisticsBundle, classification: &Classification) -> Self {
        MotifAnalysis {
            category: classification.category,
            nodes: stats.node_count,
            edges: stats.edge_count,
            density: round_to(stats.density, 3),
            avg_clustering: round_to(classification.avg_clustering, 3),
            avg_path_length: classification.avg_path_length.rounded(2),
            small_world_coefficient: round_to(classification.sigma, 3),
            confidence: classification.confidence,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DistributionSummary {
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClusteringAnalysis {
    pub global_clustering: f64,
    pub clustering_distribution: DistributionSummary,
    pub high_clustering_nodes: usize,
    pub interpretation: String,
}

impl ClusteringAnalysis {
    pub fn from_stats(stats: &StatisticsBundle) -> Self {
        let values = &stats.clustering;
        let avg = mean(values);
        ClusteringAnalysis {
            global_clustering: round_to(stats.avg_clustering, 3),
            clustering_distribution: DistributionSummary {
                mean: round_to(avg, 3),
                std: round_to(std_dev(values), 3),
                min: round_to(values.iter().copied().fold(f64::INFINITY, f64::min), 3),
                max: round_to(values.iter().copied().fold(f64::NEG_INFINITY, f64::max), 3),
            },
            high_clustering_nodes: values.iter().filter(|&&c| c > HIGH_CLUSTERING).count(),
            interpretation: interpret_clustering(avg).to_string(),
        }
    }
}

/// Banded reading of an average clustering coefficient.
pub fn interpret_clustering(avg_clustering: f64) -> &'static str {
    if avg_clustering > 0.6 {
        "High local connectivity, strong community structure"
    } else if avg_clustering > 0.3 {
        "Moderate clustering, balanced local-global connectivity"
    } else {
        "Low clustering, more random connectivity patterns"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DegreeDistribution {
    pub mean: f64,
    pub std: f64,
    pub max: usize,
    pub min: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConnectivityAnalysis {
    pub degree_distribution: DegreeDistribution,
    /// Number of hubs.
    pub hub_nodes: usize,
    pub hubs: Vec<NodeId>,
    pub hub_threshold: f64,
    pub connectivity_pattern: ConnectivityPattern,
}

impl ConnectivityAnalysis {
    pub fn from_stats(stats: &StatisticsBundle) -> Self {
        let degrees: Vec<f64> = stats.degrees.iter().map(|&d| d as f64).collect();
        let mean_degree = mean(&degrees);
        let std_degree = std_dev(&degrees);
        let threshold = mean_degree + 2.0 * std_degree;

        let hubs: Vec<NodeId> = stats
            .node_ids
            .iter()
            .zip(&degrees)
            .filter(|&(_, &degree)| degree > threshold)
            .map(|(&id, _)| id)
            .collect();

        ConnectivityAnalysis {
            degree_distribution: DegreeDistribution {
                mean: round_to(mean_degree, 2),
                std: round_to(std_degree, 2),
                max: stats.degrees.iter().copied().max().unwrap_or(0),
                min: stats.degrees.iter().copied().min().unwrap_or(0),
            },
            hub_nodes: hubs.len(),
            hubs,
            hub_threshold: round_to(threshold, 1),
            connectivity_pattern: classify_connectivity(mean_degree, std_degree),
        }
    }
}

/// Degree distribution shape by coefficient of variation.
pub fn classify_connectivity(mean_degree: f64, std_degree: f64) -> ConnectivityPattern {
    let variation = if mean_degree > 0.0 {
        std_degree / mean_degree
    } else {
        0.0
    };

    if variation > 1.0 {
        ConnectivityPattern::ScaleFreeLike
    } else if variation > 0.5 {
        ConnectivityPattern::Heterogeneous
    } else {
        ConnectivityPattern::Homogeneous
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InformationFlow {
    pub information_bottlenecks: usize,
    pub well_connected_nodes: usize,
    pub max_betweenness: f64,
    pub avg_closeness: f64,
    pub flow_efficiency: f64,
}

impl InformationFlow {
    pub fn from_stats(stats: &StatisticsBundle) -> Self {
        let max_betweenness = stats.betweenness.iter().copied().fold(0.0, f64::max);
        let avg_closeness = mean(&stats.closeness);

        InformationFlow {
            information_bottlenecks: stats
                .betweenness
                .iter()
                .filter(|&&b| b > BOTTLENECK_BETWEENNESS)
                .count(),
            well_connected_nodes: stats
                .closeness
                .iter()
                .filter(|&&c| c > WELL_CONNECTED_CLOSENESS)
                .count(),
            max_betweenness: round_to(max_betweenness, 3),
            avg_closeness: round_to(avg_closeness, 3),
            flow_efficiency: round_to(flow_efficiency(avg_closeness, max_betweenness), 3),
        }
    }
}

/// High average closeness and a low worst-case bottleneck score well.
pub fn flow_efficiency(avg_closeness: f64, max_betweenness: f64) -> f64 {
    avg_closeness * (1.0 - max_betweenness.min(0.5))
}
