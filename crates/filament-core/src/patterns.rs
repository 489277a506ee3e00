//! Projection of an analysis bundle into named report patterns

use crate::analysis::AnalysisBundle;
use serde::{Deserialize, Serialize};

pub const NETWORK_MOTIFS: &str = "Network Motifs";
pub const CLUSTERING_ANALYSIS: &str = "Clustering Analysis";
pub const CONNECTIVITY_PATTERNS: &str = "Connectivity Patterns";

const CONNECTIVITY_CONFIDENCE: f64 = 0.75;

/// One detected signature, in the shape reports consume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    pub name: String,
    #[serde(rename = "type")]
    pub pattern_type: String,
    pub confidence: f64,
    pub evidence: String,
}

/// Ordered patterns plus their mean confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternGroup {
    pub patterns: Vec<Pattern>,
    pub overall_confidence: f64,
}

impl PatternGroup {
    pub fn new(patterns: Vec<Pattern>) -> Self {
        let overall_confidence = if patterns.is_empty() {
            0.0
        } else {
            patterns.iter().map(|p| p.confidence).sum::<f64>() / patterns.len() as f64
        };
        Self {
            patterns,
            overall_confidence,
        }
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Motifs, clustering and connectivity, in that order.
pub fn project(bundle: &AnalysisBundle) -> PatternGroup {
    let motifs = &bundle.network_motifs;
    let clustering = &bundle.clustering_analysis;
    let connectivity = &bundle.connectivity_patterns;

    PatternGroup::new(vec![
        Pattern {
            name: NETWORK_MOTIFS.to_string(),
            pattern_type: motifs.category.to_string(),
            confidence: motifs.confidence,
            evidence: format!(
                "Clustering: {:?}, Path length: {}, Nodes: {}",
                motifs.avg_clustering, motifs.avg_path_length, motifs.nodes
            ),
        },
        Pattern {
            name: CLUSTERING_ANALYSIS.to_string(),
            pattern_type: "clustering_structure".to_string(),
            confidence: (0.5 + clustering.global_clustering).min(0.9),
            evidence: format!(
                "{}, Global clustering: {:?}",
                clustering.interpretation, clustering.global_clustering
            ),
        },
        Pattern {
            name: CONNECTIVITY_PATTERNS.to_string(),
            pattern_type: connectivity.connectivity_pattern.to_string(),
            confidence: CONNECTIVITY_CONFIDENCE,
            evidence: format!(
                "Hubs: {}, Pattern: {}",
                connectivity.hub_nodes, connectivity.connectivity_pattern
            ),
        },
    ])
}
