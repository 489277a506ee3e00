//! Filament Core: graph model, structural statistics and signature classification

pub mod analysis;
pub mod classifier;
pub mod error;
pub mod generators;
pub mod graph;
pub mod model;
pub mod patterns;
pub mod stats;


#[cfg(test)]
pub mod test_utils;

pub use analysis::{
    AnalysisBundle, ClusteringAnalysis, ConnectivityAnalysis, DegreeDistribution,
    DistributionSummary, InformationFlow, MotifAnalysis,
};
pub use classifier::{
    Classification, ClassifierConfig, SignatureClassifier, classify, classify_network, confidence,
};
pub use error::GraphError;
pub use generators::{GeneratorParams, erdos_renyi, watts_strogatz};
pub use graph::Graph;
pub use model::{
    Category, ConnectivityPattern, EdgeSpec, GraphEdge, GraphNode, GraphSpec, NodeId, PathLength,
    Sigma,
};
pub use patterns::{Pattern, PatternGroup, project};
pub use stats::StatisticsBundle;
