//! Core data structures for graphs and their structural signatures

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

/// Unique identifier for a node.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single node in an analysed graph.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GraphNode {
    pub id: NodeId,
    pub label: Option<String>,
}

impl GraphNode {
    pub fn new(id: NodeId) -> Self {
        GraphNode { id, label: None }
    }
}

/// An undirected, weighted edge.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GraphEdge {
    pub source: NodeId,
    pub target: NodeId,
    /// Connection strength in (0, 1]. Not used by classification.
    pub weight: f64,
}

/// On-disk description of a graph, as accepted by `Graph::from_spec`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GraphSpec {
    #[serde(default)]
    pub nodes: Vec<NodeId>,
    #[serde(default)]
    pub edges: Vec<EdgeSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EdgeSpec {
    pub source: NodeId,
    pub target: NodeId,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

fn default_weight() -> f64 {
    1.0
}

/// Average shortest-path length, or the sentinel for graphs with unreachable pairs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathLength {
    Finite(f64),
    Disconnected,
}

impl PathLength {
    pub fn is_disconnected(self) -> bool {
        matches!(self, PathLength::Disconnected)
    }

    pub(crate) fn rounded(self, places: usize) -> Self {
        match self {
            PathLength::Finite(value) => PathLength::Finite(round_to(value, places)),
            PathLength::Disconnected => PathLength::Disconnected,
        }
    }
}

impl fmt::Display for PathLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathLength::Finite(value) => write!(f, "{:?}", value),
            PathLength::Disconnected => f.write_str("disconnected"),
        }
    }
}

impl Serialize for PathLength {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PathLength::Finite(value) => serializer.serialize_f64(*value),
            PathLength::Disconnected => serializer.serialize_str("disconnected"),
        }
    }
}

/// Small-world coefficient together with how it was obtained.
///
/// Unreachable pairs, in the graph or in its reference, score 0.0; a
/// reference with zero clustering or zero path length scores 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sigma {
    Computed(f64),
    /// The analysed graph or its reference graph has unreachable pairs.
    Disconnected,
    /// The reference graph (or the graph's own path length) gives a zero
    /// denominator.
    DegenerateReference,
}

impl Sigma {
    pub fn value(self) -> f64 {
        match self {
            Sigma::Computed(value) => value,
            Sigma::Disconnected => 0.0,
            Sigma::DegenerateReference => 1.0,
        }
    }
}

/// Structural category assigned by the rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    SmallWorld,
    Clustered,
    Random,
    Intermediate,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::SmallWorld => "small_world",
            Category::Clustered => "clustered",
            Category::Random => "random",
            Category::Intermediate => "intermediate",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shape of the degree distribution, by coefficient of variation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectivityPattern {
    ScaleFreeLike,
    Heterogeneous,
    Homogeneous,
}

impl ConnectivityPattern {
    pub fn as_str(self) -> &'static str {
        match self {
            ConnectivityPattern::ScaleFreeLike => "scale_free_like",
            ConnectivityPattern::Heterogeneous => "heterogeneous",
            ConnectivityPattern::Homogeneous => "homogeneous",
        }
    }
}

impl fmt::Display for ConnectivityPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Round to `places` decimals on the exact binary value, ties to even.
pub fn round_to(value: f64, places: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{:.*}", places, value).parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_uses_exact_binary_value() {
        // 0.125 is exact in binary, so it is a true tie
        assert_eq!(round_to(0.125, 2), 0.12);
        assert_eq!(round_to(0.375, 2), 0.38);
        assert_eq!(round_to(2.5, 0), 2.0);
        // 2.675 is stored just below the tie
        assert_eq!(round_to(2.675, 2), 2.67);
        assert_eq!(round_to(0.6000000000000001, 3), 0.6);
    }

    #[test]
    fn test_path_length_rounding_keeps_sentinel() {
        assert_eq!(
            PathLength::Finite(1.23456).rounded(2),
            PathLength::Finite(1.23)
        );
        assert!(PathLength::Disconnected.rounded(2).is_disconnected());
        assert_eq!(PathLength::Disconnected.to_string(), "disconnected");
    }
}
