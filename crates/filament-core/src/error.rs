use crate::model::NodeId;
use thiserror::Error;

/// Malformed graph input. Every variant is an "invalid input" condition;
/// disconnected graphs are not errors.
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("graph has no nodes")]
    Empty,

    #[error("duplicate node id {0}")]
    DuplicateNode(NodeId),

    #[error("edge references unknown node {0}")]
    UnknownNode(NodeId),

    #[error("self-loop on node {0}")]
    SelfLoop(NodeId),

    #[error("edge {u}-{v} has weight {weight} outside (0, 1]")]
    InvalidWeight { u: NodeId, v: NodeId, weight: f64 },

    #[error("invalid generator parameters: {0}")]
    InvalidParameters(String),

    #[error("failed to parse graph: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GraphError>;
