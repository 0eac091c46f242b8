use crate::tree::NodeId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TreeError>;

#[derive(Error, Debug)]
pub enum TreeError {
    #[error("Node not found: {0:?}")]
    NodeNotFound(NodeId),

    #[error("Cycle detected: cannot move {node} under its own descendant {parent}")]
    CycleDetected { node: String, parent: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
