use thiserror::Error;

use crate::api::types::NodeId;

/// Failures raised by bulk hierarchy edits, movers and configuration loading.
///
/// Search misses are not errors: query functions return `Option`.
#[derive(Error, Debug)]
pub enum HierarchyError {
    #[error("child range {from}..{to} is invalid for a parent with {count} children")]
    Range { from: usize, to: usize, count: usize },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("node {0:?} has no context able to host a suspendable task")]
    UnsupportedContext(NodeId),

    #[error("node {0:?} is not part of the hierarchy")]
    UnknownNode(NodeId),

    #[error("failed to parse configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HierarchyError>;
