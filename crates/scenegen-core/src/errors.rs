//! Error types for hosts and design documents.

use crate::scene::NodeId;
use thiserror::Error;

/// Errors reported by a [`SceneHost`](crate::host::SceneHost).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HostError {
    /// The host API cannot serve requests at all.
    #[error("Host unavailable: {0}")]
    Unavailable(String),

    /// A single query failed; callers may degrade.
    #[error("Query failed for node {node:?}: {message}")]
    QueryFailed {
        node: Option<NodeId>,
        message: String,
    },
}

impl HostError {
    pub fn query_failed(node: NodeId, message: impl Into<String>) -> Self {
        Self::QueryFailed {
            node: Some(node),
            message: message.into(),
        }
    }

    /// Whether the failure must abort the whole request.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

/// Errors while loading a design document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Invalid document JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
