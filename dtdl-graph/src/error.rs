//! Error types for dtdl-graph

use thiserror::Error;

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, GraphError>;

/// Metamodel graph loading errors
#[derive(Error, Debug)]
pub enum GraphError {
    /// JSON parsing error (serde_json)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Structurally invalid graph document
    #[error("Invalid graph: {0}")]
    InvalidGraph(String),
}

impl GraphError {
    /// Create an invalid graph error
    pub fn invalid_graph(msg: impl Into<String>) -> Self {
        GraphError::InvalidGraph(msg.into())
    }
}
