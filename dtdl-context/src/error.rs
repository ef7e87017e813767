//! Error types for dtdl-context

use thiserror::Error;

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, ContextError>;

/// Document context parsing errors
#[derive(Error, Debug)]
pub enum ContextError {
    /// The @context value is not a JSON object
    #[error("Invalid context: expected an object, got {0}")]
    NotAnObject(String),

    /// The @context object has no @vocab entry
    #[error("Invalid context: missing required @vocab")]
    MissingVocab,

    /// A term entry could not be interpreted
    #[error("Invalid context entry for term '{term}': {message}")]
    InvalidEntry { term: String, message: String },

    /// JSON parsing error (serde_json)
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ContextError {
    /// Create an invalid entry error
    pub fn invalid_entry(term: impl Into<String>, message: impl Into<String>) -> Self {
        ContextError::InvalidEntry {
            term: term.into(),
            message: message.into(),
        }
    }
}
