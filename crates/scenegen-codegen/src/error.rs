//! Error types for code generation.

use scenegen_core::HostError;
use thiserror::Error;

/// Result type alias for codegen operations.
pub type Result<T> = std::result::Result<T, CodegenError>;

/// Errors that abort a generation request.
///
/// Recoverable problems (a failed style query, an unresolved variable, a
/// malformed placeholder) never surface here; they degrade locally.
#[derive(Error, Debug)]
pub enum CodegenError {
    /// The request carried no root node.
    #[error("No root node to generate from")]
    NoRootNode,

    /// The host API could not serve the request.
    #[error("Host error: {0}")]
    Host(#[from] HostError),

    /// A host query task panicked or was cancelled.
    #[error("Host query task failed: {0}")]
    TaskFailed(String),

    /// Template rendering error.
    #[error("Template error: {0}")]
    TemplateError(#[from] handlebars::RenderError),

    /// Invalid template.
    #[error("Invalid template: {0}")]
    InvalidTemplate(#[from] handlebars::TemplateError),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<tokio::task::JoinError> for CodegenError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::TaskFailed(err.to_string())
    }
}
