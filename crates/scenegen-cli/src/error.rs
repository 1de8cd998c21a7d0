//! Error types for the scenegen command line.

use scenegen_codegen::CodegenError;
use scenegen_core::DocumentError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config file {path}: {message}")]
    Config { path: String, message: String },

    #[error("Invalid format: {message}")]
    InvalidFormat { message: String },

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Codegen(#[from] CodegenError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
