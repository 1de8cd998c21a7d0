//! Code generators.

mod lit;
mod templates;

pub use lit::{LitGenerator, RenderedComponent};
pub use templates::{normalize_output, TemplateEngine};

use serde::{Deserialize, Serialize};

/// One generated payload, as returned to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedCode {
    /// Language label (`TYPESCRIPT`, `JAVASCRIPT`).
    pub language: String,
    /// Display title.
    pub title: String,
    /// Generated source text.
    pub code: String,
}
