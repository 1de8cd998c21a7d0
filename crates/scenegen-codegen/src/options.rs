//! Generation preferences and compile options.

use serde::{Deserialize, Serialize};

/// How many components a generation produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    /// One component covering the whole root.
    #[default]
    Single,
    /// One component per detected component boundary.
    Multi,
}

/// Where style rules of nested components go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StylePolicy {
    /// Every descendant's rule is inlined into the enclosing sheet.
    Flat,
    /// Rules inside a nested boundary belong to that boundary's sheet.
    Isolated,
}

/// Element used for text leaves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextElement {
    /// `<div>`
    #[default]
    Block,
    /// `<span>`
    Inline,
}

impl TextElement {
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Block => "div",
            Self::Inline => "span",
        }
    }
}

/// Target language variant of the emitted component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageVariant {
    /// Decorators and typed property declarations.
    #[default]
    TypeScript,
    /// `static properties` map and constructor defaults.
    JavaScript,
}

impl LanguageVariant {
    /// Language label reported to the host.
    pub fn label(&self) -> &'static str {
        match self {
            Self::TypeScript => "TYPESCRIPT",
            Self::JavaScript => "JAVASCRIPT",
        }
    }

    /// Display title reported to the host.
    pub fn title(&self) -> &'static str {
        match self {
            Self::TypeScript => "Lit Element",
            Self::JavaScript => "Lit Element (JavaScript)",
        }
    }

    /// Name of the registered template.
    pub(crate) fn template_name(&self) -> &'static str {
        match self {
            Self::TypeScript => "typescript",
            Self::JavaScript => "javascript",
        }
    }
}

/// Preferences supplied by the host with a generate request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationPreferences {
    pub mode: GenerationMode,
    /// Overrides the style policy implied by `mode`.
    pub style_policy: Option<StylePolicy>,
    pub text_element: TextElement,
    /// One payload is produced per variant, in this order.
    pub variants: Vec<LanguageVariant>,
}

impl Default for GenerationPreferences {
    fn default() -> Self {
        Self {
            mode: GenerationMode::Single,
            style_policy: None,
            text_element: TextElement::Block,
            variants: vec![LanguageVariant::TypeScript],
        }
    }
}

impl GenerationPreferences {
    pub fn multi() -> Self {
        Self {
            mode: GenerationMode::Multi,
            ..Default::default()
        }
    }

    /// Resolve into the options the compiler runs with.
    pub fn compile_options(&self) -> CompileOptions {
        let style_policy = self.style_policy.unwrap_or(match self.mode {
            GenerationMode::Single => StylePolicy::Flat,
            GenerationMode::Multi => StylePolicy::Isolated,
        });
        CompileOptions {
            mode: self.mode,
            style_policy,
            text_element: self.text_element,
        }
    }
}

/// Resolved options for one compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileOptions {
    pub mode: GenerationMode,
    pub style_policy: StylePolicy,
    pub text_element: TextElement,
}

impl Default for CompileOptions {
    fn default() -> Self {
        GenerationPreferences::default().compile_options()
    }
}
