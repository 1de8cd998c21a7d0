//! Data models for component generation.

use crate::structure::StructNode;
use scenegen_core::{Declarations, NodeId, TriggerKind, VariableId};
use serde::Serialize;

/// A compiled component, one per detected component boundary.
///
/// Built once by the structural tree builder and read-only afterwards.
#[derive(Debug, Clone)]
pub struct ComponentDescriptor {
    /// Custom element tag (kebab-case).
    pub tag: String,
    /// Component class name (PascalCase).
    pub class_name: String,
    /// Scoped style rules, in document order.
    pub styles: Vec<StyleRule>,
    /// Reactive properties.
    pub properties: Vec<Token>,
    /// Emitted events.
    pub events: Vec<EventDescriptor>,
    /// Root of the structural tree.
    pub root: StructNode,
    /// Visual node the component was compiled from.
    pub origin: NodeId,
}

impl ComponentDescriptor {
    /// Events raised by one node of this component.
    pub fn events_for(&self, node: NodeId) -> impl Iterator<Item = &EventDescriptor> {
        self.events.iter().filter(move |event| event.origin == node)
    }
}

/// One scoped style rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleRule {
    /// Generated tag identifier of the origin node, used as class selector.
    pub selector: String,
    /// Declarations in host order.
    pub declarations: Declarations,
    #[serde(skip)]
    pub origin: NodeId,
}

impl StyleRule {
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

/// Declared type of a reactive property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    String,
    Boolean,
}

impl PropertyType {
    /// Lit property type converter.
    pub fn to_lit(&self) -> &'static str {
        match self {
            Self::String => "String",
            Self::Boolean => "Boolean",
        }
    }

    /// TypeScript type annotation.
    pub fn to_typescript(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Boolean => "boolean",
        }
    }
}

/// Default value of a reactive property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DefaultValue {
    Text(String),
    Boolean(bool),
}

impl DefaultValue {
    /// Empty default for a property type.
    pub fn empty(property_type: PropertyType) -> Self {
        match property_type {
            PropertyType::String => Self::Text(String::new()),
            PropertyType::Boolean => Self::Boolean(false),
        }
    }

    /// Render as a JavaScript literal.
    pub fn to_js(&self) -> String {
        match self {
            Self::Boolean(value) => value.to_string(),
            Self::Text(text) => {
                let mut literal = String::with_capacity(text.len() + 2);
                literal.push('\'');
                for c in text.chars() {
                    match c {
                        '\\' => literal.push_str("\\\\"),
                        '\'' => literal.push_str("\\'"),
                        '\n' => literal.push_str("\\n"),
                        '\r' => literal.push_str("\\r"),
                        _ => literal.push(c),
                    }
                }
                literal.push('\'');
                literal
            }
        }
    }
}

/// Where a token's value comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "key", rename_all = "snake_case")]
pub enum TokenSource {
    /// `{{body}}` placeholder in literal text.
    Placeholder(String),
    /// Design variable bound to text content.
    Variable(VariableId),
    /// Component property referenced by text content.
    ComponentProperty(String),
}

/// A reactive property a component declares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub name: String,
    pub source: TokenSource,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub default: DefaultValue,
}

impl Token {
    /// String token with an empty default.
    pub fn text(name: impl Into<String>, source: TokenSource) -> Self {
        Self {
            name: name.into(),
            source,
            property_type: PropertyType::String,
            default: DefaultValue::empty(PropertyType::String),
        }
    }
}

/// An event a component dispatches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventDescriptor {
    /// Custom event name.
    pub name: String,
    /// Handler method name.
    pub handler: String,
    /// DOM event the handler listens to.
    pub dom_event: &'static str,
    /// Type of the DOM event passed as detail.
    pub payload_type: &'static str,
    #[serde(skip)]
    pub trigger: TriggerKind,
    #[serde(skip)]
    pub origin: NodeId,
}
