//! Token and binding extraction.
//!
//! A token is a dynamic value a component exposes as a reactive property.
//! Text content is classified once by [`TextBinding::classify`]; the same
//! classification drives both token extraction and markup rendering, so a
//! rendered `${this.x}` always has a matching property `x`. Property
//! references on any other field become tokens as well.

use crate::context::CompileContext;
use crate::model::{DefaultValue, PropertyType, Token, TokenSource};
use crate::naming::{Namespace, SourceEntity};
use crate::query::HostSnapshot;
use indexmap::IndexMap;
use regex::Regex;
use scenegen_core::{ComponentPropertyValue, NodeId, NodeShape, PropertyKind, VariableId, VisualNode};
use std::sync::OnceLock;

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\{\{(.*?)\}\}").expect("placeholder pattern is valid"))
}

/// Piece of text that contains placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSegment<'a> {
    Literal(&'a str),
    /// Trimmed placeholder body.
    Placeholder(&'a str),
}

/// How the text content of a node is bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextBinding<'a> {
    /// Literal text with at least one placeholder.
    Placeholders(Vec<TextSegment<'a>>),
    /// Text replaced by a component property.
    Property(&'a str),
    /// Text replaced by a resolved design variable.
    Variable { id: &'a VariableId, name: &'a str },
    /// Plain text.
    Literal(&'a str),
}

impl<'a> TextBinding<'a> {
    /// Classify the text content of a node.
    ///
    /// Precedence: placeholders, then a `characters` property reference,
    /// then a bound variable the host resolved.
    pub fn classify(node: &'a VisualNode, snapshot: &'a HostSnapshot) -> Self {
        let text = node.text_content().unwrap_or_default();

        let segments = split_placeholders(text);
        if segments
            .iter()
            .any(|segment| matches!(segment, TextSegment::Placeholder(_)))
        {
            return Self::Placeholders(segments);
        }

        if let Some(key) = node.characters_reference() {
            return Self::Property(key);
        }

        if let Some(id) = &node.bound_variable {
            if let Some(name) = snapshot.variable_name(id) {
                return Self::Variable { id, name };
            }
        }

        Self::Literal(text)
    }
}

/// Split text into literal runs and placeholders. Blank placeholder bodies
/// stay literal.
pub fn split_placeholders(text: &str) -> Vec<TextSegment<'_>> {
    let mut segments = Vec::new();
    let mut literal_start = 0;

    for captures in placeholder_pattern().captures_iter(text) {
        let (Some(whole), Some(body)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        let body = body.as_str().trim();
        if body.is_empty() {
            continue;
        }
        if whole.start() > literal_start {
            segments.push(TextSegment::Literal(&text[literal_start..whole.start()]));
        }
        segments.push(TextSegment::Placeholder(body));
        literal_start = whole.end();
    }

    if literal_start < text.len() {
        segments.push(TextSegment::Literal(&text[literal_start..]));
    }
    segments
}

/// Human label of a component property key (`"Label#1:0"` -> `"Label"`).
pub fn property_label(key: &str) -> &str {
    key.split('#').next().unwrap_or(key)
}

/// Chain of enclosing component definitions and instances, innermost last.
#[derive(Debug, Clone, Default)]
pub struct PropertyScope<'a> {
    frames: Vec<&'a VisualNode>,
}

impl<'a> PropertyScope<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scope inside `node`.
    pub fn enter(&self, node: &'a VisualNode) -> Self {
        let mut frames = self.frames.clone();
        if !node.property_values.is_empty() || !node.property_definitions.is_empty() {
            frames.push(node);
        }
        Self { frames }
    }

    /// Nearest instance value or definition default for a property key.
    pub fn resolve(&self, key: &str) -> Option<&'a ComponentPropertyValue> {
        self.frames.iter().rev().find_map(|node| {
            node.property_values
                .get(key)
                .or_else(|| node.property_definitions.get(key))
        })
    }
}

/// Tokens of one component, unique by generated name.
#[derive(Debug, Clone, Default)]
pub struct TokenSet {
    tokens: IndexMap<String, Token>,
}

impl TokenSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a token unless one with the same name exists. First wins.
    pub fn insert(&mut self, token: Token) -> bool {
        if self.tokens.contains_key(&token.name) {
            return false;
        }
        self.tokens.insert(token.name.clone(), token);
        true
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn into_vec(self) -> Vec<Token> {
        self.tokens.into_values().collect()
    }
}

/// Member name of a placeholder. Placeholders that normalize alike share one.
pub fn placeholder_entity(body: &str) -> SourceEntity {
    SourceEntity::Placeholder(Namespace::Member.normalize(body))
}

/// Extract the tokens of the component rooted at `start`.
///
/// `scope` is the property scope at the position of `start`, not yet
/// including `start` itself.
pub fn extract_tokens(ctx: &CompileContext<'_>, start: NodeId, scope: &PropertyScope<'_>) -> Vec<Token> {
    let mut set = TokenSet::new();
    collect(ctx, start, true, scope, &mut set);
    set.into_vec()
}

fn collect(
    ctx: &CompileContext<'_>,
    id: NodeId,
    is_start: bool,
    scope: &PropertyScope<'_>,
    set: &mut TokenSet,
) {
    if !is_start && ctx.is_boundary(id) {
        for token in extract_tokens(ctx, id, scope) {
            set.insert(token);
        }
        return;
    }

    let node = ctx.node(id);
    let inner = scope.enter(node);
    for key in node.property_references.values() {
        set.insert(property_token(ctx, key, &inner));
    }

    match node.shape() {
        NodeShape::Container(children) => {
            for &child in children {
                collect(ctx, child, false, &inner, set);
            }
        }
        NodeShape::Text(_) => {
            for token in text_tokens(ctx, node, &inner) {
                set.insert(token);
            }
        }
        NodeShape::Leaf => {}
    }
}

fn text_tokens(ctx: &CompileContext<'_>, node: &VisualNode, scope: &PropertyScope<'_>) -> Vec<Token> {
    match TextBinding::classify(node, ctx.snapshot) {
        TextBinding::Placeholders(segments) => segments
            .into_iter()
            .filter_map(|segment| match segment {
                TextSegment::Placeholder(body) => {
                    let name = ctx.names.assign(Namespace::Member, placeholder_entity(body), body);
                    Some(Token::text(name, TokenSource::Placeholder(body.to_string())))
                }
                TextSegment::Literal(_) => None,
            })
            .collect(),
        TextBinding::Property(key) => vec![property_token(ctx, key, scope)],
        TextBinding::Variable { id, name } => {
            let name = ctx
                .names
                .assign(Namespace::Member, SourceEntity::Variable(id.clone()), name);
            vec![Token::text(name, TokenSource::Variable(id.clone()))]
        }
        TextBinding::Literal(_) => Vec::new(),
    }
}

/// Token of a component property reference, typed by the nearest value in scope.
fn property_token(ctx: &CompileContext<'_>, key: &str, scope: &PropertyScope<'_>) -> Token {
    let name = ctx.names.assign(
        Namespace::Member,
        SourceEntity::ComponentProperty(key.to_string()),
        property_label(key),
    );
    let (property_type, default) = property_default(scope.resolve(key));
    Token {
        name,
        source: TokenSource::ComponentProperty(key.to_string()),
        property_type,
        default,
    }
}

fn property_default(value: Option<&ComponentPropertyValue>) -> (PropertyType, DefaultValue) {
    match value {
        Some(value) if value.kind == PropertyKind::Boolean => (
            PropertyType::Boolean,
            DefaultValue::Boolean(value.value.as_bool().unwrap_or(false)),
        ),
        Some(value) => {
            let text = match &value.value {
                serde_json::Value::String(text) => text.clone(),
                serde_json::Value::Null => String::new(),
                other => other.to_string(),
            };
            (PropertyType::String, DefaultValue::Text(text))
        }
        None => (PropertyType::String, DefaultValue::empty(PropertyType::String)),
    }
}
