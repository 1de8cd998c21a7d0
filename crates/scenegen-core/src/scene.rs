//! Visual node arena.
//!
//! A [`Scene`] owns every [`VisualNode`] of one design tree. Nodes refer to
//! their children through [`NodeId`] handles into the arena, so any later
//! stage can keep a cheap, non-owning reference back to a node.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle to a node inside a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);

impl NodeId {
    /// Position of the node in its arena.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Host identifier of a design variable bound to text content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariableId(pub String);

impl VariableId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VariableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Type tag of a visual node as reported by the design tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeKind {
    /// Reusable component definition.
    Component,
    /// Set of component variants.
    ComponentSet,
    /// Instance of a component.
    Instance,
    /// Generic container frame.
    Frame,
    /// Plain grouping container.
    Group,
    /// Canvas section.
    Section,
    /// Text leaf.
    Text,
    /// Any other leaf (rectangle, vector, ellipse, ...).
    Shape,
}

impl NodeKind {
    /// Parse a host type string. Unknown types are treated as shapes.
    pub fn from_host(name: &str) -> Self {
        match name {
            "COMPONENT" => Self::Component,
            "COMPONENT_SET" => Self::ComponentSet,
            "INSTANCE" => Self::Instance,
            "FRAME" => Self::Frame,
            "GROUP" => Self::Group,
            "SECTION" => Self::Section,
            "TEXT" => Self::Text,
            _ => Self::Shape,
        }
    }

    /// Host type string.
    pub fn as_host(&self) -> &'static str {
        match self {
            Self::Component => "COMPONENT",
            Self::ComponentSet => "COMPONENT_SET",
            Self::Instance => "INSTANCE",
            Self::Frame => "FRAME",
            Self::Group => "GROUP",
            Self::Section => "SECTION",
            Self::Text => "TEXT",
            Self::Shape => "SHAPE",
        }
    }

    /// Whether nodes of this kind may start a component of their own.
    pub fn is_boundary_kind(&self) -> bool {
        matches!(self, Self::Component | Self::Instance | Self::Frame)
    }

    /// Whether nodes of this kind carry a child list.
    pub fn is_container_kind(&self) -> bool {
        matches!(
            self,
            Self::Component
                | Self::ComponentSet
                | Self::Instance
                | Self::Frame
                | Self::Group
                | Self::Section
        )
    }
}

impl From<String> for NodeKind {
    fn from(value: String) -> Self {
        Self::from_host(&value)
    }
}

impl From<NodeKind> for String {
    fn from(kind: NodeKind) -> Self {
        kind.as_host().to_string()
    }
}

/// Interaction trigger of a reaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TriggerKind {
    /// Reaction without a trigger.
    None,
    Click,
    Hover,
    Press,
    MouseDown,
    /// Triggers that are never exported (drag, timeout, key, ...).
    Other,
}

impl TriggerKind {
    /// Parse a host trigger type string.
    pub fn from_host(name: &str) -> Self {
        match name {
            "ON_CLICK" => Self::Click,
            "ON_HOVER" | "MOUSE_ENTER" => Self::Hover,
            "ON_PRESS" => Self::Press,
            "MOUSE_DOWN" => Self::MouseDown,
            _ => Self::Other,
        }
    }

    /// Whether the trigger becomes an emitted component event.
    pub fn is_exported(&self) -> bool {
        matches!(self, Self::Click | Self::Hover | Self::Press | Self::MouseDown)
    }

    /// Short lowercase name used when building event names.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Click => "click",
            Self::Hover => "hover",
            Self::Press => "press",
            Self::MouseDown => "mousedown",
            Self::Other => "other",
        }
    }
}

/// Trigger payload as delivered by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerSpec {
    #[serde(rename = "type")]
    pub kind: String,
}

/// One interaction reaction of a node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    #[serde(default)]
    pub trigger: Option<TriggerSpec>,
}

impl Reaction {
    /// Reaction with the given trigger.
    pub fn on(trigger: TriggerKind) -> Self {
        let kind = match trigger {
            TriggerKind::None => return Self { trigger: None },
            TriggerKind::Click => "ON_CLICK",
            TriggerKind::Hover => "ON_HOVER",
            TriggerKind::Press => "ON_PRESS",
            TriggerKind::MouseDown => "MOUSE_DOWN",
            TriggerKind::Other => "AFTER_TIMEOUT",
        };
        Self {
            trigger: Some(TriggerSpec { kind: kind.to_string() }),
        }
    }

    pub fn trigger_kind(&self) -> TriggerKind {
        self.trigger
            .as_ref()
            .map(|spec| TriggerKind::from_host(&spec.kind))
            .unwrap_or(TriggerKind::None)
    }
}

/// Type of a component property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PropertyKind {
    Boolean,
    Text,
    InstanceSwap,
    Variant,
}

/// A component property definition (default value) or instance value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentPropertyValue {
    #[serde(rename = "type")]
    pub kind: PropertyKind,
    #[serde(alias = "defaultValue")]
    pub value: serde_json::Value,
}

impl ComponentPropertyValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            kind: PropertyKind::Text,
            value: serde_json::Value::String(value.into()),
        }
    }

    pub fn boolean(value: bool) -> Self {
        Self {
            kind: PropertyKind::Boolean,
            value: serde_json::Value::Bool(value),
        }
    }
}

/// Node capabilities that extraction stages can require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facet {
    Children,
    Text,
    Reactions,
    BoundVariable,
    PropertyReference,
}

/// Closed structural classification of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeShape<'a> {
    Container(&'a [NodeId]),
    Text(&'a str),
    Leaf,
}

/// Field of a text node that can reference a component property.
pub const CHARACTERS_FIELD: &str = "characters";

/// One node of the input design tree.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualNode {
    pub name: String,
    pub kind: NodeKind,
    /// Present on containers, even when empty.
    pub children: Option<Vec<NodeId>>,
    /// Present on text leaves.
    pub characters: Option<String>,
    pub bound_variable: Option<VariableId>,
    pub reactions: Vec<Reaction>,
    /// Property definitions of a component, keyed by property key.
    pub property_definitions: IndexMap<String, ComponentPropertyValue>,
    /// Property values set on an instance, keyed by property key.
    pub property_values: IndexMap<String, ComponentPropertyValue>,
    /// Field name -> referenced property key.
    pub property_references: IndexMap<String, String>,
}

impl VisualNode {
    /// Create a node of the given kind. Container kinds start with an
    /// empty child list.
    pub fn new(kind: NodeKind, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            children: kind.is_container_kind().then(Vec::new),
            characters: None,
            bound_variable: None,
            reactions: Vec::new(),
            property_definitions: IndexMap::new(),
            property_values: IndexMap::new(),
            property_references: IndexMap::new(),
        }
    }

    pub fn frame(name: impl Into<String>) -> Self {
        Self::new(NodeKind::Frame, name)
    }

    pub fn group(name: impl Into<String>) -> Self {
        Self::new(NodeKind::Group, name)
    }

    pub fn component(name: impl Into<String>) -> Self {
        Self::new(NodeKind::Component, name)
    }

    pub fn instance(name: impl Into<String>) -> Self {
        Self::new(NodeKind::Instance, name)
    }

    pub fn leaf(name: impl Into<String>) -> Self {
        Self::new(NodeKind::Shape, name)
    }

    /// Create a text leaf.
    pub fn text(name: impl Into<String>, characters: impl Into<String>) -> Self {
        let mut node = Self::new(NodeKind::Text, name);
        node.characters = Some(characters.into());
        node
    }

    /// Add a reaction.
    pub fn with_reaction(mut self, trigger: TriggerKind) -> Self {
        self.reactions.push(Reaction::on(trigger));
        self
    }

    /// Bind the text content to a variable.
    pub fn with_bound_variable(mut self, id: VariableId) -> Self {
        self.bound_variable = Some(id);
        self
    }

    /// Define a component property.
    pub fn with_definition(mut self, key: impl Into<String>, value: ComponentPropertyValue) -> Self {
        self.property_definitions.insert(key.into(), value);
        self
    }

    /// Set an instance property value.
    pub fn with_value(mut self, key: impl Into<String>, value: ComponentPropertyValue) -> Self {
        self.property_values.insert(key.into(), value);
        self
    }

    /// Reference a component property from one of this node's fields.
    pub fn with_reference(mut self, field: impl Into<String>, key: impl Into<String>) -> Self {
        self.property_references.insert(field.into(), key.into());
        self
    }

    pub fn children(&self) -> Option<&[NodeId]> {
        self.children.as_deref()
    }

    pub fn text_content(&self) -> Option<&str> {
        self.characters.as_deref()
    }

    /// Property key referenced by the text content, if any.
    pub fn characters_reference(&self) -> Option<&str> {
        self.property_references
            .get(CHARACTERS_FIELD)
            .map(String::as_str)
    }

    pub fn has(&self, facet: Facet) -> bool {
        match facet {
            Facet::Children => self.children.is_some(),
            Facet::Text => self.children.is_none() && self.characters.is_some(),
            Facet::Reactions => !self.reactions.is_empty(),
            Facet::BoundVariable => self.bound_variable.is_some(),
            Facet::PropertyReference => !self.property_references.is_empty(),
        }
    }

    /// Classify the node. A child list wins over text content.
    pub fn shape(&self) -> NodeShape<'_> {
        match (&self.children, &self.characters) {
            (Some(children), _) => NodeShape::Container(children),
            (None, Some(text)) => NodeShape::Text(text),
            (None, None) => NodeShape::Leaf,
        }
    }
}

/// Arena of visual nodes with an optional designated root.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    nodes: Vec<VisualNode>,
    root: Option<NodeId>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the root node and return its handle.
    pub fn add_root(&mut self, node: VisualNode) -> NodeId {
        let id = self.push(node);
        self.root = Some(id);
        id
    }

    /// Add a child node to a parent and return its handle.
    ///
    /// A parent without a child list gets one.
    pub fn add_child(&mut self, parent: NodeId, node: VisualNode) -> NodeId {
        let id = self.push(node);
        if let Some(parent) = self.nodes.get_mut(parent.index()) {
            parent.children.get_or_insert_with(Vec::new).push(id);
        }
        id
    }

    fn push(&mut self, node: VisualNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Get a node by handle.
    ///
    /// # Panics
    ///
    /// Panics if the handle does not belong to this scene.
    pub fn node(&self, id: NodeId) -> &VisualNode {
        &self.nodes[id.index()]
    }

    pub fn get(&self, id: NodeId) -> Option<&VisualNode> {
        self.nodes.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate a subtree in depth-first pre-order.
    pub fn descendants(&self, start: NodeId) -> Descendants<'_> {
        Descendants {
            scene: self,
            stack: vec![start],
        }
    }
}

/// Pre-order iterator over a subtree.
pub struct Descendants<'a> {
    scene: &'a Scene,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        if let Some(children) = self.scene.get(id).and_then(VisualNode::children) {
            self.stack.extend(children.iter().rev().copied());
        }
        Some(id)
    }
}
