//! JSON design documents.
//!
//! A document is the host's node tree serialized as nested JSON, together
//! with the computed styles and variable names the host would answer
//! queries with. Loading flattens the tree into a [`Scene`] in pre-order and
//! captures the query answers in a [`StaticHost`].

use crate::errors::DocumentError;
use crate::host::{Declarations, StaticHost};
use crate::scene::{ComponentPropertyValue, NodeId, NodeKind, Reaction, Scene, VariableId, VisualNode};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// One node of a serialized design tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentNode {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<DocumentNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub characters: Option<String>,
    /// Computed style, in host order.
    #[serde(default)]
    pub css: Declarations,
    #[serde(default)]
    pub reactions: Vec<Reaction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bound_variable: Option<VariableId>,
    #[serde(default)]
    pub component_property_definitions: IndexMap<String, ComponentPropertyValue>,
    #[serde(default)]
    pub component_properties: IndexMap<String, ComponentPropertyValue>,
    #[serde(default)]
    pub component_property_references: IndexMap<String, String>,
}

/// A serialized design document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub root: Option<DocumentNode>,
    /// Variable id -> display name.
    #[serde(default)]
    pub variables: IndexMap<VariableId, String>,
}

/// Scene and host produced by loading a document.
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub scene: Scene,
    pub host: StaticHost,
}

impl Document {
    /// Parse a document from JSON text.
    pub fn from_json_str(source: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Read and parse a document file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_json_str(&source)
    }

    /// Flatten the tree into a scene and capture styles and variables.
    pub fn load(&self) -> LoadedDocument {
        let mut scene = Scene::new();
        let mut styles = HashMap::new();

        if let Some(root) = &self.root {
            let id = scene.add_root(to_visual(root));
            styles.insert(id, root.css.clone());
            add_children(&mut scene, &mut styles, id, root);
        }

        let variables = self
            .variables
            .iter()
            .map(|(id, name)| (id.clone(), name.clone()))
            .collect();

        LoadedDocument {
            scene,
            host: StaticHost::new(styles, variables),
        }
    }
}

fn add_children(
    scene: &mut Scene,
    styles: &mut HashMap<NodeId, Declarations>,
    parent: NodeId,
    node: &DocumentNode,
) {
    for child in node.children.iter().flatten() {
        let id = scene.add_child(parent, to_visual(child));
        styles.insert(id, child.css.clone());
        add_children(scene, styles, id, child);
    }
}

fn to_visual(node: &DocumentNode) -> VisualNode {
    let mut visual = VisualNode::new(node.kind, node.name.clone());
    let is_container = node.children.is_some()
        || (node.kind.is_container_kind() && node.characters.is_none());
    visual.children = is_container.then(Vec::new);
    visual.characters = node.characters.clone();
    visual.bound_variable = node.bound_variable.clone();
    visual.reactions = node.reactions.clone();
    visual.property_definitions = node.component_property_definitions.clone();
    visual.property_values = node.component_properties.clone();
    visual.property_references = node.component_property_references.clone();
    visual
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{NodeShape, PropertyKind, TriggerKind};

    const CARD: &str = r#"{
        "root": {
            "name": "Card",
            "type": "COMPONENT",
            "css": {"display": "flex", "padding": "8px"},
            "componentPropertyDefinitions": {
                "Label#1:0": {"type": "TEXT", "defaultValue": "Buy"}
            },
            "children": [
                {"name": "Title", "type": "TEXT", "characters": "{{title}}"},
                {
                    "name": "Label",
                    "type": "TEXT",
                    "characters": "Buy",
                    "componentPropertyReferences": {"characters": "Label#1:0"},
                    "reactions": [{"trigger": {"type": "ON_CLICK"}}, {"trigger": null}]
                },
                {"name": "Divider", "type": "RECTANGLE"}
            ]
        },
        "variables": {"VariableID:1:2": "User Name"}
    }"#;

    #[test]
    fn test_load_flattens_pre_order() {
        let doc = Document::from_json_str(CARD).unwrap();
        let loaded = doc.load();
        let scene = &loaded.scene;

        let root = scene.root().unwrap();
        assert_eq!(scene.len(), 4);
        assert_eq!(scene.node(root).kind, NodeKind::Component);
        assert_eq!(
            scene.node(root).children(),
            Some(&[NodeId(1), NodeId(2), NodeId(3)][..])
        );
        assert_eq!(scene.node(NodeId(1)).shape(), NodeShape::Text("{{title}}"));
        assert_eq!(scene.node(NodeId(3)).shape(), NodeShape::Leaf);
        assert_eq!(loaded.host.style_count(), 4);
    }

    #[test]
    fn test_load_properties_and_reactions() {
        let loaded = Document::from_json_str(CARD).unwrap().load();
        let scene = &loaded.scene;

        let definition = &scene.node(NodeId(0)).property_definitions["Label#1:0"];
        assert_eq!(definition.kind, PropertyKind::Text);
        assert_eq!(definition.value, serde_json::json!("Buy"));

        let label = scene.node(NodeId(2));
        assert_eq!(label.characters_reference(), Some("Label#1:0"));
        let triggers: Vec<_> = label.reactions.iter().map(Reaction::trigger_kind).collect();
        assert_eq!(triggers, vec![TriggerKind::Click, TriggerKind::None]);
    }

    #[test]
    fn test_empty_document_has_no_root() {
        let loaded = Document::from_json_str("{}").unwrap().load();
        assert!(loaded.scene.root().is_none());
        assert!(loaded.scene.is_empty());
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            Document::from_json_str("{\"root\": 3}"),
            Err(DocumentError::Json(_))
        ));
    }
}
