//! Structural tree builder.
//!
//! Walks the scene from the designated root and produces one
//! [`ComponentDescriptor`] per component boundary: the root first, nested
//! components in pre-order discovery order.

use crate::context::CompileContext;
use crate::error::{CodegenError, Result};
use crate::events::extract_events;
use crate::model::ComponentDescriptor;
use crate::naming::{IdentifierTable, Namespace, SourceEntity};
use crate::options::CompileOptions;
use crate::query::HostSnapshot;
use crate::styles::extract_styles;
use crate::tokens::{extract_tokens, PropertyScope};
use log::debug;
use scenegen_core::{NodeId, NodeShape, Scene};
use smallvec::SmallVec;

/// Role of a structural node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructKind {
    Container,
    TextLeaf,
    /// Opaque reference to a nested component.
    Boundary,
}

/// Attribute of a structural node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attribute {
    /// `class="<id>"`
    Class(String),
    /// Lit property binding `.<name>=${this.<name>}`.
    PropertyBinding(String),
}

/// Child of a structural node.
#[derive(Debug, Clone, PartialEq)]
pub enum StructChild {
    Node(StructNode),
    /// Text content of the origin node, resolved at render time.
    Text(NodeId),
    /// Fixed label text.
    Label(String),
}

impl StructChild {
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_) | Self::Label(_))
    }
}

/// Node of the intermediate structural tree.
#[derive(Debug, Clone, PartialEq)]
pub struct StructNode {
    pub tag: String,
    pub attributes: SmallVec<[Attribute; 2]>,
    pub children: Vec<StructChild>,
    pub kind: StructKind,
    /// Visual node this node was built from.
    pub origin: NodeId,
}

impl StructNode {
    /// Value of the class attribute.
    pub fn class(&self) -> Option<&str> {
        self.attributes.iter().find_map(|attribute| match attribute {
            Attribute::Class(class) => Some(class.as_str()),
            _ => None,
        })
    }

    /// Names bound with property bindings, in order.
    pub fn bindings(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().filter_map(|attribute| match attribute {
            Attribute::PropertyBinding(name) => Some(name.as_str()),
            _ => None,
        })
    }
}

/// Compile the scene into component descriptors.
pub fn compile(
    scene: &Scene,
    snapshot: &HostSnapshot,
    names: &IdentifierTable,
    options: CompileOptions,
) -> Result<Vec<ComponentDescriptor>> {
    let root = scene.root().ok_or(CodegenError::NoRootNode)?;
    names.assign_tags(scene, root);

    let ctx = CompileContext {
        scene,
        snapshot,
        names,
        options,
        root,
    };
    let mut builder = Builder {
        ctx,
        components: Vec::new(),
    };
    builder.component(root, &PropertyScope::new());

    let components: Vec<ComponentDescriptor> = builder.components.into_iter().flatten().collect();
    debug!("Compiled {} component(s)", components.len());
    Ok(components)
}

struct Builder<'a> {
    ctx: CompileContext<'a>,
    /// Slots are reserved before nested components are discovered so the
    /// output keeps discovery order.
    components: Vec<Option<ComponentDescriptor>>,
}

impl<'a> Builder<'a> {
    fn component(&mut self, id: NodeId, scope: &PropertyScope<'a>) -> usize {
        let slot = self.components.len();
        self.components.push(None);

        let ctx = self.ctx;
        let node = ctx.node(id);
        let properties = extract_tokens(&ctx, id, scope);
        let events = extract_events(&ctx, id);
        let styles = extract_styles(&ctx, id);
        let root = self.build(id, true, scope);

        let descriptor = ComponentDescriptor {
            tag: ctx.tag(id),
            class_name: ctx.names.assign(Namespace::Class, SourceEntity::Node(id), &node.name),
            styles,
            properties,
            events,
            root,
            origin: id,
        };
        debug!(
            "Component {} ({}): {} rules, {} properties, {} events",
            descriptor.tag,
            descriptor.class_name,
            descriptor.styles.len(),
            descriptor.properties.len(),
            descriptor.events.len()
        );
        self.components[slot] = Some(descriptor);
        slot
    }

    fn build(&mut self, id: NodeId, is_component_root: bool, scope: &PropertyScope<'a>) -> StructNode {
        let ctx = self.ctx;
        let node = ctx.node(id);
        let tag = ctx.tag(id);

        if !is_component_root && ctx.is_boundary(id) {
            let slot = self.component(id, scope);
            let attributes = self.components[slot]
                .as_ref()
                .map(|nested| {
                    nested
                        .properties
                        .iter()
                        .map(|token| Attribute::PropertyBinding(token.name.clone()))
                        .collect()
                })
                .unwrap_or_default();
            return StructNode {
                tag,
                attributes,
                children: Vec::new(),
                kind: StructKind::Boundary,
                origin: id,
            };
        }

        let mut attributes = SmallVec::new();
        attributes.push(Attribute::Class(tag));

        match node.shape() {
            NodeShape::Container(children) => {
                let inner = scope.enter(node);
                let children = children
                    .iter()
                    .map(|&child| StructChild::Node(self.build(child, false, &inner)))
                    .collect();
                StructNode {
                    tag: "div".to_string(),
                    attributes,
                    children,
                    kind: StructKind::Container,
                    origin: id,
                }
            }
            NodeShape::Text(_) => StructNode {
                tag: ctx.options.text_element.tag().to_string(),
                attributes,
                children: vec![StructChild::Text(id)],
                kind: StructKind::TextLeaf,
                origin: id,
            },
            NodeShape::Leaf => StructNode {
                tag: "div".to_string(),
                attributes,
                children: vec![StructChild::Label(node.name.clone())],
                kind: StructKind::Container,
                origin: id,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{GenerationPreferences, TextElement};
    use scenegen_core::VisualNode;

    fn compile_with(scene: &Scene, prefs: GenerationPreferences) -> Vec<ComponentDescriptor> {
        let names = IdentifierTable::new();
        compile(scene, &HostSnapshot::new(), &names, prefs.compile_options()).unwrap()
    }

    #[test]
    fn test_no_root_node() {
        let names = IdentifierTable::new();
        let result = compile(
            &Scene::new(),
            &HostSnapshot::new(),
            &names,
            CompileOptions::default(),
        );
        assert!(matches!(result, Err(CodegenError::NoRootNode)));
    }

    #[test]
    fn test_text_root() {
        let mut scene = Scene::new();
        let root = scene.add_root(VisualNode::text("Greeting", "Hello"));

        let components = compile_with(&scene, GenerationPreferences::default());
        assert_eq!(components.len(), 1);
        let tree = &components[0].root;
        assert_eq!(tree.kind, StructKind::TextLeaf);
        assert_eq!(tree.tag, "div");
        assert_eq!(tree.class(), Some("greeting-element"));
        assert_eq!(tree.children, vec![StructChild::Text(root)]);
    }

    #[test]
    fn test_inline_text_and_leaf_label() {
        let mut scene = Scene::new();
        let root = scene.add_root(VisualNode::frame("Card"));
        scene.add_child(root, VisualNode::text("Title", "Hi"));
        scene.add_child(root, VisualNode::leaf("Divider"));

        let prefs = GenerationPreferences {
            text_element: TextElement::Inline,
            ..Default::default()
        };
        let components = compile_with(&scene, prefs);
        let tree = &components[0].root;
        assert_eq!(tree.kind, StructKind::Container);
        assert_eq!(components[0].class_name, "CardElement");

        let StructChild::Node(title) = &tree.children[0] else {
            panic!("expected node");
        };
        assert_eq!(title.tag, "span");

        let StructChild::Node(divider) = &tree.children[1] else {
            panic!("expected node");
        };
        assert_eq!(divider.kind, StructKind::Container);
        assert_eq!(divider.children, vec![StructChild::Label("Divider".into())]);
    }

    #[test]
    fn test_single_mode_never_splits() {
        let mut scene = Scene::new();
        let root = scene.add_root(VisualNode::frame("Page"));
        let card = scene.add_child(root, VisualNode::instance("Card"));
        scene.add_child(card, VisualNode::frame("Inner"));

        let components = compile_with(&scene, GenerationPreferences::default());
        assert_eq!(components.len(), 1);
    }

    #[test]
    fn test_multi_mode_discovery_order() {
        let mut scene = Scene::new();
        let root = scene.add_root(VisualNode::frame("Page"));
        let header = scene.add_child(root, VisualNode::instance("Header"));
        scene.add_child(header, VisualNode::component("Logo"));
        let body = scene.add_child(root, VisualNode::frame("Body"));
        scene.add_child(body, VisualNode::text("Text", "{{message}}"));

        let components = compile_with(&scene, GenerationPreferences::multi());
        let tags: Vec<&str> = components.iter().map(|c| c.tag.as_str()).collect();
        assert_eq!(
            tags,
            vec!["page-element", "header-element", "logo-element", "body-element"]
        );

        let StructChild::Node(body_ref) = &components[0].root.children[1] else {
            panic!("expected node");
        };
        assert_eq!(body_ref.kind, StructKind::Boundary);
        assert_eq!(body_ref.tag, "body-element");
        assert!(body_ref.children.is_empty());
        assert_eq!(body_ref.bindings().collect::<Vec<_>>(), vec!["message"]);
        assert_eq!(components[0].properties[0].name, "message");
    }
}
