//! Style extraction.

use crate::context::CompileContext;
use crate::model::StyleRule;
use crate::options::StylePolicy;
use scenegen_core::NodeId;

/// Collect the style rules of the component rooted at `start`, in
/// pre-order. Every visited node yields a rule, empty if the host query
/// failed.
pub fn extract_styles(ctx: &CompileContext<'_>, start: NodeId) -> Vec<StyleRule> {
    let nodes: Vec<NodeId> = match ctx.options.style_policy {
        StylePolicy::Flat => ctx.scene.descendants(start).collect(),
        StylePolicy::Isolated => ctx
            .component_nodes(start)
            .into_iter()
            .filter(|&id| id == start || !ctx.is_boundary(id))
            .collect(),
    };

    nodes
        .into_iter()
        .map(|id| StyleRule {
            selector: ctx.tag(id),
            declarations: ctx.snapshot.style(id).cloned().unwrap_or_default(),
            origin: id,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::IdentifierTable;
    use crate::options::{CompileOptions, GenerationMode};
    use crate::query::HostSnapshot;
    use scenegen_core::{Declarations, Scene, VisualNode};

    fn decls(property: &str, value: &str) -> Declarations {
        let mut declarations = Declarations::new();
        declarations.insert(property.to_string(), value.to_string());
        declarations
    }

    fn nested_scene() -> Scene {
        let mut scene = Scene::new();
        let root = scene.add_root(VisualNode::frame("Page"));
        let card = scene.add_child(root, VisualNode::instance("Card"));
        scene.add_child(card, VisualNode::text("Title", "Hi"));
        scene.add_child(root, VisualNode::leaf("Footer"));
        scene
    }

    fn selectors(rules: &[StyleRule]) -> Vec<&str> {
        rules.iter().map(|rule| rule.selector.as_str()).collect()
    }

    #[test]
    fn test_flat_includes_everything() {
        let scene = nested_scene();
        let snapshot = HostSnapshot::new().with_style(NodeId(3), decls("height", "1px"));
        let names = IdentifierTable::new();
        let ctx = CompileContext {
            scene: &scene,
            snapshot: &snapshot,
            names: &names,
            options: CompileOptions {
                mode: GenerationMode::Multi,
                style_policy: StylePolicy::Flat,
                ..Default::default()
            },
            root: NodeId(0),
        };
        names.assign_tags(&scene, NodeId(0));

        let rules = extract_styles(&ctx, NodeId(0));
        assert_eq!(
            selectors(&rules),
            vec!["page-element", "card-element", "title-element", "footer-element"]
        );
        assert!(rules[0].is_empty());
        assert_eq!(rules[3].declarations["height"], "1px");
    }

    #[test]
    fn test_isolated_skips_nested_components() {
        let scene = nested_scene();
        let snapshot = HostSnapshot::new();
        let names = IdentifierTable::new();
        let ctx = CompileContext {
            scene: &scene,
            snapshot: &snapshot,
            names: &names,
            options: CompileOptions {
                mode: GenerationMode::Multi,
                style_policy: StylePolicy::Isolated,
                ..Default::default()
            },
            root: NodeId(0),
        };
        names.assign_tags(&scene, NodeId(0));

        let outer = extract_styles(&ctx, NodeId(0));
        assert_eq!(selectors(&outer), vec!["page-element", "footer-element"]);

        let inner = extract_styles(&ctx, NodeId(1));
        assert_eq!(selectors(&inner), vec!["card-element", "title-element"]);
    }
}
