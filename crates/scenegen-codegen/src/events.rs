//! Event extraction.
//!
//! Each exported interaction trigger on a node becomes one component
//! event named `<tag>-<trigger>`, with a handler method that re-dispatches
//! the DOM event as a composed custom event.

use crate::context::CompileContext;
use crate::model::EventDescriptor;
use crate::naming::{Namespace, SourceEntity};
use scenegen_core::{NodeId, TriggerKind};
use std::collections::HashSet;

/// DOM event a trigger listens to.
pub fn dom_event(trigger: TriggerKind) -> &'static str {
    match trigger {
        TriggerKind::Hover => "mouseenter",
        TriggerKind::Press => "pointerdown",
        TriggerKind::MouseDown => "mousedown",
        _ => "click",
    }
}

/// Type of the DOM event a trigger delivers.
pub fn payload_type(trigger: TriggerKind) -> &'static str {
    match trigger {
        TriggerKind::Press => "PointerEvent",
        _ => "MouseEvent",
    }
}

/// Collect the events of the component rooted at `start`, in pre-order.
///
/// Nested boundaries, including their own root node, raise events in
/// their own component.
pub fn extract_events(ctx: &CompileContext<'_>, start: NodeId) -> Vec<EventDescriptor> {
    let mut seen = HashSet::new();
    let mut events = Vec::new();

    for id in ctx.component_nodes(start) {
        if id != start && ctx.is_boundary(id) {
            continue;
        }
        for reaction in &ctx.node(id).reactions {
            let trigger = reaction.trigger_kind();
            if !trigger.is_exported() || !seen.insert((id, trigger)) {
                continue;
            }

            let tag = ctx.tag(id);
            let handler = ctx.names.assign(
                Namespace::Member,
                SourceEntity::Event(id, trigger),
                &format!("on {} {}", tag, trigger.slug()),
            );
            events.push(EventDescriptor {
                name: format!("{}-{}", tag, trigger.slug()),
                handler,
                dom_event: dom_event(trigger),
                payload_type: payload_type(trigger),
                trigger,
                origin: id,
            });
        }
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::IdentifierTable;
    use crate::options::GenerationPreferences;
    use crate::query::HostSnapshot;
    use scenegen_core::{Scene, VisualNode};

    #[test]
    fn test_click_event() {
        let mut scene = Scene::new();
        let root = scene.add_root(VisualNode::frame("Button").with_reaction(TriggerKind::Click));
        let snapshot = HostSnapshot::new();
        let names = IdentifierTable::new();
        let ctx = CompileContext {
            scene: &scene,
            snapshot: &snapshot,
            names: &names,
            options: GenerationPreferences::default().compile_options(),
            root,
        };

        let events = extract_events(&ctx, root);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name, "button-element-click");
        assert_eq!(events[0].handler, "onButtonElementClick");
        assert_eq!(events[0].dom_event, "click");
        assert_eq!(events[0].payload_type, "MouseEvent");
    }

    #[test]
    fn test_duplicate_and_unexported_triggers() {
        let mut scene = Scene::new();
        let root = scene.add_root(
            VisualNode::frame("Tile")
                .with_reaction(TriggerKind::Press)
                .with_reaction(TriggerKind::Press)
                .with_reaction(TriggerKind::None)
                .with_reaction(TriggerKind::Other)
                .with_reaction(TriggerKind::Hover),
        );
        let snapshot = HostSnapshot::new();
        let names = IdentifierTable::new();
        let ctx = CompileContext {
            scene: &scene,
            snapshot: &snapshot,
            names: &names,
            options: GenerationPreferences::default().compile_options(),
            root,
        };

        let events = extract_events(&ctx, root);
        let summary: Vec<(&str, &str, &str)> = events
            .iter()
            .map(|e| (e.name.as_str(), e.dom_event, e.payload_type))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("tile-element-press", "pointerdown", "PointerEvent"),
                ("tile-element-hover", "mouseenter", "MouseEvent"),
            ]
        );
    }

    #[test]
    fn test_nested_boundary_owns_its_events() {
        let mut scene = Scene::new();
        let root = scene.add_root(VisualNode::frame("Page"));
        let button = scene.add_child(root, VisualNode::instance("Button").with_reaction(TriggerKind::Click));
        let snapshot = HostSnapshot::new();
        let names = IdentifierTable::new();
        let ctx = CompileContext {
            scene: &scene,
            snapshot: &snapshot,
            names: &names,
            options: GenerationPreferences::multi().compile_options(),
            root,
        };

        assert!(extract_events(&ctx, root).is_empty());
        let inner = extract_events(&ctx, button);
        assert_eq!(inner.len(), 1);
        assert_eq!(inner[0].origin, button);
    }
}
