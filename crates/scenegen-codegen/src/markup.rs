//! Markup rendering.
//!
//! Turns a component's structural tree into the body of a Lit `html`
//! template literal. Generated member names are only ever looked up here;
//! the extraction stages assign them.

use crate::context::CompileContext;
use crate::model::ComponentDescriptor;
use crate::naming::{Namespace, SourceEntity};
use crate::structure::{StructChild, StructKind, StructNode};
use crate::tokens::{placeholder_entity, TextBinding, TextSegment};
use scenegen_core::NodeId;

const INDENT: &str = "  ";

/// Render the markup of a component.
pub fn render_markup(ctx: &CompileContext<'_>, component: &ComponentDescriptor) -> String {
    let renderer = MarkupRenderer { ctx, component };
    let mut lines = Vec::new();
    renderer.node(&component.root, 0, false, &mut lines);
    lines.join("\n")
}

/// Escape text for a JavaScript template literal.
pub fn escape_template_literal(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('`', "\\`")
        .replace("${", "\\${")
}

struct MarkupRenderer<'r, 'a> {
    ctx: &'r CompileContext<'a>,
    component: &'r ComponentDescriptor,
}

impl<'r, 'a> MarkupRenderer<'r, 'a> {
    /// `in_button` is set below an element already rendered as a `button`;
    /// such descendants keep their own tag, since buttons cannot nest.
    fn node(&self, node: &StructNode, depth: usize, in_button: bool, lines: &mut Vec<String>) {
        let indent = INDENT.repeat(depth);

        if node.kind == StructKind::Boundary {
            let bindings: String = node
                .bindings()
                .map(|name| format!(" .{}=${{this.{}}}", name, name))
                .collect();
            lines.push(format!("{}<{}{}></{}>", indent, node.tag, bindings, node.tag));
            return;
        }

        let mut events = self.component.events_for(node.origin).peekable();
        let as_button = events.peek().is_some() && !in_button;
        let tag = if as_button { "button" } else { node.tag.as_str() };

        let mut open = format!("<{}", tag);
        if let Some(class) = node.class() {
            open.push_str(&format!(" class=\"{}\"", class));
        }
        for event in events {
            open.push_str(&format!(" @{}=${{this.{}}}", event.dom_event, event.handler));
        }
        open.push('>');

        match node.children.as_slice() {
            [] => lines.push(format!("{}{}</{}>", indent, open, tag)),
            [only] if only.is_text() => {
                lines.push(format!("{}{}{}</{}>", indent, open, self.text(only), tag));
            }
            children => {
                lines.push(format!("{}{}", indent, open));
                for child in children {
                    match child {
                        StructChild::Node(inner) => self.node(inner, depth + 1, in_button || as_button, lines),
                        text => lines.push(format!("{}{}{}", indent, INDENT, self.text(text))),
                    }
                }
                lines.push(format!("{}</{}>", indent, tag));
            }
        }
    }

    fn text(&self, child: &StructChild) -> String {
        match child {
            StructChild::Text(id) => self.text_content(*id),
            StructChild::Label(label) => escape_template_literal(label),
            StructChild::Node(_) => String::new(),
        }
    }

    fn text_content(&self, id: NodeId) -> String {
        let names = self.ctx.names;
        match TextBinding::classify(self.ctx.node(id), self.ctx.snapshot) {
            TextBinding::Placeholders(segments) => segments
                .into_iter()
                .map(|segment| match segment {
                    TextSegment::Literal(text) => escape_template_literal(text),
                    TextSegment::Placeholder(body) => {
                        match names.lookup(Namespace::Member, &placeholder_entity(body)) {
                            Some(name) => binding(&name),
                            None => escape_template_literal(&format!("{{{{{}}}}}", body)),
                        }
                    }
                })
                .collect(),
            TextBinding::Property(key) => {
                let entity = SourceEntity::ComponentProperty(key.to_string());
                self.bound_or_literal(names.lookup(Namespace::Member, &entity), id)
            }
            TextBinding::Variable { id: variable, .. } => {
                let entity = SourceEntity::Variable(variable.clone());
                self.bound_or_literal(names.lookup(Namespace::Member, &entity), id)
            }
            TextBinding::Literal(text) => escape_template_literal(text),
        }
    }

    fn bound_or_literal(&self, name: Option<String>, id: NodeId) -> String {
        match name {
            Some(name) => binding(&name),
            None => escape_template_literal(self.ctx.node(id).text_content().unwrap_or_default()),
        }
    }
}

fn binding(name: &str) -> String {
    format!("${{this.{}}}", name)
}
