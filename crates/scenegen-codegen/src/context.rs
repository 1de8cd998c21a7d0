//! Per-compilation context shared by the extraction stages.

use crate::naming::IdentifierTable;
use crate::options::{CompileOptions, GenerationMode};
use crate::query::HostSnapshot;
use scenegen_core::{NodeId, Scene, VisualNode};

/// Everything a compilation reads, passed by reference through the walk.
#[derive(Clone, Copy)]
pub struct CompileContext<'a> {
    pub scene: &'a Scene,
    pub snapshot: &'a HostSnapshot,
    pub names: &'a IdentifierTable,
    pub options: CompileOptions,
    /// Designated root of the generation.
    pub root: NodeId,
}

impl<'a> CompileContext<'a> {
    pub fn node(&self, id: NodeId) -> &'a VisualNode {
        self.scene.node(id)
    }

    /// Whether a node starts a nested component.
    pub fn is_boundary(&self, id: NodeId) -> bool {
        self.options.mode == GenerationMode::Multi
            && id != self.root
            && self.node(id).kind.is_boundary_kind()
    }

    /// Tag identifier of a node.
    pub fn tag(&self, id: NodeId) -> String {
        self.names.tag(self.scene, id)
    }

    /// Pre-order walk of a component's own nodes. Nested boundaries are
    /// yielded but not entered.
    pub fn component_nodes(&self, start: NodeId) -> Vec<NodeId> {
        let mut nodes = Vec::new();
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            nodes.push(id);
            if id != start && self.is_boundary(id) {
                continue;
            }
            if let Some(children) = self.node(id).children() {
                stack.extend(children.iter().rev().copied());
            }
        }
        nodes
    }
}
