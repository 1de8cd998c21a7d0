//! Interface to the design-tool host.
//!
//! Style and variable queries are asynchronous on the host side. Futures are
//! boxed and `'static` so the compiler can fan them out onto a task set.

use crate::errors::HostError;
use crate::scene::{NodeId, VariableId};
use indexmap::IndexMap;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Computed style declarations of one node, in host order.
pub type Declarations = IndexMap<String, String>;

/// Boxed future returned by host queries.
pub type HostFuture<T> = Pin<Box<dyn Future<Output = Result<T, HostError>> + Send + 'static>>;

/// Asynchronous queries a host answers about the scene.
pub trait SceneHost: Send + Sync {
    /// Computed style of a node.
    fn computed_style(&self, node: NodeId) -> HostFuture<Declarations>;

    /// Display name of a bound variable, `None` when the host does not know it.
    fn variable_name(&self, id: &VariableId) -> HostFuture<Option<String>>;
}

#[derive(Debug, Default)]
struct HostData {
    styles: HashMap<NodeId, Declarations>,
    variables: HashMap<VariableId, String>,
}

/// In-memory host answering from data captured with the document.
#[derive(Debug, Clone, Default)]
pub struct StaticHost {
    data: Arc<HostData>,
}

impl StaticHost {
    pub fn new(
        styles: HashMap<NodeId, Declarations>,
        variables: HashMap<VariableId, String>,
    ) -> Self {
        Self {
            data: Arc::new(HostData { styles, variables }),
        }
    }

    /// Number of nodes with captured styles.
    pub fn style_count(&self) -> usize {
        self.data.styles.len()
    }
}

impl SceneHost for StaticHost {
    fn computed_style(&self, node: NodeId) -> HostFuture<Declarations> {
        let declarations = self.data.styles.get(&node).cloned().unwrap_or_default();
        Box::pin(async move { Ok(declarations) })
    }

    fn variable_name(&self, id: &VariableId) -> HostFuture<Option<String>> {
        let name = self.data.variables.get(id).cloned();
        Box::pin(async move { Ok(name) })
    }
}
