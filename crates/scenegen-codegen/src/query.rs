//! Host query fan-out.
//!
//! Style and variable queries are the only suspension points of a
//! generation request. They all run up front and produce a
//! [`HostSnapshot`]; compilation itself is synchronous over the snapshot,
//! so output order never depends on which query finished first.

use crate::error::{CodegenError, Result};
use log::{debug, warn};
use scenegen_core::{Declarations, HostError, NodeId, Scene, SceneHost, VariableId};
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tokio::task::JoinSet;

/// Host answers captured for one compilation.
#[derive(Debug, Clone, Default)]
pub struct HostSnapshot {
    styles: HashMap<NodeId, Declarations>,
    variables: HashMap<VariableId, String>,
}

impl HostSnapshot {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(mut self, node: NodeId, declarations: Declarations) -> Self {
        self.styles.insert(node, declarations);
        self
    }

    pub fn with_variable(mut self, id: VariableId, name: impl Into<String>) -> Self {
        self.variables.insert(id, name.into());
        self
    }

    /// Computed style of a node, `None` when the query failed or was skipped.
    pub fn style(&self, node: NodeId) -> Option<&Declarations> {
        self.styles.get(&node)
    }

    /// Display name of a bound variable, if the host resolved it.
    pub fn variable_name(&self, id: &VariableId) -> Option<&str> {
        self.variables.get(id).map(String::as_str)
    }

    pub fn style_count(&self) -> usize {
        self.styles.len()
    }

    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }
}

type SubtreeFuture = Pin<Box<dyn Future<Output = Result<Vec<(NodeId, Declarations)>>> + Send>>;

/// Query the host for every node and bound variable under `root`.
pub async fn snapshot(
    scene: Arc<Scene>,
    host: Arc<dyn SceneHost>,
    root: NodeId,
) -> Result<HostSnapshot> {
    let styles = query_subtree(Arc::clone(&scene), Arc::clone(&host), root).await?;
    let variables = resolve_variables(&scene, host, root).await?;

    debug!(
        "Host snapshot: {} styles, {} variables",
        styles.len(),
        variables.len()
    );

    Ok(HostSnapshot {
        styles: styles.into_iter().collect(),
        variables,
    })
}

/// Query a subtree: children concurrently, then the node itself.
fn query_subtree(scene: Arc<Scene>, host: Arc<dyn SceneHost>, id: NodeId) -> SubtreeFuture {
    Box::pin(async move {
        let children = scene.node(id).children().unwrap_or_default().to_vec();

        let mut tasks = JoinSet::new();
        for (index, child) in children.into_iter().enumerate() {
            let scene = Arc::clone(&scene);
            let host = Arc::clone(&host);
            tasks.spawn(async move { (index, query_subtree(scene, host, child).await) });
        }

        let mut ordered: Vec<Option<Vec<(NodeId, Declarations)>>> =
            (0..tasks.len()).map(|_| None).collect();
        while let Some(joined) = tasks.join_next().await {
            let (index, result) = joined?;
            ordered[index] = Some(result?);
        }

        let own = query_style(host.as_ref(), id).await?;

        let mut styles = vec![(id, own)];
        styles.extend(ordered.into_iter().flatten().flatten());
        Ok(styles)
    })
}

async fn query_style(host: &dyn SceneHost, id: NodeId) -> Result<Declarations> {
    match host.computed_style(id).await {
        Ok(declarations) => Ok(declarations),
        Err(err) => degrade(err, || {
            warn!("Style query for node {} failed; emitting an empty rule", id);
        })
        .map(|_| Declarations::new()),
    }
}

/// Resolve every distinct bound variable in the subtree concurrently.
async fn resolve_variables(
    scene: &Scene,
    host: Arc<dyn SceneHost>,
    root: NodeId,
) -> Result<HashMap<VariableId, String>> {
    let mut seen = HashSet::new();
    let mut tasks = JoinSet::new();
    for id in scene.descendants(root) {
        let Some(variable) = scene.node(id).bound_variable.clone() else {
            continue;
        };
        if !seen.insert(variable.clone()) {
            continue;
        }
        let query = host.variable_name(&variable);
        tasks.spawn(async move { (variable, query.await) });
    }

    let mut variables = HashMap::new();
    while let Some(joined) = tasks.join_next().await {
        let (variable, result) = joined?;
        match result {
            Ok(Some(name)) => {
                variables.insert(variable, name);
            }
            Ok(None) => {
                warn!("Variable {} is unknown to the host; text stays literal", variable);
            }
            Err(err) => degrade(err, || {
                warn!("Variable {} could not be resolved; text stays literal", variable);
            })?,
        }
    }
    Ok(variables)
}

/// Fatal host errors abort the request; anything else is logged and dropped.
fn degrade(err: HostError, log_degraded: impl FnOnce()) -> Result<()> {
    if err.is_fatal() {
        return Err(CodegenError::Host(err));
    }
    log_degraded();
    debug!("Degraded host error: {}", err);
    Ok(())
}
