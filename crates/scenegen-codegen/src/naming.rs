//! Identifier namer.
//!
//! Every generated identifier comes from one [`IdentifierTable`] created per
//! compilation. The same source entity always gets the same name back; a
//! different entity whose name normalizes to a taken one gets a `_N` suffix.
//!
//! Normalization is ASCII only: any character outside `[A-Za-z0-9]`
//! separates words.

use convert_case::{Boundary, Case, Casing};
use scenegen_core::{NodeId, Scene, TriggerKind, VariableId};
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, PoisonError};

const TAG_SUFFIX: &str = "-element";
const CLASS_SUFFIX: &str = "Element";
const WORD_BOUNDARIES: [Boundary; 3] = [Boundary::Space, Boundary::LowerUpper, Boundary::Acronym];

/// Members a generated `LitElement` subclass already has.
const RESERVED_MEMBERS: [&str; 12] = [
    "render",
    "styles",
    "properties",
    "constructor",
    "connectedCallback",
    "disconnectedCallback",
    "updated",
    "firstUpdated",
    "requestUpdate",
    "dispatchEvent",
    "shadowRoot",
    "renderRoot",
];

/// Separate identifier spaces. Uniqueness holds within one namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// Kebab-case node identifiers, used as CSS classes and custom element tags.
    Tag,
    /// PascalCase component class names.
    Class,
    /// camelCase class members: reactive properties and event handlers.
    Member,
}

impl Namespace {
    /// Normalize a raw display name into a base identifier.
    pub fn normalize(&self, raw: &str) -> String {
        match self {
            Self::Tag => {
                let mut name = convert(raw, Case::Kebab);
                if name.is_empty() {
                    name.push_str("node");
                }
                if starts_with_digit(&name) {
                    name.insert_str(0, "x-");
                }
                if !name.ends_with(TAG_SUFFIX) {
                    name.push_str(TAG_SUFFIX);
                }
                name
            }
            Self::Class => {
                let mut name = convert(raw, Case::Pascal);
                if name.is_empty() {
                    name.push_str("Node");
                }
                if starts_with_digit(&name) {
                    name.insert(0, '_');
                }
                if !name.ends_with(CLASS_SUFFIX) {
                    name.push_str(CLASS_SUFFIX);
                }
                name
            }
            Self::Member => {
                let mut name = convert(raw, Case::Camel);
                if name.is_empty() {
                    name.push_str("property");
                }
                if starts_with_digit(&name) {
                    name.insert(0, '_');
                }
                name
            }
        }
    }
}

fn convert(raw: &str, case: Case) -> String {
    let cleaned: String = raw
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
        .collect();
    let words = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    if words.is_empty() {
        return words;
    }
    words.with_boundaries(&WORD_BOUNDARIES).to_case(case)
}

fn starts_with_digit(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_ascii_digit())
}

/// The thing a generated identifier stands for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SourceEntity {
    Node(NodeId),
    Variable(VariableId),
    /// Component property, by property key.
    ComponentProperty(String),
    /// Text placeholder, by normalized name.
    Placeholder(String),
    Event(NodeId, TriggerKind),
}

#[derive(Debug)]
struct TableState {
    assigned: HashMap<(Namespace, SourceEntity), String>,
    taken: HashSet<(Namespace, String)>,
}

impl Default for TableState {
    fn default() -> Self {
        let taken = RESERVED_MEMBERS
            .iter()
            .map(|name| (Namespace::Member, name.to_string()))
            .collect();
        Self {
            assigned: HashMap::new(),
            taken,
        }
    }
}

/// Collision-resolving table of generated identifiers.
#[derive(Debug, Default)]
pub struct IdentifierTable {
    state: Mutex<TableState>,
}

impl IdentifierTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the identifier of `entity`, assigning one from `raw` if needed.
    ///
    /// Lookup and insertion happen under one lock, so concurrent callers
    /// asking for the same entity observe the same name.
    pub fn assign(&self, namespace: Namespace, entity: SourceEntity, raw: &str) -> String {
        let base = namespace.normalize(raw);
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        let key = (namespace, entity);
        if let Some(existing) = state.assigned.get(&key) {
            return existing.clone();
        }

        let mut candidate = base.clone();
        let mut counter = 1u32;
        while state.taken.contains(&(namespace, candidate.clone())) {
            candidate = format!("{}_{}", base, counter);
            counter += 1;
        }

        state.taken.insert((namespace, candidate.clone()));
        state.assigned.insert(key, candidate.clone());
        candidate
    }

    /// Identifier already assigned to `entity`, without assigning.
    pub fn lookup(&self, namespace: Namespace, entity: &SourceEntity) -> Option<String> {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.assigned.get(&(namespace, entity.clone())).cloned()
    }

    /// Tag identifier of a node.
    pub fn tag(&self, scene: &Scene, id: NodeId) -> String {
        self.assign(Namespace::Tag, SourceEntity::Node(id), &scene.node(id).name)
    }

    /// Assign tag identifiers to a whole subtree in pre-order.
    pub fn assign_tags(&self, scene: &Scene, root: NodeId) {
        for id in scene.descendants(root) {
            self.tag(scene, id);
        }
    }

    /// Number of assigned identifiers across all namespaces.
    pub fn len(&self) -> usize {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.assigned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
