//! Compile design scene graphs into Lit web components.
//!
//! The compiler walks a visual design tree, assigns stable deduplicated
//! identifiers, extracts styles, reactive properties and events, builds one
//! structural tree per component boundary, and renders each component as
//! Lit element source text.
//!
//! # Pipeline
//!
//! 1. [`query::snapshot`] fans out the asynchronous host queries
//! 2. [`structure::compile`] builds the component descriptors
//! 3. [`markup::render_markup`] renders each structural tree
//! 4. [`LitGenerator`] assembles one payload per language variant
//!
//! # Example
//!
//! ```ignore
//! use scenegen_codegen::{generate, GenerationPreferences};
//!
//! let payloads = generate(scene, host, &GenerationPreferences::default()).await?;
//! println!("{}", payloads[0].code);
//! ```

pub mod context;
pub mod error;
pub mod events;
pub mod generators;
pub mod markup;
pub mod model;
pub mod naming;
pub mod options;
pub mod query;
pub mod structure;
pub mod styles;
pub mod tokens;

pub use error::{CodegenError, Result};
pub use generators::{GeneratedCode, LitGenerator, RenderedComponent, TemplateEngine};
pub use model::{
    ComponentDescriptor, DefaultValue, EventDescriptor, PropertyType, StyleRule, Token,
    TokenSource,
};
pub use naming::{IdentifierTable, Namespace, SourceEntity};
pub use options::{
    CompileOptions, GenerationMode, GenerationPreferences, LanguageVariant, StylePolicy,
    TextElement,
};
pub use query::HostSnapshot;

use context::CompileContext;
use log::{debug, info};
use scenegen_core::{Scene, SceneHost};
use std::sync::Arc;

/// Generate one payload per requested language variant.
///
/// Fails with [`CodegenError::NoRootNode`] when the scene has no root, and
/// with a host error when the host cannot serve queries at all.
pub async fn generate(
    scene: Arc<Scene>,
    host: Arc<dyn SceneHost>,
    prefs: &GenerationPreferences,
) -> Result<Vec<GeneratedCode>> {
    let root = scene.root().ok_or(CodegenError::NoRootNode)?;
    let snapshot = query::snapshot(Arc::clone(&scene), host, root).await?;
    compile(&scene, &snapshot, prefs)
}

/// Compile the component descriptors without rendering them.
pub async fn analyze(
    scene: Arc<Scene>,
    host: Arc<dyn SceneHost>,
    prefs: &GenerationPreferences,
) -> Result<Vec<ComponentDescriptor>> {
    let root = scene.root().ok_or(CodegenError::NoRootNode)?;
    let snapshot = query::snapshot(Arc::clone(&scene), host, root).await?;
    let names = IdentifierTable::new();
    structure::compile(&scene, &snapshot, &names, prefs.compile_options())
}

/// Synchronous compilation over host answers captured in a snapshot.
pub fn compile(
    scene: &Scene,
    snapshot: &HostSnapshot,
    prefs: &GenerationPreferences,
) -> Result<Vec<GeneratedCode>> {
    let root = scene.root().ok_or(CodegenError::NoRootNode)?;
    let options = prefs.compile_options();
    let names = IdentifierTable::new();

    let components = structure::compile(scene, snapshot, &names, options)?;

    let ctx = CompileContext {
        scene,
        snapshot,
        names: &names,
        options,
        root,
    };
    let markups: Vec<String> = components
        .iter()
        .map(|component| markup::render_markup(&ctx, component))
        .collect();
    let rendered: Vec<RenderedComponent<'_>> = components
        .iter()
        .zip(&markups)
        .map(|(descriptor, markup)| RenderedComponent { descriptor, markup })
        .collect();

    let generator = LitGenerator::new()?;
    let payloads = prefs
        .variants
        .iter()
        .map(|variant| {
            debug!("Assembling {} payload", variant.label());
            generator.generate(*variant, &rendered)
        })
        .collect::<Result<Vec<_>>>()?;

    info!(
        "Generated {} component(s) in {} variant(s) from {} node(s)",
        components.len(),
        payloads.len(),
        scene.len()
    );
    Ok(payloads)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenegen_core::{
        Declarations, Document, HostError, HostFuture, NodeId, StaticHost, TriggerKind, VariableId,
        VisualNode,
    };

    fn static_host() -> Arc<dyn SceneHost> {
        Arc::new(StaticHost::default())
    }

    #[tokio::test]
    async fn test_scenario_text_root() {
        let mut scene = Scene::new();
        scene.add_root(VisualNode::text("Hello", "Hello"));

        let payloads = generate(Arc::new(scene), static_host(), &GenerationPreferences::default())
            .await
            .unwrap();
        assert_eq!(payloads.len(), 1);
        let code = &payloads[0].code;
        assert!(code.contains(r#"<div class="hello-element">Hello</div>"#));
        assert!(code.contains(".hello-element {"));
        assert!(!code.contains("@property"));
        assert!(!code.contains("dispatchEvent"));
    }

    #[tokio::test]
    async fn test_scenario_placeholder() {
        let mut scene = Scene::new();
        scene.add_root(VisualNode::text("Counter", "{{count}}"));

        let payloads = generate(Arc::new(scene), static_host(), &GenerationPreferences::default())
            .await
            .unwrap();
        let code = &payloads[0].code;
        assert_eq!(code.matches("@property(").count(), 1);
        assert!(code.contains("count: string = '';"));
        assert!(code.contains("${this.count}"));
        assert!(!code.contains("{{count}}"));
    }

    #[tokio::test]
    async fn test_placeholders_avoid_lit_members() {
        let mut scene = Scene::new();
        scene.add_root(VisualNode::text("Body", "{{render}} {{styles}}"));

        let payloads = generate(Arc::new(scene), static_host(), &GenerationPreferences::default())
            .await
            .unwrap();
        let code = &payloads[0].code;
        assert!(code.contains("render_1: string = '';"));
        assert!(code.contains("styles_1: string = '';"));
        assert!(code.contains("${this.render_1} ${this.styles_1}"));
        assert!(!code.contains("render: string"));
        assert!(!code.contains("${this.render}"));
    }

    #[tokio::test]
    async fn test_scenario_click() {
        let mut scene = Scene::new();
        let root = scene.add_root(VisualNode::frame("Card"));
        scene.add_child(root, VisualNode::frame("Button").with_reaction(TriggerKind::Click));

        let payloads = generate(Arc::new(scene), static_host(), &GenerationPreferences::default())
            .await
            .unwrap();
        let code = &payloads[0].code;
        assert!(code.contains(
            r#"<button class="button-element" @click=${this.onButtonElementClick}></button>"#
        ));
        assert_eq!(code.matches("new CustomEvent(").count(), 1);
        assert!(code.contains("new CustomEvent('button-element-click'"));
    }

    #[tokio::test]
    async fn test_scenario_sibling_collision() {
        let mut scene = Scene::new();
        let root = scene.add_root(VisualNode::frame("Row"));
        scene.add_child(root, VisualNode::leaf("Button"));
        scene.add_child(root, VisualNode::leaf("Button"));

        let payloads = generate(Arc::new(scene), static_host(), &GenerationPreferences::default())
            .await
            .unwrap();
        let code = &payloads[0].code;
        assert!(code.contains(".button-element {"));
        assert!(code.contains(".button-element_1 {"));
        assert!(code.contains(r#"<div class="button-element">Button</div>"#));
        assert!(code.contains(r#"<div class="button-element_1">Button</div>"#));
    }

    #[tokio::test]
    async fn test_scenario_multi_mode_instance() {
        let mut scene = Scene::new();
        let root = scene.add_root(VisualNode::frame("Page"));
        let badge = scene.add_child(root, VisualNode::instance("Badge"));
        scene.add_child(badge, VisualNode::text("Text", "{{label}} ({{count}})"));

        let prefs = GenerationPreferences::multi();
        let scene = Arc::new(scene);
        let descriptors = analyze(Arc::clone(&scene), static_host(), &prefs).await.unwrap();
        assert_eq!(descriptors.len(), 2);
        assert_eq!(descriptors[1].tag, "badge-element");
        let nested: Vec<&str> = descriptors[1].properties.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(nested, vec!["label", "count"]);

        let payloads = generate(scene, static_host(), &prefs).await.unwrap();
        let code = &payloads[0].code;
        assert!(code.contains(
            "<badge-element .label=${this.label} .count=${this.count}></badge-element>"
        ));
        assert!(code.contains("@customElement('page-element')"));
        assert!(code.contains("@customElement('badge-element')"));
        assert!(code.find("@customElement('page-element')") < code.find("@customElement('badge-element')"));
    }

    #[tokio::test]
    async fn test_idempotent_output() {
        let source = r#"{
            "root": {
                "name": "Profile", "type": "COMPONENT",
                "css": {"display": "flex"},
                "children": [
                    {"name": "Name", "type": "TEXT", "characters": "Hi", "boundVariable": "v:1"},
                    {"name": "Follow", "type": "INSTANCE", "reactions": [{"trigger": {"type": "ON_CLICK"}}],
                     "children": [{"name": "Label", "type": "TEXT", "characters": "{{action}}"}]}
                ]
            },
            "variables": {"v:1": "display name"}
        }"#;
        let loaded = Document::from_json_str(source).unwrap().load();
        let scene = Arc::new(loaded.scene);
        let host: Arc<dyn SceneHost> = Arc::new(loaded.host);
        let prefs = GenerationPreferences {
            variants: vec![LanguageVariant::TypeScript, LanguageVariant::JavaScript],
            ..GenerationPreferences::multi()
        };

        let first = generate(Arc::clone(&scene), Arc::clone(&host), &prefs).await.unwrap();
        let second = generate(scene, host, &prefs).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
        assert!(first[0].code.contains("displayName: string = '';"));
        assert!(first[1].code.contains("customElements.define('follow-element', FollowElement);"));
    }

    #[test]
    fn test_compile_without_root() {
        let err = compile(&Scene::new(), &HostSnapshot::new(), &GenerationPreferences::default())
            .unwrap_err();
        assert!(matches!(err, CodegenError::NoRootNode));
    }

    #[test]
    fn test_compile_from_snapshot() {
        let mut scene = Scene::new();
        let root = scene.add_root(VisualNode::frame("Box"));
        let mut declarations = Declarations::new();
        declarations.insert("color".into(), "red".into());
        let snapshot = HostSnapshot::new().with_style(root, declarations);

        let payloads = compile(&scene, &snapshot, &GenerationPreferences::default()).unwrap();
        assert!(payloads[0].code.contains("color: red;"));
    }

    struct ClosedHost;

    impl SceneHost for ClosedHost {
        fn computed_style(&self, _node: NodeId) -> HostFuture<Declarations> {
            Box::pin(async { Err(HostError::Unavailable("closed".into())) })
        }

        fn variable_name(&self, _id: &VariableId) -> HostFuture<Option<String>> {
            Box::pin(async { Ok(None) })
        }
    }

    #[tokio::test]
    async fn test_unavailable_host_yields_no_payload() {
        let mut scene = Scene::new();
        scene.add_root(VisualNode::frame("Box"));

        let result = generate(Arc::new(scene), Arc::new(ClosedHost), &GenerationPreferences::default()).await;
        assert!(matches!(result, Err(CodegenError::Host(HostError::Unavailable(_)))));
    }

    #[tokio::test]
    async fn test_no_root_node() {
        let result = generate(Arc::new(Scene::new()), static_host(), &GenerationPreferences::default()).await;
        assert!(matches!(result, Err(CodegenError::NoRootNode)));
    }
}
