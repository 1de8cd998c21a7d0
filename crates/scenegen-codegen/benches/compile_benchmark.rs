//! Compilation benchmarks.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use scenegen_codegen::{compile, GenerationPreferences, HostSnapshot, LanguageVariant};
use scenegen_core::{Declarations, NodeId, Scene, TriggerKind, VisualNode};

/// A page of `rows` cards, each an instance with a title, a placeholder
/// line and a clickable button.
fn card_grid(rows: usize) -> (Scene, HostSnapshot) {
    let mut scene = Scene::new();
    let root = scene.add_root(VisualNode::frame("Page"));
    for row in 0..rows {
        let card = scene.add_child(root, VisualNode::instance(format!("Card {}", row)));
        scene.add_child(card, VisualNode::text("Title", "Product"));
        scene.add_child(card, VisualNode::text("Price", "{{price}} {{currency}}"));
        let button = scene.add_child(card, VisualNode::frame("Button").with_reaction(TriggerKind::Click));
        scene.add_child(button, VisualNode::text("Label", "Buy"));
    }

    let mut snapshot = HostSnapshot::new();
    for index in 0..scene.len() {
        let mut declarations = Declarations::new();
        declarations.insert("display".into(), "flex".into());
        declarations.insert("padding".into(), format!("{}px", index % 16));
        snapshot = snapshot.with_style(NodeId(index), declarations);
    }
    (scene, snapshot)
}

fn compile_single(c: &mut Criterion) {
    let (scene, snapshot) = card_grid(200);
    let prefs = GenerationPreferences::default();
    c.bench_function("compile_single_200", |b| {
        b.iter(|| compile(black_box(&scene), black_box(&snapshot), &prefs))
    });
}

fn compile_multi(c: &mut Criterion) {
    let (scene, snapshot) = card_grid(200);
    let prefs = GenerationPreferences {
        variants: vec![LanguageVariant::TypeScript, LanguageVariant::JavaScript],
        ..GenerationPreferences::multi()
    };
    c.bench_function("compile_multi_200", |b| {
        b.iter(|| compile(black_box(&scene), black_box(&snapshot), &prefs))
    });
}

criterion_group!(benches, compile_single, compile_multi);
criterion_main!(benches);
