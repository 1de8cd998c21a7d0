use super::{OutputFormat, SceneCli};
use crate::error::{CliError, Result};
use clap::ArgMatches;
use scenegen_codegen::{
    analyze, generate, ComponentDescriptor, EventDescriptor, GeneratedCode, Token,
};
use scenegen_core::{Document, Scene, SceneHost};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

// --- GENERATE ---
pub async fn handle_generate_command(cli: &SceneCli, matches: &ArgMatches) -> Result<()> {
    let input_path = input(matches)?;
    let prefs = cli.build_preferences(matches);
    let (scene, host) = load_document(input_path)?;

    let start = Instant::now();
    let payloads = generate(scene, host, &prefs).await?;
    log::info!("Generated {} payload(s) in {:.2}ms", payloads.len(), start.elapsed().as_secs_f64() * 1000.0);

    let format = matches
        .get_one::<OutputFormat>("format")
        .copied()
        .unwrap_or(OutputFormat::Code);
    match format {
        OutputFormat::Code => print!("{}", render_payloads(&payloads)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&payloads)?),
    }
    Ok(())
}

fn render_payloads(payloads: &[GeneratedCode]) -> String {
    if let [only] = payloads {
        return only.code.clone();
    }
    payloads
        .iter()
        .map(|payload| format!("// ===== {} ({}) =====\n{}", payload.title, payload.language, payload.code))
        .collect::<Vec<_>>()
        .join("\n")
}

// --- ANALYZE ---
#[derive(Debug, Serialize)]
struct ComponentSummary<'a> {
    tag: &'a str,
    class_name: &'a str,
    style_rules: usize,
    empty_style_rules: usize,
    properties: &'a [Token],
    events: &'a [EventDescriptor],
}

impl<'a> From<&'a ComponentDescriptor> for ComponentSummary<'a> {
    fn from(component: &'a ComponentDescriptor) -> Self {
        Self {
            tag: &component.tag,
            class_name: &component.class_name,
            style_rules: component.styles.len(),
            empty_style_rules: component.styles.iter().filter(|rule| rule.is_empty()).count(),
            properties: &component.properties,
            events: &component.events,
        }
    }
}

pub async fn handle_analyze_command(cli: &SceneCli, matches: &ArgMatches) -> Result<()> {
    let input_path = input(matches)?;
    let prefs = cli.build_preferences(matches);
    let (scene, host) = load_document(input_path)?;

    let components = analyze(scene, host, &prefs).await?;
    let summary: Vec<ComponentSummary<'_>> = components.iter().map(ComponentSummary::from).collect();
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

// --- SHARED ---
fn input(matches: &ArgMatches) -> Result<&str> {
    matches
        .get_one::<String>("input")
        .map(String::as_str)
        .ok_or_else(|| CliError::InvalidFormat {
            message: "missing input document".to_string(),
        })
}

fn load_document(path: &str) -> Result<(Arc<Scene>, Arc<dyn SceneHost>)> {
    let document = Document::from_path(path)?;
    let loaded = document.load();
    log::debug!(
        "Loaded {} node(s), {} captured style(s) from {}",
        loaded.scene.len(),
        loaded.host.style_count(),
        path
    );
    let host: Arc<dyn SceneHost> = Arc::new(loaded.host);
    Ok((Arc::new(loaded.scene), host))
}
