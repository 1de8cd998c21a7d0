mod config;
mod handlers;

use crate::error::Result;
use clap::{Arg, ArgAction, ArgMatches, Command, ValueEnum};
use scenegen_codegen::{
    GenerationMode, GenerationPreferences, LanguageVariant, StylePolicy, TextElement,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    Single,
    Multi,
}

impl From<Mode> for GenerationMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Single => GenerationMode::Single,
            Mode::Multi => GenerationMode::Multi,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Policy {
    Flat,
    Isolated,
}

impl From<Policy> for StylePolicy {
    fn from(policy: Policy) -> Self {
        match policy {
            Policy::Flat => StylePolicy::Flat,
            Policy::Isolated => StylePolicy::Isolated,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TextTag {
    Block,
    Inline,
}

impl From<TextTag> for TextElement {
    fn from(tag: TextTag) -> Self {
        match tag {
            TextTag::Block => TextElement::Block,
            TextTag::Inline => TextElement::Inline,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Variant {
    Typescript,
    Javascript,
}

impl From<Variant> for LanguageVariant {
    fn from(variant: Variant) -> Self {
        match variant {
            Variant::Typescript => LanguageVariant::TypeScript,
            Variant::Javascript => LanguageVariant::JavaScript,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Generated source text.
    Code,
    /// Payloads as JSON.
    Json,
}

pub struct SceneCli {
    config: config::ConfigFile,
}

impl SceneCli {
    pub fn new() -> Self {
        Self {
            config: config::ConfigFile::default(),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let matches = build_cli().get_matches();
        self.configure(&matches)?;

        match matches.subcommand() {
            Some(("generate", sub_matches)) => handlers::handle_generate_command(self, sub_matches).await,
            Some(("analyze", sub_matches)) => handlers::handle_analyze_command(self, sub_matches).await,
            _ => {
                println!("No subcommand specified. Use --help for usage information.");
                Ok(())
            }
        }
    }

    /// Start logging, then read the config file so its load is logged too.
    fn configure(&mut self, matches: &ArgMatches) -> Result<()> {
        setup_logging(matches.get_count("verbose"));
        if let Some(config_path) = matches.get_one::<String>("config") {
            self.config = config::load(config_path)?;
        }
        Ok(())
    }

    /// Merge flags over the config file over built-in defaults.
    pub fn build_preferences(&self, matches: &ArgMatches) -> GenerationPreferences {
        let defaults = GenerationPreferences::default();

        let mode = matches
            .get_one::<Mode>("mode")
            .map(|mode| GenerationMode::from(*mode))
            .or(self.config.mode)
            .unwrap_or(defaults.mode);
        let style_policy = matches
            .get_one::<Policy>("style-policy")
            .map(|policy| StylePolicy::from(*policy))
            .or(self.config.style_policy);
        let text_element = matches
            .get_one::<TextTag>("text-element")
            .map(|tag| TextElement::from(*tag))
            .or(self.config.text_element)
            .unwrap_or(defaults.text_element);

        let flagged: Vec<LanguageVariant> = matches
            .get_many::<Variant>("variant")
            .map(|values| values.map(|variant| LanguageVariant::from(*variant)).collect())
            .unwrap_or_default();
        let variants = if !flagged.is_empty() {
            flagged
        } else {
            self.config.variants.clone().unwrap_or(defaults.variants)
        };

        GenerationPreferences {
            mode,
            style_policy,
            text_element,
            variants,
        }
    }
}

impl Default for SceneCli {
    fn default() -> Self {
        Self::new()
    }
}

fn generation_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("input")
                .help("Input design document (JSON)")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("mode")
                .short('m')
                .long("mode")
                .value_parser(clap::value_parser!(Mode))
                .help("Generate one component, or one per component boundary"),
        )
        .arg(
            Arg::new("style-policy")
                .long("style-policy")
                .value_parser(clap::value_parser!(Policy))
                .help("Where nested component styles go (default follows --mode)"),
        )
        .arg(
            Arg::new("text-element")
                .long("text-element")
                .value_parser(clap::value_parser!(TextTag))
                .help("Element used for text leaves"),
        )
        .arg(
            Arg::new("variant")
                .long("variant")
                .value_parser(clap::value_parser!(Variant))
                .action(ArgAction::Append)
                .help("Language variant to emit (repeatable)"),
        )
}

pub fn build_cli() -> Command {
    Command::new(crate::NAME)
        .version(crate::VERSION)
        .about(crate::DESCRIPTION)
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path (.toml or .json)")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Increase verbosity (can be used multiple times)")
                .action(ArgAction::Count),
        )
        .subcommand(
            generation_args(
                Command::new("generate").about("Generate Lit component source from a design document"),
            )
            .arg(
                Arg::new("format")
                    .short('f')
                    .long("format")
                    .value_parser(clap::value_parser!(OutputFormat))
                    .default_value("code")
                    .help("Output format"),
            ),
        )
        .subcommand(generation_args(
            Command::new("analyze").about("Print the component descriptors of a design document as JSON"),
        ))
}

fn setup_logging(verbose_count: u8) {
    let log_level = match verbose_count {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    // A logger installed earlier in the process stays in place.
    let _ = env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .format_timestamp_secs()
        .try_init();
}
