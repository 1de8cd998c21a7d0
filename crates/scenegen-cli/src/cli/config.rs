use crate::error::{CliError, Result};
use scenegen_codegen::{GenerationMode, LanguageVariant, StylePolicy, TextElement};
use serde::{Deserialize, Serialize};
use std::fs;

/// Generation defaults read from a `.toml` or `.json` file. Command-line
/// flags win over every field set here.
#[derive(Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    pub mode: Option<GenerationMode>,
    pub style_policy: Option<StylePolicy>,
    pub text_element: Option<TextElement>,
    pub variants: Option<Vec<LanguageVariant>>,
}

pub fn load(config_path: &str) -> Result<ConfigFile> {
    let config_content = fs::read_to_string(config_path).map_err(|e| CliError::Config {
        path: config_path.to_string(),
        message: e.to_string(),
    })?;

    let config = if config_path.ends_with(".json") {
        serde_json::from_str(&config_content).map_err(|e| CliError::InvalidFormat {
            message: format!("Invalid JSON config: {}", e),
        })?
    } else if config_path.ends_with(".toml") {
        toml::from_str(&config_content).map_err(|e| CliError::InvalidFormat {
            message: format!("Invalid TOML config: {}", e),
        })?
    } else {
        return Err(CliError::InvalidFormat {
            message: "Config file must be .json or .toml format".to_string(),
        });
    };

    log::info!("Loaded configuration from {}", config_path);
    Ok(config)
}
