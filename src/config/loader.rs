use super::schema::{Config, GenerationConfig, InputConfig};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "./.config/swagger2apis/config.yaml";

/// Load configuration from file or return default
pub fn load_config(custom_path: Option<&Path>) -> Result<Config> {
    let config_path = match custom_path {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(DEFAULT_CONFIG_PATH),
    };

    if config_path.exists() {
        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;

        Ok(config)
    } else if custom_path.is_some() {
        anyhow::bail!("Config file not found: {:?}", config_path);
    } else {
        Ok(Config::default())
    }
}

/// Merge config with CLI arguments (CLI takes precedence).
///
/// A config without generations gets a single default TypeScript one.
pub fn merge_with_cli_args(
    mut config: Config,
    spec: Option<PathBuf>,
    output: Option<PathBuf>,
    namespace: Option<String>,
) -> Config {
    if let Some(spec_path) = spec {
        if config.input.is_none() {
            config.input = Some(InputConfig {
                format: None,
                source: spec_path,
            });
        } else if let Some(input) = &mut config.input {
            input.source = spec_path;
        }
    }

    if let Some(output_path) = output {
        config.output = Some(output_path);
    }

    if config.generations.is_empty() {
        config.generations.push(GenerationConfig::default());
    }

    if let Some(namespace) = namespace {
        for generation in &mut config.generations {
            generation.namespace = namespace.clone();
        }
    }

    config
}
