use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Config {
    pub version: String,

    #[serde(default)]
    pub input: Option<InputConfig>,

    #[serde(default)]
    pub output: Option<PathBuf>,

    #[serde(default)]
    pub generations: Vec<GenerationConfig>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct InputConfig {
    #[serde(default)]
    pub format: Option<String>,

    pub source: PathBuf,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct GenerationConfig {
    #[serde(default = "default_generator")]
    pub generator: String,

    /// Defaults to `<NAMESPACE>.<ext>`.
    #[serde(rename = "outputFile", default)]
    pub output_file: Option<String>,

    #[serde(default = "default_true")]
    pub enabled: bool,

    /// TypeScript namespace wrapping the interfaces; upper-cased on output.
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Leave descriptions out of the generated file.
    #[serde(default)]
    pub safe: bool,

    /// Module the generated functions import their `request` from.
    #[serde(default = "default_adapter")]
    pub adapter: String,

    #[serde(default)]
    pub template: Option<PathBuf>,
}

fn default_true() -> bool {
    true
}

fn default_generator() -> String {
    "typescript".to_string()
}

fn default_namespace() -> String {
    "API".to_string()
}

fn default_adapter() -> String {
    "./request".to_string()
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            generator: default_generator(),
            output_file: None,
            enabled: true,
            namespace: default_namespace(),
            safe: false,
            adapter: default_adapter(),
            template: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            input: None,
            output: Some(PathBuf::from("generated")),
            generations: vec![],
        }
    }
}
