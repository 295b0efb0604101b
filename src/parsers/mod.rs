pub mod document;
pub mod swagger_parser;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub use document::*;
pub use swagger_parser::SwaggerParser;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("input file not found: {0:?}")]
    NotFound(PathBuf),

    #[error("failed to read {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON document")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML document")]
    Yaml(#[from] serde_yaml::Error),
}

/// Input parser trait - loads a schema document from disk
pub trait InputParser: Send + Sync {
    /// Name of the input format (e.g., "swagger")
    fn format_name(&self) -> &str;

    /// File extensions this parser supports
    fn supported_extensions(&self) -> Vec<&str>;

    /// Parse input file into a document
    fn parse(&self, source: &Path) -> Result<SwaggerDocument, ParseError>;

    /// Validate input file before parsing
    fn validate(&self, source: &Path) -> Result<(), ParseError> {
        if !source.exists() {
            return Err(ParseError::NotFound(source.to_path_buf()));
        }
        Ok(())
    }
}

/// Parser registry for managing available input parsers
pub struct ParserRegistry {
    parsers: HashMap<String, Box<dyn InputParser>>,
}

impl ParserRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            parsers: HashMap::new(),
        };

        registry.register(Box::new(SwaggerParser));

        registry
    }

    pub fn register(&mut self, parser: Box<dyn InputParser>) {
        self.parsers.insert(parser.format_name().to_string(), parser);
    }

    pub fn get(&self, format: &str) -> Option<&dyn InputParser> {
        self.parsers.get(format).map(|parser| parser.as_ref())
    }

    /// Auto-detect format from file extension
    pub fn detect_format(&self, path: &Path) -> Option<&str> {
        let ext = path.extension()?.to_str()?;

        self.parsers
            .values()
            .find(|parser| parser.supported_extensions().contains(&ext))
            .map(|parser| parser.format_name())
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_swagger_by_extension() {
        let registry = ParserRegistry::new();
        assert_eq!(registry.detect_format(Path::new("api/swagger.json")), Some("swagger"));
        assert_eq!(registry.detect_format(Path::new("swagger.yml")), Some("swagger"));
        assert_eq!(registry.detect_format(Path::new("swagger.txt")), None);
        assert_eq!(registry.detect_format(Path::new("swagger")), None);
        assert!(registry.get("swagger").is_some());
        assert!(registry.get("graphql").is_none());
    }
}
