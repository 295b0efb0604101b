use super::{InputParser, ParseError, SwaggerDocument};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

pub struct SwaggerParser;

impl SwaggerParser {
    /// Parses document text. YAML is a superset of JSON, so anything that is
    /// not explicitly JSON goes through the YAML reader.
    pub fn parse_str(content: &str, json: bool) -> Result<SwaggerDocument, ParseError> {
        let document = if json {
            serde_json::from_str(content)?
        } else {
            serde_yaml::from_str(content)?
        };
        Ok(document)
    }
}

impl InputParser for SwaggerParser {
    fn format_name(&self) -> &str {
        "swagger"
    }

    fn supported_extensions(&self) -> Vec<&str> {
        vec!["json", "yaml", "yml"]
    }

    fn parse(&self, source: &Path) -> Result<SwaggerDocument, ParseError> {
        self.validate(source)?;

        let content = fs::read_to_string(source).map_err(|source_err| ParseError::Read {
            path: source.to_path_buf(),
            source: source_err,
        })?;

        let json = match source.extension().and_then(|s| s.to_str()) {
            Some("json") => true,
            Some("yaml" | "yml") => false,
            other => {
                warn!(extension = ?other, "unrecognized extension, reading as YAML");
                false
            }
        };

        let document = Self::parse_str(&content, json)?;
        debug!(
            paths = document.paths.len(),
            definitions = document.definitions.len(),
            "parsed {:?}",
            source
        );

        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn parses_yaml_and_json_files() {
        let dir = tempfile::tempdir().unwrap();

        let yaml = dir.path().join("swagger.yaml");
        fs::write(
            &yaml,
            "swagger: '2.0'\npaths:\n  /ping:\n    get:\n      summary: ping\ndefinitions:\n  Pong:\n    type: object\n",
        )
        .unwrap();
        let document = SwaggerParser.parse(&yaml).unwrap();
        assert_eq!(document.paths["/ping"].operations["get"].summary.as_deref(), Some("ping"));
        assert!(document.definitions.contains_key("Pong"));

        let json = dir.path().join("swagger.json");
        fs::write(&json, r#"{"paths": {}, "definitions": {"A": {}}}"#).unwrap();
        let document = SwaggerParser.parse(&json).unwrap();
        assert_eq!(document.definitions.len(), 1);
    }

    #[test]
    fn reports_missing_and_broken_files() {
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("missing.json");
        assert!(matches!(SwaggerParser.parse(&missing), Err(ParseError::NotFound(_))));

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ not json").unwrap();
        assert!(matches!(SwaggerParser.parse(&broken), Err(ParseError::Json(_))));
    }
}
