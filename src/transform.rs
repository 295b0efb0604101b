//! Document → render-ready model.
//!
//! Extraction runs to completion before any interface is built, because the
//! required policy of an interface depends on every endpoint's response type.

use crate::interface_processor::{build_interfaces, InterfaceDescriptor};
use crate::operation_processor::{extract_apis, ApiDescriptor};
use crate::parsers::SwaggerDocument;
use indexmap::IndexSet;
use serde::Serialize;
use tracing::debug;

/// Interfaces reachable from a response position, scoped to one transform.
#[derive(Debug, Clone, Default)]
pub struct ResponseReachability {
    /// Interfaces that are literally some endpoint's response type.
    direct: IndexSet<String>,
    /// Interfaces built, or reached from, an all-required interface.
    deep: IndexSet<String>,
}

impl ResponseReachability {
    pub fn mark_direct(&mut self, name: &str) {
        self.direct.insert(name.to_string());
    }

    pub fn mark_deep(&mut self, name: &str) {
        self.deep.insert(name.to_string());
    }

    pub fn is_direct(&self, name: &str) -> bool {
        self.direct.contains(name)
    }

    pub fn is_deep(&self, name: &str) -> bool {
        self.deep.contains(name)
    }

    pub fn direct(&self) -> impl Iterator<Item = &str> {
        self.direct.iter().map(String::as_str)
    }

    pub fn deep(&self) -> impl Iterator<Item = &str> {
        self.deep.iter().map(String::as_str)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TransformedModel {
    pub apis: Vec<ApiDescriptor>,
    pub interfaces: Vec<InterfaceDescriptor>,
}

/// Runs extraction then interface building with fresh reachability state.
pub fn transform(document: &SwaggerDocument) -> TransformedModel {
    let mut reachability = ResponseReachability::default();

    let apis = extract_apis(&document.paths, &mut reachability);
    let interfaces = build_interfaces(&document.definitions, &mut reachability);

    debug!(
        apis = apis.len(),
        interfaces = interfaces.len(),
        direct = reachability.direct.len(),
        deep = reachability.deep.len(),
        "transformed document"
    );

    TransformedModel { apis, interfaces }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reachability_does_not_leak_between_documents() {
        let first: SwaggerDocument = serde_json::from_value(json!({
            "paths": {
                "/a": { "get": { "responses": { "200": { "schema": { "$ref": "#/definitions/A" } } } } }
            },
            "definitions": {
                "A": { "properties": { "x": { "type": "string" } } }
            }
        }))
        .unwrap();
        let second: SwaggerDocument = serde_json::from_value(json!({
            "definitions": {
                "A": { "properties": { "x": { "type": "string" } } }
            }
        }))
        .unwrap();

        assert!(transform(&first).interfaces[0].properties[0].required);
        assert!(!transform(&second).interfaces[0].properties[0].required);
        assert!(transform(&first).interfaces[0].properties[0].required);
    }

    #[test]
    fn only_bare_reference_responses_are_direct() {
        let document: SwaggerDocument = serde_json::from_value(json!({
            "paths": {
                "/pet": { "get": { "responses": { "200": { "schema": { "$ref": "#/definitions/Pet" } } } } },
                "/pets": {
                    "get": {
                        "responses": {
                            "200": { "schema": { "type": "array", "items": { "$ref": "#/definitions/Tag" } } }
                        }
                    }
                },
                "/owner": { "get": { "responses": { "201": { "schema": { "$ref": "#/definitions/Owner" } } } } }
            }
        }))
        .unwrap();

        let mut reachability = ResponseReachability::default();
        extract_apis(&document.paths, &mut reachability);

        assert_eq!(reachability.direct().collect::<Vec<_>>(), vec!["IPet"]);
        assert!(reachability.is_direct("IPet"));
        assert!(!reachability.is_direct("ITag"));
        assert_eq!(reachability.deep().count(), 0);
    }

    #[test]
    fn empty_document_gives_empty_model() {
        let model = transform(&SwaggerDocument::default());
        assert!(model.apis.is_empty());
        assert!(model.interfaces.is_empty());
    }
}
