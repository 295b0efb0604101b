use indexmap::IndexMap;
use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

/// HTTP methods that produce an endpoint when they appear as a path item key.
pub const HTTP_METHODS: [&str; 7] = ["get", "put", "post", "delete", "options", "head", "patch"];

/// Swagger 2 document: the request paths and the named type definitions.
///
/// Missing or malformed top-level maps deserialize as empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SwaggerDocument {
    #[serde(deserialize_with = "lenient")]
    pub paths: IndexMap<String, PathItem>,

    #[serde(deserialize_with = "lenient")]
    pub definitions: IndexMap<String, SchemaNode>,
}

/// Operations of one path, keyed by lower-case HTTP method, in document order.
#[derive(Debug, Clone, Default)]
pub struct PathItem {
    pub operations: IndexMap<String, Operation>,
}

impl<'de> Deserialize<'de> for PathItem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: IndexMap<String, Value> = lenient(deserializer)?;

        let operations = raw
            .into_iter()
            .filter(|(method, _)| HTTP_METHODS.contains(&method.to_ascii_lowercase().as_str()))
            .filter_map(|(method, value)| {
                serde_json::from_value::<Operation>(value)
                    .ok()
                    .map(|operation| (method.to_ascii_lowercase(), operation))
            })
            .collect();

        Ok(Self { operations })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Operation {
    #[serde(deserialize_with = "lenient")]
    pub tags: Vec<String>,

    #[serde(deserialize_with = "lenient")]
    pub summary: Option<String>,

    #[serde(deserialize_with = "lenient")]
    pub description: Option<String>,

    #[serde(deserialize_with = "lenient")]
    pub parameters: Vec<Parameter>,

    #[serde(deserialize_with = "lenient")]
    pub responses: IndexMap<String, Response>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterLocation {
    Path,
    Query,
    Body,
    FormData,
    Header,
    Cookie,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Parameter {
    #[serde(deserialize_with = "lenient")]
    pub name: String,

    #[serde(rename = "in", deserialize_with = "lenient")]
    pub location: Option<ParameterLocation>,

    #[serde(deserialize_with = "lenient")]
    pub description: Option<String>,

    #[serde(deserialize_with = "lenient")]
    pub required: bool,

    #[serde(rename = "type", deserialize_with = "lenient")]
    pub type_name: Option<String>,

    pub items: Option<Box<SchemaNode>>,

    pub schema: Option<SchemaNode>,
}

impl Parameter {
    /// Schema for parameters that declare their type inline instead of
    /// through a nested `schema` (everything except `in: body`).
    pub fn inline_schema(&self) -> Option<SchemaNode> {
        let type_name = self.type_name.as_deref()?;
        let kind = if type_name == "array" {
            SchemaKind::Array(self.items.clone())
        } else {
            SchemaKind::Primitive(Some(type_name.to_string()))
        };

        Some(SchemaNode {
            kind,
            ..SchemaNode::default()
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Response {
    #[serde(deserialize_with = "lenient")]
    pub description: Option<String>,

    pub schema: Option<SchemaNode>,
}

/// A schema node, classified once into the shape the type resolver matches on.
///
/// `properties` and `required` are kept beside the shape because definitions
/// carry them regardless of how the node itself resolves.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaNode {
    pub kind: SchemaKind,
    pub description: Option<String>,
    pub properties: IndexMap<String, SchemaNode>,
    pub required: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SchemaKind {
    /// `$ref` pointer, kept verbatim.
    Reference(String),
    /// `additionalProperties` wrapper. `None` for `additionalProperties: true`.
    Map(Option<Box<SchemaNode>>),
    /// `type: array`. `None` when `items` is absent.
    Array(Option<Box<SchemaNode>>),
    /// `type: object`.
    Object,
    /// Any other declared type name; `None` when there is none.
    Primitive(Option<String>),
}

impl Default for SchemaKind {
    fn default() -> Self {
        SchemaKind::Primitive(None)
    }
}

impl<'de> Deserialize<'de> for SchemaNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let raw: RawSchema = if value.is_object() {
            serde_json::from_value(value).unwrap_or_default()
        } else {
            RawSchema::default()
        };
        Ok(raw.into())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSchema {
    #[serde(rename = "$ref", deserialize_with = "lenient")]
    reference: Option<String>,

    #[serde(rename = "type", deserialize_with = "lenient")]
    type_name: Option<String>,

    items: Option<Box<SchemaNode>>,

    #[serde(rename = "additionalProperties", deserialize_with = "lenient")]
    additional_properties: Option<AdditionalProperties>,

    #[serde(deserialize_with = "lenient")]
    properties: IndexMap<String, SchemaNode>,

    #[serde(deserialize_with = "lenient")]
    required: Vec<String>,

    #[serde(deserialize_with = "lenient")]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AdditionalProperties {
    Allowed(bool),
    Schema(Box<SchemaNode>),
}

impl From<RawSchema> for SchemaNode {
    fn from(raw: RawSchema) -> Self {
        let kind = match (raw.reference, raw.additional_properties) {
            (Some(reference), _) => SchemaKind::Reference(reference),
            (None, Some(AdditionalProperties::Schema(value))) => SchemaKind::Map(Some(value)),
            (None, Some(AdditionalProperties::Allowed(true))) => SchemaKind::Map(None),
            _ => match raw.type_name.as_deref() {
                Some("array") => SchemaKind::Array(raw.items),
                Some("object") => SchemaKind::Object,
                other => SchemaKind::Primitive(other.map(str::to_string)),
            },
        };

        SchemaNode {
            kind,
            description: raw.description,
            properties: raw.properties,
            required: raw.required,
        }
    }
}

/// Deserializes `T`, falling back to `T::default()` when the value has an
/// unexpected shape. Only a broken underlying reader is reported as an error.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}
