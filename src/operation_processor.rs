use crate::parsers::{Operation, Parameter, ParameterLocation, PathItem, Response};
use crate::schema_processor::{resolve, resolve_optional, TypeDescriptor};
use crate::transform::ResponseReachability;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use tracing::debug;

/// Only this status code contributes a response shape.
pub const SUCCESS_STATUS: &str = "200";

#[derive(Debug, Clone, Serialize)]
pub struct ApiDescriptor {
    pub tags: Vec<String>,
    pub path: String,
    pub method: String,
    pub description: String,
    pub parameters: Vec<ParameterDescriptor>,
    pub response: ResponseDescriptor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterPosition {
    Path,
    Query,
    Body,
    FormData,
}

impl ParameterPosition {
    /// Header and cookie parameters have no position in a generated request.
    fn from_location(location: ParameterLocation) -> Option<Self> {
        match location {
            ParameterLocation::Path => Some(Self::Path),
            ParameterLocation::Query => Some(Self::Query),
            ParameterLocation::Body => Some(Self::Body),
            ParameterLocation::FormData => Some(Self::FormData),
            ParameterLocation::Header | ParameterLocation::Cookie => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ParameterDescriptor {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub ty: TypeDescriptor,
    pub required: bool,
    pub position: ParameterPosition,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResponseDescriptor {
    pub description: String,
    /// `None` when the success response declares no schema.
    #[serde(rename = "type", serialize_with = "serialize_optional_type")]
    pub ty: Option<TypeDescriptor>,
}

fn serialize_optional_type<S: Serializer>(
    ty: &Option<TypeDescriptor>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match ty {
        Some(ty) => ty.serialize(serializer),
        None => serializer.serialize_str(""),
    }
}

/// Builds one descriptor per (path, method) pair, recording every response
/// interface in `reachability.direct`.
pub fn extract_apis(
    paths: &IndexMap<String, PathItem>,
    reachability: &mut ResponseReachability,
) -> Vec<ApiDescriptor> {
    let mut apis = Vec::new();

    for (path, path_item) in paths {
        for (method, operation) in &path_item.operations {
            let api = process_operation(path, method, operation);

            if let Some(name) = api.response.ty.as_ref().and_then(TypeDescriptor::as_reference) {
                reachability.mark_direct(name);
            }

            apis.push(api);
        }
    }

    apis
}

fn process_operation(path: &str, method: &str, operation: &Operation) -> ApiDescriptor {
    let parameters = operation
        .parameters
        .iter()
        .filter_map(process_parameter)
        .collect();

    let response = process_response(operation.responses.get(SUCCESS_STATUS));

    debug!(path, method, response = %response.ty.as_ref().map(ToString::to_string).unwrap_or_default(), "extracted endpoint");

    ApiDescriptor {
        tags: operation.tags.clone(),
        path: path.to_string(),
        method: method.to_string(),
        description: operation
            .description
            .clone()
            .filter(|d| !d.is_empty())
            .or_else(|| operation.summary.clone())
            .unwrap_or_default(),
        parameters,
        response,
    }
}

fn process_parameter(parameter: &Parameter) -> Option<ParameterDescriptor> {
    let position = ParameterPosition::from_location(parameter.location?)?;

    let ty = match parameter.inline_schema() {
        Some(inline) => resolve(&inline),
        None => resolve_optional(parameter.schema.as_ref()),
    };

    Some(ParameterDescriptor {
        name: parameter.name.clone(),
        description: parameter.description.clone().unwrap_or_default(),
        ty,
        required: parameter.required,
        position,
    })
}

fn process_response(response: Option<&Response>) -> ResponseDescriptor {
    ResponseDescriptor {
        description: response
            .and_then(|r| r.description.clone())
            .unwrap_or_default(),
        ty: response.and_then(|r| r.schema.as_ref()).map(resolve),
    }
}
