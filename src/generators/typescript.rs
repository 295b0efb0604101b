use super::{GeneratedOutput, Generator};
use crate::config::GenerationConfig;
use crate::interface_processor::InterfaceDescriptor;
use crate::naming::{first_upper_case, remove_special_characters};
use crate::operation_processor::{ApiDescriptor, ParameterPosition};
use crate::transform::TransformedModel;
use anyhow::{Context as _, Result};
use regex::{NoExpand, Regex};
use serde::Serialize;
use std::sync::LazyLock;
use tera::{Context, Tera};
use tracing::debug;

const TEMPLATE_NAME: &str = "api.ts";
const DEFAULT_TEMPLATE: &str = include_str!("../../templates/typescript/api.ts.tera");

/// Name of the single argument every generated request function takes.
pub const PARAMETER_NAME: &str = "parameter";

static PATH_PARAMETER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[^}]*\}").expect("path parameter pattern is valid"));

pub struct TypeScriptGenerator;

#[derive(Debug, Serialize)]
pub struct RenderData {
    pub apis: Vec<RenderedApi>,
    pub interfaces: Vec<RenderedInterface>,
    pub namespace: String,
    pub safe: bool,
    pub adapter: String,
    pub parameter_name: &'static str,
}

#[derive(Debug, Serialize)]
pub struct RenderedApi {
    pub fn_name: String,
    pub description: String,
    pub method: String,
    pub path: String,
    pub params: ParamsInfo,
    pub response_type: String,
}

/// Signature of the generated function's argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParamsInfo {
    #[serde(rename = "type")]
    pub ty: String,
    pub show: bool,
    pub default_value: Option<String>,
    pub position: Option<ParameterPosition>,
}

impl ParamsInfo {
    fn hidden() -> Self {
        Self {
            ty: String::new(),
            show: false,
            default_value: None,
            position: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RenderedInterface {
    pub name: String,
    pub description: String,
    pub properties: Vec<RenderedProperty>,
}

#[derive(Debug, Serialize)]
pub struct RenderedProperty {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub description: String,
    pub required: bool,
}

impl Generator for TypeScriptGenerator {
    fn name(&self) -> &str {
        "typescript"
    }

    fn file_extension(&self) -> &str {
        "ts"
    }

    fn validate_config(&self, config: &GenerationConfig) -> Result<()> {
        let namespace = &config.namespace;
        let valid = namespace
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
            && namespace
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');

        if !valid {
            anyhow::bail!("Namespace {:?} is not a valid TypeScript identifier", namespace);
        }
        Ok(())
    }

    fn generate(&self, model: &TransformedModel, config: &GenerationConfig) -> Result<GeneratedOutput> {
        let mut tera = Tera::default();
        match &config.template {
            Some(path) => tera
                .add_template_file(path, Some(TEMPLATE_NAME))
                .with_context(|| format!("Failed to load template: {:?}", path))?,
            None => tera.add_raw_template(TEMPLATE_NAME, DEFAULT_TEMPLATE)?,
        }

        let data = render_data(model, config);
        debug!(
            apis = data.apis.len(),
            interfaces = data.interfaces.len(),
            namespace = %data.namespace,
            "rendering typescript"
        );

        let context = Context::from_serialize(&data)?;
        let content = tera.render(TEMPLATE_NAME, &context)?;

        let filename = config
            .output_file
            .clone()
            .unwrap_or_else(|| format!("{}.{}", data.namespace, self.file_extension()));

        Ok(GeneratedOutput { filename, content })
    }
}

/// Turns the model into template input. Purely cosmetic: names, paths and
/// argument defaults; types are only printed, never re-resolved.
pub fn render_data(model: &TransformedModel, config: &GenerationConfig) -> RenderData {
    let namespace = config.namespace.to_uppercase();

    RenderData {
        apis: model
            .apis
            .iter()
            .map(|api| render_api(api, &namespace))
            .collect(),
        interfaces: model.interfaces.iter().map(render_interface).collect(),
        namespace,
        safe: config.safe,
        adapter: config.adapter.clone(),
        parameter_name: PARAMETER_NAME,
    }
}

fn render_api(api: &ApiDescriptor, namespace: &str) -> RenderedApi {
    RenderedApi {
        fn_name: render_fn_name(api),
        description: doc_text(&format!("{}: {}", api.tags.join(", "), api.description)),
        method: api.method.to_uppercase(),
        path: render_path(&api.path),
        params: render_params(api, namespace),
        response_type: api
            .response
            .ty
            .as_ref()
            .map(|ty| ty.qualified(namespace))
            .unwrap_or_else(|| "any".to_string()),
    }
}

fn render_interface(interface: &InterfaceDescriptor) -> RenderedInterface {
    RenderedInterface {
        name: interface.name.clone(),
        description: doc_text(&interface.description),
        properties: interface
            .properties
            .iter()
            .map(|property| RenderedProperty {
                name: property.name.clone(),
                ty: property.ty.to_string(),
                description: doc_text(&property.description),
                required: property.required,
            })
            .collect(),
    }
}

/// `/users/{id}` + GET becomes `Users_Id_$id$GET`.
pub fn render_fn_name(api: &ApiDescriptor) -> String {
    let mut name = api
        .path
        .split('/')
        .filter(|part| !part.is_empty())
        .map(|part| first_upper_case(&remove_special_characters(&part.replace(['{', '}'], ""))))
        .collect::<Vec<_>>()
        .join("_");

    if let Some(path_param) = api
        .parameters
        .iter()
        .find(|p| p.position == ParameterPosition::Path)
    {
        name.push_str(&format!("_${}$", path_param.name));
    }

    name.push_str(&api.method.to_uppercase());
    name
}

/// Replaces every `{param}` with `${parameter}` for a template literal.
pub fn render_path(path: &str) -> String {
    let replacement = format!("${{{PARAMETER_NAME}}}");
    PATH_PARAMETER
        .replace_all(path, NoExpand(&replacement))
        .into_owned()
}

/// Only the first parameter's position shapes the signature.
pub fn render_params(api: &ApiDescriptor, namespace: &str) -> ParamsInfo {
    let Some(first) = api.parameters.first() else {
        return ParamsInfo::hidden();
    };

    match first.position {
        ParameterPosition::Query => {
            let fields = api
                .parameters
                .iter()
                .map(|p| format!("{}: {}", p.name, p.ty.qualified(namespace)))
                .collect::<Vec<_>>()
                .join(",");
            ParamsInfo {
                ty: format!("{{{fields}}}"),
                show: true,
                default_value: Some("{} as any".to_string()),
                position: Some(ParameterPosition::Query),
            }
        }
        ParameterPosition::Path => ParamsInfo {
            ty: "string".to_string(),
            show: true,
            default_value: Some("''".to_string()),
            position: Some(ParameterPosition::Path),
        },
        position => {
            let ty = first.ty.qualified(namespace);
            ParamsInfo {
                default_value: Some(default_value(&ty).to_string()),
                show: !ty.is_empty(),
                ty,
                position: Some(position),
            }
        }
    }
}

fn default_value(ty: &str) -> &'static str {
    match ty {
        "string" => "''",
        "number" => "0",
        "boolean" => "false",
        _ => "{} as any",
    }
}

/// Keeps text safe inside a single-line `/** */` comment.
fn doc_text(text: &str) -> String {
    text.replace("*/", "*\\/").replace(['\r', '\n'], " ")
}
