use crate::naming::interface_name;
use crate::parsers::SchemaNode;
use crate::schema_processor::{resolve, TypeDescriptor};
use crate::transform::ResponseReachability;
use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

/// Description used for properties that do not document themselves.
pub const MISSING_DESCRIPTION: &str = "No description provided";

#[derive(Debug, Clone, Serialize)]
pub struct InterfaceDescriptor {
    pub name: String,
    pub description: String,
    pub properties: Vec<PropertyDescriptor>,
    /// Kept so the interface can be rebuilt under another policy.
    #[serde(skip)]
    pub raw_properties: IndexMap<String, SchemaNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeDescriptor,
    pub description: String,
    pub required: bool,
}

/// Which properties of an interface come out required.
#[derive(Debug, Clone, Copy)]
pub enum RequiredPolicy<'a> {
    /// The definition's own `required` list.
    Declared(&'a [String]),
    /// Every property; used for interfaces reachable from a response.
    All,
}

impl RequiredPolicy<'_> {
    fn is_required(&self, property: &str) -> bool {
        match self {
            RequiredPolicy::Declared(required) => required.iter().any(|r| r == property),
            RequiredPolicy::All => true,
        }
    }
}

/// Builds one interface per definition.
///
/// Interfaces in `reachability.direct` are built all-required and seed the
/// deep set; their reference-typed properties add to it. A second pass then
/// walks the interfaces once in definition order and rebuilds each one that is
/// in the deep set at that moment. Rebuilding marks further interfaces, so an
/// interface reached during the second pass is only rebuilt when it comes
/// later in the order.
pub fn build_interfaces(
    definitions: &IndexMap<String, SchemaNode>,
    reachability: &mut ResponseReachability,
) -> Vec<InterfaceDescriptor> {
    // A name collision silently replaces the earlier interface.
    let mut interfaces: IndexMap<String, InterfaceDescriptor> = IndexMap::new();

    for (definition_name, definition) in definitions {
        let name = interface_name(definition_name);

        let policy = if reachability.is_direct(&name) {
            reachability.mark_deep(&name);
            RequiredPolicy::All
        } else {
            RequiredPolicy::Declared(&definition.required)
        };

        let properties = build_properties(&definition.properties, policy, reachability);

        interfaces.insert(
            name.clone(),
            InterfaceDescriptor {
                name,
                description: definition.description.clone().unwrap_or_default(),
                properties,
                raw_properties: definition.properties.clone(),
            },
        );
    }

    for interface in interfaces.values_mut() {
        if !reachability.is_deep(&interface.name) {
            continue;
        }

        debug!(interface = %interface.name, "rebuilding as response-reachable");
        interface.properties = build_properties(&interface.raw_properties, RequiredPolicy::All, reachability);
    }

    interfaces.into_values().collect()
}

/// Resolves each property under `policy`. Under [`RequiredPolicy::All`] a
/// property typed as a reference, or an array of one, marks that interface deep.
pub fn build_properties(
    properties: &IndexMap<String, SchemaNode>,
    policy: RequiredPolicy<'_>,
    reachability: &mut ResponseReachability,
) -> Vec<PropertyDescriptor> {
    properties
        .iter()
        .map(|(name, schema)| {
            let ty = resolve(schema);

            if let (RequiredPolicy::All, Some(target)) = (policy, ty.element_reference()) {
                reachability.mark_deep(target);
            }

            PropertyDescriptor {
                name: name.clone(),
                required: policy.is_required(name),
                description: schema
                    .description
                    .clone()
                    .unwrap_or_else(|| MISSING_DESCRIPTION.to_string()),
                ty,
            }
        })
        .collect()
}
