use crate::naming::{interface_name, reference_target};
use crate::parsers::{SchemaKind, SchemaNode};
use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

/// Two-parameter generic container encoding, e.g. `Map«string,Item»`.
static GENERIC_MAP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Map«(.+),(.+)»").expect("generic map pattern is valid"));

/// Resolved type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDescriptor {
    Primitive(String),
    /// Derived interface name.
    Reference(String),
    ArrayOf(Box<TypeDescriptor>),
    MapOf(Box<TypeDescriptor>, Box<TypeDescriptor>),
    ObjectAnonymous,
    Unknown,
}

impl TypeDescriptor {
    pub fn primitive(name: impl Into<String>) -> Self {
        TypeDescriptor::Primitive(name.into())
    }

    pub fn reference(name: impl Into<String>) -> Self {
        TypeDescriptor::Reference(name.into())
    }

    pub fn array_of(item: TypeDescriptor) -> Self {
        TypeDescriptor::ArrayOf(Box::new(item))
    }

    pub fn map_of(key: TypeDescriptor, value: TypeDescriptor) -> Self {
        TypeDescriptor::MapOf(Box::new(key), Box::new(value))
    }

    /// Interface name when this is a bare reference.
    pub fn as_reference(&self) -> Option<&str> {
        match self {
            TypeDescriptor::Reference(name) => Some(name),
            _ => None,
        }
    }

    /// Interface name behind a reference or an array of it, at any depth.
    pub fn element_reference(&self) -> Option<&str> {
        match self {
            TypeDescriptor::Reference(name) => Some(name),
            TypeDescriptor::ArrayOf(item) => item.element_reference(),
            _ => None,
        }
    }

    /// Text form with every reference prefixed by `namespace.`.
    pub fn qualified(&self, namespace: &str) -> String {
        Rendered {
            descriptor: self,
            namespace: Some(namespace),
        }
        .to_string()
    }
}

/// Text form: `number`, `IUser`, `IUser[]`, `Record<string,IUser>`, `object`,
/// and `any` for [`TypeDescriptor::Unknown`].
impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = Rendered {
            descriptor: self,
            namespace: None,
        };
        fmt::Display::fmt(&rendered, f)
    }
}

impl Serialize for TypeDescriptor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

struct Rendered<'a> {
    descriptor: &'a TypeDescriptor,
    namespace: Option<&'a str>,
}

impl Rendered<'_> {
    fn nested<'b>(&'b self, descriptor: &'b TypeDescriptor) -> Rendered<'b> {
        Rendered {
            descriptor,
            namespace: self.namespace,
        }
    }
}

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.descriptor {
            TypeDescriptor::Primitive(name) => f.write_str(name),
            TypeDescriptor::Reference(name) => match self.namespace {
                Some(namespace) if !namespace.is_empty() => write!(f, "{namespace}.{name}"),
                _ => f.write_str(name),
            },
            TypeDescriptor::ArrayOf(item) => write!(f, "{}[]", self.nested(item)),
            TypeDescriptor::MapOf(key, value) => {
                write!(f, "Record<{},{}>", self.nested(key), self.nested(value))
            }
            TypeDescriptor::ObjectAnonymous => f.write_str("object"),
            TypeDescriptor::Unknown => f.write_str("any"),
        }
    }
}

/// Maps a declared (Swagger or Java-ish) type name to its TypeScript name.
pub fn primitive_type(name: &str) -> Option<&'static str> {
    let mapped = match name {
        "integer" | "int" | "long" | "short" | "byte" | "float" | "double" | "number"
        | "bigdecimal" | "Integer" | "Long" | "Short" | "Byte" | "Float" | "Double"
        | "BigDecimal" => "number",
        "string" | "char" | "date" | "String" | "Date" => "string",
        "boolean" | "Boolean" => "boolean",
        "object" | "Object" => "object",
        "file" | "File" => "File",
        _ => return None,
    };
    Some(mapped)
}

/// Resolves one schema node. Never fails: anything unrecognized is
/// [`TypeDescriptor::Unknown`].
pub fn resolve(schema: &SchemaNode) -> TypeDescriptor {
    match &schema.kind {
        SchemaKind::Reference(reference) => {
            TypeDescriptor::Reference(interface_name(reference_target(reference)))
        }
        SchemaKind::Map(Some(value)) if matches!(value.kind, SchemaKind::Array(_)) => {
            TypeDescriptor::map_of(TypeDescriptor::primitive("string"), resolve(value))
        }
        SchemaKind::Map(_) => TypeDescriptor::ObjectAnonymous,
        SchemaKind::Array(items) => resolve_array(items.as_deref()),
        SchemaKind::Object => TypeDescriptor::ObjectAnonymous,
        SchemaKind::Primitive(Some(name)) => primitive_type(name)
            .map(TypeDescriptor::primitive)
            .unwrap_or(TypeDescriptor::Unknown),
        SchemaKind::Primitive(None) => TypeDescriptor::Unknown,
    }
}

/// Resolves an optional schema; absence is [`TypeDescriptor::Unknown`].
pub fn resolve_optional(schema: Option<&SchemaNode>) -> TypeDescriptor {
    schema.map(resolve).unwrap_or(TypeDescriptor::Unknown)
}

fn resolve_array(items: Option<&SchemaNode>) -> TypeDescriptor {
    if let Some(SchemaKind::Reference(reference)) = items.map(|items| &items.kind) {
        if let Some((key, value)) = generic_map_arguments(reference_target(reference)) {
            return TypeDescriptor::map_of(generic_argument(key), generic_argument(value));
        }
    }

    TypeDescriptor::array_of(resolve_optional(items))
}

fn generic_map_arguments(target: &str) -> Option<(&str, &str)> {
    let captures = GENERIC_MAP.captures(target)?;
    Some((captures.get(1)?.as_str(), captures.get(2)?.as_str()))
}

/// Generic arguments are mapped through the primitive table, or passed
/// through verbatim.
fn generic_argument(name: &str) -> TypeDescriptor {
    TypeDescriptor::primitive(primitive_type(name).unwrap_or(name))
}
