//! Schema atoms shared between parsing and code generation

use serde::{Deserialize, Serialize};

/// Primitive type kinds of the legacy description format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrimitiveKind {
    Integer,
    Long,
    Float,
    Double,
    String,
    Byte,
    Boolean,
    Date,
    DateTime,
}

impl PrimitiveKind {
    /// Look up a primitive kind by its name in the description format.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "integer" => Some(PrimitiveKind::Integer),
            "long" => Some(PrimitiveKind::Long),
            "float" => Some(PrimitiveKind::Float),
            "double" => Some(PrimitiveKind::Double),
            "string" => Some(PrimitiveKind::String),
            "byte" => Some(PrimitiveKind::Byte),
            "boolean" => Some(PrimitiveKind::Boolean),
            "date" => Some(PrimitiveKind::Date),
            "dateTime" => Some(PrimitiveKind::DateTime),
            _ => None,
        }
    }

    /// Name of the kind as it appears in description documents.
    pub fn name(&self) -> &'static str {
        match self {
            PrimitiveKind::Integer => "integer",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
            PrimitiveKind::String => "string",
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Date => "date",
            PrimitiveKind::DateTime => "dateTime",
        }
    }
}

/// A type position in the description: a primitive, a reference to a
/// named model, or an array of either.
///
/// A raw `array` kind must always carry an item type; the parser
/// rejects a bare `array` before one of these is ever built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeRef {
    Primitive(PrimitiveKind),
    Reference(String),
    ArrayOf(Box<TypeRef>),
}

impl TypeRef {
    /// Classify a type name: known primitives stay primitive,
    /// anything else is a model reference.
    pub fn from_name(name: &str) -> Self {
        match PrimitiveKind::from_name(name) {
            Some(kind) => TypeRef::Primitive(kind),
            None => TypeRef::Reference(name.to_string()),
        }
    }

    /// The model name this type refers to, if any, looking through
    /// array nesting.
    pub fn referenced_model(&self) -> Option<&str> {
        match self {
            TypeRef::Primitive(_) => None,
            TypeRef::Reference(name) => Some(name),
            TypeRef::ArrayOf(item) => item.referenced_model(),
        }
    }
}

/// HTTP verbs supported by operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl HttpMethod {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "GET" => Some(HttpMethod::Get),
            "POST" => Some(HttpMethod::Post),
            "PUT" => Some(HttpMethod::Put),
            "DELETE" => Some(HttpMethod::Delete),
            "PATCH" => Some(HttpMethod::Patch),
            "HEAD" => Some(HttpMethod::Head),
            "OPTIONS" => Some(HttpMethod::Options),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        }
    }
}

/// Where a parameter is attached to a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParamLocation {
    Path,
    Query,
    Body,
}

impl ParamLocation {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "path" => Some(ParamLocation::Path),
            "query" => Some(ParamLocation::Query),
            "body" => Some(ParamLocation::Body),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ParamLocation::Path => "path",
            ParamLocation::Query => "query",
            ParamLocation::Body => "body",
        }
    }
}

/// Split a `::`-separated namespace into its segments.
pub fn namespace_segments(namespace: &str) -> Vec<&str> {
    namespace.split("::").collect()
}

/// A namespace is valid when every segment is a plain identifier.
pub fn is_valid_namespace(namespace: &str) -> bool {
    !namespace.is_empty() && namespace.split("::").all(is_valid_segment)
}

fn is_valid_segment(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {
            chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_lookup() {
        assert_eq!(PrimitiveKind::from_name("integer"), Some(PrimitiveKind::Integer));
        assert_eq!(PrimitiveKind::from_name("dateTime"), Some(PrimitiveKind::DateTime));
        assert_eq!(PrimitiveKind::from_name("datetime"), None);
        assert_eq!(PrimitiveKind::from_name("Pet"), None);
    }

    #[test]
    fn test_type_ref_classification() {
        assert_eq!(
            TypeRef::from_name("string"),
            TypeRef::Primitive(PrimitiveKind::String)
        );
        assert_eq!(TypeRef::from_name("Pet"), TypeRef::Reference("Pet".to_string()));
    }

    #[test]
    fn test_referenced_model_through_arrays() {
        let ty = TypeRef::ArrayOf(Box::new(TypeRef::Reference("Pet".to_string())));
        assert_eq!(ty.referenced_model(), Some("Pet"));

        let ty = TypeRef::ArrayOf(Box::new(TypeRef::Primitive(PrimitiveKind::Long)));
        assert_eq!(ty.referenced_model(), None);
    }

    #[test]
    fn test_namespace_validation() {
        assert!(is_valid_namespace("fbs"));
        assert!(is_valid_namespace("fbs::model"));
        assert!(is_valid_namespace("_private::v2"));
        assert!(!is_valid_namespace(""));
        assert!(!is_valid_namespace("fbs::"));
        assert!(!is_valid_namespace("2fast"));
        assert!(!is_valid_namespace("fbs::my-model"));
    }
}
