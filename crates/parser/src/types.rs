//! Raw document types for the legacy description format
//!
//! These mirror the JSON shape one to one and stay permissive;
//! required-field and reference validation lives in the converter so
//! a broken document produces a schema error naming the offending
//! operation rather than a bare deserialization failure.

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::fmt;

/// Top-level resource listing document
#[derive(Debug, Clone, Deserialize)]
pub struct RawResourceListing {
    /// Base path declaration locations are given relative to
    #[serde(rename = "basePath")]
    pub base_path: String,

    /// Listed resources
    #[serde(default)]
    pub apis: Vec<RawResourceRef>,

    #[serde(rename = "apiVersion")]
    #[serde(default)]
    pub api_version: Option<String>,

    #[serde(rename = "swaggerVersion")]
    #[serde(default)]
    pub swagger_version: Option<String>,
}

/// One resource entry in the listing
#[derive(Debug, Clone, Deserialize)]
pub struct RawResourceRef {
    /// Declaration location, possibly carrying a `{format}` placeholder
    pub path: String,

    #[serde(default)]
    pub description: Option<String>,
}

/// Per-resource API declaration document
#[derive(Debug, Clone, Deserialize)]
pub struct RawApiDeclaration {
    #[serde(rename = "resourcePath")]
    #[serde(default)]
    pub resource_path: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Operation groups, one per endpoint path
    #[serde(default)]
    pub apis: Vec<RawApi>,

    /// Named data models
    #[serde(default)]
    pub models: BTreeMap<String, RawModel>,
}

/// Endpoint path with its operations
#[derive(Debug, Clone, Deserialize)]
pub struct RawApi {
    /// Endpoint path, possibly carrying `{param}` placeholders
    pub path: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub operations: Vec<RawOperation>,
}

/// One callable operation
#[derive(Debug, Clone, Deserialize)]
pub struct RawOperation {
    /// HTTP verb
    #[serde(default)]
    pub method: Option<String>,

    /// Declared method name
    #[serde(default)]
    pub nickname: Option<String>,

    #[serde(default)]
    pub summary: Option<String>,

    #[serde(default)]
    pub notes: Option<String>,

    /// Return type name; absent or "void" means no return value
    #[serde(rename = "type")]
    #[serde(default)]
    pub data_type: Option<String>,

    /// Item type when the return type is "array"
    #[serde(default)]
    pub items: Option<RawItems>,

    #[serde(default)]
    pub parameters: Vec<RawParameter>,

    #[serde(rename = "responseMessages")]
    #[serde(default)]
    pub response_messages: Vec<RawResponseMessage>,
}

/// One operation parameter
#[derive(Debug, Clone, Deserialize)]
pub struct RawParameter {
    #[serde(default)]
    pub name: Option<String>,

    /// Location: "path", "query" or "body"
    #[serde(rename = "paramType")]
    #[serde(default)]
    pub param_type: Option<String>,

    #[serde(rename = "type")]
    #[serde(default)]
    pub data_type: Option<String>,

    /// Item type when the parameter type is "array"
    #[serde(default)]
    pub items: Option<RawItems>,

    #[serde(default)]
    pub required: bool,

    /// Whether the parameter accepts repeated values
    #[serde(rename = "allowMultiple")]
    #[serde(default)]
    pub allow_multiple: bool,

    #[serde(default)]
    pub description: Option<String>,
}

/// Declared response status mapping
#[derive(Debug, Clone, Deserialize)]
pub struct RawResponseMessage {
    pub code: u16,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(rename = "responseModel")]
    #[serde(default)]
    pub response_model: Option<String>,
}

/// Named data model
#[derive(Debug, Clone, Deserialize)]
pub struct RawModel {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Properties in document order
    #[serde(default)]
    #[serde(deserialize_with = "ordered_properties")]
    pub properties: Vec<(String, RawProperty)>,

    /// Names of required properties
    #[serde(default)]
    pub required: Vec<String>,
}

/// Deserialize a properties object into entries in document order. A
/// map collection would sort the keys and lose the declared field
/// order, which generated structs are expected to follow.
fn ordered_properties<'de, D>(deserializer: D) -> Result<Vec<(String, RawProperty)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct EntriesVisitor;

    impl<'de> Visitor<'de> for EntriesVisitor {
        type Value = Vec<(String, RawProperty)>;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a map of model properties")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut entries = Vec::new();
            while let Some(entry) = map.next_entry()? {
                entries.push(entry);
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(EntriesVisitor)
}

/// One model property
#[derive(Debug, Clone, Deserialize)]
pub struct RawProperty {
    #[serde(rename = "type")]
    #[serde(default)]
    pub data_type: Option<String>,

    /// Direct model reference, alternative to `type`
    #[serde(rename = "$ref")]
    #[serde(default)]
    pub ref_type: Option<String>,

    #[serde(default)]
    pub items: Option<RawItems>,

    #[serde(default)]
    pub description: Option<String>,
}

/// Array item type, written as an object or a bare name
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawItems {
    Reference {
        #[serde(rename = "$ref")]
        ref_type: String,
    },
    Typed {
        #[serde(rename = "type")]
        data_type: String,
    },
    Name(String),
}

impl RawItems {
    /// The item type name, whichever way it was written.
    pub fn type_name(&self) -> &str {
        match self {
            RawItems::Reference { ref_type } => ref_type,
            RawItems::Typed { data_type } => data_type,
            RawItems::Name(name) => name,
        }
    }
}
