//! Validated schema IR
//!
//! Built once per generation run by the converter and immutable
//! afterwards; the synthesizers only ever read these structures.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use swagen_common::{HttpMethod, ParamLocation, TypeRef};

/// Top-level listing of available resources
#[derive(Debug, Clone, Serialize)]
pub struct ResourceListing {
    pub base_path: String,
    pub resources: Vec<ResourceRef>,
}

/// One resource and where its declaration lives
#[derive(Debug, Clone, Serialize)]
pub struct ResourceRef {
    pub path: String,
    pub description: String,
}

/// Per-resource declaration of operations and models
#[derive(Debug, Clone, Serialize)]
pub struct ApiDeclaration {
    pub resource_path: String,
    pub description: Option<String>,
    pub groups: Vec<OperationGroup>,
    /// Keyed by model name; ordered so generation output is stable
    pub models: BTreeMap<String, Model>,
}

impl ApiDeclaration {
    /// Total operation count across all groups.
    pub fn operation_count(&self) -> usize {
        self.groups.iter().map(|g| g.operations.len()).sum()
    }
}

/// Operations sharing one endpoint path
#[derive(Debug, Clone, Serialize)]
pub struct OperationGroup {
    /// Endpoint path, possibly with `{param}` placeholders
    pub path: String,
    pub operations: Vec<Operation>,
}

/// One callable operation
#[derive(Debug, Clone, Serialize)]
pub struct Operation {
    /// Becomes the generated method name, verbatim
    pub nickname: String,
    pub method: HttpMethod,
    pub summary: Option<String>,
    pub notes: Option<String>,
    pub parameters: Vec<Parameter>,
    /// `None` is a void return
    pub return_type: Option<TypeRef>,
    pub response_messages: Vec<ResponseMessage>,
}

/// One operation parameter
#[derive(Debug, Clone, Serialize)]
pub struct Parameter {
    pub name: String,
    pub location: ParamLocation,
    pub ty: TypeRef,
    pub required: bool,
    /// Repeated-value parameter; binds as a list and encodes as
    /// repeated query pairs
    pub allow_multiple: bool,
    pub description: Option<String>,
}

/// Declared status-code mapping of an operation
#[derive(Debug, Clone, Serialize)]
pub struct ResponseMessage {
    pub code: u16,
    pub message: String,
    pub model: Option<String>,
}

/// A named data shape
#[derive(Debug, Clone, Serialize)]
pub struct Model {
    pub name: String,
    pub description: Option<String>,
    pub properties: Vec<Property>,
    /// Subset of property names; checked by the converter
    pub required: BTreeSet<String>,
}

/// One model property
#[derive(Debug, Clone, Serialize)]
pub struct Property {
    pub name: String,
    pub description: Option<String>,
    pub ty: TypeRef,
}
